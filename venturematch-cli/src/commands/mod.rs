pub mod completion;
pub mod config;
pub mod detail;
pub mod resource;
pub mod session;
