#![cfg_attr(not(test), forbid(unsafe_code))]
//! Shared building blocks for the VentureMatch clients.
//!
//! The web application and the command-line client both sit on top of the
//! same pieces: a [`session::SessionStore`] holding the bearer token, the
//! [`auth::AuthGateway`] that fills it, the [`guard::RouteGuard`] that reads
//! it, and the generic [`collection`] machinery behind every resource panel.

pub mod api;
pub mod auth;
pub mod collection;
pub mod config;
pub mod detail;
pub mod guard;
pub mod models;
pub mod resource;
pub mod session;
