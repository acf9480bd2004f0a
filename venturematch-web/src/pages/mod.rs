mod blogs;
mod dashboard;
mod entrepreneurs;
mod error;
mod home;
mod interests;
mod investors;
pub mod login;
mod portfolios;
pub mod profiles;
mod project_detail;
mod projects;
mod register;

pub use blogs::{BlogFormPage, BlogsPage};
pub use dashboard::DashboardPage;
pub use entrepreneurs::EntrepreneurDetailPage;
pub use error::ErrorPage;
pub use home::HomePage;
pub use interests::InterestsPage;
pub use investors::InvestorDetailPage;
pub use login::LoginPage;
pub use portfolios::PortfoliosPage;
pub use profiles::{ProfileFormPage, ProfileListPage};
pub use project_detail::ProjectDetailPage;
pub use projects::ProjectsPage;
pub use register::RegisterPage;
