pub mod auth;
pub mod background;
pub mod blog;
pub mod errors;
pub mod interest;
pub mod lenient;
pub mod portfolio;
pub mod profile;
pub mod project;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, RegistrationForm, TokenClaims, UserRole};
pub use background::{Education, Experience, Expertise};
pub use blog::{Blog, BlogDraft};
pub use errors::ErrorResponse;
pub use interest::{InterestAndValue, InterestDraft};
pub use portfolio::{InvestmentPortfolio, PortfolioDraft};
pub use profile::{
    Entrepreneur, EntrepreneurDraft, IMAGE_TOO_LARGE, Investor, InvestorDraft,
    MAX_PROFILE_IMAGE_BYTES, check_image_size, image_data_url,
};
pub use project::{Project, ProjectDraft};
