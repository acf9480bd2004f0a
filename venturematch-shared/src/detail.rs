//! # Detail Views
//!
//! A detail view is one record plus the rows of related collections that
//! point at it, and whether the viewer owns the record. Related collections
//! are fetched whole and filtered here; the backend has no per-parent
//! endpoints.

use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, Transport};
use crate::models::{
    Education, Entrepreneur, Experience, Expertise, InterestAndValue, InvestmentPortfolio,
    Investor, Project,
};
use crate::resource::Resource;
use crate::session::is_owner;

/// Message shown when a view needs a session and there is none.
pub const NO_TOKEN_FOUND: &str = "No token found";

/// Failure to assemble a detail view.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetailError {
    #[error("No token found")]
    NoToken,

    #[error("{message}")]
    Request { message: String, source: ApiError },
}

impl DetailError {
    fn request(source: ApiError, fallback: &str) -> Self {
        Self::Request {
            message: source.message_or(fallback),
            source,
        }
    }
}

/// Result type alias for detail loaders.
pub type DetailResult<T> = Result<T, DetailError>;

/// An investor with their interests and past investments.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestorDetail {
    pub investor: Investor,
    pub interests: Vec<InterestAndValue>,
    pub portfolios: Vec<InvestmentPortfolio>,
    /// The viewer's token was issued to the profile's account.
    pub is_owner: bool,
}

/// An entrepreneur with their background rows.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrepreneurDetail {
    pub entrepreneur: Entrepreneur,
    pub expertise: Vec<Expertise>,
    pub education: Vec<Education>,
    pub experiences: Vec<Experience>,
    pub is_owner: bool,
}

/// Loads `/investors/:id` and the interest and portfolio rows that belong to it.
///
/// # Errors
/// [`DetailError::NoToken`] without a session; otherwise the first failed fetch.
pub async fn load_investor_detail<T: Transport>(
    client: &ApiClient<T>,
    id: i64,
) -> DetailResult<InvestorDetail> {
    let token = client.session().get().ok_or(DetailError::NoToken)?;

    let investor: Investor = client
        .get_json(&Investor::item_path(id))
        .await
        .map_err(|err| DetailError::request(err, "Failed to fetch investor details"))?;
    let owner = is_owner(Some(&token), investor.owner_id());
    let investor_id = investor.investor_id.unwrap_or(id);

    let interests: Vec<InterestAndValue> = client
        .get_json(InterestAndValue::COLLECTION_PATH)
        .await
        .map_err(|err| DetailError::request(err, "Failed to fetch interests"))?;
    let portfolios: Vec<InvestmentPortfolio> = client
        .get_json(InvestmentPortfolio::COLLECTION_PATH)
        .await
        .map_err(|err| DetailError::request(err, "Failed to fetch portfolios"))?;

    let interests: Vec<_> = interests
        .into_iter()
        .filter(|interest| interest.investor_id == Some(investor_id))
        .collect();
    let portfolios: Vec<_> = portfolios
        .into_iter()
        .filter(|portfolio| portfolio.investor_id == Some(investor_id))
        .collect();
    debug!(
        investor_id,
        interests = interests.len(),
        portfolios = portfolios.len(),
        is_owner = owner,
        "loaded investor detail"
    );

    Ok(InvestorDetail {
        investor,
        interests,
        portfolios,
        is_owner: owner,
    })
}

/// Loads `/entrepreneurs/:id` and the background rows that belong to it.
///
/// An empty body is an error. Background collections that fail to load are
/// shown as empty.
///
/// # Errors
/// The failed profile fetch.
pub async fn load_entrepreneur_detail<T: Transport>(
    client: &ApiClient<T>,
    id: i64,
) -> DetailResult<EntrepreneurDetail> {
    let entrepreneur: Entrepreneur = client
        .get_json(&Entrepreneur::item_path(id))
        .await
        .map_err(|err| DetailError::request(err, "Failed to load entrepreneur details"))?;
    let entrepreneur_id = entrepreneur.entrepreneur_id.unwrap_or(id);
    let token = client.session().get();

    let expertise = related(client, entrepreneur_id, |row: &Expertise| row.entrepreneur_id).await;
    let education = related(client, entrepreneur_id, |row: &Education| row.entrepreneur_id).await;
    let experiences =
        related(client, entrepreneur_id, |row: &Experience| row.entrepreneur_id).await;

    Ok(EntrepreneurDetail {
        is_owner: is_owner(token.as_deref(), entrepreneur.owner_id()),
        entrepreneur,
        expertise,
        education,
        experiences,
    })
}

/// Loads `/projects/:id`.
///
/// # Errors
/// The failed fetch.
pub async fn load_project<T: Transport>(client: &ApiClient<T>, id: i64) -> DetailResult<Project> {
    client
        .get_json(&Project::item_path(id))
        .await
        .map_err(|err| DetailError::request(err, "Failed to load project details"))
}

async fn related<R, T>(
    client: &ApiClient<T>,
    parent_id: i64,
    parent: impl Fn(&R) -> Option<i64>,
) -> Vec<R>
where
    R: Resource,
    T: Transport,
{
    match client.get_json::<Vec<R>>(R::COLLECTION_PATH).await {
        Ok(rows) => rows
            .into_iter()
            .filter(|row| parent(row) == Some(parent_id))
            .collect(),
        Err(err) => {
            warn!(resource = R::NAME, error = %err, "failed to fetch related rows");
            Vec::new()
        }
    }
}
