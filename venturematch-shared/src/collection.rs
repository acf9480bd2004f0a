//! # Remote Collections
//!
//! Every resource panel runs the same loop: fetch the list, submit a form,
//! re-fetch on success, keep the list and show an inline error on failure.
//! [`PanelState`] is that loop's state machine, [`ResourceApi`] its requests,
//! and [`RemoteCollection`] ties the two together for callers that own both.
//!
//! Displayed items only ever change through a completed fetch.

use std::marker::PhantomData;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, HttpTransport, Transport};
use crate::resource::Resource;

/// Where a panel's list stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CollectionStatus<R> {
    #[default]
    Idle,
    Loading,
    Ready(Vec<R>),
    Errored(String),
}

impl<R> CollectionStatus<R> {
    /// The loaded items; empty unless [`CollectionStatus::Ready`].
    #[must_use]
    pub fn items(&self) -> &[R] {
        match self {
            Self::Ready(items) => items,
            _ => &[],
        }
    }
}

/// Events a panel goes through.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction<R> {
    ListStarted,
    ListLoaded(Vec<R>),
    ListFailed(String),
    MutationStarted,
    MutationFailed(String),
    MutationCancelled,
    DismissError,
}

/// A panel's list plus the error shown beside it.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState<R> {
    pub status: CollectionStatus<R>,
    /// A request is outstanding.
    pub in_flight: bool,
    /// Failure of the last create, update or delete.
    pub last_error: Option<String>,
}

impl<R> Default for PanelState<R> {
    fn default() -> Self {
        Self {
            status: CollectionStatus::Idle,
            in_flight: false,
            last_error: None,
        }
    }
}

impl<R> PanelState<R> {
    /// Applies one event.
    ///
    /// Re-fetching an already loaded list keeps it on screen until the new
    /// one arrives.
    pub fn apply(&mut self, action: PanelAction<R>) {
        match action {
            PanelAction::ListStarted => {
                if !matches!(self.status, CollectionStatus::Ready(_)) {
                    self.status = CollectionStatus::Loading;
                }
                self.in_flight = true;
            }
            PanelAction::ListLoaded(items) => {
                self.status = CollectionStatus::Ready(items);
                self.in_flight = false;
            }
            PanelAction::ListFailed(message) => {
                self.status = CollectionStatus::Errored(message);
                self.in_flight = false;
            }
            PanelAction::MutationStarted => {
                self.in_flight = true;
                self.last_error = None;
            }
            PanelAction::MutationFailed(message) => {
                self.in_flight = false;
                self.last_error = Some(message);
            }
            PanelAction::MutationCancelled => self.in_flight = false,
            PanelAction::DismissError => self.last_error = None,
        }
    }

    /// Consuming form of [`PanelState::apply`].
    #[must_use]
    pub fn reduce(mut self, action: PanelAction<R>) -> Self {
        self.apply(action);
        self
    }

    #[must_use]
    pub fn items(&self) -> &[R] {
        self.status.items()
    }
}

/// Interactive yes/no question asked before destructive requests.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Outcome of [`ResourceApi::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Cancelled,
    Deleted,
}

/// Failure of a panel operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    /// A required form field was left blank; nothing was sent.
    #[error("Please fill in the {field} field")]
    MissingField { field: &'static str },

    /// The backend exchange failed.
    #[error("{message}")]
    Request { message: String, source: ApiError },
}

impl PanelError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    fn request(source: ApiError, fallback: &str) -> Self {
        Self::Request {
            message: source.message_or(fallback),
            source,
        }
    }

    /// Underlying backend error, if the request was sent.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Request { source, .. } => Some(source),
            Self::MissingField { .. } => None,
        }
    }
}

/// Result type alias for panel operations.
pub type PanelResult<T> = Result<T, PanelError>;

/// Stateless requests for one resource type.
pub struct ResourceApi<R: Resource, T: Transport = HttpTransport> {
    client: ApiClient<T>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, T: Transport> Clone for ResourceApi<R, T> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<R: Resource, T: Transport> PartialEq for ResourceApi<R, T> {
    fn eq(&self, other: &Self) -> bool {
        self.client == other.client
    }
}

impl<R: Resource, T: Transport> std::fmt::Debug for ResourceApi<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceApi")
            .field("resource", &R::NAME)
            .field("client", &self.client)
            .finish()
    }
}

impl<R: Resource, T: Transport> ResourceApi<R, T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Prompt shown before deleting a record.
    #[must_use]
    pub fn delete_prompt() -> String {
        format!("Are you sure you want to delete this {}?", R::NAME)
    }

    /// Fetches the whole collection.
    ///
    /// # Errors
    /// [`PanelError::Request`] when the fetch fails.
    pub async fn list(&self) -> PanelResult<Vec<R>> {
        let items: Vec<R> = self
            .client
            .get_json(R::COLLECTION_PATH)
            .await
            .map_err(|err| {
                warn!(resource = R::NAME, error = %err, "failed to fetch collection");
                PanelError::request(err, &format!("Failed to fetch {} list", R::NAME))
            })?;
        debug!(resource = R::NAME, count = items.len(), "fetched collection");
        Ok(items)
    }

    /// Fetches one record.
    ///
    /// # Errors
    /// [`PanelError::Request`] when the fetch fails or the body is empty.
    pub async fn get(&self, id: i64) -> PanelResult<R> {
        self.client
            .get_json(&R::item_path(id))
            .await
            .map_err(|err| PanelError::request(err, &format!("Failed to fetch {}", R::NAME)))
    }

    /// Validates and posts a new record.
    ///
    /// # Errors
    /// [`PanelError::MissingField`] before sending, or [`PanelError::Request`].
    pub async fn create(&self, draft: &R::Draft) -> PanelResult<()> {
        if let Some(field) = R::missing_field(draft) {
            return Err(PanelError::missing_field(field));
        }
        self.client
            .post_json(R::COLLECTION_PATH, draft)
            .await
            .map_err(|err| PanelError::request(err, &format!("Failed to add {}", R::NAME)))?;
        info!(resource = R::NAME, "created");
        Ok(())
    }

    /// Validates and puts changes to an existing record.
    ///
    /// # Errors
    /// [`PanelError::MissingField`] before sending, or [`PanelError::Request`].
    pub async fn update(&self, id: i64, draft: &R::Draft) -> PanelResult<()> {
        if let Some(field) = R::missing_field_for_update(draft) {
            return Err(PanelError::missing_field(field));
        }
        self.client
            .put_json(&R::update_path(id), draft)
            .await
            .map_err(|err| PanelError::request(err, &format!("Failed to update {}", R::NAME)))?;
        info!(resource = R::NAME, id, "updated");
        Ok(())
    }

    /// Deletes a record once `confirm` agrees.
    ///
    /// # Errors
    /// [`PanelError::Request`] when the delete fails.
    pub async fn remove(&self, id: i64, confirm: &dyn Confirm) -> PanelResult<RemoveOutcome> {
        if !confirm.confirm(&Self::delete_prompt()) {
            debug!(resource = R::NAME, id, "delete cancelled");
            return Ok(RemoveOutcome::Cancelled);
        }
        self.client
            .delete(&R::item_path(id))
            .await
            .map_err(|err| PanelError::request(err, &format!("Failed to delete {}", R::NAME)))?;
        info!(resource = R::NAME, id, "deleted");
        Ok(RemoveOutcome::Deleted)
    }
}

/// A [`PanelState`] driven by its own [`ResourceApi`].
#[derive(Debug)]
pub struct RemoteCollection<R: Resource, T: Transport = HttpTransport> {
    api: ResourceApi<R, T>,
    state: PanelState<R>,
}

impl<R: Resource, T: Transport> RemoteCollection<R, T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self {
            api: ResourceApi::new(client),
            state: PanelState::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &PanelState<R> {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> &CollectionStatus<R> {
        &self.state.status
    }

    #[must_use]
    pub fn items(&self) -> &[R] {
        self.state.items()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    #[must_use]
    pub fn api(&self) -> &ResourceApi<R, T> {
        &self.api
    }

    /// Fetches the collection into the state.
    pub async fn list(&mut self) -> &CollectionStatus<R> {
        self.state.apply(PanelAction::ListStarted);
        match self.api.list().await {
            Ok(items) => self.state.apply(PanelAction::ListLoaded(items)),
            Err(err) => self.state.apply(PanelAction::ListFailed(err.to_string())),
        }
        &self.state.status
    }

    /// Creates a record and re-fetches on success.
    ///
    /// # Errors
    /// The failure, which is also kept as `last_error`.
    pub async fn create(&mut self, draft: &R::Draft) -> PanelResult<()> {
        self.state.apply(PanelAction::MutationStarted);
        let result = self.api.create(draft).await;
        self.settle(result).await
    }

    /// Updates a record and re-fetches on success.
    ///
    /// # Errors
    /// The failure, which is also kept as `last_error`.
    pub async fn update(&mut self, id: i64, draft: &R::Draft) -> PanelResult<()> {
        self.state.apply(PanelAction::MutationStarted);
        let result = self.api.update(id, draft).await;
        self.settle(result).await
    }

    /// Deletes a record after confirmation and re-fetches on success.
    ///
    /// # Errors
    /// The failure, which is also kept as `last_error`.
    pub async fn remove(&mut self, id: i64, confirm: &dyn Confirm) -> PanelResult<RemoveOutcome> {
        self.state.apply(PanelAction::MutationStarted);
        match self.api.remove(id, confirm).await {
            Ok(RemoveOutcome::Cancelled) => {
                self.state.apply(PanelAction::MutationCancelled);
                Ok(RemoveOutcome::Cancelled)
            }
            Ok(RemoveOutcome::Deleted) => {
                self.list().await;
                Ok(RemoveOutcome::Deleted)
            }
            Err(err) => {
                self.state.apply(PanelAction::MutationFailed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn settle(&mut self, result: PanelResult<()>) -> PanelResult<()> {
        match result {
            Ok(()) => {
                self.list().await;
                Ok(())
            }
            Err(err) => {
                self.state.apply(PanelAction::MutationFailed(err.to_string()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_implementations::ScriptedTransport;
    use crate::api::Method;
    use crate::models::{Blog, BlogDraft, Project, ProjectDraft};
    use crate::session::SessionStore;
    use reqwest::StatusCode;
    use serde_json::json;

    fn collection<R: Resource>() -> RemoteCollection<R, ScriptedTransport> {
        let session = SessionStore::in_memory();
        session.set("t1").unwrap();
        RemoteCollection::new(ApiClient::new(ScriptedTransport::new(), session))
    }

    fn transport<R: Resource>(collection: &RemoteCollection<R, ScriptedTransport>) -> &ScriptedTransport {
        collection.api().client().transport()
    }

    fn draft() -> BlogDraft {
        BlogDraft {
            title: "Hello".into(),
            content: "World".into(),
            category: "news".into(),
        }
    }

    #[test]
    fn state_machine() {
        let state = PanelState::<u8>::default().reduce(PanelAction::ListStarted);
        assert_eq!(state.status, CollectionStatus::Loading);
        let state = state.reduce(PanelAction::ListLoaded(vec![1]));
        assert_eq!(state.items(), &[1]);

        let state = state
            .reduce(PanelAction::MutationStarted)
            .reduce(PanelAction::MutationFailed("nope".into()));
        assert_eq!(state.items(), &[1]);
        assert_eq!(state.last_error.as_deref(), Some("nope"));
        assert!(!state.in_flight);

        let state = state.reduce(PanelAction::ListStarted);
        assert_eq!(state.items(), &[1], "refresh keeps the old list visible");
        let state = state
            .reduce(PanelAction::ListFailed("down".into()))
            .reduce(PanelAction::DismissError);
        assert_eq!(state.status, CollectionStatus::Errored("down".into()));
        assert_eq!(state.last_error, None);
    }

    #[tokio::test]
    async fn empty_list_is_ready() {
        let mut blogs = collection::<Blog>();
        transport(&blogs).push_json(StatusCode::OK, &json!([]));
        assert_eq!(blogs.list().await, &CollectionStatus::Ready(vec![]));
        assert_eq!(transport(&blogs).requests()[0].bearer.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn null_fields_do_not_fail_the_list() {
        let mut blogs = collection::<Blog>();
        transport(&blogs).push_json(
            StatusCode::OK,
            &json!([
                {"blog_id": 1, "title": "A", "content": "x", "category": null},
                {"id": 2, "blog_id": 2, "title": null, "content": "y", "category": "news"}
            ]),
        );

        let CollectionStatus::Ready(items) = blogs.list().await else {
            panic!("list should load");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, "");
        assert_eq!(items[1].blog_id, Some(2));
        assert_eq!(items[1].title, "");
    }

    #[tokio::test]
    async fn list_failure_is_errored() {
        let mut blogs = collection::<Blog>();
        transport(&blogs).push_raw(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(
            blogs.list().await,
            &CollectionStatus::Errored("Failed to fetch blog list".into())
        );
    }

    #[tokio::test]
    async fn create_then_refetch_contains_new_item() {
        let mut blogs = collection::<Blog>();
        transport(&blogs).push_json(StatusCode::OK, &json!([]));
        transport(&blogs).push_json(StatusCode::CREATED, &json!({"blog_id": 1}));
        transport(&blogs).push_json(
            StatusCode::OK,
            &json!([{"blog_id": 1, "title": "Hello", "content": "World", "category": "news"}]),
        );

        blogs.list().await;
        blogs.create(&draft()).await.unwrap();

        assert_eq!(blogs.items().len(), 1);
        assert_eq!(blogs.items()[0].title, "Hello");
        assert_eq!(blogs.last_error(), None);
        let requests = transport(&blogs).requests();
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(requests[1].path, "/blogs");
        assert_eq!(requests[2].method, Method::Get);
    }

    #[tokio::test]
    async fn missing_field_sends_nothing() {
        let mut projects = collection::<Project>();
        let err = projects
            .create(&ProjectDraft {
                project_name: "Solar".into(),
                ..ProjectDraft::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, PanelError::missing_field("short description"));
        assert_eq!(transport(&projects).request_count(), 0);
        assert_eq!(
            projects.last_error(),
            Some("Please fill in the short description field")
        );
    }

    #[tokio::test]
    async fn failed_create_keeps_list_and_reports() {
        let mut blogs = collection::<Blog>();
        transport(&blogs).push_json(StatusCode::OK, &json!([{"blog_id": 4, "title": "Old"}]));
        transport(&blogs).push_json(StatusCode::BAD_REQUEST, &json!({"message": "Duplicate title"}));

        blogs.list().await;
        let err = blogs.create(&draft()).await.unwrap_err();

        assert_eq!(err.to_string(), "Duplicate title");
        assert_eq!(blogs.items()[0].blog_id, Some(4));
        assert_eq!(blogs.last_error(), Some("Duplicate title"));
        assert!(!blogs.state().in_flight);
        assert_eq!(transport(&blogs).request_count(), 2);
    }

    #[tokio::test]
    async fn failed_create_without_message_uses_fallback() {
        let mut blogs = collection::<Blog>();
        transport(&blogs).push_unreachable();
        let err = blogs.create(&draft()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to add blog");
        assert!(matches!(err.api_error(), Some(ApiError::Transport { .. })));
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let mut blogs = collection::<Blog>();
        transport(&blogs).push_json(StatusCode::OK, &json!([{"blog_id": 4}]));
        blogs.list().await;

        let asked = std::cell::RefCell::new(String::new());
        let decline = |prompt: &str| {
            asked.replace(prompt.to_string());
            false
        };
        let outcome = blogs.remove(4, &decline).await.unwrap();

        assert_eq!(outcome, RemoveOutcome::Cancelled);
        assert_eq!(asked.into_inner(), "Are you sure you want to delete this blog?");
        assert_eq!(transport(&blogs).request_count(), 1);
        assert_eq!(blogs.items().len(), 1);
        assert!(!blogs.state().in_flight);
    }

    #[tokio::test]
    async fn confirmed_delete_refetches_without_item() {
        let mut blogs = collection::<Blog>();
        transport(&blogs).push_json(StatusCode::OK, &json!([{"blog_id": 4}, {"blog_id": 5}]));
        transport(&blogs).push_raw(StatusCode::NO_CONTENT, "");
        transport(&blogs).push_json(StatusCode::OK, &json!([{"blog_id": 5}]));

        blogs.list().await;
        let outcome = blogs.remove(4, &|_: &str| true).await.unwrap();

        assert_eq!(outcome, RemoveOutcome::Deleted);
        assert!(blogs.items().iter().all(|blog| blog.blog_id != Some(4)));
        let requests = transport(&blogs).requests();
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].path, "/blogs/4");
    }

    #[tokio::test]
    async fn failed_delete_keeps_item() {
        let mut blogs = collection::<Blog>();
        transport(&blogs).push_json(StatusCode::OK, &json!([{"blog_id": 4}]));
        transport(&blogs).push_json(StatusCode::FORBIDDEN, &json!({"message": "Not yours"}));

        blogs.list().await;
        blogs.remove(4, &|_: &str| true).await.unwrap_err();
        assert_eq!(blogs.items().len(), 1);
        assert_eq!(blogs.last_error(), Some("Not yours"));
    }

    #[tokio::test]
    async fn update_puts_to_update_path() {
        let mut projects = collection::<Project>();
        transport(&projects).push_raw(StatusCode::OK, "");
        transport(&projects).push_json(StatusCode::OK, &json!([]));
        let draft = ProjectDraft {
            project_name: "Solar".into(),
            short_description: "Panels".into(),
            target_sector: "energy".into(),
            stage: "seed".into(),
            budget_needed: "1000".into(),
            revenue_model: "SaaS".into(),
        };

        projects.update(3, &draft).await.unwrap();
        let request = &transport(&projects).requests()[0];
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/projects/3");
        assert_eq!(request.body.as_ref().unwrap()["budget_needed"], "1000");
    }

    #[tokio::test]
    async fn listing_twice_is_stable() {
        let mut blogs = collection::<Blog>();
        let body = json!([{"blog_id": 1, "title": "A"}, {"blog_id": 2, "title": "B"}]);
        transport(&blogs).push_json(StatusCode::OK, &body);
        transport(&blogs).push_json(StatusCode::OK, &body);

        let first = blogs.list().await.clone();
        let second = blogs.list().await.clone();
        assert_eq!(first, second);
    }
}
