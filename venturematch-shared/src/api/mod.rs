//! # Backend API
//!
//! [`ApiClient`] is the only way the clients talk to the REST backend. It
//! resolves paths against the configured base URL, attaches the session token
//! as a bearer credential and turns non-2xx answers into [`ApiError::Status`]
//! carrying the backend's `message` when it sent one.
//!
//! The wire exchange itself sits behind the [`Transport`] trait so the panels
//! and the auth gateway can be driven by scripted transports in tests.

pub mod errors;
pub mod http;
#[cfg(test)]
pub mod test_implementations;

pub use errors::{ApiError, ApiResult};
pub use http::HttpTransport;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use strum::{AsRefStr, Display};
use tracing::debug;

use crate::models::ErrorResponse;
use crate::session::SessionStore;

/// Default backend location.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// HTTP verbs the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// One request to the backend, relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            bearer: None,
            body: None,
        }
    }

    /// Attaches a JSON body.
    ///
    /// # Errors
    /// Returns [`ApiError::Encode`] if `body` cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body).map_err(|err| ApiError::encode(err.to_string()))?);
        Ok(self)
    }

    #[must_use]
    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

/// Raw backend answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    /// [`ApiError::EmptyBody`] for a blank body, [`ApiError::Decode`] for
    /// anything that does not parse into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        if self.body.trim().is_empty() {
            return Err(ApiError::EmptyBody);
        }
        serde_json::from_str(&self.body).map_err(ApiError::from)
    }

    /// Converts a non-2xx answer into [`ApiError::Status`].
    ///
    /// # Errors
    /// Returns the status error for any non-success status.
    pub fn error_for_status(self) -> ApiResult<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(ApiError::status(
                self.status,
                ErrorResponse::message_from_body(&self.body),
            ))
        }
    }
}

/// Carries an [`ApiRequest`] to the backend.
#[async_trait(?Send)]
pub trait Transport: fmt::Debug {
    /// Sends the request and returns whatever the backend answered.
    ///
    /// Non-2xx statuses are not errors at this level.
    ///
    /// # Errors
    /// Returns [`ApiError::Transport`] when no response was received.
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

/// Session-aware client for the REST backend.
pub struct ApiClient<T: Transport = HttpTransport> {
    transport: Arc<T>,
    session: SessionStore,
}

impl<T: Transport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            session: self.session.clone(),
        }
    }
}

impl<T: Transport> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("transport", &self.transport)
            .field("session", &self.session)
            .finish()
    }
}

impl<T: Transport> PartialEq for ApiClient<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.transport, &other.transport) && self.session == other.session
    }
}

impl ApiClient<HttpTransport> {
    /// Client for the backend at `base_url`.
    pub fn http(base_url: &str, session: SessionStore) -> Self {
        Self::new(HttpTransport::new(base_url), session)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: SessionStore) -> Self {
        Self {
            transport: Arc::new(transport),
            session,
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request` without credentials and checks the status.
    ///
    /// # Errors
    /// Transport failures and non-2xx statuses.
    pub async fn send_anonymous(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.dispatch(request.bearer(None)).await
    }

    /// Sends `request` with the session token, if there is one.
    ///
    /// A missing token is not checked here; the backend decides.
    ///
    /// # Errors
    /// Transport failures and non-2xx statuses.
    pub async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let token = self.session.get();
        self.dispatch(request.bearer(token)).await
    }

    async fn dispatch(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        debug!(%method, path = %path, status = response.status.as_u16(), "backend responded");
        response.error_for_status()
    }

    /// `GET path`, parsed as `R`.
    ///
    /// # Errors
    /// Transport, status and decode failures, or [`ApiError::EmptyBody`].
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        self.send(ApiRequest::new(Method::Get, path)).await?.json()
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    /// Encode, transport and status failures.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse> {
        self.send(ApiRequest::new(Method::Post, path).json(body)?)
            .await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    /// Encode, transport and status failures.
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse> {
        self.send(ApiRequest::new(Method::Put, path).json(body)?)
            .await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    /// Transport and status failures.
    pub async fn delete(&self, path: &str) -> ApiResult<ApiResponse> {
        self.send(ApiRequest::new(Method::Delete, path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::test_implementations::ScriptedTransport;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn token_is_attached_when_present() {
        let session = SessionStore::in_memory();
        let client = ApiClient::new(ScriptedTransport::new(), session.clone());
        client.transport().push_json(StatusCode::OK, &json!([]));
        client.transport().push_json(StatusCode::OK, &json!([]));

        let _: Vec<Value> = client.get_json("/blogs").await.unwrap();
        session.set("t1").unwrap();
        let _: Vec<Value> = client.get_json("/blogs").await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests[0].bearer, None);
        assert_eq!(requests[1].bearer.as_deref(), Some("t1"));
        assert_eq!(requests[1].method, Method::Get);
        assert_eq!(requests[1].path, "/blogs");
    }

    #[tokio::test]
    async fn anonymous_requests_never_carry_the_token() {
        let session = SessionStore::in_memory();
        session.set("t1").unwrap();
        let client = ApiClient::new(ScriptedTransport::new(), session);
        client.transport().push_json(StatusCode::OK, &json!({}));

        client
            .send_anonymous(ApiRequest::new(Method::Post, "/login"))
            .await
            .unwrap();
        assert_eq!(client.transport().requests()[0].bearer, None);
    }

    #[tokio::test]
    async fn non_success_maps_to_status_error() {
        let client = ApiClient::new(ScriptedTransport::new(), SessionStore::in_memory());
        client
            .transport()
            .push_json(StatusCode::BAD_REQUEST, &json!({"message": "Title is required"}));
        client
            .transport()
            .push_raw(StatusCode::BAD_GATEWAY, "<html>oops</html>");

        let err = client.post_json("/blogs", &json!({})).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::status(StatusCode::BAD_REQUEST, Some("Title is required".into()))
        );

        let err = client.delete("/blogs/1").await.unwrap_err();
        assert_eq!(err, ApiError::status(StatusCode::BAD_GATEWAY, None));
    }

    #[tokio::test]
    async fn empty_and_garbled_bodies() {
        let client = ApiClient::new(ScriptedTransport::new(), SessionStore::in_memory());
        client.transport().push_raw(StatusCode::OK, "");
        client.transport().push_raw(StatusCode::OK, "not json");

        let err = client.get_json::<Value>("/entrepreneurs/1").await.unwrap_err();
        assert_eq!(err, ApiError::EmptyBody);
        let err = client.get_json::<Value>("/entrepreneurs/1").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn request_bodies_are_json() {
        let client = ApiClient::new(ScriptedTransport::new(), SessionStore::in_memory());
        client.transport().push_raw(StatusCode::CREATED, "");

        client
            .put_json("/projects/3", &json!({"project_name": "Solar"}))
            .await
            .unwrap();
        let request = &client.transport().requests()[0];
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.body, Some(json!({"project_name": "Solar"})));
    }

    #[test]
    fn method_names() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
    }
}
