//! # Auth Gateway
//!
//! Exchanges credentials for a session token. A successful login or
//! registration stores the token in the [`SessionStore`]; any failure leaves
//! the session exactly as it was. Navigation after the exchange is the
//! caller's business.

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError, ApiRequest, HttpTransport, Method, Transport};
use crate::models::{AuthResponse, LoginRequest, RegistrationForm};
use crate::session::{SessionStore, StorageError};

/// Fallback when the backend rejects credentials without saying why.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";
/// Fallback when a 2xx answer carries no usable token.
pub const NO_TOKEN_RECEIVED: &str = "No token received";
/// Fallback when the backend cannot be reached.
pub const UNABLE_TO_CONNECT: &str = "Unable to connect to server";
/// Validation message for an incomplete login form.
pub const MISSING_CREDENTIALS: &str = "Please enter both username and password";
/// Validation message for a mismatched password confirmation.
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Result type alias for gateway operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Failure of a login, registration or logout.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The exchange failed, whatever the cause.
    #[error("{message}")]
    AuthenticationFailed { message: String },

    /// The form was rejected before anything was sent.
    #[error("{message}")]
    Validation { message: String },

    /// The token could not be written to or removed from storage.
    #[error(transparent)]
    Session(#[from] StorageError),
}

impl AuthError {
    pub fn authentication_failed<T: Into<String>>(message: T) -> Self {
        Self::AuthenticationFailed {
            message: message.into(),
        }
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    fn from_api(err: &ApiError) -> Self {
        match err {
            ApiError::Transport { .. } => Self::authentication_failed(UNABLE_TO_CONNECT),
            ApiError::Status {
                message: Some(message),
                ..
            } => Self::authentication_failed(message.clone()),
            ApiError::Status { .. } | ApiError::Encode { .. } => {
                Self::authentication_failed(AUTHENTICATION_FAILED)
            }
            ApiError::Decode { .. } | ApiError::EmptyBody => {
                Self::authentication_failed(NO_TOKEN_RECEIVED)
            }
        }
    }
}

/// Login, registration and logout against the backend.
#[derive(Debug)]
pub struct AuthGateway<T: Transport = HttpTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> Clone for AuthGateway<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Transport> AuthGateway<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// Posts `{ name, password }` to `/login` and stores the returned token.
    ///
    /// # Errors
    /// [`AuthError::Validation`] for blank credentials, otherwise
    /// [`AuthError::AuthenticationFailed`] for any unsuccessful exchange.
    pub async fn login(&self, identifier: &str, secret: &str) -> AuthResult<AuthResponse> {
        if identifier.trim().is_empty() || secret.is_empty() {
            return Err(AuthError::validation(MISSING_CREDENTIALS));
        }
        let request = LoginRequest {
            name: identifier.to_string(),
            password: secret.to_string(),
        };
        let response = self.exchange("/login", &request).await?;
        info!(user = identifier, "logged in");
        Ok(response)
    }

    /// Posts the registration payload to `/register` and stores the returned token.
    ///
    /// The password confirmation is checked first; a mismatch sends nothing.
    ///
    /// # Errors
    /// [`AuthError::Validation`] for an incomplete form or mismatched
    /// passwords, otherwise [`AuthError::AuthenticationFailed`].
    pub async fn register(&self, form: &RegistrationForm) -> AuthResult<AuthResponse> {
        if !form.passwords_match() {
            return Err(AuthError::validation(PASSWORDS_DO_NOT_MATCH));
        }
        if let Some(field) = form.missing_field() {
            return Err(AuthError::validation(format!("{field} is required")));
        }
        let request = form.to_request(Utc::now());
        let response = self.exchange("/register", &request).await?;
        info!(user = %form.username, "registered");
        Ok(response)
    }

    /// Ends the session.
    ///
    /// # Errors
    /// Returns [`AuthError::Session`] if the token cannot be removed.
    pub fn logout(&self) -> AuthResult<()> {
        self.session().clear()?;
        info!("logged out");
        Ok(())
    }

    async fn exchange<B: serde::Serialize>(&self, path: &str, body: &B) -> AuthResult<AuthResponse> {
        let request = ApiRequest::new(Method::Post, path)
            .json(body)
            .map_err(|err| AuthError::from_api(&err))?;
        let response = self.client.send_anonymous(request).await.map_err(|err| {
            warn!(path, error = %err, "authentication request failed");
            AuthError::from_api(&err)
        })?;

        let body: Value = response.json().map_err(|err| AuthError::from_api(&err))?;
        let token = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::authentication_failed(NO_TOKEN_RECEIVED))?
            .to_string();

        self.session().set(&token)?;
        Ok(AuthResponse { token, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_implementations::ScriptedTransport;
    use reqwest::StatusCode;
    use serde_json::json;

    fn gateway() -> AuthGateway<ScriptedTransport> {
        AuthGateway::new(ApiClient::new(
            ScriptedTransport::new(),
            SessionStore::in_memory(),
        ))
    }

    fn transport(gateway: &AuthGateway<ScriptedTransport>) -> &ScriptedTransport {
        gateway.client.transport()
    }

    #[tokio::test]
    async fn login_stores_token() {
        let gateway = gateway();
        transport(&gateway).push_json(StatusCode::OK, &json!({"token": "abc", "role": "ROLE_ADMIN"}));

        let response = gateway.login("alice", "pw").await.unwrap();
        assert_eq!(response.token, "abc");
        assert_eq!(response.body["role"], "ROLE_ADMIN");
        assert_eq!(gateway.session().get().as_deref(), Some("abc"));

        let request = &transport(&gateway).requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/login");
        assert_eq!(request.body, Some(json!({"name": "alice", "password": "pw"})));
    }

    #[tokio::test]
    async fn login_without_token_keeps_session() {
        let gateway = gateway();
        gateway.session().set("old").unwrap();
        transport(&gateway).push_json(StatusCode::OK, &json!({"message": "welcome"}));
        transport(&gateway).push_json(StatusCode::OK, &json!({"token": ""}));

        for _ in 0..2 {
            let err = gateway.login("alice", "pw").await.unwrap_err();
            assert!(
                matches!(err, AuthError::AuthenticationFailed { ref message } if message == NO_TOKEN_RECEIVED)
            );
        }
        assert_eq!(gateway.session().get().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn login_failures_collapse_into_authentication_failed() {
        let gateway = gateway();
        transport(&gateway).push_json(StatusCode::UNAUTHORIZED, &json!({"message": "Bad credentials"}));
        transport(&gateway).push_raw(StatusCode::INTERNAL_SERVER_ERROR, "");
        transport(&gateway).push_unreachable();
        transport(&gateway).push_raw(StatusCode::OK, "<html>");

        let messages: Vec<String> = {
            let mut messages = Vec::new();
            for _ in 0..4 {
                messages.push(gateway.login("alice", "pw").await.unwrap_err().to_string());
            }
            messages
        };
        assert_eq!(
            messages,
            [
                "Bad credentials",
                AUTHENTICATION_FAILED,
                UNABLE_TO_CONNECT,
                NO_TOKEN_RECEIVED
            ]
        );
        assert_eq!(gateway.session().get(), None);
    }

    #[tokio::test]
    async fn blank_credentials_send_nothing() {
        let gateway = gateway();
        let err = gateway.login(" ", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation { .. }));
        assert_eq!(transport(&gateway).request_count(), 0);
    }

    #[tokio::test]
    async fn register_checks_confirmation_first() {
        let gateway = gateway();
        let form = RegistrationForm {
            username: "alice".into(),
            email: String::new(),
            password: "pw".into(),
            confirm_password: "other".into(),
        };
        let err = gateway.register(&form).await.unwrap_err();
        assert_eq!(err.to_string(), PASSWORDS_DO_NOT_MATCH);
        assert_eq!(transport(&gateway).request_count(), 0);
    }

    #[tokio::test]
    async fn register_posts_default_role() {
        let gateway = gateway();
        transport(&gateway).push_json(StatusCode::CREATED, &json!({"token": "t2"}));
        let form = RegistrationForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        };

        gateway.register(&form).await.unwrap();
        assert_eq!(gateway.session().get().as_deref(), Some("t2"));

        let body = transport(&gateway).requests()[0].body.clone().unwrap();
        assert_eq!(transport(&gateway).requests()[0].path, "/register");
        assert_eq!(body["name"], "alice");
        assert_eq!(body["email"], "alice@example.com");
        assert_eq!(body["role"], "ROLE_ADMIN");
        assert!(body["createdAt"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let gateway = gateway();
        gateway.session().set("abc").unwrap();
        gateway.logout().unwrap();
        assert!(!gateway.session().is_authenticated());
    }
}
