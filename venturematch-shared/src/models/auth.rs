use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::lenient;

/// Role assigned to an account at registration time.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
pub enum UserRole {
    /// Full access; the role every self-registered account receives.
    #[default]
    #[serde(rename = "ROLE_ADMIN")]
    #[strum(serialize = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_ENTREPRENEUR")]
    #[strum(serialize = "ROLE_ENTREPRENEUR")]
    Entrepreneur,
    #[serde(rename = "ROLE_INVESTOR")]
    #[strum(serialize = "ROLE_INVESTOR")]
    Investor,
}

/// Credentials posted to `/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account name.
    pub name: String,
    /// Plain-text password.
    pub password: String,
}

/// Payload posted to `/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    /// Client-generated RFC 3339 creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Values collected by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Returns `true` when both password fields match.
    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }

    /// Name of the first empty required field, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
            ("confirm password", &self.confirm_password),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    /// Builds the wire request with the default role and the given creation time.
    #[must_use]
    pub fn to_request(&self, created_at: DateTime<Utc>) -> RegisterRequest {
        RegisterRequest {
            name: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: UserRole::default(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Successful login or registration response.
///
/// The token is lifted out; the untouched body is kept for callers that need
/// other fields the backend chose to send.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthResponse {
    /// Bearer token issued by the backend.
    pub token: String,
    /// Full JSON body as received.
    pub body: serde_json::Value,
}

/// Claims carried in the payload segment of a session token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// Numeric user id of the token holder.
    #[serde(default, deserialize_with = "lenient::optional_i64")]
    pub id: Option<i64>,
    /// Standard subject claim; numeric when the backend uses it for the user id.
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
    /// Issued-at, seconds since the epoch.
    #[serde(default, deserialize_with = "lenient::optional_i64")]
    pub iat: Option<i64>,
    /// Expiry, seconds since the epoch.
    #[serde(default, deserialize_with = "lenient::optional_i64")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// The numeric user id, preferring `id` over a numeric `sub`.
    #[must_use]
    pub fn subject_id(&self) -> Option<i64> {
        self.id
            .or_else(|| self.sub.as_ref().and_then(lenient::value_as_i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    #[test]
    fn registration_request_uses_default_role_and_timestamp() {
        let form = RegistrationForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        };
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let request = form.to_request(created_at);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["name"], "alice");
        assert_eq!(json["role"], "ROLE_ADMIN");
        assert_eq!(json["createdAt"], "2024-03-01T09:30:00.000Z");
        assert!(json.get("confirm_password").is_none());
    }

    #[test]
    fn registration_form_checks() {
        let mut form = RegistrationForm {
            username: "bob".into(),
            email: String::new(),
            password: "a".into(),
            confirm_password: "b".into(),
        };
        assert_eq!(form.missing_field(), Some("email"));
        assert!(!form.passwords_match());

        form.email = "bob@example.com".into();
        form.confirm_password = "a".into();
        assert_eq!(form.missing_field(), None);
        assert!(form.passwords_match());
    }

    #[test]
    fn user_role_strings() {
        assert_eq!(UserRole::Admin.to_string(), "ROLE_ADMIN");
        assert_eq!(UserRole::from_str("ROLE_INVESTOR").unwrap(), UserRole::Investor);
        assert!(UserRole::from_str("guest").is_err());
    }

    #[test]
    fn claims_subject_prefers_id() {
        let claims: TokenClaims =
            serde_json::from_str(r#"{"id":"7","sub":"alice","iat":1700000000}"#).unwrap();
        assert_eq!(claims.subject_id(), Some(7));
        assert_eq!(claims.iat, Some(1_700_000_000));

        let claims: TokenClaims = serde_json::from_str(r#"{"sub":"12"}"#).unwrap();
        assert_eq!(claims.subject_id(), Some(12));

        let claims: TokenClaims = serde_json::from_str(r#"{"sub":"alice"}"#).unwrap();
        assert_eq!(claims.subject_id(), None);
    }
}
