use shared::session::{SessionStore, decode_subject};
use yewdux::Store;

/// Reactive mirror of the session for components that render differently
/// once someone is logged in.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct AppState {
    pub authenticated: bool,
    /// Account id from the token, when it decodes.
    pub user_id: Option<i64>,
}

impl AppState {
    pub fn from_session(session: &SessionStore) -> Self {
        let token = session.get();
        Self {
            authenticated: token.is_some(),
            user_id: token.as_deref().and_then(decode_subject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_mirrors_the_saved_session() {
        let session = SessionStore::in_memory();
        assert_eq!(AppState::from_session(&session), AppState::default());

        // Payload `{"id":7}`.
        session.set("eyJhbGciOiJIUzI1NiJ9.eyJpZCI6N30.c2ln").unwrap();
        let state = AppState::from_session(&session);
        assert!(state.authenticated);
        assert_eq!(state.user_id, Some(7));

        session.clear().unwrap();
        assert!(!AppState::from_session(&session).authenticated);
    }
}
