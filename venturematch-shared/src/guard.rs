//! # Route Guard
//!
//! Decides, on every navigation, whether a page may render. The only input is
//! whether a session token exists; its validity is the backend's concern.

use crate::session::SessionStore;

/// A navigable location the guard can reason about.
pub trait NavigationTarget: Clone {
    /// The login page.
    fn login() -> Self;

    /// Where an authenticated visitor lands.
    fn dashboard() -> Self;

    /// Whether the location needs a session to render.
    fn requires_session(&self) -> bool;

    /// The application root, which only ever redirects.
    fn is_root(&self) -> bool;
}

/// Outcome of evaluating a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision<R> {
    /// Show the requested page.
    Render(R),
    /// Go elsewhere; `replace` swaps the history entry instead of pushing one.
    Redirect { to: R, replace: bool },
}

impl<R> GuardDecision<R> {
    #[must_use]
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render(_))
    }
}

/// Gate between the router and the pages.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGuard {
    session: SessionStore,
}

impl RouteGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Evaluates `target` against the current session.
    pub fn guard<R: NavigationTarget>(&self, target: R) -> GuardDecision<R> {
        let authenticated = self.session.is_authenticated();
        if target.is_root() {
            let to = if authenticated { R::dashboard() } else { R::login() };
            return GuardDecision::Redirect { to, replace: true };
        }
        if target.requires_session() && !authenticated {
            return GuardDecision::Redirect {
                to: R::login(),
                replace: true,
            };
        }
        GuardDecision::Render(target)
    }

    /// Where the login and register forms go once the gateway returns.
    ///
    /// With a session the form is replaced by the dashboard so Back does not
    /// return to it; without one the visitor stays on the login page.
    pub fn after_sign_in<R: NavigationTarget>(&self) -> GuardDecision<R> {
        if self.session.is_authenticated() {
            GuardDecision::Redirect {
                to: R::dashboard(),
                replace: true,
            }
        } else {
            GuardDecision::Render(R::login())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_implementations::ScriptedTransport;
    use crate::api::ApiClient;
    use crate::auth::AuthGateway;
    use reqwest::StatusCode;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Page {
        Root,
        Login,
        Dashboard,
        Blogs,
        Investors,
    }

    impl NavigationTarget for Page {
        fn login() -> Self {
            Self::Login
        }

        fn dashboard() -> Self {
            Self::Dashboard
        }

        fn requires_session(&self) -> bool {
            matches!(self, Self::Dashboard | Self::Blogs)
        }

        fn is_root(&self) -> bool {
            matches!(self, Self::Root)
        }
    }

    #[test]
    fn protected_pages_redirect_without_session() {
        let guard = RouteGuard::new(SessionStore::in_memory());
        assert_eq!(
            guard.guard(Page::Blogs),
            GuardDecision::Redirect {
                to: Page::Login,
                replace: true
            }
        );
        assert!(guard.guard(Page::Investors).is_render());
        assert!(guard.guard(Page::Login).is_render());
    }

    #[test]
    fn any_token_renders() {
        let session = SessionStore::in_memory();
        session.set("not-even-a-jwt").unwrap();
        let guard = RouteGuard::new(session);
        assert_eq!(guard.guard(Page::Blogs), GuardDecision::Render(Page::Blogs));
    }

    #[test]
    fn root_follows_the_session() {
        let session = SessionStore::in_memory();
        let guard = RouteGuard::new(session.clone());
        assert_eq!(
            guard.guard(Page::Root),
            GuardDecision::Redirect {
                to: Page::Login,
                replace: true
            }
        );
        session.set("t").unwrap();
        assert_eq!(
            guard.guard(Page::Root),
            GuardDecision::Redirect {
                to: Page::Dashboard,
                replace: true
            }
        );
    }

    #[test]
    fn sign_in_replaces_the_form_with_the_dashboard() {
        let session = SessionStore::in_memory();
        let guard = RouteGuard::new(session.clone());
        assert_eq!(guard.after_sign_in(), GuardDecision::Render(Page::Login));

        session.set("t1").unwrap();
        assert_eq!(
            guard.after_sign_in(),
            GuardDecision::Redirect {
                to: Page::Dashboard,
                replace: true
            }
        );
    }

    #[tokio::test]
    async fn login_then_root_lands_on_dashboard() {
        let session = SessionStore::in_memory();
        let transport = ScriptedTransport::new();
        transport.push_json(StatusCode::OK, &json!({"token": "t1"}));
        let gateway = AuthGateway::new(ApiClient::new(transport, session.clone()));
        let guard = RouteGuard::new(session.clone());

        gateway.login("alice", "pw").await.unwrap();
        assert_eq!(session.get().as_deref(), Some("t1"));
        assert_eq!(
            guard.guard(Page::Root),
            GuardDecision::Redirect {
                to: Page::Dashboard,
                replace: true
            }
        );
        assert!(guard.guard(Page::Dashboard).is_render());

        gateway.logout().unwrap();
        assert!(!guard.guard(Page::Dashboard).is_render());
    }
}
