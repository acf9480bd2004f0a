//! Tests for the routing system
//!
//! Validates route definitions, path parsing and the session gate in front
//! of every page.

#[cfg(test)]
mod tests {
    use crate::routes::{EntrepreneurRoute, InvestorRoute, MainRoute};
    use shared::guard::{GuardDecision, NavigationTarget, RouteGuard};
    use shared::session::SessionStore;
    use yew_router::Routable;

    /// Tests that each documented path resolves to its route
    #[test]
    fn test_route_recognition() {
        assert_eq!(MainRoute::recognize("/"), Some(MainRoute::Root));
        assert_eq!(MainRoute::recognize("/login"), Some(MainRoute::Login));
        assert_eq!(MainRoute::recognize("/register"), Some(MainRoute::Register));
        assert_eq!(MainRoute::recognize("/dashboard"), Some(MainRoute::Dashboard));
        assert_eq!(
            MainRoute::recognize("/projects/7"),
            Some(MainRoute::ProjectDetail { id: 7 })
        );
        assert_eq!(MainRoute::recognize("/blogs/new"), Some(MainRoute::NewBlog));
        assert_eq!(
            MainRoute::recognize("/blogs/3/edit"),
            Some(MainRoute::EditBlog { id: 3 })
        );
        assert_eq!(
            MainRoute::recognize("/entrepreneurs/5"),
            Some(MainRoute::Entrepreneurs)
        );
    }

    /// Tests that unknown paths fall through to the not-found page
    #[test]
    fn test_unknown_path() {
        assert_eq!(MainRoute::recognize("/nowhere"), Some(MainRoute::NotFound));
    }

    /// Tests nested profile routes
    #[test]
    fn test_profile_routes() {
        assert_eq!(
            EntrepreneurRoute::recognize("/entrepreneurs/create"),
            Some(EntrepreneurRoute::Create)
        );
        assert_eq!(
            EntrepreneurRoute::recognize("/entrepreneurs/4/edit"),
            Some(EntrepreneurRoute::Edit { id: 4 })
        );
        assert_eq!(
            InvestorRoute::recognize("/investors/9"),
            Some(InvestorRoute::Detail { id: 9 })
        );
        assert_eq!(InvestorRoute::Edit { id: 9 }.to_path(), "/investors/9/edit");
    }

    /// Tests which routes sit behind the session gate
    #[test]
    fn test_protected_routes() {
        for route in [
            MainRoute::Dashboard,
            MainRoute::Entrepreneurs,
            MainRoute::Blogs,
            MainRoute::NewBlog,
            MainRoute::EditBlog { id: 1 },
        ] {
            assert!(route.requires_session(), "{route:?} should be protected");
        }
        for route in [
            MainRoute::Login,
            MainRoute::Register,
            MainRoute::Home,
            MainRoute::Projects,
            MainRoute::ProjectDetail { id: 1 },
            MainRoute::Investors,
        ] {
            assert!(!route.requires_session(), "{route:?} should be public");
        }
    }

    /// Tests the guard's decisions with and without a token
    #[test]
    fn test_guard_decisions() {
        let session = SessionStore::in_memory();
        let guard = RouteGuard::new(session.clone());

        assert_eq!(
            guard.guard(MainRoute::Blogs),
            GuardDecision::Redirect {
                to: MainRoute::Login,
                replace: true
            }
        );
        assert_eq!(
            guard.guard(MainRoute::Root),
            GuardDecision::Redirect {
                to: MainRoute::Login,
                replace: true
            }
        );

        session.set("t1").unwrap();
        assert_eq!(
            guard.guard(MainRoute::Blogs),
            GuardDecision::Render(MainRoute::Blogs)
        );
        assert_eq!(
            guard.guard(MainRoute::Root),
            GuardDecision::Redirect {
                to: MainRoute::Dashboard,
                replace: true
            }
        );
    }

    /// Tests that signing in swaps the form for the dashboard
    #[test]
    fn test_sign_in_replaces_history() {
        let session = SessionStore::in_memory();
        let guard = RouteGuard::new(session.clone());
        assert_eq!(
            guard.after_sign_in::<MainRoute>(),
            GuardDecision::Render(MainRoute::Login)
        );

        session.set("t1").unwrap();
        assert_eq!(
            guard.after_sign_in::<MainRoute>(),
            GuardDecision::Redirect {
                to: MainRoute::Dashboard,
                replace: true
            }
        );
    }

    /// Tests the navigation bar contents
    #[test]
    fn test_navigation_routes() {
        let routes = MainRoute::navigation();
        assert_eq!(routes.first(), Some(&MainRoute::Dashboard));
        assert!(routes.contains(&MainRoute::InvestorsRoot));
        assert!(!routes.contains(&MainRoute::Login));
        assert!(routes.iter().all(|route| route.nav_label().is_some()));
    }
}
