use crate::{api, containers::layout::Layout, pages::*};
use shared::guard::{GuardDecision, NavigationTarget, RouteGuard};
use shared::models::{Entrepreneur, Investor};
use strum::{EnumIter, IntoEnumIterator};
use yew::prelude::*;
use yew_router::prelude::*;

/// The main routes
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/home")]
    Home,
    #[at("/dashboard")]
    Dashboard,
    #[at("/projects")]
    Projects,
    #[at("/projects/:id")]
    ProjectDetail { id: i64 },
    #[at("/entrepreneurs")]
    EntrepreneursRoot,
    #[at("/entrepreneurs/*")]
    Entrepreneurs,
    #[at("/investors")]
    InvestorsRoot,
    #[at("/investors/*")]
    Investors,
    #[at("/blogs")]
    Blogs,
    #[at("/blogs/new")]
    NewBlog,
    #[at("/blogs/:id/edit")]
    EditBlog { id: i64 },
    #[at("/interests")]
    Interests,
    #[at("/portfolios")]
    Portfolios,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl MainRoute {
    /// Header label, for routes that appear in the navigation bar.
    pub fn nav_label(&self) -> Option<&'static str> {
        match self {
            Self::Dashboard => Some("Dashboard"),
            Self::Projects => Some("Projects"),
            Self::EntrepreneursRoot => Some("Entrepreneurs"),
            Self::InvestorsRoot => Some("Investors"),
            Self::Blogs => Some("Blogs"),
            Self::Interests => Some("Interests"),
            Self::Portfolios => Some("Portfolios"),
            _ => None,
        }
    }

    /// Font Awesome icon name for navigation entries.
    pub fn nav_icon(&self) -> &'static str {
        match self {
            Self::Dashboard => "gauge",
            Self::Projects => "rocket",
            Self::EntrepreneursRoot => "lightbulb",
            Self::InvestorsRoot => "sack-dollar",
            Self::Blogs => "newspaper",
            Self::Interests => "seedling",
            Self::Portfolios => "briefcase",
            _ => "circle",
        }
    }

    /// Routes shown in the header, in declaration order.
    pub fn navigation() -> Vec<MainRoute> {
        Self::iter().filter(|route| route.nav_label().is_some()).collect()
    }
}

impl NavigationTarget for MainRoute {
    fn login() -> Self {
        Self::Login
    }

    fn dashboard() -> Self {
        Self::Dashboard
    }

    fn requires_session(&self) -> bool {
        matches!(
            self,
            Self::Dashboard
                | Self::EntrepreneursRoot
                | Self::Entrepreneurs
                | Self::Blogs
                | Self::NewBlog
                | Self::EditBlog { .. }
                | Self::Interests
                | Self::Portfolios
        )
    }

    fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

/// Profile routes nested under `/entrepreneurs/*`.
#[derive(Debug, Clone, PartialEq, Routable)]
pub enum EntrepreneurRoute {
    #[at("/entrepreneurs")]
    List,
    #[at("/entrepreneurs/create")]
    Create,
    #[at("/entrepreneurs/:id")]
    Detail { id: i64 },
    #[at("/entrepreneurs/:id/edit")]
    Edit { id: i64 },
    #[not_found]
    #[at("/entrepreneurs/404")]
    NotFound,
}

/// Profile routes nested under `/investors/*`.
#[derive(Debug, Clone, PartialEq, Routable)]
pub enum InvestorRoute {
    #[at("/investors")]
    List,
    #[at("/investors/create")]
    Create,
    #[at("/investors/:id")]
    Detail { id: i64 },
    #[at("/investors/:id/edit")]
    Edit { id: i64 },
    #[not_found]
    #[at("/investors/404")]
    NotFound,
}

#[derive(Properties, PartialEq)]
struct GuardRedirectProps {
    to: MainRoute,
    replace: bool,
}

/// Carries out a guard decision; `replace` keeps the left page out of history.
pub fn follow(navigator: &Navigator, decision: GuardDecision<MainRoute>) {
    match decision {
        GuardDecision::Redirect { to, replace: true } => navigator.replace(&to),
        GuardDecision::Redirect { to, replace: false } => navigator.push(&to),
        GuardDecision::Render(_) => {}
    }
}

/// Navigates once mounted.
#[function_component(GuardRedirect)]
fn guard_redirect(props: &GuardRedirectProps) -> Html {
    let navigator = use_navigator();
    use_effect_with((props.to.clone(), props.replace), move |(to, replace)| {
        if let Some(navigator) = navigator {
            follow(
                &navigator,
                GuardDecision::Redirect {
                    to: to.clone(),
                    replace: *replace,
                },
            );
        }
    });
    html! {}
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let guard = RouteGuard::new(api::session());
    match guard.guard(props.route.clone()) {
        GuardDecision::Redirect { to, replace } => {
            log::debug!("guard redirected {:?} to {:?}", props.route, to);
            html! { <GuardRedirect {to} {replace} /> }
        }
        GuardDecision::Render(route) => render_main(route),
    }
}

fn render_main(route: MainRoute) -> Html {
    let current = match &route {
        MainRoute::Entrepreneurs => MainRoute::EntrepreneursRoot,
        MainRoute::Investors => MainRoute::InvestorsRoot,
        other => other.clone(),
    };
    let page = match route {
        MainRoute::Login => return html! { <LoginPage /> },
        MainRoute::Register => return html! { <RegisterPage /> },
        MainRoute::Home => html! { <HomePage /> },
        MainRoute::Dashboard => html! { <DashboardPage /> },
        MainRoute::Projects => html! { <ProjectsPage /> },
        MainRoute::ProjectDetail { id } => html! { <ProjectDetailPage {id} /> },
        MainRoute::EntrepreneursRoot | MainRoute::Entrepreneurs => html! {
            <Switch<EntrepreneurRoute> render={switch_entrepreneurs} />
        },
        MainRoute::InvestorsRoot | MainRoute::Investors => html! {
            <Switch<InvestorRoute> render={switch_investors} />
        },
        MainRoute::Blogs => html! { <BlogsPage /> },
        MainRoute::NewBlog => html! { <BlogFormPage /> },
        MainRoute::EditBlog { id } => html! { <BlogFormPage id={Some(id)} /> },
        MainRoute::Interests => html! { <InterestsPage /> },
        MainRoute::Portfolios => html! { <PortfoliosPage /> },
        MainRoute::NotFound => html! { <ErrorPage /> },
        // The guard never renders the root.
        MainRoute::Root => return html! {},
    };
    html! {
        <Layout current_route={current}>
            {page}
        </Layout>
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    log::debug!("Switching to main route: {route:?}");
    html! { <MainRouteView {route} /> }
}

fn switch_entrepreneurs(route: EntrepreneurRoute) -> Html {
    match route {
        EntrepreneurRoute::List => html! { <ProfileListPage<Entrepreneur> /> },
        EntrepreneurRoute::Create => html! { <ProfileFormPage<Entrepreneur> /> },
        EntrepreneurRoute::Detail { id } => html! { <EntrepreneurDetailPage {id} /> },
        EntrepreneurRoute::Edit { id } => html! { <ProfileFormPage<Entrepreneur> id={Some(id)} /> },
        EntrepreneurRoute::NotFound => html! { <Redirect<MainRoute> to={MainRoute::NotFound} /> },
    }
}

fn switch_investors(route: InvestorRoute) -> Html {
    match route {
        InvestorRoute::List => html! { <ProfileListPage<Investor> /> },
        InvestorRoute::Create => html! { <ProfileFormPage<Investor> /> },
        InvestorRoute::Detail { id } => html! { <InvestorDetailPage {id} /> },
        InvestorRoute::Edit { id } => html! { <ProfileFormPage<Investor> id={Some(id)} /> },
        InvestorRoute::NotFound => html! { <Redirect<MainRoute> to={MainRoute::NotFound} /> },
    }
}
