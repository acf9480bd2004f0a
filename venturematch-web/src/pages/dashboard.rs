use crate::models::app_state::AppState;
use crate::routes::MainRoute;
use yew::{Html, classes, function_component, html};
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

fn describe(route: &MainRoute) -> &'static str {
    match route {
        MainRoute::Projects => "Browse startups looking for funding, or list your own.",
        MainRoute::EntrepreneursRoot => "Founder profiles with their expertise and track record.",
        MainRoute::InvestorsRoot => "Investors, what they care about and where they have invested.",
        MainRoute::Blogs => "Write and read posts from the community.",
        MainRoute::Interests => "The sectors and causes you want to back.",
        MainRoute::Portfolios => "Companies you have already invested in.",
        _ => "",
    }
}

/// Dashboard page component
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let user_id = use_selector(|state: &AppState| state.user_id);

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{"Dashboard"}</h1>
            if let Some(id) = *user_id {
                <p class="text-base-content/70">{format!("Signed in as account #{id}.")}</p>
            }

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                { for MainRoute::navigation()
                    .into_iter()
                    .filter(|route| *route != MainRoute::Dashboard)
                    .map(|route| html! {
                        <div class="card bg-base-200 shadow-xl">
                            <div class="card-body">
                                <h2 class="card-title">
                                    <i class={classes!("fa-solid", "fa-fw", format!("fa-{}", route.nav_icon()))}></i>
                                    { route.nav_label().unwrap_or_default() }
                                </h2>
                                <p>{ describe(&route) }</p>
                                <div class="card-actions justify-end">
                                    <Link<MainRoute> to={route.clone()} classes="btn btn-primary">
                                        {"Open"}
                                    </Link<MainRoute>>
                                </div>
                            </div>
                        </div>
                    }) }
            </div>
        </div>
    }
}
