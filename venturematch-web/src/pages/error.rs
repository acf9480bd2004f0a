use crate::routes::MainRoute;
use yew::{Html, function_component, html};
use yew_router::prelude::Link;

/// `ErrorPage` page component
#[function_component(ErrorPage)]
pub fn error_page() -> Html {
    html! {
        <div class="p-4 space-y-6 text-center">
            <h1 class="text-2xl font-bold">{ "Page not found" }</h1>
            <p>{ "There is nothing at this address." }</p>
            <Link<MainRoute> to={MainRoute::Root} classes="btn btn-primary">{ "Go back" }</Link<MainRoute>>
        </div>
    }
}
