use crate::api;
use crate::models::app_state::AppState;
use crate::routes::{MainRoute, switch};
use yew::{Html, function_component, html, use_effect_with};
use yew_router::prelude::*;
use yewdux::prelude::use_dispatch;

#[function_component(App)]
pub fn app() -> Html {
    let dispatch = use_dispatch::<AppState>();

    // Another tab may have logged in or out since the store was seeded.
    use_effect_with((), move |_| {
        dispatch.set(AppState::from_session(&api::session()));
        || ()
    });

    html! {
        <BrowserRouter>
            <Switch<MainRoute> render={switch} />
        </BrowserRouter>
    }
}
