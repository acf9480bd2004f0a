use crate::{api, models::app_state::AppState, routes::MainRoute};
use shared::auth::AuthGateway;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yewdux::prelude::{use_dispatch, use_selector};

#[function_component(UserDropdown)]
pub fn user_dropdown() -> Html {
    let navigator = use_navigator();
    let dispatch = use_dispatch::<AppState>();
    let user_id = use_selector(|state: &AppState| state.user_id);

    let onclick = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        if let Err(err) = AuthGateway::new(api::client()).logout() {
            log::error!("logout failed: {err}");
        }
        dispatch.set(AppState::default());
        if let Some(navigator) = &navigator {
            navigator.push(&MainRoute::Login);
        }
    });

    html! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class="btn btn-ghost btn-circle mb-1">
                <i class="fa-solid fa-user text-lg"></i>
            </div>
            <ul tabIndex={0} class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-52">
                if let Some(id) = *user_id {
                    <li class="px-2 py-1 text-xs text-base-content/70">{ format!("Account #{id}") }</li>
                    <div class="divider my-0"></div>
                }
                <li><a {onclick}>{"Log out"}</a></li>
            </ul>
        </div>
    }
}
