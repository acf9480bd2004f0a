use crate::{
    api,
    components::TextField,
    models::app_state::AppState,
    routes::{MainRoute, follow},
};
use shared::auth::AuthGateway;
use shared::guard::RouteGuard;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_dispatch;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();
    let dispatch = use_dispatch::<AppState>();

    let onsubmit = {
        let username_handle = username.clone();
        let password_handle = password.clone();
        let error_handle = error.clone();
        let loading_handle = loading.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let username_value = (*username_handle).clone();
            let password_value = (*password_handle).clone();
            loading_handle.set(true);
            error_handle.set(None);
            let loading_ref = loading_handle.clone();
            let error_ref = error_handle.clone();
            let navigator_handle = navigator.clone();
            let dispatch = dispatch.clone();
            spawn_local(async move {
                let gateway = AuthGateway::new(api::client());
                match gateway.login(&username_value, &password_value).await {
                    Ok(_) => {
                        dispatch.set(AppState::from_session(gateway.session()));
                        if let Some(ref nav) = navigator_handle {
                            let guard = RouteGuard::new(gateway.session().clone());
                            follow(nav, guard.after_sign_in::<MainRoute>());
                        }
                    }
                    Err(err) => error_ref.set(Some(err.to_string())),
                }
                loading_ref.set(false);
            });
        })
    };

    let on_username_change = {
        let username = username.clone();
        Callback::from(move |value: String| username.set(value))
    };
    let on_password_change = {
        let password = password.clone();
        Callback::from(move |value: String| password.set(value))
    };

    let is_busy = *loading;

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{"Log in"}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    <TextField
                        id="username"
                        label="Username"
                        value={(*username).clone()}
                        on_change={on_username_change}
                        required=true
                    />
                    <TextField
                        id="password"
                        label="Password"
                        kind="password"
                        value={(*password).clone()}
                        on_change={on_password_change}
                        required=true
                    />
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            {if is_busy { "Logging in..." } else { "Log in" }}
                        </button>
                    </div>
                    <p class="text-sm text-center">
                        {"No account yet? "}
                        <Link<MainRoute> to={MainRoute::Register} classes="link link-primary">{"Register"}</Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}
