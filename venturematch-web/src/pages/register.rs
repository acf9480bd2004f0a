use crate::{
    api,
    components::{TextField, setter},
    models::app_state::AppState,
    routes::{MainRoute, follow},
};
use shared::auth::AuthGateway;
use shared::guard::RouteGuard;
use shared::models::RegistrationForm;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_dispatch;

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let form = use_state(RegistrationForm::default);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();
    let dispatch = use_dispatch::<AppState>();

    let onsubmit = {
        let form = form.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let submitted = (*form).clone();
            loading.set(true);
            error.set(None);
            let loading = loading.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            let dispatch = dispatch.clone();
            spawn_local(async move {
                let gateway = AuthGateway::new(api::client());
                match gateway.register(&submitted).await {
                    Ok(_) => {
                        dispatch.set(AppState::from_session(gateway.session()));
                        if let Some(navigator) = navigator {
                            let guard = RouteGuard::new(gateway.session().clone());
                            follow(&navigator, guard.after_sign_in::<MainRoute>());
                        }
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        })
    };

    let is_busy = *loading;

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" {onsubmit}>
                    <h2 class="card-title text-2xl">{"Create an account"}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    <TextField id="username" label="Username" value={form.username.clone()} required=true
                        on_change={setter(&form, |form, value| form.username = value)} />
                    <TextField id="email" label="Email" kind="email" value={form.email.clone()} required=true
                        on_change={setter(&form, |form, value| form.email = value)} />
                    <TextField id="password" label="Password" kind="password" value={form.password.clone()} required=true
                        on_change={setter(&form, |form, value| form.password = value)} />
                    <TextField id="confirm-password" label="Confirm password" kind="password"
                        value={form.confirm_password.clone()} required=true
                        on_change={setter(&form, |form, value| form.confirm_password = value)} />
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            {if is_busy { "Registering..." } else { "Register" }}
                        </button>
                    </div>
                    <p class="text-sm text-center">
                        {"Already registered? "}
                        <Link<MainRoute> to={MainRoute::Login} classes="link link-primary">{"Log in"}</Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}
