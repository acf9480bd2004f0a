use crate::{
    components::{header_nav_item::HeaderNavItem, user_dropdown::UserDropdown},
    models::app_state::AppState,
    routes::MainRoute,
};
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    #[prop_or_default]
    pub current_route: Option<MainRoute>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let is_authenticated = *use_selector(|state: &AppState| state.authenticated);
    let routes = MainRoute::navigation();

    let nav_items = routes
        .iter()
        .map(|route| {
            html! {
                <HeaderNavItem current_route={props.current_route.clone()} route={route.clone()} />
            }
        })
        .collect::<Html>();

    html! {
        <nav class="navbar justify-between bg-base-300">
            <Link<MainRoute> to={MainRoute::Home} classes="btn btn-ghost text-lg">
                {"VentureMatch"}
            </Link<MainRoute>>
            <div class="dropdown dropdown-end sm:hidden">
                <button class="btn btn-soft">
                    <i class="fa-solid fa-bars text-lg"></i>
                </button>
                <ul
                    tabindex="0"
                    class="dropdown-content menu z-[1] bg-base-200 p-6 rounded-box shadow w-56 gap-2"
                >
                    {nav_items.clone()}
                </ul>
            </div>
            <ul class="hidden menu sm:menu-horizontal">
                {nav_items}
            </ul>
            <div class="flex items-center gap-2">
                if is_authenticated {
                    <UserDropdown />
                } else {
                    <Link<MainRoute> to={MainRoute::Register} classes="btn btn-ghost btn-sm">
                        {"Sign up"}
                    </Link<MainRoute>>
                    <Link<MainRoute> to={MainRoute::Login} classes="btn btn-primary btn-sm">
                        {"Log in"}
                    </Link<MainRoute>>
                }
            </div>
        </nav>
    }
}
