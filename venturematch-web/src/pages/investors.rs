use shared::detail::{InvestorDetail, load_investor_detail};
use shared::models::{Investor, InvestorDraft};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::api;
use crate::components::{ErrorAlert, Loading, TextField, draft_field};
use crate::pages::profiles::{ProfileView, avatar};
use crate::routes::{InvestorRoute, MainRoute};

impl ProfileView for Investor {
    type Route = InvestorRoute;

    const TITLE: &'static str = "Investors";

    fn list_route() -> InvestorRoute {
        InvestorRoute::List
    }

    fn create_route() -> InvestorRoute {
        InvestorRoute::Create
    }

    fn detail_route(id: i64) -> InvestorRoute {
        InvestorRoute::Detail { id }
    }

    fn edit_route(id: i64) -> InvestorRoute {
        InvestorRoute::Edit { id }
    }

    fn picture(&self) -> Option<&str> {
        self.profile_picture.as_deref()
    }

    fn summary(&self) -> Option<&str> {
        self.bio.as_deref().or(self.location.as_deref())
    }

    fn extra_fields(draft: &InvestorDraft, on_change: &Callback<InvestorDraft>) -> Html {
        html! {
            <TextField id="location" label="Location"
                value={draft.location.clone()}
                on_change={draft_field(draft, on_change, |d, v| d.location = v)} />
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct InvestorDetailPageProps {
    pub id: i64,
}

#[function_component(InvestorDetailPage)]
pub fn investor_detail_page(props: &InvestorDetailPageProps) -> Html {
    let detail = use_state(|| None::<Result<InvestorDetail, String>>);

    {
        let detail = detail.clone();
        use_effect_with(props.id, move |id| {
            let id = *id;
            detail.set(None);
            spawn_local(async move {
                let result = load_investor_detail(&api::client(), id)
                    .await
                    .map_err(|err| err.to_string());
                detail.set(Some(result));
            });
            || ()
        });
    }

    let body = match &*detail {
        None => html! { <Loading /> },
        Some(Err(message)) => html! { <ErrorAlert message={message.clone()} /> },
        Some(Ok(detail)) => render_detail(props.id, detail),
    };

    html! {
        <div class="space-y-4">
            <Link<InvestorRoute> to={InvestorRoute::List} classes="btn btn-ghost btn-sm">
                <i class="fa-solid fa-arrow-left"></i>{" All investors"}
            </Link<InvestorRoute>>
            {body}
        </div>
    }
}

fn render_detail(id: i64, detail: &InvestorDetail) -> Html {
    let investor = &detail.investor;
    let name = investor.full_name();

    html! {
        <div class="space-y-6">
            <div class="card bg-base-200 shadow">
                <div class="card-body">
                    <div class="flex items-center gap-4">
                        {avatar(&name, investor.picture())}
                        <div class="flex-grow">
                            <h1 class="text-2xl font-bold">{name.clone()}</h1>
                            <p class="text-sm">{&investor.email}</p>
                            if let Some(location) = &investor.location {
                                <p class="text-sm"><i class="fa-solid fa-location-dot"></i>{format!(" {location}")}</p>
                            }
                            if let Some(phone) = investor.visible_phone() {
                                <p class="text-sm">{phone}</p>
                            }
                        </div>
                        if detail.is_owner {
                            <Link<InvestorRoute> to={InvestorRoute::Edit { id }} classes="btn btn-primary btn-sm">
                                <i class="fa-solid fa-pen"></i>{" Edit profile"}
                            </Link<InvestorRoute>>
                        }
                    </div>
                    if let Some(bio) = &investor.bio {
                        <p class="mt-4">{bio}</p>
                    }
                </div>
            </div>

            <section class="space-y-2">
                <div class="flex items-center justify-between">
                    <h2 class="text-xl font-semibold">{"Interests and values"}</h2>
                    if detail.is_owner {
                        <Link<MainRoute> to={MainRoute::Interests} classes="btn btn-ghost btn-xs">{"Manage"}</Link<MainRoute>>
                    }
                </div>
                if detail.interests.is_empty() {
                    <p class="text-base-content/70">{"No interests listed."}</p>
                } else {
                    <ul class="space-y-2">
                        { for detail.interests.iter().map(|interest| html! {
                            <li>
                                <span class="font-semibold">{&interest.interest_area}</span>
                                <p class="text-sm">{&interest.social_impact}</p>
                            </li>
                        }) }
                    </ul>
                }
            </section>

            <section class="space-y-2">
                <div class="flex items-center justify-between">
                    <h2 class="text-xl font-semibold">{"Portfolio"}</h2>
                    if detail.is_owner {
                        <Link<MainRoute> to={MainRoute::Portfolios} classes="btn btn-ghost btn-xs">{"Manage"}</Link<MainRoute>>
                    }
                </div>
                if detail.portfolios.is_empty() {
                    <p class="text-base-content/70">{"No investments listed."}</p>
                } else {
                    <div class="overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr><th>{"Company"}</th><th>{"Date"}</th><th>{"Notes"}</th></tr>
                            </thead>
                            <tbody>
                                { for detail.portfolios.iter().map(|portfolio| html! {
                                    <tr>
                                        <td>{&portfolio.invested_company_name}</td>
                                        <td>{&portfolio.investment_date}</td>
                                        <td>{portfolio.description.clone().unwrap_or_default()}</td>
                                    </tr>
                                }) }
                            </tbody>
                        </table>
                    </div>
                }
            </section>
        </div>
    }
}
