use shared::detail::{EntrepreneurDetail, load_entrepreneur_detail};
use shared::models::Entrepreneur;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::api;
use crate::components::{ErrorAlert, Loading};
use crate::pages::profiles::{ProfileView, avatar};
use crate::routes::EntrepreneurRoute;

impl ProfileView for Entrepreneur {
    type Route = EntrepreneurRoute;

    const TITLE: &'static str = "Entrepreneurs";

    fn list_route() -> EntrepreneurRoute {
        EntrepreneurRoute::List
    }

    fn create_route() -> EntrepreneurRoute {
        EntrepreneurRoute::Create
    }

    fn detail_route(id: i64) -> EntrepreneurRoute {
        EntrepreneurRoute::Detail { id }
    }

    fn edit_route(id: i64) -> EntrepreneurRoute {
        EntrepreneurRoute::Edit { id }
    }

    fn picture(&self) -> Option<&str> {
        self.profile_picture.as_deref()
    }

    fn summary(&self) -> Option<&str> {
        self.bio.as_deref()
    }
}

#[derive(Properties, PartialEq)]
pub struct EntrepreneurDetailPageProps {
    pub id: i64,
}

#[function_component(EntrepreneurDetailPage)]
pub fn entrepreneur_detail_page(props: &EntrepreneurDetailPageProps) -> Html {
    let detail = use_state(|| None::<Result<EntrepreneurDetail, String>>);

    {
        let detail = detail.clone();
        use_effect_with(props.id, move |id| {
            let id = *id;
            detail.set(None);
            spawn_local(async move {
                let result = load_entrepreneur_detail(&api::client(), id)
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
            <Link<EntrepreneurRoute> to={EntrepreneurRoute::List} classes="btn btn-ghost btn-sm">
                <i class="fa-solid fa-arrow-left"></i>{" All entrepreneurs"}
            </Link<EntrepreneurRoute>>
            {body}
        </div>
    }
}

fn render_detail(id: i64, detail: &EntrepreneurDetail) -> Html {
    let entrepreneur = &detail.entrepreneur;
    let name = entrepreneur.full_name();

    html! {
        <div class="space-y-6">
            <div class="card bg-base-200 shadow">
                <div class="card-body">
                    <div class="flex items-center gap-4">
                        {avatar(&name, entrepreneur.picture())}
                        <div class="flex-grow">
                            <h1 class="text-2xl font-bold">{name.clone()}</h1>
                            <p class="text-sm">{&entrepreneur.email}</p>
                            if let Some(phone) = entrepreneur.visible_phone() {
                                <p class="text-sm">{phone}</p>
                            }
                        </div>
                        if detail.is_owner {
                            <Link<EntrepreneurRoute> to={EntrepreneurRoute::Edit { id }} classes="btn btn-primary btn-sm">
                                <i class="fa-solid fa-pen"></i>{" Edit profile"}
                            </Link<EntrepreneurRoute>>
                        }
                    </div>
                    if let Some(bio) = &entrepreneur.bio {
                        <p class="mt-4">{bio}</p>
                    }
                </div>
            </div>

            <section class="space-y-2">
                <h2 class="text-xl font-semibold">{"Expertise"}</h2>
                if detail.expertise.is_empty() {
                    <p class="text-base-content/70">{"No expertise listed."}</p>
                } else {
                    <div class="flex flex-wrap gap-2">
                        { for detail.expertise.iter().map(|row| html! {
                            <span class="badge badge-lg badge-outline">
                                {&row.expertise_area}
                                if let Some(level) = &row.level {
                                    <span class="ml-1 text-xs opacity-70">{format!("({level})")}</span>
                                }
                            </span>
                        }) }
                    </div>
                }
            </section>

            <section class="space-y-2">
                <h2 class="text-xl font-semibold">{"Education"}</h2>
                if detail.education.is_empty() {
                    <p class="text-base-content/70">{"No education listed."}</p>
                } else {
                    <ul class="space-y-2">
                        { for detail.education.iter().map(|row| html! {
                            <li>
                                <span class="font-semibold">{&row.institution}</span>
                                <span class="text-sm">
                                    {[row.degree.clone(), row.field_of_study.clone(), row.graduation_year.map(|year| year.to_string())]
                                        .into_iter()
                                        .flatten()
                                        .map(|part| format!(" · {part}"))
                                        .collect::<String>()}
                                </span>
                            </li>
                        }) }
                    </ul>
                }
            </section>

            <section class="space-y-2">
                <h2 class="text-xl font-semibold">{"Experience"}</h2>
                if detail.experiences.is_empty() {
                    <p class="text-base-content/70">{"No experience listed."}</p>
                } else {
                    <ul class="timeline timeline-vertical">
                        { for detail.experiences.iter().map(|row| html! {
                            <li class="card bg-base-100 border border-base-300 mb-2">
                                <div class="card-body p-4">
                                    <h3 class="font-semibold">
                                        {&row.company_name}
                                        if let Some(position) = &row.position {
                                            {format!(" – {position}")}
                                        }
                                    </h3>
                                    if let Some(period) = row.period() {
                                        <p class="text-xs opacity-70">{period}</p>
                                    }
                                    if let Some(description) = &row.description {
                                        <p class="text-sm">{description}</p>
                                    }
                                </div>
                            </li>
                        }) }
                    </ul>
                }
            </section>
        </div>
    }
}
