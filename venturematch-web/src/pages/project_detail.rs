use shared::detail::load_project;
use shared::models::Project;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::api;
use crate::components::{ErrorAlert, Loading};
use crate::routes::{EntrepreneurRoute, MainRoute};

#[derive(Properties, PartialEq)]
pub struct ProjectDetailPageProps {
    pub id: i64,
}

#[function_component(ProjectDetailPage)]
pub fn project_detail_page(props: &ProjectDetailPageProps) -> Html {
    let project = use_state(|| None::<Result<Project, String>>);

    {
        let project = project.clone();
        use_effect_with(props.id, move |id| {
            let id = *id;
            project.set(None);
            spawn_local(async move {
                let result = load_project(&api::client(), id)
                    .await
                    .map_err(|err| err.to_string());
                project.set(Some(result));
            });
            || ()
        });
    }

    let body = match &*project {
        None => html! { <Loading /> },
        Some(Err(message)) => html! { <ErrorAlert message={message.clone()} /> },
        Some(Ok(project)) => html! {
            <div class="card bg-base-200 shadow">
                <div class="card-body space-y-3">
                    <h1 class="card-title text-2xl">{&project.project_name}</h1>
                    <p>{&project.short_description}</p>
                    <dl class="grid grid-cols-2 gap-2 text-sm">
                        <dt class="font-semibold">{"Target sector"}</dt><dd>{&project.target_sector}</dd>
                        <dt class="font-semibold">{"Stage"}</dt><dd>{&project.stage}</dd>
                        <dt class="font-semibold">{"Budget needed"}</dt>
                        <dd>{project.budget_needed.map_or_else(|| "-".to_string(), |budget| format!("${budget:.0}"))}</dd>
                        <dt class="font-semibold">{"Revenue model"}</dt><dd>{&project.revenue_model}</dd>
                    </dl>
                    if let Some(id) = project.entrepreneur_id {
                        <Link<EntrepreneurRoute> to={EntrepreneurRoute::Detail { id }} classes="link link-primary">
                            {format!("Founder profile #{id}")}
                        </Link<EntrepreneurRoute>>
                    }
                </div>
            </div>
        },
    };

    html! {
        <div class="space-y-4">
            <Link<MainRoute> to={MainRoute::Projects} classes="btn btn-ghost btn-sm">
                <i class="fa-solid fa-arrow-left"></i>{" Back to projects"}
            </Link<MainRoute>>
            {body}
        </div>
    }
}
