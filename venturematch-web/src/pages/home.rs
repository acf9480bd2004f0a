use shared::models::Project;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::components::{ErrorAlert, Loading, use_resource_panel};
use crate::routes::MainRoute;
use shared::collection::CollectionStatus;

const CATEGORIES: [&str; 8] = [
    "All",
    "Technology",
    "Software",
    "Artificial Intelligence",
    "E-commerce",
    "Health",
    "Education",
    "Finance",
];

/// Whether `project` belongs under the selected category chip.
fn in_category(project: &Project, category: &str) -> bool {
    category == CATEGORIES[0] || project.target_sector.eq_ignore_ascii_case(category)
}

/// Public landing page.
#[function_component(HomePage)]
pub fn home_page() -> Html {
    let selected = use_state(|| CATEGORIES[0]);
    let panel = use_resource_panel::<Project>();

    let chips = CATEGORIES
        .iter()
        .map(|&category| {
            let selected_handle = selected.clone();
            let onclick = Callback::from(move |_: MouseEvent| selected_handle.set(category));
            let class = if *selected == category {
                "btn btn-primary btn-sm rounded-full"
            } else {
                "btn btn-ghost btn-sm rounded-full"
            };
            html! { <button {class} {onclick}>{category}</button> }
        })
        .collect::<Html>();

    let projects = match &panel.state().status {
        CollectionStatus::Idle | CollectionStatus::Loading => html! { <Loading /> },
        CollectionStatus::Errored(message) => html! { <ErrorAlert message={message.clone()} /> },
        CollectionStatus::Ready(projects) => {
            let matching: Vec<&Project> = projects
                .iter()
                .filter(|project| in_category(project, &selected))
                .collect();
            if matching.is_empty() {
                html! { <p class="text-base-content/70">{"No projects in this category yet."}</p> }
            } else {
                matching
                    .into_iter()
                    .map(|project| {
                        let title = match project.project_id {
                            Some(id) => html! {
                                <Link<MainRoute> to={MainRoute::ProjectDetail { id }} classes="link link-hover">
                                    {&project.project_name}
                                </Link<MainRoute>>
                            },
                            None => html! { <>{&project.project_name}</> },
                        };
                        html! {
                            <div class="card bg-base-200 shadow-sm">
                                <div class="card-body">
                                    <h3 class="card-title">{title}</h3>
                                    <p class="text-sm">{&project.short_description}</p>
                                    <span class="badge badge-outline">{&project.stage}</span>
                                </div>
                            </div>
                        }
                    })
                    .collect::<Html>()
            }
        }
    };

    html! {
        <div class="space-y-10">
            <div class="hero rounded-box bg-gradient-to-r from-primary to-secondary text-primary-content py-20">
                <div class="hero-content text-center">
                    <div class="max-w-2xl space-y-4">
                        <h1 class="text-5xl font-bold">{"Discover the innovations of the future"}</h1>
                        <p class="text-xl opacity-90">
                            {"Discover innovative ideas, evaluate investment opportunities, and shape the future."}
                        </p>
                        <Link<MainRoute> to={MainRoute::Register} classes="btn btn-accent">
                            {"Get started"}
                        </Link<MainRoute>>
                    </div>
                </div>
            </div>
            <div class="flex gap-2 overflow-x-auto">{chips}</div>
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">{projects}</div>
        </div>
    }
}
