use shared::models::{Project, ProjectDraft};
use yew::prelude::*;

use crate::components::{PanelView, ResourcePanel, TextField, draft_field};
use crate::routes::MainRoute;

impl PanelView for Project {
    fn form(draft: &ProjectDraft, on_change: &Callback<ProjectDraft>) -> Html {
        html! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                <TextField id="project-name" label="Project name" required=true
                    value={draft.project_name.clone()}
                    on_change={draft_field(draft, on_change, |d, v| d.project_name = v)} />
                <TextField id="target-sector" label="Target sector" required=true
                    value={draft.target_sector.clone()}
                    on_change={draft_field(draft, on_change, |d, v| d.target_sector = v)} />
                <TextField id="stage" label="Stage" required=true
                    value={draft.stage.clone()}
                    on_change={draft_field(draft, on_change, |d, v| d.stage = v)} />
                <TextField id="budget-needed" label="Budget needed" kind="number" required=true
                    value={draft.budget_needed.clone()}
                    on_change={draft_field(draft, on_change, |d, v| d.budget_needed = v)} />
                <TextField id="revenue-model" label="Revenue model" required=true
                    value={draft.revenue_model.clone()}
                    on_change={draft_field(draft, on_change, |d, v| d.revenue_model = v)} />
                <div class="md:col-span-2">
                    <TextField id="short-description" label="Short description" multiline=true required=true
                        value={draft.short_description.clone()}
                        on_change={draft_field(draft, on_change, |d, v| d.short_description = v)} />
                </div>
            </div>
        }
    }

    fn row(&self) -> Html {
        html! {
            <>
                <p class="text-sm">{&self.short_description}</p>
                <div class="flex flex-wrap gap-2 text-xs">
                    <span class="badge badge-outline">{&self.target_sector}</span>
                    <span class="badge badge-outline">{&self.stage}</span>
                    if let Some(budget) = self.budget_needed {
                        <span class="badge badge-primary">{format!("${budget:.0}")}</span>
                    }
                </div>
            </>
        }
    }

    fn detail_route(id: i64) -> Option<MainRoute> {
        Some(MainRoute::ProjectDetail { id })
    }
}

#[function_component(ProjectsPage)]
pub fn projects_page() -> Html {
    html! { <ResourcePanel<Project> title="Projects" /> }
}
