use shared::models::{InterestAndValue, InterestDraft};
use yew::prelude::*;

use crate::components::{PanelView, ResourcePanel, TextField, draft_field};

impl PanelView for InterestAndValue {
    fn form(draft: &InterestDraft, on_change: &Callback<InterestDraft>) -> Html {
        html! {
            <>
                <TextField id="interest-area" label="Interest area" required=true
                    value={draft.interest_area.clone()}
                    on_change={draft_field(draft, on_change, |d, v| d.interest_area = v)} />
                <TextField id="social-impact" label="Social impact" required=true multiline=true
                    value={draft.social_impact.clone()}
                    on_change={draft_field(draft, on_change, |d, v| d.social_impact = v)} />
            </>
        }
    }

    fn row(&self) -> Html {
        html! { <p class="text-sm">{&self.social_impact}</p> }
    }
}

#[function_component(InterestsPage)]
pub fn interests_page() -> Html {
    html! { <ResourcePanel<InterestAndValue> title="Interests and values" /> }
}
