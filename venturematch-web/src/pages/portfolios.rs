use shared::models::{InvestmentPortfolio, PortfolioDraft};
use yew::prelude::*;

use crate::components::{PanelView, ResourcePanel, TextField, draft_field};

impl PanelView for InvestmentPortfolio {
    fn form(draft: &PortfolioDraft, on_change: &Callback<PortfolioDraft>) -> Html {
        html! {
            <>
                <TextField id="invested-company" label="Company" required=true
                    value={draft.invested_company_name.clone()}
                    on_change={draft_field(draft, on_change, |d, v| d.invested_company_name = v)} />
                <TextField id="investment-date" label="Investment date" kind="date" required=true
                    value={draft.investment_date.clone()}
                    on_change={draft_field(draft, on_change, |d, v| d.investment_date = v)} />
                <TextField id="portfolio-description" label="Description" multiline=true
                    value={draft.description.clone()}
                    on_change={draft_field(draft, on_change, |d, v| d.description = v)} />
            </>
        }
    }

    fn row(&self) -> Html {
        html! {
            <>
                <p class="text-xs text-base-content/70">{&self.investment_date}</p>
                if let Some(description) = &self.description {
                    <p class="text-sm">{description}</p>
                }
            </>
        }
    }
}

#[function_component(PortfoliosPage)]
pub fn portfolios_page() -> Html {
    html! { <ResourcePanel<InvestmentPortfolio> title="Investment portfolio" /> }
}
