//! Detail views: one record plus the related rows that point at it.

use anyhow::{Context, Result};
use clap::Subcommand;
use shared::api::ApiClient;
use shared::detail::{load_entrepreneur_detail, load_investor_detail, load_project};

#[derive(Subcommand, Debug)]
pub enum DetailCommand {
    /// A project and its figures
    Project {
        /// Project identifier
        id: i64,
    },
    /// An investor with their interests and portfolio
    Investor {
        /// Investor identifier
        id: i64,
    },
    /// An entrepreneur with their expertise, education and experience
    Entrepreneur {
        /// Entrepreneur identifier
        id: i64,
    },
}

pub async fn run(command: DetailCommand, client: &ApiClient) -> Result<()> {
    match command {
        DetailCommand::Project { id } => {
            let project = load_project(client, id)
                .await
                .with_context(|| format!("failed to load project {id}"))?;
            println!("{}", project.project_name);
            println!("{}", project.short_description);
            println!("sector: {}", project.target_sector);
            println!("stage: {}", project.stage);
            if let Some(budget) = project.budget_needed {
                println!("budget needed: {budget}");
            }
            println!("revenue model: {}", project.revenue_model);
            if let Some(founder) = project.entrepreneur_id {
                println!("entrepreneur: {founder}");
            }
        }
        DetailCommand::Investor { id } => {
            let detail = load_investor_detail(client, id)
                .await
                .with_context(|| format!("failed to load investor {id}"))?;
            let investor = &detail.investor;
            println!("{}{}", investor.full_name(), owner_marker(detail.is_owner));
            println!("email: {}", investor.email);
            print_optional("location", investor.location.as_deref());
            print_optional("phone", investor.visible_phone());
            print_optional("bio", investor.bio.as_deref());

            println!("interests:");
            for interest in &detail.interests {
                println!("  - {} ({})", interest.interest_area, interest.social_impact);
            }
            println!("portfolio:");
            for portfolio in &detail.portfolios {
                println!(
                    "  - {} on {}",
                    portfolio.invested_company_name, portfolio.investment_date
                );
            }
        }
        DetailCommand::Entrepreneur { id } => {
            let detail = load_entrepreneur_detail(client, id)
                .await
                .with_context(|| format!("failed to load entrepreneur {id}"))?;
            let entrepreneur = &detail.entrepreneur;
            println!("{}{}", entrepreneur.full_name(), owner_marker(detail.is_owner));
            println!("email: {}", entrepreneur.email);
            print_optional("phone", entrepreneur.visible_phone());
            print_optional("bio", entrepreneur.bio.as_deref());

            println!("expertise:");
            for row in &detail.expertise {
                match &row.level {
                    Some(level) => println!("  - {} ({level})", row.expertise_area),
                    None => println!("  - {}", row.expertise_area),
                }
            }
            println!("education:");
            for row in &detail.education {
                let degree = row.degree.as_deref().unwrap_or("-");
                println!("  - {degree}, {}", row.institution);
            }
            println!("experience:");
            for row in &detail.experiences {
                let position = row.position.as_deref().unwrap_or("-");
                let period = row.period().unwrap_or_default();
                println!("  - {position} at {} {period}", row.company_name);
            }
        }
    }
    Ok(())
}

fn owner_marker(is_owner: bool) -> &'static str {
    if is_owner { " (you)" } else { "" }
}

fn print_optional(label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|value| !value.is_empty()) {
        println!("{label}: {value}");
    }
}
