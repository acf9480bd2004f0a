//! List, show, create, update and delete for every backend collection.
//!
//! Drafts are given as JSON objects keyed by the API's field names. Fields
//! left out keep their default on create and their current value on update.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared::api::ApiClient;
use shared::collection::{RemoveOutcome, ResourceApi};
use shared::resource::Resource;
use tracing::debug;

/// Operations available on a resource collection.
#[derive(Subcommand, Debug)]
pub enum ResourceCommand {
    /// List every record
    List {
        /// Print the records as JSON instead of one line each
        #[arg(long)]
        json: bool,
    },
    /// Print one record as JSON
    Show {
        /// Record identifier
        id: i64,
    },
    /// Create a record
    Create(DraftArgs),
    /// Update an existing record
    Update {
        /// Record identifier
        id: i64,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a record
    Delete {
        /// Record identifier
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Operations on a collection the clients only read.
#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List every record
    List {
        /// Print the records as JSON instead of one line each
        #[arg(long)]
        json: bool,
    },
    /// Print one record as JSON
    Show {
        /// Record identifier
        id: i64,
    },
}

/// Where the draft fields come from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct DraftArgs {
    /// JSON object of fields, e.g. '{"title": "Launch"}'
    #[arg(long, short)]
    pub data: Option<String>,

    /// File holding the JSON object of fields
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

impl DraftArgs {
    fn fields(&self) -> Result<Value> {
        let raw = match (&self.data, &self.file) {
            (Some(data), _) => data.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            (None, None) => bail!("either --data or --file is required"),
        };
        serde_json::from_str(&raw).context("draft fields are not valid JSON")
    }
}

pub async fn run<R>(command: ResourceCommand, client: &ApiClient) -> Result<()>
where
    R: Resource,
    R::Draft: DeserializeOwned,
{
    let api = ResourceApi::<R>::new(client.clone());
    match command {
        ResourceCommand::List { json } => list(&api, json).await?,
        ResourceCommand::Show { id } => show(&api, id).await?,
        ResourceCommand::Create(args) => {
            let draft = merge_draft(&R::Draft::default(), args.fields()?)?;
            api.create(&draft)
                .await
                .with_context(|| format!("failed to create {}", R::NAME))?;
            println!("Created {}", R::NAME);
        }
        ResourceCommand::Update { id, draft } => {
            let current = api
                .get(id)
                .await
                .with_context(|| format!("failed to fetch {} {id}", R::NAME))?;
            let draft = merge_draft(&current.to_draft(), draft.fields()?)?;
            api.update(id, &draft)
                .await
                .with_context(|| format!("failed to update {} {id}", R::NAME))?;
            println!("Updated {} {id}", R::NAME);
        }
        ResourceCommand::Delete { id, yes } => {
            let confirm = |prompt: &str| yes || ask(prompt);
            let outcome = api
                .remove(id, &confirm)
                .await
                .with_context(|| format!("failed to delete {} {id}", R::NAME))?;
            match outcome {
                RemoveOutcome::Deleted => println!("Deleted {} {id}", R::NAME),
                RemoveOutcome::Cancelled => println!("Cancelled"),
            }
        }
    }
    Ok(())
}

pub async fn run_read_only<R: Resource>(command: ListCommand, client: &ApiClient) -> Result<()> {
    let api = ResourceApi::<R>::new(client.clone());
    match command {
        ListCommand::List { json } => list(&api, json).await,
        ListCommand::Show { id } => show(&api, id).await,
    }
}

async fn list<R: Resource>(api: &ResourceApi<R>, json: bool) -> Result<()> {
    let items = api
        .list()
        .await
        .with_context(|| format!("failed to list {}s", R::NAME))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No {}s found", R::NAME);
    } else {
        for item in &items {
            let id = item.id().map_or_else(|| "-".to_string(), |id| id.to_string());
            println!("{id}\t{}", item.label());
        }
    }
    Ok(())
}

async fn show<R: Resource>(api: &ResourceApi<R>, id: i64) -> Result<()> {
    let item = api
        .get(id)
        .await
        .with_context(|| format!("failed to fetch {} {id}", R::NAME))?;
    println!("{}", serde_json::to_string_pretty(&item)?);
    Ok(())
}

/// Overlays the keys of `fields` onto `base`.
fn merge_draft<D: Serialize + DeserializeOwned>(base: &D, fields: Value) -> Result<D> {
    let mut merged = serde_json::to_value(base)?;
    let (Value::Object(target), Value::Object(fields)) = (&mut merged, fields) else {
        bail!("draft fields must be a JSON object");
    };
    target.extend(fields);
    serde_json::from_value(merged).context("draft fields do not match the expected types")
}

/// Asks on stdout and reads a yes/no answer; anything but `y`/`yes` declines.
fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    io::stdout().flush().ok();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    let accepted = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
    debug!(accepted, "delete confirmation answered");
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::{InvestorDraft, ProjectDraft};

    #[test]
    fn merge_overlays_given_fields() {
        let base = ProjectDraft {
            project_name: "Old".into(),
            stage: "Seed".into(),
            ..ProjectDraft::default()
        };

        let merged = merge_draft(&base, json!({"project_name": "New"})).unwrap();
        assert_eq!(merged.project_name, "New");
        assert_eq!(merged.stage, "Seed");
    }

    #[test]
    fn merge_keeps_draft_defaults() {
        let merged: InvestorDraft =
            merge_draft(&InvestorDraft::default(), json!({"first_name": "Ada"})).unwrap();
        assert_eq!(merged.first_name, "Ada");
        assert_eq!(merged.phone_visibility, InvestorDraft::default().phone_visibility);
    }

    #[test]
    fn merge_rejects_non_objects_and_bad_types() {
        assert!(merge_draft(&ProjectDraft::default(), json!(["a"])).is_err());
        assert!(merge_draft(&ProjectDraft::default(), json!({"stage": 3})).is_err());
    }
}
