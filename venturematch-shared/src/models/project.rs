use serde::{Deserialize, Serialize};

use super::lenient;
use crate::resource::{Resource, first_blank};

/// A startup project listed by an entrepreneur.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(remote = "Self")]
pub struct Project {
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub project_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub short_description: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub target_sector: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub stage: String,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub budget_needed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub revenue_model: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub entrepreneur_id: Option<i64>,
}

lenient::wire_keys!(Project { "project_id" <- ["id"] });

/// Create/edit form for [`Project`].
///
/// The budget stays textual, the way the form field holds it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDraft {
    pub project_name: String,
    pub short_description: String,
    pub target_sector: String,
    pub stage: String,
    pub budget_needed: String,
    pub revenue_model: String,
}

impl Resource for Project {
    type Draft = ProjectDraft;

    const NAME: &'static str = "project";
    const COLLECTION_PATH: &'static str = "/projects";

    fn id(&self) -> Option<i64> {
        self.project_id
    }

    fn label(&self) -> String {
        self.project_name.clone()
    }

    fn missing_field(draft: &Self::Draft) -> Option<&'static str> {
        first_blank(&[
            ("project name", draft.project_name.as_str()),
            ("short description", draft.short_description.as_str()),
            ("target sector", draft.target_sector.as_str()),
            ("stage", draft.stage.as_str()),
            ("budget needed", draft.budget_needed.as_str()),
            ("revenue model", draft.revenue_model.as_str()),
        ])
    }

    fn to_draft(&self) -> Self::Draft {
        ProjectDraft {
            project_name: self.project_name.clone(),
            short_description: self.short_description.clone(),
            target_sector: self.target_sector.clone(),
            stage: self.stage.clone(),
            budget_needed: self
                .budget_needed
                .map(|budget| budget.to_string())
                .unwrap_or_default(),
            revenue_model: self.revenue_model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_accepts_textual_budget() {
        let project: Project = serde_json::from_str(
            r#"{"project_id":1,"project_name":"Solar Roof","short_description":"Panels",
                "target_sector":"energy","stage":"seed","budget_needed":"150000",
                "revenue_model":"SaaS","entrepreneur_id":2}"#,
        )
        .unwrap();
        assert_eq!(project.id(), Some(1));
        assert_eq!(project.budget_needed, Some(150_000.0));
        assert_eq!(project.entrepreneur_id, Some(2));
        assert_eq!(project.to_draft().budget_needed, "150000");
    }

    #[test]
    fn project_draft_requires_every_field() {
        let draft = ProjectDraft {
            project_name: "Solar Roof".into(),
            ..ProjectDraft::default()
        };
        assert_eq!(Project::missing_field(&draft), Some("short description"));
    }
}
