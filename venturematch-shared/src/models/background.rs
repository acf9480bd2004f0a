//! Read-only background rows shown on an entrepreneur's profile.

use serde::{Deserialize, Serialize};

use super::lenient;
use crate::resource::Resource;

/// A skill an entrepreneur lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(remote = "Self")]
pub struct Expertise {
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub expertise_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub expertise_area: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub entrepreneur_id: Option<i64>,
}

lenient::wire_keys!(Expertise {
    "expertise_id" <- ["id"],
    "entrepreneur_id" <- ["entrepreneurId"],
});

/// A degree or course of study.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(remote = "Self")]
pub struct Education {
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub education_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub institution: String,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_i64")]
    pub graduation_year: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub entrepreneur_id: Option<i64>,
}

lenient::wire_keys!(Education {
    "education_id" <- ["id"],
    "entrepreneur_id" <- ["entrepreneurId"],
});

/// A past position.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(remote = "Self")]
pub struct Experience {
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub experience_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub company_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub entrepreneur_id: Option<i64>,
}

lenient::wire_keys!(Experience {
    "experience_id" <- ["id"],
    "entrepreneur_id" <- ["entrepreneurId"],
});

impl Experience {
    /// "start – end", with "present" for an open-ended position.
    #[must_use]
    pub fn period(&self) -> Option<String> {
        let start = self.start_date.as_deref()?;
        let end = self.end_date.as_deref().unwrap_or("present");
        Some(format!("{start} – {end}"))
    }
}

macro_rules! read_only_resource {
    ($ty:ty, $name:literal, $path:literal, $id:ident, $label:ident) => {
        impl Resource for $ty {
            type Draft = ();

            const NAME: &'static str = $name;
            const COLLECTION_PATH: &'static str = $path;

            fn id(&self) -> Option<i64> {
                self.$id
            }

            fn label(&self) -> String {
                self.$label.clone()
            }

            fn missing_field((): &Self::Draft) -> Option<&'static str> {
                None
            }

            fn to_draft(&self) -> Self::Draft {}
        }
    };
}

read_only_resource!(Expertise, "expertise", "/expertise", expertise_id, expertise_area);
read_only_resource!(Education, "education", "/education", education_id, institution);
read_only_resource!(Experience, "experience", "/experiences", experience_id, company_name);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_rows_parse_loosely() {
        let education: Education = serde_json::from_str(
            r#"{"id":"3","institution":"ETH","graduation_year":"2019","entrepreneurId":7}"#,
        )
        .unwrap();
        assert_eq!(education.id(), Some(3));
        assert_eq!(education.graduation_year, Some(2019));
        assert_eq!(education.entrepreneur_id, Some(7));
        assert_eq!(education.label(), "ETH");
    }

    #[test]
    fn background_rows_take_the_named_id_over_id() {
        let rows: Vec<Expertise> = serde_json::from_str(
            r#"[{"id":1,"expertise_id":4,"expertise_area":null,"entrepreneur_id":7,"entrepreneurId":7}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].id(), Some(4));
        assert_eq!(rows[0].entrepreneur_id, Some(7));
        assert_eq!(rows[0].label(), "");
    }

    #[test]
    fn experience_period_defaults_to_present() {
        let mut experience = Experience {
            start_date: Some("2020-01".into()),
            ..Experience::default()
        };
        assert_eq!(experience.period().as_deref(), Some("2020-01 – present"));
        experience.end_date = Some("2022-06".into());
        assert_eq!(experience.period().as_deref(), Some("2020-01 – 2022-06"));
        experience.start_date = None;
        assert_eq!(experience.period(), None);
    }

    #[test]
    fn collection_paths() {
        assert_eq!(Expertise::COLLECTION_PATH, "/expertise");
        assert_eq!(Experience::item_path(2), "/experiences/2");
    }
}
