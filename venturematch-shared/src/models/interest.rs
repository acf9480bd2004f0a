use serde::{Deserialize, Serialize};

use super::lenient;
use crate::resource::{Resource, first_blank};

/// An investor's interest area and the social impact they care about.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(remote = "Self")]
pub struct InterestAndValue {
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub interest_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub interest_area: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub social_impact: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub investor_id: Option<i64>,
}

lenient::wire_keys!(InterestAndValue {
    "interest_id" <- ["id"],
    "investor_id" <- ["investorId"],
});

/// Create/edit form for [`InterestAndValue`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterestDraft {
    pub interest_area: String,
    pub social_impact: String,
}

impl Resource for InterestAndValue {
    type Draft = InterestDraft;

    const NAME: &'static str = "interest";
    const COLLECTION_PATH: &'static str = "/interestandvalues";

    fn id(&self) -> Option<i64> {
        self.interest_id
    }

    fn label(&self) -> String {
        self.interest_area.clone()
    }

    fn missing_field(draft: &Self::Draft) -> Option<&'static str> {
        first_blank(&[
            ("interest area", draft.interest_area.as_str()),
            ("social impact", draft.social_impact.as_str()),
        ])
    }

    fn to_draft(&self) -> Self::Draft {
        InterestDraft {
            interest_area: self.interest_area.clone(),
            social_impact: self.social_impact.clone(),
        }
    }
}
