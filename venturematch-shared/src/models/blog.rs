use serde::{Deserialize, Serialize};

use super::lenient;
use crate::resource::{Resource, first_blank};

/// A blog post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(remote = "Self")]
pub struct Blog {
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub blog_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub category: String,
}

lenient::wire_keys!(Blog { "blog_id" <- ["id"] });

impl Blog {
    /// First `max_chars` characters of the content, for list cards.
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.content.chars();
        let excerpt: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{excerpt}…")
        } else {
            excerpt
        }
    }
}

/// Create/edit form for [`Blog`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl Resource for Blog {
    type Draft = BlogDraft;

    const NAME: &'static str = "blog";
    const COLLECTION_PATH: &'static str = "/blogs";

    fn id(&self) -> Option<i64> {
        self.blog_id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn missing_field(draft: &Self::Draft) -> Option<&'static str> {
        first_blank(&[
            ("title", draft.title.as_str()),
            ("content", draft.content.as_str()),
            ("category", draft.category.as_str()),
        ])
    }

    fn to_draft(&self) -> Self::Draft {
        BlogDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            category: self.category.clone(),
        }
    }
}
