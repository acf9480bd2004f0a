//! The [`Resource`] trait binds a model type to its backend collection.
//!
//! Every panel in the clients is the same list/create/update/delete loop over
//! a different endpoint; the trait carries the per-resource differences.

use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// A backend collection of flat records addressed by a numeric id.
pub trait Resource: Clone + Debug + PartialEq + DeserializeOwned + Serialize + 'static {
    /// Form payload used for create and update requests.
    type Draft: Clone + Debug + Default + PartialEq + Serialize + 'static;

    /// Human-readable singular name, used in messages ("project").
    const NAME: &'static str;

    /// Collection endpoint, e.g. `/projects`.
    const COLLECTION_PATH: &'static str;

    /// Identifier assigned by the backend, if present in the payload.
    fn id(&self) -> Option<i64>;

    /// Account that owns the record, for resources tied to a user.
    fn owner_id(&self) -> Option<i64> {
        None
    }

    /// Short label shown in lists.
    fn label(&self) -> String;

    /// Name of the first required draft field left empty.
    fn missing_field(draft: &Self::Draft) -> Option<&'static str>;

    /// Like [`Resource::missing_field`], for edits of an existing record.
    fn missing_field_for_update(draft: &Self::Draft) -> Option<&'static str> {
        Self::missing_field(draft)
    }

    /// Draft pre-filled from an existing record, for edit forms.
    fn to_draft(&self) -> Self::Draft;

    /// Endpoint of a single record.
    #[must_use]
    fn item_path(id: i64) -> String {
        format!("{}/{id}", Self::COLLECTION_PATH)
    }

    /// Endpoint receiving `PUT` updates. Profiles override this with `/:id/edit`.
    #[must_use]
    fn update_path(id: i64) -> String {
        Self::item_path(id)
    }
}

/// Returns the name of the first blank field among `fields`.
pub(crate) fn first_blank(fields: &[(&'static str, &str)]) -> Option<&'static str> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_blank_reports_in_order() {
        assert_eq!(first_blank(&[("a", "x"), ("b", " "), ("c", "")]), Some("b"));
        assert_eq!(first_blank(&[("a", "x")]), None);
        assert_eq!(first_blank(&[]), None);
    }
}
