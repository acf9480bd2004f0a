use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::resource::{Resource, first_blank};

/// Largest profile picture accepted before encoding.
pub const MAX_PROFILE_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Message shown when a picture exceeds [`MAX_PROFILE_IMAGE_BYTES`].
pub const IMAGE_TOO_LARGE: &str = "Image size should be less than 5MB";

/// Rejects pictures larger than [`MAX_PROFILE_IMAGE_BYTES`].
///
/// # Errors
/// Returns [`IMAGE_TOO_LARGE`] when the size is over the limit.
pub fn check_image_size(size: u64) -> Result<(), &'static str> {
    if size > MAX_PROFILE_IMAGE_BYTES {
        Err(IMAGE_TOO_LARGE)
    } else {
        Ok(())
    }
}

/// Encodes raw image bytes as a base64 `data:` URL, the form profiles store.
#[must_use]
pub fn image_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

fn visible(flag: bool, phone: Option<&String>) -> Option<&str> {
    phone
        .map(String::as_str)
        .filter(|number| flag && !number.trim().is_empty())
}

/// An entrepreneur profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", remote = "Self")]
pub struct Entrepreneur {
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub entrepreneur_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool_or_default")]
    pub phone_visibility: bool,
    #[serde(default)]
    pub profile_picture: Option<String>,
    /// Account that owns this profile.
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<i64>,
}

lenient::wire_keys!(Entrepreneur {
    "entrepreneurId" <- ["entrepreneur_id", "id"],
    "userId" <- ["user_id"],
});

impl Entrepreneur {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Phone number, only when the owner chose to show it.
    #[must_use]
    pub fn visible_phone(&self) -> Option<&str> {
        visible(self.phone_visibility, self.phone_number.as_ref())
    }
}

/// Create/edit form for [`Entrepreneur`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntrepreneurDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub bio: String,
    pub phone_number: String,
    pub phone_visibility: bool,
    pub profile_picture: String,
}

impl Default for EntrepreneurDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            bio: String::new(),
            phone_number: String::new(),
            phone_visibility: true,
            profile_picture: String::new(),
        }
    }
}

impl Resource for Entrepreneur {
    type Draft = EntrepreneurDraft;

    const NAME: &'static str = "entrepreneur";
    const COLLECTION_PATH: &'static str = "/entrepreneurs";

    fn id(&self) -> Option<i64> {
        self.entrepreneur_id
    }

    fn owner_id(&self) -> Option<i64> {
        self.user_id
    }

    fn label(&self) -> String {
        self.full_name()
    }

    fn missing_field(draft: &Self::Draft) -> Option<&'static str> {
        first_blank(&[
            ("first name", draft.first_name.as_str()),
            ("last name", draft.last_name.as_str()),
            ("email", draft.email.as_str()),
            ("password", draft.password.as_str()),
        ])
    }

    fn missing_field_for_update(draft: &Self::Draft) -> Option<&'static str> {
        first_blank(&[
            ("first name", draft.first_name.as_str()),
            ("last name", draft.last_name.as_str()),
            ("email", draft.email.as_str()),
        ])
    }

    fn to_draft(&self) -> Self::Draft {
        EntrepreneurDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: String::new(),
            bio: self.bio.clone().unwrap_or_default(),
            phone_number: self.phone_number.clone().unwrap_or_default(),
            phone_visibility: self.phone_visibility,
            profile_picture: self.profile_picture.clone().unwrap_or_default(),
        }
    }

    fn update_path(id: i64) -> String {
        format!("{}/{id}/edit", Self::COLLECTION_PATH)
    }
}

/// An investor profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(remote = "Self")]
pub struct Investor {
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub investor_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool_or_default")]
    pub phone_visibility: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Account that owns this profile.
    #[serde(
        rename = "userId",
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<i64>,
}

lenient::wire_keys!(Investor {
    "investor_id" <- ["id"],
    "userId" <- ["user_id"],
});

impl Investor {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Phone number, only when the owner chose to show it.
    #[must_use]
    pub fn visible_phone(&self) -> Option<&str> {
        visible(self.phone_visibility, self.phone_number.as_ref())
    }
}

/// Create/edit form for [`Investor`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvestorDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub bio: String,
    pub phone_number: String,
    pub phone_visibility: bool,
    pub location: String,
    pub profile_picture: String,
}

impl Default for InvestorDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            bio: String::new(),
            phone_number: String::new(),
            phone_visibility: true,
            location: String::new(),
            profile_picture: String::new(),
        }
    }
}

impl Resource for Investor {
    type Draft = InvestorDraft;

    const NAME: &'static str = "investor";
    const COLLECTION_PATH: &'static str = "/investors";

    fn id(&self) -> Option<i64> {
        self.investor_id
    }

    fn owner_id(&self) -> Option<i64> {
        self.user_id
    }

    fn label(&self) -> String {
        self.full_name()
    }

    fn missing_field(draft: &Self::Draft) -> Option<&'static str> {
        first_blank(&[
            ("first name", draft.first_name.as_str()),
            ("last name", draft.last_name.as_str()),
            ("email", draft.email.as_str()),
            ("password", draft.password.as_str()),
        ])
    }

    fn missing_field_for_update(draft: &Self::Draft) -> Option<&'static str> {
        first_blank(&[
            ("first name", draft.first_name.as_str()),
            ("last name", draft.last_name.as_str()),
            ("email", draft.email.as_str()),
        ])
    }

    fn to_draft(&self) -> Self::Draft {
        InvestorDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: String::new(),
            bio: self.bio.clone().unwrap_or_default(),
            phone_number: self.phone_number.clone().unwrap_or_default(),
            phone_visibility: self.phone_visibility,
            location: self.location.clone().unwrap_or_default(),
            profile_picture: self.profile_picture.clone().unwrap_or_default(),
        }
    }

    fn update_path(id: i64) -> String {
        format!("{}/{id}/edit", Self::COLLECTION_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entrepreneur_wire_format() {
        let entrepreneur: Entrepreneur = serde_json::from_str(
            r#"{"id":3,"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com",
                "phoneNumber":"555","phoneVisibility":false,"userId":"9"}"#,
        )
        .unwrap();
        assert_eq!(entrepreneur.entrepreneur_id, Some(3));
        assert_eq!(entrepreneur.user_id, Some(9));
        assert_eq!(entrepreneur.full_name(), "Ada Lovelace");
        assert_eq!(entrepreneur.visible_phone(), None);

        let draft = EntrepreneurDraft {
            first_name: "Ada".into(),
            ..EntrepreneurDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["phoneVisibility"], true);
    }

    #[test]
    fn investor_wire_format() {
        let investor: Investor = serde_json::from_str(
            r#"{"investor_id":4,"first_name":"Grace","last_name":"Hopper","email":"g@example.com",
                "phone_number":"123","phone_visibility":true,"location":"Arlington","userId":11}"#,
        )
        .unwrap();
        assert_eq!(investor.investor_id, Some(4));
        assert_eq!(investor.user_id, Some(11));
        assert_eq!(investor.visible_phone(), Some("123"));
        assert_eq!(investor.location.as_deref(), Some("Arlington"));
    }

    #[test]
    fn null_profile_fields_read_as_empty() {
        let entrepreneur: Entrepreneur = serde_json::from_str(
            r#"{"entrepreneurId":2,"firstName":"Ada","lastName":null,"email":null,
                "bio":null,"phoneVisibility":null}"#,
        )
        .unwrap();
        assert_eq!(entrepreneur.last_name, "");
        assert_eq!(entrepreneur.email, "");
        assert_eq!(entrepreneur.bio, None);
        assert!(!entrepreneur.phone_visibility);
        assert_eq!(entrepreneur.full_name(), "Ada");

        let investors: Vec<Investor> = serde_json::from_str(
            r#"[{"investor_id":1,"first_name":"Grace","last_name":null,"phone_visibility":null},
                {"investor_id":2,"first_name":"Alan","last_name":"Turing"}]"#,
        )
        .unwrap();
        assert_eq!(investors.len(), 2);
        assert_eq!(investors[0].last_name, "");
        assert!(!investors[0].phone_visibility);
    }

    #[test]
    fn profiles_accept_both_id_keys() {
        let entrepreneur: Entrepreneur = serde_json::from_str(
            r#"{"id":1,"entrepreneurId":1,"firstName":"Ada","userId":9,"user_id":9}"#,
        )
        .unwrap();
        assert_eq!(entrepreneur.entrepreneur_id, Some(1));
        assert_eq!(entrepreneur.user_id, Some(9));

        let entrepreneur: Entrepreneur =
            serde_json::from_str(r#"{"id":5,"entrepreneur_id":3,"firstName":"Ada"}"#).unwrap();
        assert_eq!(entrepreneur.entrepreneur_id, Some(3));

        let investor: Investor =
            serde_json::from_str(r#"{"id":1,"investor_id":1,"first_name":"Grace"}"#).unwrap();
        assert_eq!(investor.investor_id, Some(1));

        let investor: Investor =
            serde_json::from_str(r#"{"id":"8","first_name":"Grace","user_id":4}"#).unwrap();
        assert_eq!(investor.investor_id, Some(8));
        assert_eq!(investor.user_id, Some(4));

        let json = serde_json::to_value(&investor).unwrap();
        assert_eq!(json["investor_id"], 8);
        assert_eq!(json["userId"], 4);
        assert!(json.get("id").is_none());
    }

    #[test]
    fn profile_update_paths_use_edit_suffix() {
        assert_eq!(Entrepreneur::update_path(5), "/entrepreneurs/5/edit");
        assert_eq!(Investor::update_path(6), "/investors/6/edit");
        assert_eq!(Investor::item_path(6), "/investors/6");
    }

    #[test]
    fn profile_drafts_require_identity_fields() {
        let mut draft = InvestorDraft::default();
        assert_eq!(Investor::missing_field(&draft), Some("first name"));
        draft.first_name = "Grace".into();
        draft.last_name = "Hopper".into();
        draft.email = "g@example.com".into();
        assert_eq!(Investor::missing_field(&draft), Some("password"));
        draft.password = "secret".into();
        assert_eq!(Investor::missing_field(&draft), None);
    }

    #[test]
    fn edits_keep_the_stored_password() {
        let draft = Entrepreneur {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            ..Entrepreneur::default()
        }
        .to_draft();
        assert_eq!(Entrepreneur::missing_field_for_update(&draft), None);
        assert_eq!(Entrepreneur::missing_field(&draft), Some("password"));
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn edit_draft_never_carries_password() {
        let investor = Investor {
            first_name: "Grace".into(),
            bio: Some("Navy".into()),
            ..Investor::default()
        };
        let draft = investor.to_draft();
        assert!(draft.password.is_empty());
        assert_eq!(draft.bio, "Navy");
    }

    #[test]
    fn image_limits_and_encoding() {
        assert!(check_image_size(MAX_PROFILE_IMAGE_BYTES).is_ok());
        assert_eq!(
            check_image_size(MAX_PROFILE_IMAGE_BYTES + 1),
            Err(IMAGE_TOO_LARGE)
        );
        assert_eq!(image_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }
}
