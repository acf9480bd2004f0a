//! Lenient deserializers for backend records.
//!
//! The backend is inconsistent about its records: identifiers and amounts
//! arrive as JSON numbers, numeric strings, empty strings, or `null`, text
//! and flags may be `null`, and a record can carry an id under several keys.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a JSON value into an integer, accepting integral floats and
/// numeric strings.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.is_finite())
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Coerces a JSON value into a float, accepting numeric strings.
#[must_use]
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Deserializes an optional integer from a number, numeric string, or null.
///
/// # Errors
/// Only fails when the underlying input is not valid JSON.
pub fn optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64))
}

/// Deserializes an optional float from a number, numeric string, or null.
///
/// # Errors
/// Only fails when the underlying input is not valid JSON.
pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

/// Deserializes a string, reading `null` as empty.
///
/// # Errors
/// Fails when the value is neither a string nor `null`.
pub fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a flag, reading `null` as `false`.
///
/// # Errors
/// Fails when the value is neither a boolean nor `null`.
pub fn bool_or_default<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// Moves the `alternates` of a key onto `canonical` and drops them.
///
/// A non-null value already under `canonical` wins; otherwise the first
/// non-null alternate, in the order given, fills it.
pub fn fold_keys(record: &mut Value, canonical: &str, alternates: &[&str]) {
    let Value::Object(fields) = record else {
        return;
    };
    for key in alternates {
        let Some(found) = fields.remove(*key) else {
            continue;
        };
        let slot = fields.entry(canonical).or_insert(Value::Null);
        if slot.is_null() {
            *slot = found;
        }
    }
}

/// Implements `Serialize` and `Deserialize` for a model whose derives carry
/// `#[serde(remote = "Self")]`, folding alternate key spellings with
/// [`fold_keys`] before the derived deserializer sees the record.
macro_rules! wire_keys {
    ($model:ty { $($canonical:literal <- [$($alternate:literal),+ $(,)?]),+ $(,)? }) => {
        impl serde::Serialize for $model {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                <$model>::serialize(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $model {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let mut record = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                $(
                    $crate::models::lenient::fold_keys(&mut record, $canonical, &[$($alternate),+]);
                )+
                <$model>::deserialize(record).map_err(<D::Error as serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use wire_keys;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Amounts {
        #[serde(default, deserialize_with = "optional_i64")]
        id: Option<i64>,
        #[serde(default, deserialize_with = "optional_f64")]
        amount: Option<f64>,
    }

    #[test]
    fn integers_accept_numbers_and_numeric_strings() {
        assert_eq!(value_as_i64(&json!(7)), Some(7));
        assert_eq!(value_as_i64(&json!(7.0)), Some(7));
        assert_eq!(value_as_i64(&json!(" 42 ")), Some(42));
        assert_eq!(value_as_i64(&json!(7.5)), None);
        assert_eq!(value_as_i64(&json!("seven")), None);
        assert_eq!(value_as_i64(&json!(null)), None);
        assert_eq!(value_as_i64(&json!(true)), None);
    }

    #[test]
    fn amount_fields_are_coerced() {
        let row: Amounts = serde_json::from_str(r#"{"id":"12","amount":"2500.5"}"#).unwrap();
        assert_eq!(row.id, Some(12));
        assert_eq!(row.amount, Some(2500.5));

        let row: Amounts = serde_json::from_str(r#"{"id":null,"amount":""}"#).unwrap();
        assert_eq!(row.id, None);
        assert_eq!(row.amount, None);

        let row: Amounts = serde_json::from_str("{}").unwrap();
        assert_eq!(row.id, None);
        assert_eq!(row.amount, None);
    }

    #[derive(Debug, Deserialize)]
    struct Card {
        #[serde(default, deserialize_with = "string_or_default")]
        title: String,
        #[serde(default, deserialize_with = "bool_or_default")]
        public: bool,
    }

    #[test]
    fn null_text_and_flags_read_as_defaults() {
        let card: Card = serde_json::from_str(r#"{"title":null,"public":null}"#).unwrap();
        assert_eq!(card.title, "");
        assert!(!card.public);

        let card: Card = serde_json::from_str(r#"{"title":"Seed","public":true}"#).unwrap();
        assert_eq!(card.title, "Seed");
        assert!(card.public);

        assert!(serde_json::from_str::<Card>(r#"{"title":3}"#).is_err());
    }

    #[test]
    fn folded_keys_prefer_the_canonical_value() {
        let mut record = json!({"id": 1, "blog_id": 2});
        fold_keys(&mut record, "blog_id", &["id"]);
        assert_eq!(record, json!({"blog_id": 2}));

        let mut record = json!({"id": 5, "blog_id": null});
        fold_keys(&mut record, "blog_id", &["id"]);
        assert_eq!(record, json!({"blog_id": 5}));

        let mut record = json!({"entrepreneur_id": 3, "id": 4});
        fold_keys(&mut record, "entrepreneurId", &["entrepreneur_id", "id"]);
        assert_eq!(record, json!({"entrepreneurId": 3}));

        let mut list = json!([1]);
        fold_keys(&mut list, "blog_id", &["id"]);
        assert_eq!(list, json!([1]));
    }
}
