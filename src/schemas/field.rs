//! `Field<T>`: a payload value that may be absent, as opposed to present-but-null.

use crate::error::AppError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Use with `#[serde(default, skip_serializing_if = "Field::is_unset")]`
/// so a missing JSON key deserializes to `Unset`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field<T> {
    Unset,
    Set(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unset
    }
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Set(v) => Some(v),
            Field::Unset => None,
        }
    }

    /// Value of a required field; `name` is used in the validation message.
    pub fn require(self, name: &str) -> Result<T, AppError> {
        self.into_option()
            .ok_or_else(|| AppError::Validation(format!("{} is required", name)))
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Set(v) => v.serialize(serializer),
            Field::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Field::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    struct Payload {
        #[serde(default, skip_serializing_if = "Field::is_unset")]
        name: Field<String>,
        #[serde(default, skip_serializing_if = "Field::is_unset")]
        nickname: Field<Option<String>>,
    }

    #[test]
    fn missing_key_is_unset() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert!(p.name.is_unset());
        assert!(p.nickname.is_unset());
    }

    #[test]
    fn explicit_null_is_set_to_none() {
        let p: Payload = serde_json::from_str(r#"{"nickname": null}"#).unwrap();
        assert_eq!(p.nickname, Field::Set(None));
    }

    #[test]
    fn null_for_non_nullable_is_rejected() {
        assert!(serde_json::from_str::<Payload>(r#"{"name": null}"#).is_err());
    }

    #[test]
    fn unset_fields_are_skipped_on_serialize() {
        let p = Payload {
            name: Field::Set("Tom".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"name":"Tom"}"#);
    }

    #[test]
    fn require_reports_the_field_name() {
        let err = Field::<i32>::Unset.require("age").unwrap_err();
        assert_eq!(err.to_string(), "validation: age is required");
        assert_eq!(Field::Set(3).require("age").unwrap(), 3);
    }
}
