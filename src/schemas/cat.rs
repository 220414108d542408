//! Cat payloads: create shape (input) and full shape (output).

use crate::models::Cat;
use crate::schemas::{Changeset, Field};
use crate::sql::FieldValue;
use serde::{Deserialize, Serialize};

/// Input for create and update. `id` is accepted (including `null`) but never written.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CatCreateSchema {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub id: Field<Option<i32>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub age: Field<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatSchema {
    pub id: i32,
    pub name: String,
    pub age: i32,
}

impl From<Cat> for CatSchema {
    fn from(cat: Cat) -> Self {
        CatSchema {
            id: cat.id,
            name: cat.name,
            age: cat.age,
        }
    }
}

impl Changeset for CatCreateSchema {
    fn assigned(&self) -> Vec<(&'static str, FieldValue)> {
        let mut out = Vec::new();
        if let Field::Set(Some(id)) = self.id {
            out.push(("id", FieldValue::from(id)));
        }
        if let Field::Set(name) = &self.name {
            out.push(("name", FieldValue::from(name.as_str())));
        }
        if let Field::Set(age) = self.age {
            out.push(("age", FieldValue::from(age)));
        }
        out
    }

    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.name.is_unset() {
            out.push("name");
        }
        if self.age.is_unset() {
            out.push("age");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigned_lists_only_present_fields() {
        let schema: CatCreateSchema = serde_json::from_str(r#"{"age": 4}"#).unwrap();
        assert_eq!(schema.assigned(), vec![("age", FieldValue::Int(4))]);
        assert_eq!(schema.missing_required(), vec!["name"]);
    }

    #[test]
    fn full_payload_has_nothing_missing() {
        let schema: CatCreateSchema = serde_json::from_str(r#"{"name": "Tom", "age": 3}"#).unwrap();
        assert!(schema.missing_required().is_empty());
        assert!(schema.id.is_unset());
    }

    #[test]
    fn null_id_is_accepted_and_not_assigned() {
        let schema: CatCreateSchema =
            serde_json::from_str(r#"{"id": null, "name": "Tom", "age": 3}"#).unwrap();
        assert_eq!(schema.id, Field::Set(None));
        assert!(schema.missing_required().is_empty());
        assert_eq!(
            schema.assigned(),
            vec![("name", FieldValue::from("Tom")), ("age", FieldValue::Int(3))]
        );
    }

    #[test]
    fn mistyped_age_fails_to_deserialize() {
        assert!(serde_json::from_str::<CatCreateSchema>(r#"{"name": "Tom", "age": "old"}"#).is_err());
    }

    #[test]
    fn full_schema_mirrors_entity() {
        let schema = CatSchema::from(Cat {
            id: 1,
            name: "Tom".into(),
            age: 3,
        });
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            serde_json::json!({"id": 1, "name": "Tom", "age": 3})
        );
    }
}
