//! The `cats` table.

use crate::error::AppError;
use crate::models::entity::{Column, ColumnKind, Entity};
use crate::schemas::CatCreateSchema;
use crate::sql::FieldValue;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Cat {
    pub id: i32,
    pub name: String,
    pub age: i32,
}

impl Entity for Cat {
    const TABLE: &'static str = "cats";
    const COLUMNS: &'static [Column] = &[
        Column {
            name: "id",
            kind: ColumnKind::Int,
            server_default: true,
        },
        Column {
            name: "name",
            kind: ColumnKind::Text,
            server_default: false,
        },
        Column {
            name: "age",
            kind: ColumnKind::Int,
            server_default: false,
        },
    ];

    fn column_values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::from(self.id)),
            ("name", FieldValue::from(self.name.clone())),
            ("age", FieldValue::from(self.age)),
        ]
    }
}

/// Unpersisted cat; `id` stays 0 until the insert assigns one.
impl TryFrom<CatCreateSchema> for Cat {
    type Error = AppError;

    fn try_from(schema: CatCreateSchema) -> Result<Self, Self::Error> {
        Ok(Cat {
            id: 0,
            name: schema.name.require("name")?,
            age: schema.age.require("age")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Field;

    #[test]
    fn builds_entity_ignoring_requested_id() {
        let schema = CatCreateSchema {
            id: Field::Set(Some(42)),
            name: Field::Set("Tom".into()),
            age: Field::Set(3),
        };
        let cat = Cat::try_from(schema).unwrap();
        assert_eq!(cat.id, 0);
        assert_eq!(cat.column_values().len(), Cat::COLUMNS.len());
        assert_eq!(
            cat.insert_values(),
            vec![("name", FieldValue::Text("Tom".into())), ("age", FieldValue::Int(3))]
        );
    }

    #[test]
    fn missing_field_is_a_validation_error() {
        let schema = CatCreateSchema {
            name: Field::Set("Tom".into()),
            ..Default::default()
        };
        let err = Cat::try_from(schema).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "age is required"));
    }

    #[test]
    fn column_lookup() {
        assert_eq!(Cat::column("age").map(|c| c.kind), Some(ColumnKind::Int));
        assert!(Cat::column("color").is_none());
    }
}
