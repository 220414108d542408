//! Table description shared by every persisted entity.

use crate::error::AppError;
use crate::sql::FieldValue;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// Column type, used to parse textual input (query strings) into bind values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    BigInt,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    /// Parse a raw string for a column of this kind.
    pub fn parse(self, column: &str, raw: &str) -> Result<FieldValue, AppError> {
        let invalid = || AppError::BadRequest(format!("invalid value for {}: '{}'", column, raw));
        Ok(match self {
            ColumnKind::Int => FieldValue::Int(raw.parse().map_err(|_| invalid())?),
            ColumnKind::BigInt => FieldValue::BigInt(raw.parse().map_err(|_| invalid())?),
            ColumnKind::Float => FieldValue::Float(raw.parse().map_err(|_| invalid())?),
            ColumnKind::Bool => {
                if raw.eq_ignore_ascii_case("true") {
                    FieldValue::Bool(true)
                } else if raw.eq_ignore_ascii_case("false") {
                    FieldValue::Bool(false)
                } else {
                    return Err(invalid());
                }
            }
            ColumnKind::Text => FieldValue::Text(raw.to_string()),
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Assigned by the database on insert (e.g. SERIAL primary key).
    pub server_default: bool,
}

/// A row type persisted in one table.
///
/// ```ignore
/// impl Entity for Cat {
///     const TABLE: &'static str = "cats";
///     const COLUMNS: &'static [Column] = &[...];
///     fn column_values(&self) -> Vec<(&'static str, FieldValue)> { ... }
/// }
/// ```
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    const TABLE: &'static str;
    /// Every column, in the order rows are selected.
    const COLUMNS: &'static [Column];

    /// Every column's current value, keyed by column name.
    fn column_values(&self) -> Vec<(&'static str, FieldValue)>;

    /// Values written by INSERT. Columns with a server default are omitted.
    fn insert_values(&self) -> Vec<(&'static str, FieldValue)> {
        self.column_values()
            .into_iter()
            .filter(|(name, _)| Self::column(name).map_or(true, |c| !c.server_default))
            .collect()
    }

    fn column(name: &str) -> Option<&'static Column> {
        Self::COLUMNS.iter().find(|c| c.name == name)
    }
}
