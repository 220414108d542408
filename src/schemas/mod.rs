//! Request and response shapes.

mod cat;
mod field;

pub use cat::{CatCreateSchema, CatSchema};
pub use field::Field;

use crate::sql::FieldValue;

/// An input payload that knows which columns it explicitly assigns.
pub trait Changeset {
    /// Assigned columns in declaration order; unset fields are absent.
    fn assigned(&self) -> Vec<(&'static str, FieldValue)>;

    /// Required fields the payload leaves unset.
    fn missing_required(&self) -> Vec<&'static str>;
}
