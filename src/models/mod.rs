//! Persisted entities.

mod cat;
pub mod entity;

pub use cat::Cat;
pub use entity::{Column, ColumnKind, Entity};
