//! HTTP handlers.

pub mod cats;
