//! Generic CRUD service and the resources bound to it.

mod cat;
mod crud;
mod validation;
pub use cat::{CatResource, CatService};
pub use crud::{BaseServiceCrud, CrudResource};
pub use validation::RequestValidator;
