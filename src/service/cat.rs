//! The cat resource: binds `Cat` and its schemas to the generic CRUD service.

use crate::models::Cat;
use crate::schemas::{CatCreateSchema, CatSchema};
use crate::service::crud::{BaseServiceCrud, CrudResource};

pub struct CatResource;

impl CrudResource for CatResource {
    type Entity = Cat;
    type Schema = CatSchema;
    type CreateSchema = CatCreateSchema;
    type Id = i32;

    fn id_column() -> &'static str {
        "id"
    }
}

pub type CatService<'c> = BaseServiceCrud<'c, CatResource>;
