//! Generic CRUD execution against PostgreSQL, parameterized over an entity and its two schemas.

use crate::error::AppError;
use crate::models::Entity;
use crate::schemas::Changeset;
use crate::sql::{self, FieldValue, QueryBuf};
use sqlx::{PgConnection, Postgres};
use std::fmt::{Debug, Display};
use std::marker::PhantomData;

/// Binds one entity type to its full schema, create schema, and primary key.
pub trait CrudResource: Send + Sync + 'static {
    type Entity: Entity + TryFrom<Self::CreateSchema, Error = AppError>;
    type Schema: From<Self::Entity> + Send;
    type CreateSchema: Changeset + Send;
    type Id: Into<FieldValue> + Clone + Debug + Display + Send + Sync;

    /// Primary key column, used for every by-id statement.
    fn id_column() -> &'static str;

    /// Runs on the new entity right before it is inserted.
    fn on_creation(_entity: &mut Self::Entity) {}
}

/// CRUD over one session. Every statement runs on the borrowed connection (usually an open
/// transaction), so writes are visible to later reads in the same unit of work. Nothing here commits.
pub struct BaseServiceCrud<'c, R: CrudResource> {
    conn: &'c mut PgConnection,
    _resource: PhantomData<R>,
}

impl<'c, R: CrudResource> BaseServiceCrud<'c, R> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self {
            conn,
            _resource: PhantomData,
        }
    }

    pub fn from_entity(entity: Option<R::Entity>) -> Option<R::Schema> {
        entity.map(R::Schema::from)
    }

    pub fn to_entity(schema: R::CreateSchema) -> Result<R::Entity, AppError> {
        R::Entity::try_from(schema)
    }

    pub fn from_entities(entities: Vec<R::Entity>) -> Vec<R::Schema> {
        entities.into_iter().map(R::Schema::from).collect()
    }

    /// Fetch one row by primary key. Absent is `None`, not an error.
    pub async fn get_by_id(&mut self, id: R::Id) -> Result<Option<R::Schema>, AppError> {
        let q = sql::select_by_id::<R::Entity>(R::id_column(), id.into());
        self.execute_and_get_one(q).await
    }

    /// Insert a new row and return it with server-assigned columns filled in.
    pub async fn create(&mut self, schema: R::CreateSchema) -> Result<R::Schema, AppError> {
        let mut entity = Self::to_entity(schema)?;
        R::on_creation(&mut entity);
        let q = sql::insert::<R::Entity>(entity.insert_values());
        let row = self
            .fetch_optional(&q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        Ok(R::Schema::from(row))
    }

    /// Write only the columns the schema assigns. Zero matching rows is not an error.
    pub async fn update(&mut self, id: R::Id, schema: R::CreateSchema) -> Result<(), AppError> {
        let values: Vec<_> = schema
            .assigned()
            .into_iter()
            .filter(|(col, _)| *col != R::id_column())
            .collect();
        if values.is_empty() {
            tracing::debug!(table = R::Entity::TABLE, id = %id, "update with no assigned fields");
            return Ok(());
        }
        let q = sql::update::<R::Entity>(R::id_column(), id.into(), values);
        self.execute(&q).await?;
        Ok(())
    }

    /// Update if the row exists, otherwise create. Which one happened is not reported.
    pub async fn crupdate(&mut self, id: R::Id, schema: R::CreateSchema) -> Result<(), AppError> {
        if self.get_by_id(id.clone()).await?.is_some() {
            self.update(id, schema).await
        } else {
            self.create(schema).await.map(|_| ())
        }
    }

    /// Delete by primary key and return the removed row.
    pub async fn delete(&mut self, id: R::Id) -> Result<R::Schema, AppError> {
        let q = sql::delete::<R::Entity>(R::id_column(), id.clone().into());
        self.fetch_optional(&q)
            .await?
            .map(R::Schema::from)
            .ok_or_else(|| AppError::NotFound(format!("{} {}", R::Entity::TABLE, id)))
    }

    pub async fn get_all(&mut self) -> Result<Vec<R::Schema>, AppError> {
        self.execute_and_get_all(sql::select_all::<R::Entity>()).await
    }

    /// Equality filter per `(field, value)`, all of which must match.
    pub fn build_filter_query<K: AsRef<str>>(filters: &[(K, FieldValue)]) -> Result<QueryBuf, AppError> {
        if let Some((unknown, _)) = filters
            .iter()
            .find(|(field, _)| R::Entity::column(field.as_ref()).is_none())
        {
            return Err(AppError::UnknownField(unknown.as_ref().to_string()));
        }
        Ok(sql::select_where::<R::Entity, K>(filters))
    }

    pub async fn find_all_by_filters<K: AsRef<str>>(
        &mut self,
        filters: &[(K, FieldValue)],
    ) -> Result<Vec<R::Schema>, AppError> {
        let q = Self::build_filter_query(filters)?;
        self.execute_and_get_all(q).await
    }

    pub async fn find_one_by_filters<K: AsRef<str>>(
        &mut self,
        filters: &[(K, FieldValue)],
    ) -> Result<Option<R::Schema>, AppError> {
        let q = Self::build_filter_query(filters)?;
        self.execute_and_get_one(q).await
    }

    /// Run a prebuilt SELECT and map the first row, if any.
    pub async fn execute_and_get_one(&mut self, q: QueryBuf) -> Result<Option<R::Schema>, AppError> {
        Ok(Self::from_entity(self.fetch_optional(&q).await?))
    }

    /// Run a prebuilt SELECT and map every row.
    pub async fn execute_and_get_all(&mut self, q: QueryBuf) -> Result<Vec<R::Schema>, AppError> {
        Ok(Self::from_entities(self.fetch_all(&q).await?))
    }

    async fn fetch_optional(&mut self, q: &QueryBuf) -> Result<Option<R::Entity>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<Postgres, R::Entity>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&mut *self.conn).await?)
    }

    async fn fetch_all(&mut self, q: &QueryBuf) -> Result<Vec<R::Entity>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<Postgres, R::Entity>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&mut *self.conn).await?)
    }

    async fn execute(&mut self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query::<Postgres>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.execute(&mut *self.conn).await?.rows_affected())
    }
}
