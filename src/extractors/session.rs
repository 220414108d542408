//! Request-scoped database session: one transaction per request.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use std::ops::{Deref, DerefMut};

/// An open transaction on a pooled connection.
///
/// - `begin` (or extracting it in a handler) starts the transaction
/// - `commit` makes the work durable
/// - dropping it without `commit` rolls back and returns the connection to the pool
pub struct Session(Transaction<'static, Postgres>);

impl Session {
    pub async fn begin(pool: &PgPool) -> Result<Self, AppError> {
        Ok(Session(pool.begin().await?))
    }

    pub async fn commit(self) -> Result<(), AppError> {
        self.0.commit().await?;
        Ok(())
    }
}

impl Deref for Session {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Session::begin(&state.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{CatCreateSchema, Field};
    use crate::service::CatService;
    use crate::store::ensure_tables;

    fn tom() -> CatCreateSchema {
        CatCreateSchema {
            id: Field::Unset,
            name: Field::Set("Tom".to_string()),
            age: Field::Set(3),
        }
    }

    #[sqlx::test(migrations = false)]
    async fn dropped_session_rolls_back(pool: PgPool) -> Result<(), AppError> {
        ensure_tables(&pool).await?;

        let mut session = Session::begin(&pool).await?;
        let created = CatService::new(&mut session).create(tom()).await?;
        assert_eq!(created.name, "Tom");
        drop(session);

        let mut conn = pool.acquire().await?;
        assert!(CatService::new(&mut conn).get_all().await?.is_empty());
        Ok(())
    }

    #[sqlx::test(migrations = false)]
    async fn committed_session_is_visible(pool: PgPool) -> Result<(), AppError> {
        ensure_tables(&pool).await?;

        let mut session = Session::begin(&pool).await?;
        let created = CatService::new(&mut session).create(tom()).await?;
        session.commit().await?;

        let mut conn = pool.acquire().await?;
        assert_eq!(CatService::new(&mut conn).get_all().await?, vec![created]);
        Ok(())
    }
}
