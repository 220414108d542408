//! Cat handlers: create, read, list, search, update, crupdate, delete.

use crate::error::AppError;
use crate::extractors::session::Session;
use crate::models::{Cat, Entity};
use crate::schemas::CatCreateSchema;
use crate::service::{CatService, RequestValidator};
use crate::sql::FieldValue;
use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;

const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Offset/limit applied in memory, after the whole table has been loaded.
fn paginate<T>(items: Vec<T>, skip: usize, limit: usize) -> Vec<T> {
    items.into_iter().skip(skip).take(limit).collect()
}

fn filters_from_query(params: HashMap<String, String>) -> Result<Vec<(String, FieldValue)>, AppError> {
    params
        .into_iter()
        .map(|(k, v)| -> Result<(String, FieldValue), AppError> {
            // unknown columns pass through as text; the service rejects them by name
            let value = match Cat::column(&k) {
                Some(col) => col.kind.parse(&k, &v)?,
                None => FieldValue::Text(v),
            };
            Ok((k, value))
        })
        .collect()
}

pub async fn create(
    mut session: Session,
    payload: Result<Json<CatCreateSchema>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    RequestValidator::validate(&body)?;
    let cat = CatService::new(&mut session).create(body).await?;
    session.commit().await?;
    tracing::info!(id = cat.id, name = %cat.name, "cat created");
    Ok((StatusCode::CREATED, Json(cat)))
}

pub async fn read(mut session: Session, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    let cat = CatService::new(&mut session)
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("cat {}", id)))?;
    session.commit().await?;
    Ok(Json(cat))
}

pub async fn list(
    mut session: Session,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let cats = CatService::new(&mut session).get_all().await?;
    session.commit().await?;
    Ok(Json(paginate(cats, params.skip, params.limit)))
}

pub async fn search(
    mut session: Session,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filters = filters_from_query(params)?;
    let cats = CatService::new(&mut session).find_all_by_filters(&filters).await?;
    session.commit().await?;
    Ok(Json(cats))
}

pub async fn update(
    mut session: Session,
    Path(id): Path<i32>,
    payload: Result<Json<CatCreateSchema>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    CatService::new(&mut session).update(id, body).await?;
    session.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn crupdate(
    mut session: Session,
    Path(id): Path<i32>,
    payload: Result<Json<CatCreateSchema>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    RequestValidator::validate(&body)?;
    CatService::new(&mut session).crupdate(id, body).await?;
    session.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(mut session: Session, Path(id): Path<i32>) -> Result<impl IntoResponse, AppError> {
    let cat = CatService::new(&mut session).delete(id).await?;
    session.commit().await?;
    tracing::info!(id = cat.id, "cat deleted");
    Ok(Json(cat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_slices_in_memory() {
        let items: Vec<i32> = (1..=10).collect();
        assert_eq!(paginate(items.clone(), 0, 3), vec![1, 2, 3]);
        assert_eq!(paginate(items.clone(), 8, 5), vec![9, 10]);
        assert!(paginate(items, 20, 5).is_empty());
    }

    #[test]
    fn list_params_default() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn query_filters_use_column_types() {
        let params = HashMap::from([("age".to_string(), "3".to_string())]);
        let filters = filters_from_query(params).unwrap();
        assert_eq!(filters, vec![("age".to_string(), FieldValue::Int(3))]);
    }

    #[test]
    fn unknown_query_filter_is_left_for_the_service() {
        let params = HashMap::from([("color".to_string(), "black".to_string())]);
        let filters = filters_from_query(params).unwrap();
        let err = CatService::build_filter_query(&filters).unwrap_err();
        assert!(matches!(err, AppError::UnknownField(_)));
    }

    #[test]
    fn bad_typed_query_filter_is_rejected() {
        let params = HashMap::from([("age".to_string(), "old".to_string())]);
        assert!(matches!(filters_from_query(params), Err(AppError::BadRequest(_))));
    }
}
