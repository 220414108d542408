//! Service-level routes: `GET /` greeting and `GET /ready`.

use crate::models::{Cat, Entity};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

async fn read_root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// Ready once the pool can reach the `cats` table.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let check = format!("SELECT 1 FROM {} LIMIT 1", crate::sql::quoted(Cat::TABLE));
    match sqlx::query(&check).fetch_optional(&state.pool).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready", "table": Cat::TABLE }))),
        Err(e) => {
            tracing::warn!(error = %e, table = Cat::TABLE, "not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "table": Cat::TABLE })),
            )
        }
    }
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/ready", get(ready))
        .with_state(state)
}
