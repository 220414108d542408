//! Cat resource routes.

use crate::handlers::cats::{create, crupdate, delete as delete_handler, list, read, search, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn cat_routes(state: AppState) -> Router {
    Router::new()
        .route("/cats", get(list).post(create))
        .route("/cats/search", get(search))
        .route(
            "/cats/:id",
            get(read).patch(update).put(crupdate).delete(delete_handler),
        )
        .with_state(state)
}
