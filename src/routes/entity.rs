//! Entity CRUD routes built from the resolved model.
//! Uses parameterized paths so handlers resolve the entity by its path segment
//! (`books`, `orders`, `customers`); unknown segments are 404.

use crate::handlers::entity::{create, delete as delete_handler, list, patch, read, replace};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/:path_segment", get(list).post(create))
        .route(
            "/:path_segment/:id",
            get(read).put(replace).patch(patch).delete(delete_handler),
        )
        .with_state(state)
}
