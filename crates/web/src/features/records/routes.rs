use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{get_records, recompute_records};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes() -> Router<Database> {
    Router::new().route("/:category", get(get_records))
}

pub fn admin_routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/recompute", post(recompute_records))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
