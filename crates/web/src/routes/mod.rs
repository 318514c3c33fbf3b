use axum::Router;
use storage::Database;

use crate::features::{rankings, records};
use crate::middleware::auth::ApiKeys;

pub fn api_router(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .nest("/api/rankings", rankings::routes::routes())
        .nest("/api/records", records::routes::routes())
        .nest("/api/admin/records", records::routes::admin_routes(api_keys))
}
