use axum::{
    Router, middleware,
    routing::{get, put},
};
use storage::Database;

use super::handlers::{get_criteria, set_criteria};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/:hackathon_id/criteria", put(set_criteria))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:hackathon_id/criteria", get(get_criteria))
        .merge(protected)
}
