use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{get_evaluation, get_judge_statuses, get_submission_score, save_evaluation};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(save_evaluation))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:judge_id/:submission_id", get(get_evaluation))
        .merge(protected)
}

pub fn judge_routes() -> Router<Database> {
    Router::new().route("/:judge_id/evaluations/status", get(get_judge_statuses))
}

pub fn submission_routes() -> Router<Database> {
    Router::new().route("/:submission_id/score", get(get_submission_score))
}
