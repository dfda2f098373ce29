use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use storage::Database;

use super::handlers::{
    assign_teams, auto_assign, get_judge_teams, get_stats, get_workload, list_assignments,
    remove_judge,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/:hackathon_id/assignments/auto", post(auto_assign))
        .route(
            "/:hackathon_id/judges/:judge_id/teams",
            patch(assign_teams).delete(remove_judge),
        )
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:hackathon_id/assignments", get(list_assignments))
        .route("/:hackathon_id/assignments/workload", get(get_workload))
        .route("/:hackathon_id/assignments/stats", get(get_stats))
        .route("/:hackathon_id/judges/:judge_id/teams", get(get_judge_teams))
        .merge(protected)
}
