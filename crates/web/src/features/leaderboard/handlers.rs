use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginationMeta, PaginationParams},
        leaderboard::LeaderboardResponse,
    },
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/hackathons/{hackathon_id}/leaderboard",
    params(
        ("hackathon_id" = Uuid, Path, description = "Hackathon ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Ranked submissions", body = LeaderboardResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 403, description = "Judging is still in progress"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    Path(hackathon_id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (status, entries) = services::get_leaderboard(db.pool(), hackathon_id).await?;
    if !status.leaderboard_visible() {
        return Err(WebError::Forbidden(format!(
            "Leaderboard is published once judging closes; hackathon is {}",
            status
        )));
    }

    let total_items = entries.len() as i64;
    let response = LeaderboardResponse {
        hackathon_id,
        status,
        data: pagination.page_of(entries),
        pagination: PaginationMeta::new(pagination.page, pagination.page_size, total_items),
    };

    Ok(Json(response).into_response())
}
