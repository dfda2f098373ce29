use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::assignment::{
        AssignTeamsRequest, AssignmentStats, AssignmentsResponse, AutoAssignRequest,
        JudgeAssignment, WorkloadSummary,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/hackathons/{hackathon_id}/assignments",
    params(
        ("hackathon_id" = Uuid, Path, description = "Hackathon ID")
    ),
    responses(
        (status = 200, description = "Assignments retrieved successfully", body = AssignmentsResponse),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "assignments"
)]
pub async fn list_assignments(
    State(db): State<Database>,
    Path(hackathon_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let map = services::get_assignments(db.pool(), hackathon_id).await?;
    Ok(Json(AssignmentsResponse::from_map(hackathon_id, &map)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/hackathons/{hackathon_id}/assignments/auto",
    params(
        ("hackathon_id" = Uuid, Path, description = "Hackathon ID")
    ),
    request_body = AutoAssignRequest,
    responses(
        (status = 200, description = "Judges assigned", body = AssignmentsResponse),
        (status = 400, description = "Invalid judges_per_team"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found"),
        (status = 409, description = "Hackathon no longer accepts changes"),
        (status = 422, description = "Not enough judges for the requested coverage")
    ),
    tag = "assignments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn auto_assign(
    State(db): State<Database>,
    Path(hackathon_id): Path<Uuid>,
    Json(payload): Json<AutoAssignRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let map =
        services::auto_assign(db.pool(), hackathon_id, payload.judges_per_team as usize).await?;
    Ok(Json(AssignmentsResponse::from_map(hackathon_id, &map)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/hackathons/{hackathon_id}/assignments/workload",
    params(
        ("hackathon_id" = Uuid, Path, description = "Hackathon ID")
    ),
    responses(
        (status = 200, description = "Workload summary", body = WorkloadSummary),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "assignments"
)]
pub async fn get_workload(
    State(db): State<Database>,
    Path(hackathon_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let summary = services::get_workload(db.pool(), hackathon_id).await?;
    Ok(Json(summary).into_response())
}

#[utoipa::path(
    get,
    path = "/api/hackathons/{hackathon_id}/assignments/stats",
    params(
        ("hackathon_id" = Uuid, Path, description = "Hackathon ID")
    ),
    responses(
        (status = 200, description = "Assignment statistics", body = AssignmentStats),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "assignments"
)]
pub async fn get_stats(
    State(db): State<Database>,
    Path(hackathon_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let stats = services::get_stats(db.pool(), hackathon_id).await?;
    Ok(Json(stats).into_response())
}

#[utoipa::path(
    get,
    path = "/api/hackathons/{hackathon_id}/judges/{judge_id}/teams",
    params(
        ("hackathon_id" = Uuid, Path, description = "Hackathon ID"),
        ("judge_id" = Uuid, Path, description = "Judge ID")
    ),
    responses(
        (status = 200, description = "Teams assigned to the judge", body = JudgeAssignment),
        (status = 404, description = "Judge has no assignments")
    ),
    tag = "assignments"
)]
pub async fn get_judge_teams(
    State(db): State<Database>,
    Path((hackathon_id, judge_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let assignment = services::get_judge_teams(db.pool(), hackathon_id, judge_id).await?;
    Ok(Json(assignment).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/hackathons/{hackathon_id}/judges/{judge_id}/teams",
    params(
        ("hackathon_id" = Uuid, Path, description = "Hackathon ID"),
        ("judge_id" = Uuid, Path, description = "Judge ID")
    ),
    request_body = AssignTeamsRequest,
    responses(
        (status = 200, description = "Judge's teams after the edit", body = JudgeAssignment),
        (status = 400, description = "Unknown judge or teams"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found"),
        (status = 409, description = "Hackathon no longer accepts changes")
    ),
    tag = "assignments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn assign_teams(
    State(db): State<Database>,
    Path((hackathon_id, judge_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<AssignTeamsRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let assignment = services::assign_teams(
        db.pool(),
        hackathon_id,
        judge_id,
        &payload.team_ids,
        payload.mode,
    )
    .await?;
    Ok(Json(assignment).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/hackathons/{hackathon_id}/judges/{judge_id}/teams",
    params(
        ("hackathon_id" = Uuid, Path, description = "Hackathon ID"),
        ("judge_id" = Uuid, Path, description = "Judge ID")
    ),
    responses(
        (status = 204, description = "Judge removed from all teams"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found"),
        (status = 409, description = "Hackathon no longer accepts changes")
    ),
    tag = "assignments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_judge(
    State(db): State<Database>,
    Path((hackathon_id, judge_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    services::remove_judge(db.pool(), hackathon_id, judge_id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
