use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::criteria::{CriteriaResponse, SetCriteriaRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/hackathons/{hackathon_id}/criteria",
    params(
        ("hackathon_id" = Uuid, Path, description = "Hackathon ID")
    ),
    responses(
        (status = 200, description = "Criteria retrieved successfully", body = CriteriaResponse),
        (status = 404, description = "Hackathon not found or criteria never set")
    ),
    tag = "criteria"
)]
pub async fn get_criteria(
    State(db): State<Database>,
    Path(hackathon_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let response = services::get_criteria(db.pool(), hackathon_id).await?;
    Ok(Json(response).into_response())
}

#[utoipa::path(
    put,
    path = "/api/hackathons/{hackathon_id}/criteria",
    params(
        ("hackathon_id" = Uuid, Path, description = "Hackathon ID")
    ),
    request_body = SetCriteriaRequest,
    responses(
        (status = 200, description = "Criteria replaced successfully", body = CriteriaResponse),
        (status = 400, description = "Invalid criteria"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found"),
        (status = 409, description = "Hackathon no longer accepts changes")
    ),
    tag = "criteria",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_criteria(
    State(db): State<Database>,
    Path(hackathon_id): Path<Uuid>,
    Json(payload): Json<SetCriteriaRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let response = services::set_criteria(db.pool(), hackathon_id, payload).await?;
    Ok(Json(response).into_response())
}
