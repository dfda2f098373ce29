use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        evaluation::{
            EvaluationResponse, JudgeStatusFilter, JudgeSubmissionStatus, SaveEvaluationRequest,
        },
        scoring::AggregateScore,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/evaluations",
    request_body = SaveEvaluationRequest,
    responses(
        (status = 200, description = "Evaluation saved", body = EvaluationResponse),
        (status = 400, description = "Invalid evaluation"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found"),
        (status = 409, description = "Hackathon no longer accepts changes")
    ),
    tag = "evaluations",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn save_evaluation(
    State(db): State<Database>,
    Json(payload): Json<SaveEvaluationRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let response = services::save_evaluation(db.pool(), payload).await?;
    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/evaluations/{judge_id}/{submission_id}",
    params(
        ("judge_id" = Uuid, Path, description = "Judge ID"),
        ("submission_id" = Uuid, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Evaluation with score breakdown", body = EvaluationResponse),
        (status = 404, description = "No evaluation for this judge and submission")
    ),
    tag = "evaluations"
)]
pub async fn get_evaluation(
    State(db): State<Database>,
    Path((judge_id, submission_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let response = services::get_evaluation(db.pool(), judge_id, submission_id).await?;
    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/judges/{judge_id}/evaluations/status",
    params(
        ("judge_id" = Uuid, Path, description = "Judge ID"),
        JudgeStatusFilter
    ),
    responses(
        (status = 200, description = "Progress per assigned team", body = Vec<JudgeSubmissionStatus>),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "evaluations"
)]
pub async fn get_judge_statuses(
    State(db): State<Database>,
    Path(judge_id): Path<Uuid>,
    Query(filter): Query<JudgeStatusFilter>,
) -> Result<Response, WebError> {
    let statuses = services::judge_statuses(db.pool(), filter.hackathon_id, judge_id).await?;
    Ok(Json(statuses).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/{submission_id}/score",
    params(
        ("submission_id" = Uuid, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Mean score over submitted evaluations", body = AggregateScore),
        (status = 404, description = "Submission not found")
    ),
    tag = "evaluations"
)]
pub async fn get_submission_score(
    State(db): State<Database>,
    Path(submission_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let score = services::submission_score(db.pool(), submission_id).await?;
    Ok(Json(score).into_response())
}
