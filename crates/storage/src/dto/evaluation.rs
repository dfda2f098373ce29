use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::scoring::ScoreBreakdown;
use crate::models::{CriterionScore, Evaluation, EvaluationStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveEvaluationRequest {
    pub judge_id: Uuid,
    pub submission_id: Uuid,
    #[validate(length(max = 50, message = "At most 50 scores per evaluation"))]
    pub scores: Vec<CriterionScore>,
    #[serde(default = "default_status")]
    pub status: EvaluationStatus,
}

fn default_status() -> EvaluationStatus {
    EvaluationStatus::Draft
}

/// Derived progress of a judge on a submission; never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationProgress {
    None,
    Draft,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EvaluationStatusView {
    pub status: EvaluationProgress,
    pub label: String,
    /// Emphasis hint for clients: 0 muted, 1 normal, 2 strong
    pub visual_weight: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluationResponse {
    pub evaluation: Evaluation,
    pub progress: EvaluationStatusView,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeSubmissionStatus {
    pub team_id: Uuid,
    pub submission_id: Option<Uuid>,
    pub progress: EvaluationStatusView,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JudgeStatusFilter {
    pub hackathon_id: Uuid,
}
