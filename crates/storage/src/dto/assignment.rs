use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{AssignmentMap, AssignmentMode};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AutoAssignRequest {
    #[validate(range(min = 1, max = 20, message = "judges_per_team must be between 1 and 20"))]
    pub judges_per_team: u32,
}

/// Manual edit of one judge's team set
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssignTeamsRequest {
    #[validate(length(max = 500))]
    pub team_ids: Vec<Uuid>,
    pub mode: AssignmentMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeAssignment {
    pub judge_id: Uuid,
    pub team_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentsResponse {
    pub hackathon_id: Uuid,
    pub assignments: Vec<JudgeAssignment>,
}

impl AssignmentsResponse {
    pub fn from_map(hackathon_id: Uuid, map: &AssignmentMap) -> Self {
        Self {
            hackathon_id,
            assignments: map
                .iter()
                .map(|(judge_id, teams)| JudgeAssignment {
                    judge_id,
                    team_ids: teams.iter().copied().collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JudgeWorkload {
    pub judge_id: Uuid,
    pub team_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamCoverage {
    pub team_id: Uuid,
    pub judge_count: usize,
}

/// Read-only coverage report used to spot orphaned teams
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkloadSummary {
    pub per_judge_count: Vec<JudgeWorkload>,
    pub per_team_count: Vec<TeamCoverage>,
    pub teams_unassigned: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssignmentStats {
    pub total_judges: usize,
    pub total_teams: usize,
    pub teams_assigned: usize,
    pub teams_unassigned: usize,
    /// Mean teams per judge, rounded to one decimal place
    pub avg_workload: Decimal,
}
