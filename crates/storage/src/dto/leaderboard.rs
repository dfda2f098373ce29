use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::PaginationMeta;
use crate::models::HackathonStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub submission_id: Uuid,
    pub team_id: Uuid,
    pub avg_score: Decimal,
    pub evaluation_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub hackathon_id: Uuid,
    pub status: HackathonStatus,
    pub data: Vec<LeaderboardEntry>,
    pub pagination: PaginationMeta,
}
