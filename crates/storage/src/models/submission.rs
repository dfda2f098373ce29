use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A team's scorable entry. Only submissions can be ranked.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Submission {
    pub submission_id: Uuid,
    pub team_id: Uuid,
    pub is_final: bool,
    pub created_at: chrono::NaiveDateTime,
}
