use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Mean of a submission's submitted evaluation totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AggregateScore {
    pub submission_id: Uuid,
    pub avg_score: Decimal,
    pub evaluation_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CriterionContribution {
    pub criterion_key: String,
    /// Raw score after clamping to `[0, max_score]`
    pub raw_score: Decimal,
    pub max_score: Decimal,
    pub weight: Decimal,
    pub points: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreBreakdown {
    pub total: Decimal,
    pub contributions: Vec<CriterionContribution>,
}
