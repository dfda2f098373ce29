use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Weighted scoring dimension of a hackathon
///
/// `key` is unique within a hackathon and is what evaluations reference.
/// The whole list is replaced at once, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Criterion {
    pub key: String,
    pub display_name: String,
    pub description: Option<String>,
    pub max_score: Decimal,
    pub weight: Decimal,
}
