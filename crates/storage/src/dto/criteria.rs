use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Criterion;

/// A single criterion in a `PUT .../criteria` payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CriterionInput {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Key must be between 1 and 64 characters"
    ))]
    #[validate(custom(function = "validate_key"))]
    pub key: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Display name must be between 1 and 255 characters"
    ))]
    pub display_name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub max_score: Decimal,

    pub weight: Decimal,
}

/// Full replacement of a hackathon's criteria
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetCriteriaRequest {
    #[validate(length(max = 50, message = "At most 50 criteria are supported"))]
    #[validate(nested)]
    pub criteria: Vec<CriterionInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CriteriaResponse {
    pub hackathon_id: Uuid,
    pub criteria: Vec<Criterion>,
    pub total_weight: Decimal,
    /// Whether the weights add up to 100, which scoring expects
    pub weights_balanced: bool,
}

impl From<CriterionInput> for Criterion {
    fn from(input: CriterionInput) -> Self {
        Self {
            key: input.key,
            display_name: input.display_name,
            description: input.description,
            max_score: input.max_score,
            weight: input.weight,
        }
    }
}

fn validate_key(key: &str) -> Result<(), validator::ValidationError> {
    let is_valid = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if is_valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_criterion_key"))
    }
}
