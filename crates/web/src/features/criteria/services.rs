use sqlx::PgPool;
use storage::{
    dto::criteria::{CriteriaResponse, SetCriteriaRequest},
    error::Result,
    models::Criterion,
    repository::{criteria::CriteriaRepository, hackathon::HackathonRepository},
    services::criteria::{total_weight, weights_balanced},
};
use uuid::Uuid;

pub async fn get_criteria(pool: &PgPool, hackathon_id: Uuid) -> Result<CriteriaResponse> {
    HackathonRepository::new(pool).find_by_id(hackathon_id).await?;

    let criteria = CriteriaRepository::new(pool).get(hackathon_id).await?;
    Ok(criteria_response(hackathon_id, criteria))
}

/// Replace the whole criteria list; evaluations keep their raw scores and are rescored on read
pub async fn set_criteria(
    pool: &PgPool,
    hackathon_id: Uuid,
    request: SetCriteriaRequest,
) -> Result<CriteriaResponse> {
    let criteria: Vec<Criterion> = request.criteria.into_iter().map(Criterion::from).collect();

    CriteriaRepository::new(pool)
        .replace(hackathon_id, &criteria)
        .await?;

    let response = criteria_response(hackathon_id, criteria);
    if !response.weights_balanced {
        tracing::warn!(
            %hackathon_id,
            total_weight = %response.total_weight,
            "Criteria weights do not sum to 100"
        );
    }

    Ok(response)
}

fn criteria_response(hackathon_id: Uuid, criteria: Vec<Criterion>) -> CriteriaResponse {
    CriteriaResponse {
        hackathon_id,
        total_weight: total_weight(&criteria),
        weights_balanced: weights_balanced(&criteria),
        criteria,
    }
}
