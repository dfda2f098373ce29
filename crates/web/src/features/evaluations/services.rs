use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::{
        evaluation::{EvaluationResponse, JudgeSubmissionStatus, SaveEvaluationRequest},
        scoring::AggregateScore,
    },
    error::Result,
    models::{Criterion, Evaluation},
    repository::{
        assignment::AssignmentRepository,
        criteria::CriteriaRepository,
        evaluation::EvaluationRepository,
        hackathon::{HackathonRepository, ensure_accepts_changes},
    },
    services::{
        evaluation::{evaluation_status, prepare_scores},
        scoring::{aggregate_submission, score_breakdown},
    },
};
use uuid::Uuid;

/// Create or update a judge's evaluation; re-saving a submitted evaluation keeps it submitted
pub async fn save_evaluation(
    pool: &PgPool,
    request: SaveEvaluationRequest,
) -> Result<EvaluationResponse> {
    let hackathons = HackathonRepository::new(pool);
    let (_, hackathon_id) = hackathons.find_submission(request.submission_id).await?;
    let hackathon = hackathons.find_by_id(hackathon_id).await?;
    ensure_accepts_changes(&hackathon)?;

    let criteria = CriteriaRepository::new(pool).get_or_empty(hackathon_id).await?;
    let scores = prepare_scores(&criteria, request.scores);

    let evaluation = EvaluationRepository::new(pool)
        .upsert(
            request.judge_id,
            request.submission_id,
            &scores,
            request.status,
        )
        .await?;

    tracing::info!(
        judge_id = %evaluation.judge_id,
        submission_id = %evaluation.submission_id,
        status = %evaluation.status,
        "Saved evaluation"
    );

    Ok(evaluation_response(evaluation, &criteria))
}

pub async fn get_evaluation(
    pool: &PgPool,
    judge_id: Uuid,
    submission_id: Uuid,
) -> Result<EvaluationResponse> {
    let (_, hackathon_id) = HackathonRepository::new(pool)
        .find_submission(submission_id)
        .await?;
    let evaluation = EvaluationRepository::new(pool)
        .find(judge_id, submission_id)
        .await?;
    let criteria = CriteriaRepository::new(pool).get_or_empty(hackathon_id).await?;

    Ok(evaluation_response(evaluation, &criteria))
}

/// Progress of a judge on every team they are assigned to, in team order
pub async fn judge_statuses(
    pool: &PgPool,
    hackathon_id: Uuid,
    judge_id: Uuid,
) -> Result<Vec<JudgeSubmissionStatus>> {
    let hackathons = HackathonRepository::new(pool);
    hackathons.find_by_id(hackathon_id).await?;

    let map = AssignmentRepository::new(pool).get_map(hackathon_id).await?;
    let Some(teams) = map.teams_for(judge_id) else {
        return Ok(Vec::new());
    };

    let submissions: HashMap<Uuid, Uuid> = hackathons
        .list_active_submissions(hackathon_id)
        .await?
        .into_iter()
        .map(|s| (s.team_id, s.submission_id))
        .collect();

    let evaluations: HashMap<Uuid, Evaluation> = EvaluationRepository::new(pool)
        .list_for_judge(hackathon_id, judge_id)
        .await?
        .into_iter()
        .map(|e| (e.submission_id, e))
        .collect();

    Ok(teams
        .iter()
        .map(|&team_id| {
            let submission_id = submissions.get(&team_id).copied();
            let evaluation = submission_id.and_then(|id| evaluations.get(&id));
            JudgeSubmissionStatus {
                team_id,
                submission_id,
                progress: evaluation_status(evaluation),
            }
        })
        .collect())
}

pub async fn submission_score(pool: &PgPool, submission_id: Uuid) -> Result<AggregateScore> {
    let (_, hackathon_id) = HackathonRepository::new(pool)
        .find_submission(submission_id)
        .await?;
    let criteria = CriteriaRepository::new(pool).get_or_empty(hackathon_id).await?;
    let evaluations = EvaluationRepository::new(pool)
        .list_for_submission(submission_id)
        .await?;

    Ok(aggregate_submission(submission_id, &criteria, &evaluations).rounded())
}

fn evaluation_response(evaluation: Evaluation, criteria: &[Criterion]) -> EvaluationResponse {
    EvaluationResponse {
        progress: evaluation_status(Some(&evaluation)),
        breakdown: score_breakdown(criteria, &evaluation.scores),
        evaluation,
    }
}
