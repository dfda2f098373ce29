use chrono::NaiveDateTime;
use sqlx::types::Json;
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{CriterionScore, Evaluation, EvaluationStatus};

#[derive(FromRow)]
struct EvaluationRow {
    evaluation_id: Uuid,
    judge_id: Uuid,
    submission_id: Uuid,
    scores: Json<Vec<CriterionScore>>,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl TryFrom<EvaluationRow> for Evaluation {
    type Error = StorageError;

    fn try_from(row: EvaluationRow) -> Result<Self> {
        Ok(Self {
            evaluation_id: row.evaluation_id,
            judge_id: row.judge_id,
            submission_id: row.submission_id,
            scores: row.scores.0,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for the evaluation ledger
pub struct EvaluationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EvaluationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Upsert the record of a (judge, submission) pair.
    ///
    /// Scores are always overwritten. A record that was submitted once stays
    /// submitted even when re-saved as a draft.
    pub async fn upsert(
        &self,
        judge_id: Uuid,
        submission_id: Uuid,
        scores: &[CriterionScore],
        status: EvaluationStatus,
    ) -> Result<Evaluation> {
        let row = sqlx::query_as::<_, EvaluationRow>(
            r#"
            INSERT INTO evaluations (judge_id, submission_id, scores, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (judge_id, submission_id)
            DO UPDATE SET
                scores = EXCLUDED.scores,
                status = CASE
                    WHEN evaluations.status = 'submitted' THEN 'submitted'
                    ELSE EXCLUDED.status
                END,
                updated_at = CURRENT_TIMESTAMP
            RETURNING evaluation_id, judge_id, submission_id, scores, status, created_at, updated_at
            "#,
        )
        .bind(judge_id)
        .bind(submission_id)
        .bind(Json(scores))
        .bind(status.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                return StorageError::ConstraintViolation(format!(
                    "Submission {} no longer exists",
                    submission_id
                ));
            }
            err
        })?;

        row.try_into()
    }

    pub async fn find(&self, judge_id: Uuid, submission_id: Uuid) -> Result<Evaluation> {
        let row = sqlx::query_as::<_, EvaluationRow>(
            r#"
            SELECT evaluation_id, judge_id, submission_id, scores, status, created_at, updated_at
            FROM evaluations
            WHERE judge_id = $1 AND submission_id = $2
            "#,
        )
        .bind(judge_id)
        .bind(submission_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        row.try_into()
    }

    pub async fn list_for_submission(&self, submission_id: Uuid) -> Result<Vec<Evaluation>> {
        let rows = sqlx::query_as::<_, EvaluationRow>(
            r#"
            SELECT evaluation_id, judge_id, submission_id, scores, status, created_at, updated_at
            FROM evaluations
            WHERE submission_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(submission_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Evaluation::try_from).collect()
    }

    /// Everything one judge has recorded within a hackathon
    pub async fn list_for_judge(&self, hackathon_id: Uuid, judge_id: Uuid) -> Result<Vec<Evaluation>> {
        let rows = sqlx::query_as::<_, EvaluationRow>(
            r#"
            SELECT e.evaluation_id, e.judge_id, e.submission_id, e.scores, e.status,
                   e.created_at, e.updated_at
            FROM evaluations e
            INNER JOIN submissions s ON s.submission_id = e.submission_id
            INNER JOIN teams t ON t.team_id = s.team_id
            WHERE t.hackathon_id = $1 AND e.judge_id = $2
            ORDER BY e.created_at
            "#,
        )
        .bind(hackathon_id)
        .bind(judge_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Evaluation::try_from).collect()
    }
}

pub(crate) async fn submitted_for_hackathon<'e>(
    executor: impl PgExecutor<'e>,
    hackathon_id: Uuid,
) -> Result<Vec<Evaluation>> {
    let rows = sqlx::query_as::<_, EvaluationRow>(
        r#"
        SELECT e.evaluation_id, e.judge_id, e.submission_id, e.scores, e.status,
               e.created_at, e.updated_at
        FROM evaluations e
        INNER JOIN submissions s ON s.submission_id = e.submission_id
        INNER JOIN teams t ON t.team_id = s.team_id
        WHERE t.hackathon_id = $1 AND e.status = 'submitted'
        ORDER BY e.created_at
        "#,
    )
    .bind(hackathon_id)
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(Evaluation::try_from).collect()
}

/// Criterion keys that any evaluation of the hackathon has scored
pub(crate) async fn referenced_criterion_keys<'e>(
    executor: impl PgExecutor<'e>,
    hackathon_id: Uuid,
) -> Result<Vec<String>> {
    let keys = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT score->>'criterion_key'
        FROM evaluations e
        INNER JOIN submissions s ON s.submission_id = e.submission_id
        INNER JOIN teams t ON t.team_id = s.team_id
        CROSS JOIN LATERAL jsonb_array_elements(e.scores) AS score
        WHERE t.hackathon_id = $1
          AND score->>'criterion_key' IS NOT NULL
        ORDER BY 1
        "#,
    )
    .bind(hackathon_id)
    .fetch_all(executor)
    .await?;

    Ok(keys)
}
