use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Criterion, Evaluation, Hackathon, Submission};
use crate::repository::criteria::fetch_criteria;
use crate::repository::evaluation::submitted_for_hackathon;
use crate::repository::hackathon::active_submissions;

/// Everything the ranker needs, read from one consistent snapshot
#[derive(Debug, Clone)]
pub struct LeaderboardSnapshot {
    pub hackathon: Hackathon,
    pub submissions: Vec<Submission>,
    pub criteria: Vec<Criterion>,
    pub evaluations: Vec<Evaluation>,
}

pub struct LeaderboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Read submissions, criteria and submitted evaluations inside one
    /// repeatable-read transaction so concurrent saves cannot tear the view.
    pub async fn snapshot(&self, hackathon_id: Uuid) -> Result<LeaderboardSnapshot> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let hackathon = sqlx::query_as::<_, Hackathon>(
            r#"
            SELECT hackathon_id, name, slug, status, created_at
            FROM hackathons
            WHERE hackathon_id = $1
            "#,
        )
        .bind(hackathon_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        let submissions = active_submissions(&mut *tx, hackathon_id).await?;
        let criteria = fetch_criteria(&mut *tx, hackathon_id).await?;
        let evaluations = submitted_for_hackathon(&mut *tx, hackathon_id).await?;

        tx.commit().await?;

        Ok(LeaderboardSnapshot {
            hackathon,
            submissions,
            criteria,
            evaluations,
        })
    }
}
