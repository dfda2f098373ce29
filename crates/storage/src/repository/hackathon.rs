use sqlx::{PgConnection, PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Hackathon, Submission};

/// Read-only access to the hackathon/team/submission directory
pub struct HackathonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HackathonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, hackathon_id: Uuid) -> Result<Hackathon> {
        sqlx::query_as::<_, Hackathon>(
            r#"
            SELECT hackathon_id, name, slug, status, created_at
            FROM hackathons
            WHERE hackathon_id = $1
            "#,
        )
        .bind(hackathon_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Judge ids in the order the organizer added them
    pub async fn list_judge_ids(&self, hackathon_id: Uuid) -> Result<Vec<Uuid>> {
        judge_ids(self.pool, hackathon_id).await
    }

    pub async fn list_team_ids(&self, hackathon_id: Uuid) -> Result<Vec<Uuid>> {
        team_ids(self.pool, hackathon_id).await
    }

    /// One active submission per team: the latest final one, else the latest.
    /// Ordered by creation, earliest first.
    pub async fn list_active_submissions(&self, hackathon_id: Uuid) -> Result<Vec<Submission>> {
        active_submissions(self.pool, hackathon_id).await
    }

    pub async fn find_submission(&self, submission_id: Uuid) -> Result<(Submission, Uuid)> {
        #[derive(sqlx::FromRow)]
        struct SubmissionRow {
            #[sqlx(flatten)]
            submission: Submission,
            hackathon_id: Uuid,
        }

        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT s.submission_id, s.team_id, s.is_final, s.created_at, t.hackathon_id
            FROM submissions s
            INNER JOIN teams t ON t.team_id = s.team_id
            WHERE s.submission_id = $1
            "#,
        )
        .bind(submission_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok((row.submission, row.hackathon_id))
    }
}

/// Lock the hackathon row for the rest of the transaction.
///
/// Every mutation of a hackathon's assignments or criteria goes through this
/// lock, so concurrent full replacements are applied one after the other.
pub(crate) async fn lock_hackathon(conn: &mut PgConnection, hackathon_id: Uuid) -> Result<Hackathon> {
    sqlx::query_as::<_, Hackathon>(
        r#"
        SELECT hackathon_id, name, slug, status, created_at
        FROM hackathons
        WHERE hackathon_id = $1
        FOR UPDATE
        "#,
    )
    .bind(hackathon_id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)
}

/// Fail with `InvalidState` once the hackathon no longer takes changes.
pub fn ensure_accepts_changes(hackathon: &Hackathon) -> Result<()> {
    let status = hackathon.lifecycle()?;
    if status.accepts_changes() {
        Ok(())
    } else {
        Err(StorageError::InvalidState(format!(
            "hackathon '{}' is {} and no longer accepts changes",
            hackathon.slug, status
        )))
    }
}

pub(crate) async fn judge_ids<'e>(executor: impl PgExecutor<'e>, hackathon_id: Uuid) -> Result<Vec<Uuid>> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT judge_id
        FROM hackathon_judges
        WHERE hackathon_id = $1
        ORDER BY position, judge_id
        "#,
    )
    .bind(hackathon_id)
    .fetch_all(executor)
    .await?;

    Ok(ids)
}

pub(crate) async fn team_ids<'e>(executor: impl PgExecutor<'e>, hackathon_id: Uuid) -> Result<Vec<Uuid>> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT team_id
        FROM teams
        WHERE hackathon_id = $1
        ORDER BY created_at, team_id
        "#,
    )
    .bind(hackathon_id)
    .fetch_all(executor)
    .await?;

    Ok(ids)
}

pub(crate) async fn active_submissions<'e>(
    executor: impl PgExecutor<'e>,
    hackathon_id: Uuid,
) -> Result<Vec<Submission>> {
    let submissions = sqlx::query_as::<_, Submission>(
        r#"
        SELECT submission_id, team_id, is_final, created_at
        FROM (
            SELECT DISTINCT ON (s.team_id)
                s.submission_id, s.team_id, s.is_final, s.created_at
            FROM submissions s
            INNER JOIN teams t ON t.team_id = s.team_id
            WHERE t.hackathon_id = $1
            ORDER BY s.team_id, s.is_final DESC, s.created_at DESC
        ) active
        ORDER BY created_at, submission_id
        "#,
    )
    .bind(hackathon_id)
    .fetch_all(executor)
    .await?;

    Ok(submissions)
}
