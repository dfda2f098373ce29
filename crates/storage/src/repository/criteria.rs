use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Criterion;
use crate::repository::evaluation::referenced_criterion_keys;
use crate::repository::hackathon::{ensure_accepts_changes, lock_hackathon};
use crate::services::criteria::{check_referenced_keys, validate_criteria};

/// Repository for per-hackathon criteria lists
pub struct CriteriaRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CriteriaRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Current criteria in their stored order. `NotFound` if never set.
    pub async fn get(&self, hackathon_id: Uuid) -> Result<Vec<Criterion>> {
        let is_set = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM criteria_sets WHERE hackathon_id = $1)
            "#,
        )
        .bind(hackathon_id)
        .fetch_one(self.pool)
        .await?;

        if !is_set {
            return Err(StorageError::NotFound);
        }

        fetch_criteria(self.pool, hackathon_id).await
    }

    /// Like [`get`](Self::get) but an unset list reads as empty
    pub async fn get_or_empty(&self, hackathon_id: Uuid) -> Result<Vec<Criterion>> {
        fetch_criteria(self.pool, hackathon_id).await
    }

    /// Replace the whole list in one transaction.
    pub async fn replace(&self, hackathon_id: Uuid, items: &[Criterion]) -> Result<()> {
        validate_criteria(items)?;

        let mut tx = self.pool.begin().await?;

        let hackathon = lock_hackathon(&mut tx, hackathon_id).await?;
        ensure_accepts_changes(&hackathon)?;

        let referenced = referenced_criterion_keys(&mut *tx, hackathon_id).await?;
        check_referenced_keys(items, &referenced)?;

        sqlx::query(
            r#"
            INSERT INTO criteria_sets (hackathon_id)
            VALUES ($1)
            ON CONFLICT (hackathon_id)
            DO UPDATE SET updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(hackathon_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM criteria WHERE hackathon_id = $1")
            .bind(hackathon_id)
            .execute(&mut *tx)
            .await?;

        if !items.is_empty() {
            let mut query = QueryBuilder::<Postgres>::new(
                "INSERT INTO criteria (hackathon_id, position, key, display_name, description, max_score, weight) ",
            );
            query.push_values(items.iter().enumerate(), |mut row, (position, criterion)| {
                row.push_bind(hackathon_id)
                    .push_bind(position as i32)
                    .push_bind(&criterion.key)
                    .push_bind(&criterion.display_name)
                    .push_bind(&criterion.description)
                    .push_bind(criterion.max_score)
                    .push_bind(criterion.weight);
            });
            query.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

pub(crate) async fn fetch_criteria<'e>(executor: impl PgExecutor<'e>, hackathon_id: Uuid) -> Result<Vec<Criterion>> {
    let criteria = sqlx::query_as::<_, Criterion>(
        r#"
        SELECT key, display_name, description, max_score, weight
        FROM criteria
        WHERE hackathon_id = $1
        ORDER BY position
        "#,
    )
    .bind(hackathon_id)
    .fetch_all(executor)
    .await?;

    Ok(criteria)
}
