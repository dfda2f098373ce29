use std::collections::BTreeSet;

use sqlx::{PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{AssignmentMap, AssignmentMode};
use crate::repository::hackathon::{ensure_accepts_changes, judge_ids, lock_hackathon, team_ids};
use crate::services::allocation::apply_edit;

/// Outcome of a manual edit on one judge
#[derive(Debug, Clone)]
pub struct JudgeEdit {
    pub team_ids: BTreeSet<Uuid>,
    pub changed: bool,
}

/// Repository for judge -> team assignments
pub struct AssignmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AssignmentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_map(&self, hackathon_id: Uuid) -> Result<AssignmentMap> {
        load_map(self.pool, hackathon_id).await
    }

    /// Teams of one judge. `NotFound` when the judge holds none.
    pub async fn get_judge_teams(&self, hackathon_id: Uuid, judge_id: Uuid) -> Result<Vec<Uuid>> {
        let teams = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT team_id
            FROM assignments
            WHERE hackathon_id = $1 AND judge_id = $2
            ORDER BY team_id
            "#,
        )
        .bind(hackathon_id)
        .bind(judge_id)
        .fetch_all(self.pool)
        .await?;

        if teams.is_empty() {
            return Err(StorageError::NotFound);
        }

        Ok(teams)
    }

    /// Replace the hackathon's whole mapping with the output of `plan`.
    ///
    /// `plan` receives the judge and team ids read under the hackathon lock.
    /// If it fails nothing is written and the previous mapping stays.
    pub async fn replace_all<F>(&self, hackathon_id: Uuid, plan: F) -> Result<AssignmentMap>
    where
        F: FnOnce(&[Uuid], &[Uuid]) -> Result<AssignmentMap>,
    {
        let mut tx = self.pool.begin().await?;

        let hackathon = lock_hackathon(&mut tx, hackathon_id).await?;
        ensure_accepts_changes(&hackathon)?;

        let judges = judge_ids(&mut *tx, hackathon_id).await?;
        let teams = team_ids(&mut *tx, hackathon_id).await?;

        let map = plan(&judges, &teams)?;

        sqlx::query("DELETE FROM assignments WHERE hackathon_id = $1")
            .bind(hackathon_id)
            .execute(&mut *tx)
            .await?;

        insert_rows(&mut tx, hackathon_id, &map.rows()).await?;

        tx.commit().await?;

        Ok(map)
    }

    /// Add, remove or replace teams of a single judge.
    ///
    /// Teams outside the hackathon are rejected. Adding or replacing requires
    /// the judge to be on the hackathon's judge list.
    pub async fn edit_judge(
        &self,
        hackathon_id: Uuid,
        judge_id: Uuid,
        requested: &[Uuid],
        mode: AssignmentMode,
    ) -> Result<JudgeEdit> {
        let mut tx = self.pool.begin().await?;

        let hackathon = lock_hackathon(&mut tx, hackathon_id).await?;
        ensure_accepts_changes(&hackathon)?;

        if mode != AssignmentMode::Remove {
            let judges = judge_ids(&mut *tx, hackathon_id).await?;
            if !judges.contains(&judge_id) {
                return Err(StorageError::Validation(format!(
                    "Judge {} is not a judge of hackathon '{}'",
                    judge_id, hackathon.slug
                )));
            }

            let teams: BTreeSet<Uuid> = team_ids(&mut *tx, hackathon_id).await?.into_iter().collect();
            let unknown: Vec<String> = requested
                .iter()
                .filter(|id| !teams.contains(*id))
                .map(Uuid::to_string)
                .collect();
            if !unknown.is_empty() {
                return Err(StorageError::Validation(format!(
                    "Teams not part of hackathon '{}': {}",
                    hackathon.slug,
                    unknown.join(", ")
                )));
            }
        }

        let rows = sqlx::query_as::<_, (Uuid, Uuid)>(
            r#"
            SELECT judge_id, team_id
            FROM assignments
            WHERE hackathon_id = $1 AND judge_id = $2
            "#,
        )
        .bind(hackathon_id)
        .bind(judge_id)
        .fetch_all(&mut *tx)
        .await?;

        let mut map = AssignmentMap::from_rows(rows);
        let changed = apply_edit(&mut map, judge_id, requested, mode);

        if changed {
            sqlx::query("DELETE FROM assignments WHERE hackathon_id = $1 AND judge_id = $2")
                .bind(hackathon_id)
                .bind(judge_id)
                .execute(&mut *tx)
                .await?;

            insert_rows(&mut tx, hackathon_id, &map.rows()).await?;
        }

        tx.commit().await?;

        Ok(JudgeEdit {
            team_ids: map.teams_for(judge_id).cloned().unwrap_or_default(),
            changed,
        })
    }

    /// Drop every assignment of a judge without reassigning their teams.
    /// Returns how many teams were released.
    pub async fn remove_judge(&self, hackathon_id: Uuid, judge_id: Uuid) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let hackathon = lock_hackathon(&mut tx, hackathon_id).await?;
        ensure_accepts_changes(&hackathon)?;

        let result = sqlx::query("DELETE FROM assignments WHERE hackathon_id = $1 AND judge_id = $2")
            .bind(hackathon_id)
            .bind(judge_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }
}

pub(crate) async fn load_map<'e>(executor: impl PgExecutor<'e>, hackathon_id: Uuid) -> Result<AssignmentMap> {
    let rows = sqlx::query_as::<_, (Uuid, Uuid)>(
        r#"
        SELECT judge_id, team_id
        FROM assignments
        WHERE hackathon_id = $1
        "#,
    )
    .bind(hackathon_id)
    .fetch_all(executor)
    .await?;

    Ok(AssignmentMap::from_rows(rows))
}

async fn insert_rows(conn: &mut PgConnection, hackathon_id: Uuid, rows: &[(Uuid, Uuid)]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut query = QueryBuilder::<Postgres>::new("INSERT INTO assignments (hackathon_id, judge_id, team_id) ");
    query.push_values(rows, |mut row, (judge_id, team_id)| {
        row.push_bind(hackathon_id)
            .push_bind(*judge_id)
            .push_bind(*team_id);
    });
    query.build().execute(conn).await.map_err(|e| {
        let err = StorageError::from(e);
        if err.is_foreign_key_violation() {
            return StorageError::ConstraintViolation(
                "A team was removed while assignments were being written".to_string(),
            );
        }
        err
    })?;

    Ok(())
}
