use sqlx::PgPool;
use storage::{
    dto::assignment::{AssignmentStats, JudgeAssignment, WorkloadSummary},
    error::Result,
    models::{AssignmentMap, AssignmentMode},
    repository::{
        assignment::AssignmentRepository, hackathon::HackathonRepository,
    },
    services::allocation,
};
use uuid::Uuid;

pub async fn get_assignments(pool: &PgPool, hackathon_id: Uuid) -> Result<AssignmentMap> {
    HackathonRepository::new(pool).find_by_id(hackathon_id).await?;
    AssignmentRepository::new(pool).get_map(hackathon_id).await
}

/// Discard current assignments and rebuild them with the balanced allocator
pub async fn auto_assign(
    pool: &PgPool,
    hackathon_id: Uuid,
    judges_per_team: usize,
) -> Result<AssignmentMap> {
    let map = AssignmentRepository::new(pool)
        .replace_all(hackathon_id, |judges, teams| {
            allocation::auto_assign(judges, teams, judges_per_team)
        })
        .await?;

    tracing::info!(
        %hackathon_id,
        judges_per_team,
        judges = map.judge_ids().count(),
        assignments = map.rows().len(),
        "Auto-assigned judges to teams"
    );

    Ok(map)
}

pub async fn get_workload(pool: &PgPool, hackathon_id: Uuid) -> Result<WorkloadSummary> {
    let (map, judges, teams) = load_roster(pool, hackathon_id).await?;
    Ok(allocation::workload_summary(&map, &judges, &teams))
}

pub async fn get_stats(pool: &PgPool, hackathon_id: Uuid) -> Result<AssignmentStats> {
    let (map, judges, teams) = load_roster(pool, hackathon_id).await?;
    Ok(allocation::stats(&map, &teams, &judges))
}

pub async fn get_judge_teams(
    pool: &PgPool,
    hackathon_id: Uuid,
    judge_id: Uuid,
) -> Result<JudgeAssignment> {
    let team_ids = AssignmentRepository::new(pool)
        .get_judge_teams(hackathon_id, judge_id)
        .await?;

    Ok(JudgeAssignment { judge_id, team_ids })
}

pub async fn assign_teams(
    pool: &PgPool,
    hackathon_id: Uuid,
    judge_id: Uuid,
    team_ids: &[Uuid],
    mode: AssignmentMode,
) -> Result<JudgeAssignment> {
    let edit = AssignmentRepository::new(pool)
        .edit_judge(hackathon_id, judge_id, team_ids, mode)
        .await?;

    if edit.changed {
        tracing::info!(
            %hackathon_id,
            %judge_id,
            ?mode,
            team_count = edit.team_ids.len(),
            "Updated judge assignments"
        );
    }

    Ok(JudgeAssignment {
        judge_id,
        team_ids: edit.team_ids.into_iter().collect(),
    })
}

pub async fn remove_judge(pool: &PgPool, hackathon_id: Uuid, judge_id: Uuid) -> Result<u64> {
    let released = AssignmentRepository::new(pool)
        .remove_judge(hackathon_id, judge_id)
        .await?;

    tracing::info!(%hackathon_id, %judge_id, released, "Removed judge from assignments");
    Ok(released)
}

async fn load_roster(
    pool: &PgPool,
    hackathon_id: Uuid,
) -> Result<(AssignmentMap, Vec<Uuid>, Vec<Uuid>)> {
    let hackathons = HackathonRepository::new(pool);
    hackathons.find_by_id(hackathon_id).await?;

    let judges = hackathons.list_judge_ids(hackathon_id).await?;
    let teams = hackathons.list_team_ids(hackathon_id).await?;
    let map = AssignmentRepository::new(pool).get_map(hackathon_id).await?;

    Ok((map, judges, teams))
}
