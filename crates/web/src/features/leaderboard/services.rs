use sqlx::PgPool;
use storage::{
    dto::leaderboard::LeaderboardEntry, error::Result, models::HackathonStatus,
    repository::leaderboard::LeaderboardRepository, services::leaderboard::build_leaderboard,
};
use uuid::Uuid;

/// Full ranking for a hackathon along with its lifecycle state.
///
/// Visibility is decided by the caller from the returned status.
pub async fn get_leaderboard(
    pool: &PgPool,
    hackathon_id: Uuid,
) -> Result<(HackathonStatus, Vec<LeaderboardEntry>)> {
    let snapshot = LeaderboardRepository::new(pool).snapshot(hackathon_id).await?;
    let status = snapshot.hackathon.lifecycle()?;

    if !status.leaderboard_visible() {
        return Ok((status, Vec::new()));
    }

    let entries = build_leaderboard(
        &snapshot.submissions,
        &snapshot.criteria,
        &snapshot.evaluations,
    );

    Ok((status, entries))
}
