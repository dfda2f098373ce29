use std::collections::HashSet;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::assignment::{AssignmentStats, JudgeWorkload, TeamCoverage, WorkloadSummary};
use crate::error::{Result, StorageError};
use crate::models::{AssignmentMap, AssignmentMode};

/// Compute a fresh balanced mapping of `judges_per_team` judges per team.
///
/// Teams are walked in the given order; each one takes the judges with the
/// lowest current load, ties going to the judge listed first. The result is
/// fully determined by the input order. Every judge appears in the map, even
/// with an empty set. Duplicate ids are collapsed keeping the first.
///
/// Fails without producing anything when there are teams to cover but fewer
/// judges than `judges_per_team`.
pub fn auto_assign(
    judges: &[Uuid],
    teams: &[Uuid],
    judges_per_team: usize,
) -> Result<AssignmentMap> {
    let judges = dedup(judges);
    let teams = dedup(teams);

    if !teams.is_empty() && judges.len() < judges_per_team {
        return Err(StorageError::InsufficientJudges {
            required: judges_per_team,
            available: judges.len(),
        });
    }

    let mut map = AssignmentMap::new();
    for judge_id in &judges {
        map.entry(*judge_id);
    }

    let mut loads = vec![0usize; judges.len()];
    let mut order: Vec<usize> = (0..judges.len()).collect();

    for team_id in &teams {
        order.sort_by_key(|&idx| (loads[idx], idx));

        for &idx in order.iter().take(judges_per_team) {
            map.entry(judges[idx]).insert(*team_id);
            loads[idx] += 1;
        }
    }

    Ok(map)
}

/// Apply a manual edit to one judge's set. Returns whether the set changed.
///
/// Adding a team that is already there or removing one that is not is a
/// no-op rather than an error.
pub fn apply_edit(
    map: &mut AssignmentMap,
    judge_id: Uuid,
    team_ids: &[Uuid],
    mode: AssignmentMode,
) -> bool {
    let teams = map.entry(judge_id);
    let before = teams.clone();

    match mode {
        AssignmentMode::Add => teams.extend(team_ids.iter().copied()),
        AssignmentMode::Remove => {
            for team_id in team_ids {
                teams.remove(team_id);
            }
        }
        AssignmentMode::Replace => *teams = team_ids.iter().copied().collect(),
    }

    *teams != before
}

/// Per-judge load and per-team coverage.
///
/// Judges are listed in directory order, followed by any judge that still
/// holds assignments but is no longer on the hackathon.
pub fn workload_summary(map: &AssignmentMap, judges: &[Uuid], teams: &[Uuid]) -> WorkloadSummary {
    let listed: HashSet<Uuid> = judges.iter().copied().collect();

    let per_judge_count = judges
        .iter()
        .copied()
        .chain(map.judge_ids().filter(|id| !listed.contains(id)))
        .map(|judge_id| JudgeWorkload {
            judge_id,
            team_count: map.workload(judge_id),
        })
        .collect();

    let per_team_count: Vec<TeamCoverage> = teams
        .iter()
        .map(|&team_id| TeamCoverage {
            team_id,
            judge_count: map.judge_count_for(team_id),
        })
        .collect();

    let teams_unassigned = per_team_count
        .iter()
        .filter(|coverage| coverage.judge_count == 0)
        .map(|coverage| coverage.team_id)
        .collect();

    WorkloadSummary {
        per_judge_count,
        per_team_count,
        teams_unassigned,
    }
}

pub fn stats(map: &AssignmentMap, teams: &[Uuid], judges: &[Uuid]) -> AssignmentStats {
    let teams_assigned = teams
        .iter()
        .filter(|&&team_id| map.judge_count_for(team_id) > 0)
        .count();

    let total_load: usize = judges.iter().map(|&judge_id| map.workload(judge_id)).sum();

    let avg_workload = if judges.is_empty() {
        Decimal::ZERO
    } else {
        (Decimal::from(total_load as u64) / Decimal::from(judges.len() as u64)).round_dp(1)
    };

    AssignmentStats {
        total_judges: judges.len(),
        total_teams: teams.len(),
        teams_assigned,
        teams_unassigned: teams.len() - teams_assigned,
        avg_workload,
    }
}

fn dedup(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn assert_distinct_judges_per_team(map: &AssignmentMap, teams: &[Uuid], expected: usize) {
        for team_id in teams {
            assert_eq!(map.judge_count_for(*team_id), expected, "team {}", team_id);
        }
    }

    #[test]
    fn one_judge_per_team_is_round_robin() {
        let judges = ids(3);
        let teams = ids(6);

        let map = auto_assign(&judges, &teams, 1).unwrap();

        assert_distinct_judges_per_team(&map, &teams, 1);
        for judge_id in &judges {
            assert_eq!(map.workload(*judge_id), 2);
        }
        assert!(map.teams_for(judges[0]).unwrap().contains(&teams[0]));
        assert!(map.teams_for(judges[1]).unwrap().contains(&teams[1]));
        assert!(map.teams_for(judges[2]).unwrap().contains(&teams[2]));
        assert!(map.teams_for(judges[0]).unwrap().contains(&teams[3]));
    }

    #[test]
    fn two_judges_per_team_stay_balanced() {
        let judges = ids(3);
        let teams = ids(4);

        let map = auto_assign(&judges, &teams, 2).unwrap();

        assert_distinct_judges_per_team(&map, &teams, 2);
        let loads: Vec<usize> = judges.iter().map(|j| map.workload(*j)).collect();
        assert_eq!(loads, vec![3, 3, 2]);
    }

    #[test]
    fn same_input_gives_same_mapping() {
        let judges = ids(4);
        let teams = ids(9);

        let first = auto_assign(&judges, &teams, 2).unwrap();
        let second = auto_assign(&judges, &teams, 2).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn loads_differ_by_at_most_one() {
        for (judge_count, team_count, per_team) in [(5, 7, 2), (4, 10, 3), (7, 3, 1), (6, 11, 4)] {
            let judges = ids(judge_count);
            let teams = ids(team_count);
            let map = auto_assign(&judges, &teams, per_team).unwrap();

            let loads: Vec<usize> = judges.iter().map(|j| map.workload(*j)).collect();
            let max = loads.iter().max().unwrap();
            let min = loads.iter().min().unwrap();
            assert!(max - min <= 1, "loads {:?}", loads);
            assert_distinct_judges_per_team(&map, &teams, per_team);
        }
    }

    #[test]
    fn too_few_judges_is_rejected() {
        let err = auto_assign(&[], &ids(2), 1).unwrap_err();
        assert!(matches!(
            err,
            StorageError::InsufficientJudges {
                required: 1,
                available: 0
            }
        ));

        let err = auto_assign(&ids(2), &ids(2), 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "each team needs 3 distinct judges, but only 2 judges are available"
        );
    }

    #[test]
    fn no_teams_needs_no_judges() {
        let map = auto_assign(&[], &[], 2).unwrap();
        assert_eq!(map.judge_ids().count(), 0);
    }

    #[test]
    fn duplicate_ids_are_collapsed() {
        let judges = ids(2);
        let teams = ids(2);
        let doubled_judges = vec![judges[0], judges[0], judges[1]];
        let doubled_teams = vec![teams[0], teams[1], teams[0]];

        let map = auto_assign(&doubled_judges, &doubled_teams, 2).unwrap();

        assert_distinct_judges_per_team(&map, &teams, 2);
        assert_eq!(map.workload(judges[0]), 2);
        assert_eq!(map.workload(judges[1]), 2);
    }

    #[test]
    fn adding_twice_is_idempotent() {
        let judge_id = Uuid::new_v4();
        let team_id = Uuid::new_v4();
        let mut map = AssignmentMap::new();

        assert!(apply_edit(&mut map, judge_id, &[team_id], AssignmentMode::Add));
        let once = map.clone();
        assert!(!apply_edit(&mut map, judge_id, &[team_id], AssignmentMode::Add));

        assert_eq!(map, once);
        assert_eq!(map.workload(judge_id), 1);
    }

    #[test]
    fn removing_absent_team_is_a_no_op() {
        let judge_id = Uuid::new_v4();
        let teams = ids(2);
        let mut map = AssignmentMap::new();
        apply_edit(&mut map, judge_id, &teams[..1], AssignmentMode::Add);

        assert!(!apply_edit(&mut map, judge_id, &teams[1..], AssignmentMode::Remove));
        assert!(apply_edit(&mut map, judge_id, &teams[..1], AssignmentMode::Remove));
        assert_eq!(map.workload(judge_id), 0);
    }

    #[test]
    fn replace_swaps_the_whole_set() {
        let judge_id = Uuid::new_v4();
        let teams = ids(3);
        let mut map = AssignmentMap::new();
        apply_edit(&mut map, judge_id, &teams[..2], AssignmentMode::Add);

        assert!(apply_edit(&mut map, judge_id, &teams[2..], AssignmentMode::Replace));

        let assigned = map.teams_for(judge_id).unwrap();
        assert_eq!(assigned.len(), 1);
        assert!(assigned.contains(&teams[2]));
    }

    #[test]
    fn removed_judge_leaves_orphans_in_summary() {
        let judges = ids(2);
        let teams = ids(4);
        let mut map = auto_assign(&judges, &teams, 1).unwrap();

        map.remove_judge(judges[0]);
        let summary = workload_summary(&map, &judges, &teams);

        assert_eq!(
            summary.per_judge_count,
            vec![
                JudgeWorkload {
                    judge_id: judges[0],
                    team_count: 0
                },
                JudgeWorkload {
                    judge_id: judges[1],
                    team_count: 2
                },
            ]
        );
        assert_eq!(summary.teams_unassigned, vec![teams[0], teams[2]]);
        assert_eq!(summary.per_team_count[1].judge_count, 1);
    }

    #[test]
    fn summary_lists_judges_missing_from_directory() {
        let judges = ids(1);
        let teams = ids(1);
        let stray = Uuid::new_v4();
        let map = AssignmentMap::from_rows([(stray, teams[0])]);

        let summary = workload_summary(&map, &judges, &teams);

        assert_eq!(summary.per_judge_count.len(), 2);
        assert_eq!(summary.per_judge_count[1].judge_id, stray);
        assert!(summary.teams_unassigned.is_empty());
    }

    #[test]
    fn stats_count_distinct_covered_teams() {
        let judges = ids(3);
        let teams = ids(4);
        let map = AssignmentMap::from_rows([
            (judges[0], teams[0]),
            (judges[1], teams[0]),
            (judges[1], teams[1]),
            (judges[2], teams[2]),
        ]);

        let stats = stats(&map, &teams, &judges);

        assert_eq!(stats.total_judges, 3);
        assert_eq!(stats.total_teams, 4);
        assert_eq!(stats.teams_assigned, 3);
        assert_eq!(stats.teams_unassigned, 1);
        // 4 / 3
        assert_eq!(stats.avg_workload, Decimal::new(13, 1));
    }

    #[test]
    fn stats_without_judges_has_zero_workload() {
        let stats = stats(&AssignmentMap::new(), &ids(2), &[]);
        assert_eq!(stats.avg_workload, Decimal::ZERO);
        assert_eq!(stats.teams_unassigned, 2);
    }
}
