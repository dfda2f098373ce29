use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Judge -> assigned teams mapping for a single hackathon
///
/// A team may sit in any number of judges' sets. Judges with an empty set
/// are kept so a manual `replace` with no teams is still visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentMap {
    judges: BTreeMap<Uuid, BTreeSet<Uuid>>,
}

impl AssignmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from persisted `(judge_id, team_id)` rows
    pub fn from_rows(rows: impl IntoIterator<Item = (Uuid, Uuid)>) -> Self {
        let mut map = Self::new();
        for (judge_id, team_id) in rows {
            map.judges.entry(judge_id).or_default().insert(team_id);
        }
        map
    }

    pub fn rows(&self) -> Vec<(Uuid, Uuid)> {
        self.judges
            .iter()
            .flat_map(|(judge_id, teams)| teams.iter().map(move |team_id| (*judge_id, *team_id)))
            .collect()
    }

    pub fn judge_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.judges.keys().copied()
    }

    pub fn teams_for(&self, judge_id: Uuid) -> Option<&BTreeSet<Uuid>> {
        self.judges.get(&judge_id)
    }

    pub fn workload(&self, judge_id: Uuid) -> usize {
        self.judges.get(&judge_id).map_or(0, BTreeSet::len)
    }

    pub fn judge_count_for(&self, team_id: Uuid) -> usize {
        self.judges
            .values()
            .filter(|teams| teams.contains(&team_id))
            .count()
    }

    pub fn entry(&mut self, judge_id: Uuid) -> &mut BTreeSet<Uuid> {
        self.judges.entry(judge_id).or_default()
    }

    pub fn remove_judge(&mut self, judge_id: Uuid) -> Option<BTreeSet<Uuid>> {
        self.judges.remove(&judge_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Uuid, &BTreeSet<Uuid>)> {
        self.judges.iter().map(|(judge_id, teams)| (*judge_id, teams))
    }
}

/// How a manual edit combines the given teams with a judge's current set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentMode {
    Add,
    Remove,
    Replace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_trip_and_count_coverage() {
        let (j1, j2) = (Uuid::new_v4(), Uuid::new_v4());
        let (t1, t2) = (Uuid::new_v4(), Uuid::new_v4());

        let map = AssignmentMap::from_rows([(j1, t1), (j1, t2), (j2, t1)]);

        assert_eq!(map.workload(j1), 2);
        assert_eq!(map.workload(j2), 1);
        assert_eq!(map.judge_count_for(t1), 2);
        assert_eq!(map.judge_count_for(t2), 1);
        assert_eq!(AssignmentMap::from_rows(map.rows()), map);
    }

    #[test]
    fn unknown_judge_has_no_workload() {
        let map = AssignmentMap::new();
        assert_eq!(map.workload(Uuid::new_v4()), 0);
        assert!(map.teams_for(Uuid::new_v4()).is_none());
    }
}
