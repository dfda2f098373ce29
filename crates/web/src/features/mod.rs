pub mod assignments;
pub mod criteria;
pub mod evaluations;
pub mod leaderboard;
