pub mod allocation;
pub mod criteria;
pub mod evaluation;
pub mod leaderboard;
pub mod scoring;
