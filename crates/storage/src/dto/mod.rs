pub mod assignment;
pub mod common;
pub mod criteria;
pub mod evaluation;
pub mod leaderboard;
pub mod scoring;
