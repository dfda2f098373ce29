pub mod assignment;
pub mod criteria;
pub mod evaluation;
pub mod hackathon;
pub mod leaderboard;
