pub mod assignment;
pub mod criterion;
pub mod evaluation;
pub mod hackathon;
pub mod submission;

pub use assignment::{AssignmentMap, AssignmentMode};
pub use criterion::Criterion;
pub use evaluation::{CriterionScore, Evaluation, EvaluationStatus};
pub use hackathon::{Hackathon, HackathonStatus};
pub use submission::Submission;
