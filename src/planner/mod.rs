pub mod candidates;
pub mod day;

pub use candidates::{candidate_indices, score_candidates, urgency_score};
pub use day::{plan_day, PlanOptions};
