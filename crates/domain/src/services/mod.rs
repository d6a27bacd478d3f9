//! Domain services for progress aggregation.

pub mod aggregator;
pub mod dashboard;
pub mod dedup;
pub mod resume;

pub use aggregator::ProgressAggregator;
pub use dashboard::compute_dashboard_stats;
pub use dedup::{deduplicate_course_progress, repair_course_progress, RepairOutcome};
pub use resume::{find_resume_target, select_continue_watching};
