mod collect;
mod decide;
mod strategy;

pub use collect::collect_changed_paths;
pub use decide::{BuildDecisionOperation, DecisionInput};
pub use strategy::IncludedRegionsStrategy;
