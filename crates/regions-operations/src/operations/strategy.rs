use regions_core::{Decision, Head, Revision};

use super::{BuildDecisionOperation, DecisionInput};
use crate::traits::{FileSystemProvider, ScmSource};

/// A build strategy configured with a newline-separated list of include
/// regions.
pub struct IncludedRegionsStrategy<F> {
    included_regions: String,
    operation: BuildDecisionOperation<F>,
}

impl<F> IncludedRegionsStrategy<F>
where
    F: FileSystemProvider,
{
    pub const DISPLAY_NAME: &'static str = "Build included regions strategy";

    pub fn new(included_regions: impl Into<String>, file_systems: F) -> Self {
        Self {
            included_regions: included_regions.into(),
            operation: BuildDecisionOperation::new(file_systems),
        }
    }

    #[must_use]
    pub fn included_regions(&self) -> &str {
        &self.included_regions
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    #[must_use]
    pub fn is_automatic_build(
        &self,
        source: &dyn ScmSource,
        head: &Head,
        current: &Revision,
        previous: Option<&Revision>,
    ) -> bool {
        self.decision(source, head, current, previous).should_build()
    }

    #[must_use]
    pub fn decision(
        &self,
        source: &dyn ScmSource,
        head: &Head,
        current: &Revision,
        previous: Option<&Revision>,
    ) -> Decision {
        self.operation.evaluate(
            source,
            &DecisionInput {
                head,
                current,
                previous,
                included_regions: &self.included_regions,
            },
        )
    }
}
