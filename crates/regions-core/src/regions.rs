use std::fmt;

use crate::{IncludeRegion, Result};

/// The ordered list of include regions parsed from newline-separated
/// configuration text.
///
/// Every line is trimmed and kept, so a blank line between patterns becomes
/// an empty pattern that only matches an empty path. Text that is blank as a
/// whole yields an empty list.
#[derive(Debug, Clone, Default)]
pub struct IncludeRegions {
    regions: Vec<IncludeRegion>,
}

impl IncludeRegions {
    /// # Errors
    ///
    /// Returns an error if any pattern cannot be compiled.
    pub fn parse(config: &str) -> Result<Self> {
        if config.trim().is_empty() {
            return Ok(Self::default());
        }

        let regions = config
            .split('\n')
            .map(|line| IncludeRegion::new(line.trim()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { regions })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IncludeRegion> {
        self.regions.iter()
    }
}

impl fmt::Display for IncludeRegions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<&str> = self.regions.iter().map(IncludeRegion::as_str).collect();
        write!(f, "[{}]", patterns.join(", "))
    }
}
