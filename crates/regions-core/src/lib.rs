pub mod error;
mod pattern;
mod regions;
pub mod types;

pub use error::*;
pub use pattern::{IncludeRegion, matches};
pub use regions::IncludeRegions;
pub use types::*;
