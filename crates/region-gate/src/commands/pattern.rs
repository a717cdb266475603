use regions_core::IncludeRegion;
use tracing::debug;

use super::{MatchArgs, Outcome};

/// Prints every path the pattern matches, in the order given.
pub(crate) fn run(args: &MatchArgs) -> regions_core::Result<Outcome> {
    let region = IncludeRegion::new(&args.pattern)?;
    let mut any_matched = false;

    for path in &args.paths {
        if region.matches(path) {
            println!("{path}");
            any_matched = true;
        } else {
            debug!(region = %region, path = %path, "path did not match");
        }
    }

    if args.exit_code && !any_matched {
        Ok(Outcome::Unmatched)
    } else {
        Ok(Outcome::Matched)
    }
}
