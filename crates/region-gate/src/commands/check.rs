use std::path::Path;

use regions_core::Revision;
use regions_operations::operations::IncludedRegionsStrategy;
use regions_operations::providers::Git2FileSystemProvider;

use super::{CheckArgs, Outcome};
use crate::config::{Config, Overrides};
use crate::error::Result;

pub(crate) fn run(args: CheckArgs, repo: &Path, config_path: Option<&Path>) -> Result<Outcome> {
    let head = args.build_head()?;

    let mut config = Config::load(repo, config_path)?;
    config.apply(Overrides {
        included_regions: args.regions,
        owner: args.owner,
        credentials_id: args.credentials_id,
    });

    let current = Revision::new(&head, args.current);
    let previous = args.previous.map(|hash| Revision::new(&head, hash));

    let source = config.git_source(repo);
    let strategy =
        IncludedRegionsStrategy::new(config.included_regions(), Git2FileSystemProvider::new());

    let decision = strategy.decision(&source, &head, &current, previous.as_ref());

    if decision.should_build() {
        println!("build");
    } else {
        println!("skip");
    }
    if !args.quiet {
        println!("  {decision}");
    }

    if args.exit_code && !decision.should_build() {
        Ok(Outcome::Unmatched)
    } else {
        Ok(Outcome::Matched)
    }
}
