mod changes;
mod check;
mod pattern;

use std::path::Path;

use clap::{Args, Subcommand};
use regions_core::Head;

use crate::error::{CliError, Result};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Decide whether a head needs a build
    Check(CheckArgs),
    /// List the files changed since a previous revision
    Changes(ChangesArgs),
    /// Test paths against an include pattern
    Match(MatchArgs),
}

/// Answer of a successful command. `Unmatched` is only reported when the
/// caller asked for it with `--exit-code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Matched,
    Unmatched,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Branch being built
    #[arg(long, required_unless_present = "pr", conflicts_with = "pr")]
    pub head: Option<String>,

    /// Number of the pull request being built
    #[arg(long, requires = "target")]
    pub pr: Option<u64>,

    /// Branch the pull request merges into
    #[arg(long, requires = "pr")]
    pub target: Option<String>,

    /// Revision being built
    #[arg(long, default_value = "HEAD")]
    pub current: String,

    /// Revision of the previous build of this head
    #[arg(long)]
    pub previous: Option<String>,

    /// Newline-separated include patterns (overrides the configuration)
    #[arg(long)]
    pub regions: Option<String>,

    /// Credentials used to resolve the merge target (overrides the configuration)
    #[arg(long)]
    pub credentials_id: Option<String>,

    /// Owner the source belongs to (overrides the configuration)
    #[arg(long)]
    pub owner: Option<String>,

    /// Exit with status 1 when the build is skipped
    #[arg(long)]
    pub exit_code: bool,

    /// Print only the verdict
    #[arg(long, short)]
    pub quiet: bool,
}

impl CheckArgs {
    fn build_head(&self) -> Result<Head> {
        match (self.pr, &self.target, &self.head) {
            (Some(number), Some(target), _) => {
                Ok(Head::pull_request(number, Head::branch(target.as_str())))
            }
            (None, _, Some(name)) => Ok(Head::branch(name.as_str())),
            _ => Err(CliError::MissingHead),
        }
    }
}

#[derive(Args)]
pub(crate) struct ChangesArgs {
    /// Name of the head the revisions belong to
    #[arg(long, default_value = "HEAD")]
    pub head: String,

    /// Revision to list changes up to
    #[arg(long, default_value = "HEAD")]
    pub current: String,

    /// Revision to list changes from (default: the beginning of history)
    #[arg(long)]
    pub previous: Option<String>,
}

#[derive(Args)]
pub(crate) struct MatchArgs {
    /// Include pattern, e.g. `src/service-a/**`
    pub pattern: String,

    /// Repository-relative paths to test
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Exit with status 1 when no path matches
    #[arg(long)]
    pub exit_code: bool,
}

impl Commands {
    pub(crate) fn execute(self, repo: &Path, config_path: Option<&Path>) -> Result<Outcome> {
        match self {
            Self::Check(args) => check::run(args, repo, config_path),
            Self::Changes(args) => changes::run(args, repo, config_path),
            Self::Match(args) => pattern::run(&args).map_err(CliError::from),
        }
    }
}
