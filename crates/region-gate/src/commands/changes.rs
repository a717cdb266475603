use std::path::Path;

use regions_core::{Head, Revision, SourceOwner};
use regions_operations::operations::collect_changed_paths;
use regions_operations::providers::Git2FileSystemProvider;
use regions_operations::traits::{FileSystemProvider, ScmSource};

use super::{ChangesArgs, Outcome};
use crate::config::Config;
use crate::error::{CliError, Result};

pub(crate) fn run(args: ChangesArgs, repo: &Path, config_path: Option<&Path>) -> Result<Outcome> {
    let config = Config::load(repo, config_path)?;
    let source = config.git_source(repo);
    let owner = source
        .owner()
        .cloned()
        .unwrap_or_else(|| SourceOwner::new(source.id()));

    let head = Head::branch(args.head);
    let current = Revision::new(&head, args.current);
    let previous = args.previous.map(|hash| Revision::new(&head, hash));

    let scm = source.build(&head, &current);
    let file_system = Git2FileSystemProvider::new()
        .open(&source, &scm, &owner)?
        .ok_or_else(|| CliError::RevisionUnavailable {
            revision: current.to_string(),
            path: repo.to_path_buf(),
        })?;

    for path in collect_changed_paths(&file_system, previous.as_ref())? {
        println!("{path}");
    }

    Ok(Outcome::Matched)
}
