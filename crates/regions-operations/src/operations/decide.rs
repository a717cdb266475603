use std::error::Error;

use regions_core::{Decision, Head, IncludeRegions, Revision};
use tracing::{debug, error, info, warn};

use super::collect_changed_paths;
use crate::traits::{FileSystemProvider, ScmSource};
use crate::{OperationError, Result};

pub struct DecisionInput<'a> {
    pub head: &'a Head,
    pub current: &'a Revision,
    pub previous: Option<&'a Revision>,
    /// Newline-separated include patterns, parsed on every call.
    pub included_regions: &'a str,
}

pub struct BuildDecisionOperation<F> {
    file_systems: F,
}

impl<F> BuildDecisionOperation<F>
where
    F: FileSystemProvider,
{
    pub fn new(file_systems: F) -> Self {
        Self { file_systems }
    }

    #[must_use]
    pub fn should_build(&self, source: &dyn ScmSource, input: &DecisionInput<'_>) -> bool {
        self.evaluate(source, input).should_build()
    }

    /// Decides whether `input.head` needs a build. Never fails: anything that
    /// prevents the evaluation results in [`Decision::FailOpen`].
    #[must_use]
    pub fn evaluate(&self, source: &dyn ScmSource, input: &DecisionInput<'_>) -> Decision {
        info!(head = %input.head, revision = %input.current, "checking if head needs to be built");

        match self.decide(source, input) {
            Ok(decision) => decision,
            Err(err) => {
                let reason = error_chain(&err);
                error!(
                    head = %input.head,
                    source = source.id(),
                    error = %reason,
                    "could not evaluate included regions, triggering the build"
                );
                Decision::FailOpen { reason }
            }
        }
    }

    fn decide(&self, source: &dyn ScmSource, input: &DecisionInput<'_>) -> Result<Decision> {
        let previous = resolve_baseline(source, input.head, input.previous);

        let regions = IncludeRegions::parse(input.included_regions)?;
        info!(regions = %regions, "included regions");

        if regions.is_empty() {
            info!("no included regions configured, not triggering the build");
            return Ok(Decision::NoRegions);
        }

        let scm = source.build(input.head, input.current);

        let owner = source
            .owner()
            .ok_or_else(|| OperationError::OwnerUnavailable {
                source_id: source.id().to_string(),
            })?;

        let file_system = self
            .file_systems
            .open(source, &scm, owner)?
            .ok_or_else(|| OperationError::FileSystemUnavailable {
                source_id: source.id().to_string(),
                head: input.head.name().to_string(),
            })?;

        let changed = collect_changed_paths(&file_system, previous.as_ref())?;

        for path in &changed {
            for region in regions.iter() {
                if region.matches(path) {
                    info!(region = %region, path = %path, "matched included region, triggering the build");
                    return Ok(Decision::Matched {
                        region: region.as_str().to_string(),
                        path: path.clone(),
                    });
                }
                debug!(region = %region, path = %path, "included region did not match");
            }
        }

        info!(
            files = changed.len(),
            "no changed file matched an included region, not triggering the build"
        );
        Ok(Decision::NoMatch)
    }
}

/// Swaps in the merge target's latest revision as the baseline of a pull
/// request. Falls back to the supplied baseline when the source cannot
/// resolve revisions, has no credentials, or the lookup fails.
fn resolve_baseline(
    source: &dyn ScmSource,
    head: &Head,
    previous: Option<&Revision>,
) -> Option<Revision> {
    let (Some(resolver), Some(target)) = (source.revision_resolver(), head.target()) else {
        return previous.cloned();
    };

    info!(target = %target, "resolving merge target revision");
    debug!(previous = ?previous.map(ToString::to_string), "baseline before resolution");

    let Some(connection) = source.connection().authenticated() else {
        debug!(
            source = source.id(),
            "no credentials configured, keeping the supplied baseline"
        );
        return previous.cloned();
    };

    match resolver.resolve_head_revision(&connection, target) {
        Ok(revision) => {
            debug!(previous = %revision, "baseline after resolution");
            Some(revision)
        }
        Err(err) => {
            warn!(
                target = %target,
                error = %error_chain(&err),
                "failed to resolve merge target revision, keeping the supplied baseline"
            );
            previous.cloned()
        }
    }
}

fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
