use regions_core::{Head, Revision, SourceConnection, SourceOwner};

use crate::{ResolutionError, ScmHandle};

pub trait ScmSource: Send + Sync {
    fn id(&self) -> &str;

    fn connection(&self) -> &SourceConnection;

    /// The container this source belongs to, if it can still be obtained.
    fn owner(&self) -> Option<&SourceOwner>;

    fn build(&self, head: &Head, revision: &Revision) -> ScmHandle {
        ScmHandle {
            source_id: self.id().to_string(),
            connection: self.connection().clone(),
            head: head.clone(),
            revision: revision.clone(),
        }
    }

    /// Sources that can look up the latest revision of an arbitrary head
    /// return themselves here.
    fn revision_resolver(&self) -> Option<&dyn RevisionResolver> {
        None
    }
}

pub trait RevisionResolver: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the provider cannot be reached, rejects the
    /// credentials, or does not know the head.
    fn resolve_head_revision(
        &self,
        connection: &SourceConnection,
        head: &Head,
    ) -> Result<Revision, ResolutionError>;
}
