use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use regions_core::{Head, Revision, SourceConnection, SourceOwner};

use crate::traits::{FileSystemProvider, RevisionResolver, ScmFileSystem, ScmSource};
use crate::{ChangeRecord, DiffError, OperationError, ResolutionError, Result, ScmHandle};

pub type ResolverCalls = Arc<Mutex<Vec<(SourceConnection, Head)>>>;

pub struct MockSource {
    connection: SourceConnection,
    owner: Option<SourceOwner>,
    resolver: Option<MockResolver>,
}

impl MockSource {
    #[must_use]
    pub fn branch_source() -> Self {
        Self {
            connection: SourceConnection::new("/mock/repo", "acme", "monorepo"),
            owner: Some(SourceOwner::new("mock-pipeline")),
            resolver: None,
        }
    }

    #[must_use]
    pub fn pull_request_source(resolver: MockResolver) -> Self {
        Self {
            resolver: Some(resolver),
            ..Self::branch_source()
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials_id: &str) -> Self {
        self.connection = self.connection.with_credentials(credentials_id);
        self
    }

    #[must_use]
    pub fn without_owner(mut self) -> Self {
        self.owner = None;
        self
    }
}

impl ScmSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn connection(&self) -> &SourceConnection {
        &self.connection
    }

    fn owner(&self) -> Option<&SourceOwner> {
        self.owner.as_ref()
    }

    fn revision_resolver(&self) -> Option<&dyn RevisionResolver> {
        self.resolver
            .as_ref()
            .map(|resolver| resolver as &dyn RevisionResolver)
    }
}

pub struct MockResolver {
    outcome: std::result::Result<String, String>,
    calls: ResolverCalls,
}

impl MockResolver {
    #[must_use]
    pub fn resolving_to(hash: &str) -> Self {
        Self {
            outcome: Ok(hash.to_string()),
            calls: Arc::default(),
        }
    }

    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            calls: Arc::default(),
        }
    }

    #[must_use]
    pub fn calls(&self) -> ResolverCalls {
        Arc::clone(&self.calls)
    }
}

impl RevisionResolver for MockResolver {
    fn resolve_head_revision(
        &self,
        connection: &SourceConnection,
        head: &Head,
    ) -> std::result::Result<Revision, ResolutionError> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push((connection.clone(), head.clone()));

        match &self.outcome {
            Ok(hash) => Ok(Revision::new(head, hash.as_str())),
            Err(reason) => Err(ResolutionError::Unreachable {
                reason: reason.clone(),
            }),
        }
    }
}

/// Shared counters that outlive the provider and file systems they observe.
#[derive(Clone, Default)]
pub struct FileSystemProbe {
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    previous_seen: Arc<Mutex<Vec<Option<Revision>>>>,
}

impl FileSystemProbe {
    #[must_use]
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn previous_seen(&self) -> Vec<Option<Revision>> {
        self.previous_seen.lock().expect("lock poisoned").clone()
    }
}

enum Availability {
    Available,
    Unavailable,
    OpenFails,
}

pub struct MockFileSystemProvider {
    records: Vec<ChangeRecord>,
    availability: Availability,
    diff_failure: Option<String>,
    probe: FileSystemProbe,
}

impl MockFileSystemProvider {
    #[must_use]
    pub fn with_changed_files(paths: &[&str]) -> Self {
        let revision = Revision::new(&Head::branch("mock"), "c1");
        Self {
            records: vec![ChangeRecord::new(revision, paths.iter().copied())],
            availability: Availability::Available,
            diff_failure: None,
            probe: FileSystemProbe::default(),
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            availability: Availability::Unavailable,
            ..Self::with_changed_files(&[])
        }
    }

    #[must_use]
    pub fn open_failing() -> Self {
        Self {
            availability: Availability::OpenFails,
            ..Self::with_changed_files(&[])
        }
    }

    #[must_use]
    pub fn failing_diff(reason: &str) -> Self {
        Self {
            diff_failure: Some(reason.to_string()),
            ..Self::with_changed_files(&[])
        }
    }

    #[must_use]
    pub fn probe(&self) -> FileSystemProbe {
        self.probe.clone()
    }
}

impl FileSystemProvider for MockFileSystemProvider {
    type FileSystem = MockFileSystem;

    fn open(
        &self,
        _source: &dyn ScmSource,
        scm: &ScmHandle,
        _owner: &SourceOwner,
    ) -> Result<Option<MockFileSystem>> {
        match self.availability {
            Availability::Unavailable => return Ok(None),
            Availability::OpenFails => {
                return Err(OperationError::Git(regions_git::GitError::NotARepository {
                    path: scm.connection.endpoint.clone().into(),
                }));
            }
            Availability::Available => {}
        }

        self.probe.opened.fetch_add(1, Ordering::SeqCst);

        Ok(Some(MockFileSystem {
            head: scm.head.clone(),
            revision: scm.revision.clone(),
            records: self.records.clone(),
            diff_failure: self.diff_failure.clone(),
            probe: self.probe.clone(),
        }))
    }
}

pub struct MockFileSystem {
    head: Head,
    revision: Revision,
    records: Vec<ChangeRecord>,
    diff_failure: Option<String>,
    probe: FileSystemProbe,
}

impl MockFileSystem {
    #[must_use]
    pub fn new(records: Vec<ChangeRecord>) -> Self {
        let head = Head::branch("main");
        Self {
            revision: Revision::new(&head, "head-sha"),
            head,
            records,
            diff_failure: None,
            probe: FileSystemProbe::default(),
        }
    }

    #[must_use]
    pub fn failing(reason: &str) -> Self {
        let mut file_system = Self::new(Vec::new());
        file_system.diff_failure = Some(reason.to_string());
        file_system
    }

    #[must_use]
    pub fn probe(&self) -> FileSystemProbe {
        self.probe.clone()
    }
}

impl ScmFileSystem for MockFileSystem {
    fn head(&self) -> &Head {
        &self.head
    }

    fn revision(&self) -> &Revision {
        &self.revision
    }

    fn changes_since(
        &self,
        previous: Option<&Revision>,
    ) -> std::result::Result<Vec<ChangeRecord>, DiffError> {
        self.probe
            .previous_seen
            .lock()
            .expect("lock poisoned")
            .push(previous.cloned());

        match &self.diff_failure {
            Some(reason) => Err(DiffError::Provider {
                reason: reason.clone(),
            }),
            None => Ok(self.records.clone()),
        }
    }
}

impl Drop for MockFileSystem {
    fn drop(&mut self) {
        self.probe.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("lock poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a debug-level subscriber installed for the current thread
/// and returns its result along with everything that was logged.
///
/// # Panics
///
/// Panics if the internal mutex is poisoned.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);

    let logs = String::from_utf8_lossy(&buffer.0.lock().expect("lock poisoned")).into_owned();
    (result, logs)
}
