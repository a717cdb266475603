use std::fmt;

/// A named line of development: a branch, or a pull request that merges into
/// another head.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Head {
    Branch {
        name: String,
    },
    PullRequest {
        name: String,
        number: u64,
        target: Box<Head>,
    },
}

impl Head {
    #[must_use]
    pub fn branch(name: impl Into<String>) -> Self {
        Self::Branch { name: name.into() }
    }

    #[must_use]
    pub fn pull_request(number: u64, target: Head) -> Self {
        Self::PullRequest {
            name: format!("PR-{number}"),
            number,
            target: Box::new(target),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Branch { name } | Self::PullRequest { name, .. } => name,
        }
    }

    /// The head this one merges into, for pull requests.
    #[must_use]
    pub fn target(&self) -> Option<&Head> {
        match self {
            Self::Branch { .. } => None,
            Self::PullRequest { target, .. } => Some(target),
        }
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch { name } => write!(f, "{name}"),
            Self::PullRequest { name, target, .. } => write!(f, "{name} (into {target})"),
        }
    }
}

/// A commit hash bound to the head it was observed on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision {
    head: String,
    hash: String,
}

impl Revision {
    #[must_use]
    pub fn new(head: &Head, hash: impl Into<String>) -> Self {
        Self {
            head: head.name().to_string(),
            hash: hash.into(),
        }
    }

    #[must_use]
    pub fn head_name(&self) -> &str {
        &self.head
    }

    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.head, self.hash)
    }
}

/// Connection details for one repository at one provider.
///
/// Credential identifiers are opaque references handed through to the
/// provider; nothing here interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceConnection {
    pub endpoint: String,
    pub owner: String,
    pub repository: String,
    pub credentials_id: Option<String>,
    pub checkout_credentials_id: Option<String>,
}

impl SourceConnection {
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            owner: owner.into(),
            repository: repository.into(),
            credentials_id: None,
            checkout_credentials_id: None,
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials_id: impl Into<String>) -> Self {
        self.credentials_id = Some(credentials_id.into());
        self
    }

    /// A copy that uses the scan credentials for checkout as well, or `None`
    /// when no credentials are configured.
    #[must_use]
    pub fn authenticated(&self) -> Option<Self> {
        let credentials_id = self.credentials_id.clone()?;
        Some(Self {
            checkout_credentials_id: Some(credentials_id.clone()),
            credentials_id: Some(credentials_id),
            ..self.clone()
        })
    }
}

impl fmt::Display for SourceConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} at {}", self.owner, self.repository, self.endpoint)
    }
}

/// The container (job, project) a source belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOwner {
    pub name: String,
}

impl SourceOwner {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Outcome of one build decision together with its justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Matched { region: String, path: String },
    NoRegions,
    NoMatch,
    FailOpen { reason: String },
}

impl Decision {
    #[must_use]
    pub fn should_build(&self) -> bool {
        matches!(self, Self::Matched { .. } | Self::FailOpen { .. })
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matched { region, path } => {
                write!(f, "included region '{region}' matched '{path}'")
            }
            Self::NoRegions => write!(f, "no included regions configured"),
            Self::NoMatch => write!(f, "no changed file matched an included region"),
            Self::FailOpen { reason } => write!(f, "could not evaluate regions: {reason}"),
        }
    }
}
