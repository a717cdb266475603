use std::fs;
use std::path::Path;

use regions_core::{SourceConnection, SourceOwner};
use regions_operations::providers::GitSource;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

pub(crate) const CONFIG_FILE_NAME: &str = "region-gate.toml";

const DEFAULT_CONNECTION_OWNER: &str = "local";
const DEFAULT_REPOSITORY: &str = "repository";

/// Contents of `region-gate.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct Config {
    pub included_regions: Option<String>,
    pub owner: Option<String>,
    #[serde(default)]
    pub connection: ConnectionConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct ConnectionConfig {
    pub owner: Option<String>,
    pub repository: Option<String>,
    pub credentials_id: Option<String>,
}

/// Values given on the command line that replace configured ones.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub included_regions: Option<String>,
    pub owner: Option<String>,
    pub credentials_id: Option<String>,
}

impl Config {
    /// Reads `explicit` if given, otherwise `region-gate.toml` in `repo`.
    /// A missing default file yields an empty configuration.
    pub(crate) fn load(repo: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = explicit.map_or_else(|| repo.join(CONFIG_FILE_NAME), Path::to_path_buf);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if explicit.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(CliError::ConfigRead { path, source }),
        };

        toml::from_str(&content).map_err(|source| CliError::ConfigParse { path, source })
    }

    pub(crate) fn apply(&mut self, overrides: Overrides) {
        if let Some(regions) = overrides.included_regions {
            self.included_regions = Some(regions);
        }
        if let Some(owner) = overrides.owner {
            self.owner = Some(owner);
        }
        if let Some(credentials_id) = overrides.credentials_id {
            self.connection.credentials_id = Some(credentials_id);
        }
    }

    pub(crate) fn included_regions(&self) -> &str {
        self.included_regions.as_deref().unwrap_or_default()
    }

    /// Builds the source for the clone at `repo`. The repository name
    /// defaults to the clone's directory name and the owner to the
    /// repository name.
    pub(crate) fn git_source(&self, repo: &Path) -> GitSource {
        let repository = self.connection.repository.clone().unwrap_or_else(|| {
            repo.file_name().map_or_else(
                || DEFAULT_REPOSITORY.to_string(),
                |name| name.to_string_lossy().into_owned(),
            )
        });
        let connection_owner = self
            .connection
            .owner
            .as_deref()
            .unwrap_or(DEFAULT_CONNECTION_OWNER);

        let mut connection = SourceConnection::new(
            repo.to_string_lossy().into_owned(),
            connection_owner,
            repository.as_str(),
        );
        if let Some(credentials_id) = &self.connection.credentials_id {
            connection = connection.with_credentials(credentials_id.as_str());
        }

        let owner = self.owner.clone().unwrap_or_else(|| repository.clone());

        GitSource::new(repository, connection).with_owner(SourceOwner::new(owner))
    }
}
