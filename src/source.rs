//! Source control platform identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The platform a repository or build originates from.
///
/// Decided once per configuration load, from host-string matching or the
/// environment's own server-URL variables, and immutable afterward. The
/// `*Server` variants are self-hosted deployments reachable at a custom host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepositorySource {
    Github,
    GithubServer,
    Gitlab,
    GitlabServer,
    Azure,
    AzureServer,
    Bitbucket,
    BitbucketServer,
    Jenkins,
    #[serde(rename = "circleCI")]
    CircleCi,
    Localhost,
    #[default]
    Unknown,
}

impl RepositorySource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::GithubServer => "github_server",
            Self::Gitlab => "gitlab",
            Self::GitlabServer => "gitlab_server",
            Self::Azure => "azure",
            Self::AzureServer => "azure_server",
            Self::Bitbucket => "bitbucket",
            Self::BitbucketServer => "bitbucket_server",
            Self::Jenkins => "jenkins",
            Self::CircleCi => "circleCI",
            Self::Localhost => "localhost",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this is a self-hosted deployment of a SaaS platform.
    #[must_use]
    pub fn is_server(self) -> bool {
        matches!(
            self,
            Self::GithubServer | Self::GitlabServer | Self::AzureServer | Self::BitbucketServer
        )
    }
}

impl fmt::Display for RepositorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown repository source: {0}")]
pub struct UnknownSourceError(String);

impl FromStr for RepositorySource {
    type Err = UnknownSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(Self::Github),
            "github_server" => Ok(Self::GithubServer),
            "gitlab" => Ok(Self::Gitlab),
            "gitlab_server" => Ok(Self::GitlabServer),
            "azure" => Ok(Self::Azure),
            "azure_server" => Ok(Self::AzureServer),
            "bitbucket" => Ok(Self::Bitbucket),
            "bitbucket_server" => Ok(Self::BitbucketServer),
            "jenkins" => Ok(Self::Jenkins),
            "circleCI" => Ok(Self::CircleCi),
            "localhost" => Ok(Self::Localhost),
            "unknown" => Ok(Self::Unknown),
            other => Err(UnknownSourceError(other.to_string())),
        }
    }
}
