//! CI/CD environment detection and normalization.
//!
//! Each submodule knows one platform's environment variables and turns them
//! into a [`Configuration`]. Detection walks a fixed list and asks each
//! platform whether its marker variable is present.

mod azure;
mod bitbucket;
mod circleci;
mod github;
mod gitlab;
mod jenkins;
mod localhost;
mod pusher;

pub use pusher::detect_pusher;

use crate::clone_url::CloneUrlError;
use crate::git::GitError;
use crate::models::Configuration;
use crate::source::RepositorySource;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("environment {0} does not exist")]
    UnknownEnvironment(String),
    #[error("{0} is not a repository path")]
    NotARepository(String),
    #[error("failed to read event payload: {0}")]
    Payload(String),
    #[error(transparent)]
    CloneUrl(#[from] CloneUrlError),
    #[error(transparent)]
    Git(#[from] GitError),
}

/// One CI/CD platform's view of the current process.
///
/// Implementations read only environment variables and the local checkout;
/// none of the methods perform network calls.
pub trait Environment: Sync + std::fmt::Debug {
    /// Normalized configuration assembled from the platform's environment
    /// variables.
    fn configuration(&self) -> Result<Configuration, EnvironmentError>;

    /// Link to the current build in the platform's web UI.
    fn build_link(&self) -> String;

    /// Link to the current step or job within the build.
    fn step_link(&self) -> String;

    /// Link to `filename` in the repository web UI. Empty when the platform
    /// has no file browser.
    fn file_link(&self, filename: &str, branch: &str, commit: &str) -> String;

    /// Like [`Environment::file_link`], anchored to a line range.
    fn file_line_link(
        &self,
        filename: &str,
        branch: &str,
        commit: &str,
        start_line: u32,
        end_line: u32,
    ) -> String;

    fn name(&self) -> &'static str;

    /// Whether the current process appears to run under this platform.
    fn is_current_environment(&self) -> bool;
}

// Detection order is fixed so overlapping marker variables resolve the same
// way on every run.
static ENVIRONMENTS: &[&dyn Environment] = &[
    &github::GithubEnvironment,
    &gitlab::GitlabEnvironment,
    &azure::AzureEnvironment,
    &bitbucket::BitbucketEnvironment,
    &jenkins::JenkinsEnvironment,
    &circleci::CircleCiEnvironment,
    &localhost::LocalhostEnvironment,
];

/// The environment registered under `name`.
pub fn get_environment(name: &str) -> Result<&'static dyn Environment, EnvironmentError> {
    ENVIRONMENTS
        .iter()
        .find(|env| env.name() == name)
        .copied()
        .ok_or_else(|| EnvironmentError::UnknownEnvironment(name.to_string()))
}

/// The first environment whose marker variables are present, falling back to
/// localhost.
#[must_use]
pub fn detect_environment() -> &'static dyn Environment {
    ENVIRONMENTS
        .iter()
        .find(|env| env.is_current_environment())
        .copied()
        .unwrap_or(&localhost::LocalhostEnvironment)
}

/// [`get_environment`] when `name` is non-empty, [`detect_environment`]
/// otherwise.
pub fn get_or_detect_environment(name: &str) -> Result<&'static dyn Environment, EnvironmentError> {
    if name.is_empty() {
        Ok(detect_environment())
    } else {
        get_environment(name)
    }
}

pub(crate) fn env_or_default(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

pub(crate) fn env_exists(name: &str) -> bool {
    std::env::var_os(name).is_some()
}

/// Classify a clone URL by its SaaS host. Self-hosted servers do not match
/// any fixed host and come back as unknown with no API URL.
pub(crate) fn source_from_host(clone_url: &str) -> (RepositorySource, &'static str) {
    if clone_url.contains("bitbucket.org") {
        (RepositorySource::Bitbucket, "https://api.bitbucket.org/2.0")
    } else if clone_url.contains("github.com") {
        (RepositorySource::Github, "https://api.github.com")
    } else if clone_url.contains("dev.azure.com") {
        (RepositorySource::Azure, "")
    } else if clone_url.contains("gitlab.com") {
        (RepositorySource::Gitlab, "https://gitlab.com/api/v4")
    } else {
        (RepositorySource::Unknown, "")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_environment_by_name() {
        for name in ["github", "gitlab", "azure", "bitbucket", "jenkins", "circleci", "localhost"] {
            let env = get_environment(name).unwrap();
            assert_eq!(env.name(), name);
        }
    }

    #[test]
    fn test_get_environment_unknown_name() {
        let err = get_environment("teamcity").unwrap_err();
        assert_eq!(err.to_string(), "environment teamcity does not exist");
    }

    #[test]
    fn test_get_or_detect_with_name() {
        let env = get_or_detect_environment("gitlab").unwrap();
        assert_eq!(env.name(), "gitlab");
    }

    #[test]
    fn test_source_from_host() {
        assert_eq!(
            source_from_host("https://github.com/org/repo.git"),
            (RepositorySource::Github, "https://api.github.com")
        );
        assert_eq!(
            source_from_host("git@bitbucket.org:org/repo.git"),
            (RepositorySource::Bitbucket, "https://api.bitbucket.org/2.0")
        );
        assert_eq!(
            source_from_host("https://dev.azure.com/org/project/_git/repo"),
            (RepositorySource::Azure, "")
        );
        assert_eq!(
            source_from_host("https://gitlab.com/group/repo.git"),
            (RepositorySource::Gitlab, "https://gitlab.com/api/v4")
        );
        assert_eq!(
            source_from_host("https://git.internal/org/repo.git"),
            (RepositorySource::Unknown, "")
        );
    }
}
