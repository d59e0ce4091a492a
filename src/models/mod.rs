//! The normalized configuration record shared by every CI environment reader.
//!
//! Every reader in [`crate::environments`] assembles the same
//! [`Configuration`] shape from its platform's environment variables, so
//! consumers can build links back to commits, files, pipeline runs, and pull
//! requests without caring which CI provider is in use.

use crate::source::RepositorySource;
use serde::{Deserialize, Serialize};

/// An id/name pair (job, pipeline, organization, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
}

/// A commit-or-branch reference on one side of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    pub sha: String,
    pub branch: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: String,
    pub source_ref: Ref,
    pub target_ref: Ref,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    /// Repository name without organization or subgroups.
    pub name: String,
    /// Full path including organization and any subgroups.
    pub full_name: String,
    /// Canonical web URL of the repository.
    pub url: String,
    /// Credential-stripped clone URL.
    pub clone_url: String,
    pub source: RepositorySource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    /// Path of the pipeline definition file, when the platform exposes it.
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runner {
    pub id: String,
    pub name: String,
    pub os: String,
    pub distribution: String,
    pub architecture: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRun {
    pub build_id: String,
    pub build_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pusher {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub email: String,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub commit_date: String,
    pub url: String,
    pub author: Author,
}

/// Everything the crate knows about the current build, normalized across
/// platforms. Built fresh on every [`crate::Environment::configuration`]
/// call; callers own the value and may cache it themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Base URL of the CI platform (or SCM server where they coincide).
    pub url: String,
    pub scm_api_url: String,
    /// Human-readable builder label, e.g. "Github Action".
    pub builder: String,
    /// Local checkout path of the repository on the build agent.
    pub local_path: String,
    pub commit_sha: String,
    pub before_commit_sha: String,
    pub branch: String,
    pub project_id: String,
    pub job: Entity,
    pub run: BuildRun,
    pub pipeline: Pipeline,
    pub runner: Runner,
    pub repository: Repository,
    pub pull_request: PullRequest,
    pub commits: Vec<Commit>,
    pub organization: Entity,
    pub pusher: Pusher,
    /// Pipeline definition files discovered in the checkout.
    pub pipeline_paths: Vec<String>,
    pub environment: RepositorySource,
    /// Content-derived repository identity, see [`crate::generate_scm_id`].
    pub scm_id: String,
}
