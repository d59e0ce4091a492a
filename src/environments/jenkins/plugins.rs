//! SCM plugin variables layered on top of the base Jenkins configuration.
//!
//! The GitLab, Bitbucket, and Bitbucket Server plugins each export their own
//! environment variables (and, for Bitbucket, a JSON webhook payload). The
//! matching enhancer runs when the plugin's marker variable is present or
//! when the repository source already names the platform.

use serde::Deserialize;

use crate::models::Configuration;
use crate::source::RepositorySource;

pub(super) fn enhance_configuration(configuration: &mut Configuration) {
    let source = configuration.repository.source;
    if gitlab_plugin_present()
        || source == RepositorySource::Gitlab
        || source == RepositorySource::GitlabServer
    {
        enhance_from_gitlab_plugin(configuration);
        return;
    }
    if bitbucket_plugin_present() || source == RepositorySource::Bitbucket {
        enhance_from_bitbucket_plugin(configuration);
        return;
    }
    if bitbucket_server_plugin_present() || source == RepositorySource::BitbucketServer {
        enhance_from_bitbucket_server_plugin(configuration);
    }
}

fn env(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

fn set_if_env_exists(target: &mut String, name: &str) {
    if let Ok(value) = std::env::var(name) {
        *target = value;
    }
}

// GitLab plugin.

fn gitlab_plugin_present() -> bool {
    std::env::var_os("gitlabSourceRepoURL").is_some()
}

fn enhance_from_gitlab_plugin(configuration: &mut Configuration) {
    if std::env::var_os("gitlabSourceRepoHttpUrl").is_none() {
        return;
    }
    configuration.repository.clone_url = env("gitlabSourceRepoHttpUrl");
    configuration.repository.name = env("gitlabSourceRepoName");
    configuration.branch = env("gitlabBranch");
    configuration.pull_request.source_ref.branch = env("gitlabSourceBranch");
    configuration.pull_request.target_ref.branch = env("gitlabTargetBranch");
    configuration.before_commit_sha = env("gitlabBefore");
    configuration.commit_sha = env("gitlabMergeRequestLastCommit");
    configuration.pusher.username = env("gitlabUserUsername");
    configuration.pusher.name = env("gitlabUserName");
}

// Bitbucket plugin.

#[derive(Debug, Default, Deserialize)]
struct PayloadLink {
    #[serde(default)]
    href: String,
}

#[derive(Debug, Default, Deserialize)]
struct PayloadLinks {
    #[serde(default)]
    html: PayloadLink,
}

#[derive(Debug, Default, Deserialize)]
struct PayloadUser {
    #[serde(default)]
    uuid: String,
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct PayloadRepository {
    #[serde(default)]
    name: String,
    #[serde(default)]
    uuid: String,
    #[serde(default)]
    links: PayloadLinks,
}

#[derive(Debug, Default, Deserialize)]
struct PayloadCommit {
    #[serde(default)]
    hash: String,
}

#[derive(Debug, Default, Deserialize)]
struct PayloadPullRequestSide {
    #[serde(default)]
    commit: PayloadCommit,
}

#[derive(Debug, Default, Deserialize)]
struct PayloadPullRequest {
    #[serde(default)]
    id: String,
    #[serde(default)]
    source: PayloadPullRequestSide,
    #[serde(default)]
    destination: PayloadPullRequestSide,
    #[serde(default)]
    links: PayloadLinks,
    #[serde(default)]
    author: PayloadUser,
}

#[derive(Debug, Default, Deserialize)]
struct BitbucketPayload {
    #[serde(default)]
    repository: PayloadRepository,
    #[serde(default)]
    pullrequest: PayloadPullRequest,
}

fn bitbucket_plugin_present() -> bool {
    std::env::var_os("BITBUCKET_PAYLOAD").is_some()
}

fn enhance_from_bitbucket_plugin(configuration: &mut Configuration) {
    if let Ok(raw) = std::env::var("BITBUCKET_PAYLOAD") {
        match serde_json::from_str::<BitbucketPayload>(&raw) {
            Ok(payload) => apply_bitbucket_payload(configuration, &payload),
            Err(e) => tracing::warn!(error = %e, "ignoring malformed bitbucket payload"),
        }
    }

    set_if_env_exists(&mut configuration.branch, "CHANGE_BRANCH");
    set_if_env_exists(
        &mut configuration.pull_request.source_ref.branch,
        "CHANGE_BRANCH",
    );
    set_if_env_exists(
        &mut configuration.pull_request.target_ref.branch,
        "CHANGE_TARGET",
    );
    set_if_env_exists(&mut configuration.pull_request.url, "CHANGE_URL");
    set_if_env_exists(&mut configuration.pull_request.id, "CHANGE_ID");
}

fn apply_bitbucket_payload(configuration: &mut Configuration, payload: &BitbucketPayload) {
    configuration.pull_request.id = payload.pullrequest.id.clone();
    configuration.pull_request.url = payload.pullrequest.links.html.href.clone();
    configuration.pull_request.source_ref.sha = payload.pullrequest.source.commit.hash.clone();
    configuration.pull_request.target_ref.sha = payload.pullrequest.destination.commit.hash.clone();
    configuration.pusher.username = payload.pullrequest.author.display_name.clone();
    configuration.pusher.id = payload.pullrequest.author.uuid.clone();
    configuration.repository.id = payload.repository.uuid.clone();
    configuration.repository.name = payload.repository.name.clone();
    configuration.repository.url = payload.repository.links.html.href.clone();
}

// Bitbucket Server plugin.

fn bitbucket_server_plugin_present() -> bool {
    std::env::var_os("CHANGE_BRANCH").is_some()
}

fn enhance_from_bitbucket_server_plugin(configuration: &mut Configuration) {
    configuration.pusher.username = env("CHANGE_AUTHOR_DISPLAY_NAME");
    configuration.pusher.email = env("CHANGE_AUTHOR_EMAIL");
    configuration.pusher.name = env("CHANGE_AUTHOR");
    configuration.pull_request.id = env("CHANGE_ID");
    configuration.pull_request.url = env("CHANGE_URL");
}
