//! GitHub Actions.

use serde::Deserialize;
use std::path::Path;
use walkdir::WalkDir;

use super::{env_exists, env_or_default, Environment, EnvironmentError};
use crate::clone_url::{generate_scm_id, strip_credentials_from_url};
use crate::git;
use crate::links;
use crate::models::{
    Author, BuildRun, Commit, Configuration, Entity, Pipeline, PullRequest, Pusher, Ref,
    Repository, Runner,
};
use crate::source::RepositorySource;

const BUILDER: &str = "Github Action";

const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";
const SERVER_URL_ENV: &str = "GITHUB_SERVER_URL";
const WORKFLOW_ENV: &str = "GITHUB_WORKFLOW";
const RUN_ID_ENV: &str = "GITHUB_RUN_ID";
const RUN_NUMBER_ENV: &str = "GITHUB_RUN_NUMBER";
const WORKSPACE_ENV: &str = "GITHUB_WORKSPACE";
const JOB_ENV: &str = "GITHUB_JOB";
const BRANCH_ENV: &str = "GITHUB_REF";
const COMMIT_SHA_ENV: &str = "GITHUB_SHA";
const RUNNER_NAME_ENV: &str = "RUNNER_NAME";
const RUNNER_OS_ENV: &str = "RUNNER_OS";
const BASE_BRANCH_ENV: &str = "GITHUB_BASE_REF";
const HEAD_BRANCH_ENV: &str = "GITHUB_HEAD_REF";
const EVENT_PATH_ENV: &str = "GITHUB_EVENT_PATH";
const EVENT_NAME_ENV: &str = "GITHUB_EVENT_NAME";
const API_URL_ENV: &str = "GITHUB_API_URL";

const WORKFLOWS_DIR: &str = ".github/workflows";
const PULL_REQUEST_EVENT: &str = "pull_request";
const GITHUB_SAAS_URL: &str = "https://github.com";

#[derive(Debug, Default, Deserialize)]
struct PayloadOwner {
    #[serde(default)]
    login: String,
}

#[derive(Debug, Default, Deserialize)]
struct PayloadRepository {
    #[serde(default)]
    id: u64,
    #[serde(default)]
    owner: PayloadOwner,
}

#[derive(Debug, Default, Deserialize)]
struct PayloadAuthor {
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    username: String,
}

#[derive(Debug, Default, Deserialize)]
struct PayloadCommit {
    #[serde(default)]
    id: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    author: PayloadAuthor,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct PayloadSender {
    #[serde(default)]
    id: u64,
    #[serde(default)]
    login: String,
}

/// The webhook event GitHub serializes to `GITHUB_EVENT_PATH` for every run.
#[derive(Debug, Default, Deserialize)]
struct GithubPayload {
    #[serde(default)]
    repository: PayloadRepository,
    #[serde(default)]
    sender: PayloadSender,
    #[serde(default)]
    commits: Vec<PayloadCommit>,
}

#[derive(Debug)]
pub(super) struct GithubEnvironment;

impl Environment for GithubEnvironment {
    fn configuration(&self) -> Result<Configuration, EnvironmentError> {
        let payload = read_payload()?;
        let source = server_source();

        let repo_path = env_or_default(WORKSPACE_ENV);
        let repo_url = format!(
            "{}/{}",
            env_or_default(SERVER_URL_ENV),
            env_or_default(REPOSITORY_ENV)
        );
        let clone_url = match git::remote_url(&repo_path) {
            Ok(url) if !url.is_empty() => url,
            _ => format!("{repo_url}.git"),
        };
        let clone_url = strip_credentials_from_url(&clone_url);
        let scm_id = generate_scm_id(&clone_url);

        let username = if payload.sender.login.is_empty() {
            super::detect_pusher()
        } else {
            payload.sender.login.clone()
        };

        let workflow = env_or_default(WORKFLOW_ENV);
        let repository_name = env_or_default(REPOSITORY_ENV)
            .split('/')
            .nth(1)
            .unwrap_or_default()
            .to_string();

        Ok(Configuration {
            url: env_or_default(SERVER_URL_ENV),
            scm_api_url: env_or_default(API_URL_ENV),
            builder: BUILDER.to_string(),
            local_path: repo_path.clone(),
            commit_sha: env_or_default(COMMIT_SHA_ENV),
            branch: branch(),
            run: BuildRun {
                build_id: env_or_default(RUN_ID_ENV),
                build_number: env_or_default(RUN_NUMBER_ENV),
            },
            job: Entity {
                id: env_or_default(JOB_ENV),
                name: env_or_default(JOB_ENV),
            },
            pipeline: Pipeline {
                id: workflow.clone(),
                name: workflow.clone(),
                path: pipeline_path(&workflow),
            },
            runner: Runner {
                id: env_or_default(RUN_ID_ENV),
                name: env_or_default(RUNNER_NAME_ENV),
                os: env_or_default(RUNNER_OS_ENV),
                architecture: std::env::consts::ARCH.to_string(),
                ..Runner::default()
            },
            repository: Repository {
                id: payload.repository.id.to_string(),
                name: repository_name,
                url: repo_url,
                clone_url,
                source,
                ..Repository::default()
            },
            pull_request: PullRequest {
                source_ref: Ref {
                    branch: env_or_default(HEAD_BRANCH_ENV),
                    ..Ref::default()
                },
                target_ref: Ref {
                    branch: env_or_default(BASE_BRANCH_ENV),
                    ..Ref::default()
                },
                ..PullRequest::default()
            },
            commits: payload_commits(&payload),
            organization: Entity {
                name: payload.repository.owner.login.clone(),
                ..Entity::default()
            },
            pusher: Pusher {
                id: payload.sender.id.to_string(),
                name: payload.sender.login.clone(),
                username,
                ..Pusher::default()
            },
            pipeline_paths: workflow_paths(&repo_path),
            environment: source,
            scm_id,
            ..Configuration::default()
        })
    }

    fn build_link(&self) -> String {
        run_link()
    }

    fn step_link(&self) -> String {
        run_link()
    }

    fn file_link(&self, filename: &str, branch: &str, commit: &str) -> String {
        links::file_link(server_source(), &repository_url(), filename, branch, commit)
            .unwrap_or_default()
    }

    fn file_line_link(
        &self,
        filename: &str,
        branch: &str,
        commit: &str,
        start_line: u32,
        end_line: u32,
    ) -> String {
        links::file_line_link(
            server_source(),
            &repository_url(),
            filename,
            branch,
            commit,
            start_line,
            end_line,
        )
        .unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "github"
    }

    fn is_current_environment(&self) -> bool {
        env_exists(WORKFLOW_ENV)
    }
}

fn server_source() -> RepositorySource {
    if env_or_default(SERVER_URL_ENV) == GITHUB_SAAS_URL {
        RepositorySource::Github
    } else {
        RepositorySource::GithubServer
    }
}

fn branch() -> String {
    if env_or_default(EVENT_NAME_ENV) == PULL_REQUEST_EVENT {
        env_or_default(HEAD_BRANCH_ENV)
    } else {
        env_or_default(BRANCH_ENV)
    }
}

fn run_link() -> String {
    format!(
        "{}/{}/actions/runs/{}",
        env_or_default(SERVER_URL_ENV),
        env_or_default(REPOSITORY_ENV),
        env_or_default(RUN_ID_ENV)
    )
}

fn repository_url() -> String {
    format!(
        "{}/{}",
        env_or_default(SERVER_URL_ENV),
        env_or_default(REPOSITORY_ENV)
    )
}

fn read_payload() -> Result<GithubPayload, EnvironmentError> {
    let path = env_or_default(EVENT_PATH_ENV);
    let contents =
        std::fs::read_to_string(&path).map_err(|e| EnvironmentError::Payload(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| EnvironmentError::Payload(e.to_string()))
}

fn payload_commits(payload: &GithubPayload) -> Vec<Commit> {
    payload
        .commits
        .iter()
        .map(|commit| Commit {
            id: commit.id.clone(),
            message: commit.message.clone(),
            commit_date: commit.timestamp.clone(),
            url: commit.url.clone(),
            author: Author {
                email: commit.author.email.clone(),
                name: commit.author.name.clone(),
                username: commit.author.username.clone(),
            },
        })
        .collect()
}

fn pipeline_path(workflow: &str) -> String {
    if workflow.starts_with(".github/workflows/") {
        workflow.to_string()
    } else {
        String::new()
    }
}

/// Workflow definition files under `.github/workflows` in the checkout.
/// Shared with the Jenkins reader, which also picks up workflow files when a
/// Jenkins job builds a GitHub repository.
pub(super) fn workflow_paths(root_dir: &str) -> Vec<String> {
    let workflows = Path::new(root_dir).join(WORKFLOWS_DIR);
    let mut paths: Vec<String> = WalkDir::new(workflows)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            matches!(
                entry.path().extension().and_then(|ext| ext.to_str()),
                Some("yml" | "yaml")
            )
        })
        .map(|entry| entry.path().display().to_string())
        .collect();
    paths.sort();
    paths
}
