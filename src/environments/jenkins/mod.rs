//! Jenkins.
//!
//! Jenkins exposes almost nothing about the repository host, so the reader
//! leans on the local checkout: the clone URL comes from `GIT_URL` or the
//! repository's remotes, the source is inferred from the URL's host, and SCM
//! plugin variables fill in pull-request details afterwards.

mod plugins;

use std::path::Path;

use super::{env_exists, env_or_default, source_from_host, Environment, EnvironmentError};
use crate::clone_url::{generate_scm_id, parse_data_from_clone_url, strip_credentials_from_url};
use crate::git;
use crate::models::{BuildRun, Configuration, Entity, Pipeline, PullRequest, Pusher, Ref, Repository, Runner};
use crate::source::RepositorySource;

const BUILDER: &str = "Jenkins";

const WORKSPACE_ENV: &str = "WORKSPACE";
const JENKINS_URL_ENV: &str = "JENKINS_URL";
const BUILD_URL_ENV: &str = "BUILD_URL";
const RUN_URL_ENV: &str = "RUN_DISPLAY_URL";
const CLONE_URL_ENV: &str = "GIT_URL";
const BUILD_ID_ENV: &str = "BUILD_ID";
const BUILD_NUMBER_ENV: &str = "BUILD_NUMBER";
const NODE_NAME_ENV: &str = "NODE_NAME";
const JOB_NAME_ENV: &str = "JOB_NAME";
const STAGE_NAME_ENV: &str = "STAGE_NAME";
const COMMIT_SHA_ENV: &str = "GIT_COMMIT";
const BRANCH_ENV: &str = "BRANCH_NAME";
const TARGET_BRANCH_ENV: &str = "CHANGE_TARGET";

#[derive(Debug)]
pub(super) struct JenkinsEnvironment;

impl Environment for JenkinsEnvironment {
    fn configuration(&self) -> Result<Configuration, EnvironmentError> {
        let repository_path = env_or_default(WORKSPACE_ENV);
        if !git::is_repository(&repository_path) {
            return Err(EnvironmentError::NotARepository(repository_path));
        }

        let clone_url = repository_clone_url(&repository_path)?;
        let clone_url = strip_credentials_from_url(&clone_url);
        let (source, api_url) = source_from_host(&clone_url);
        let parsed = parse_data_from_clone_url(&clone_url, api_url, source)?;

        let commit = match env_or_default(COMMIT_SHA_ENV) {
            sha if sha.is_empty() => git::head_commit(&repository_path)?,
            sha => sha,
        };
        let scm_id = generate_scm_id(&clone_url);
        let branch = branch_name(&repository_path, &commit);

        let mut configuration = Configuration {
            url: env_or_default(JENKINS_URL_ENV),
            scm_api_url: api_url.to_string(),
            local_path: repository_path.clone(),
            branch: branch.clone(),
            commit_sha: commit,
            repository: Repository {
                name: parsed.repository,
                clone_url,
                source,
                url: parsed.repository_url,
                ..Repository::default()
            },
            pipeline: Pipeline {
                id: env_or_default(JOB_NAME_ENV),
                name: env_or_default(JOB_NAME_ENV),
                ..Pipeline::default()
            },
            job: Entity {
                id: env_or_default(STAGE_NAME_ENV),
                name: env_or_default(STAGE_NAME_ENV),
            },
            run: BuildRun {
                build_id: env_or_default(BUILD_ID_ENV),
                build_number: env_or_default(BUILD_NUMBER_ENV),
            },
            runner: Runner {
                id: env_or_default(NODE_NAME_ENV),
                name: env_or_default(NODE_NAME_ENV),
                os: std::env::consts::OS.to_string(),
                architecture: std::env::consts::ARCH.to_string(),
                ..Runner::default()
            },
            pull_request: PullRequest {
                source_ref: Ref {
                    branch,
                    ..Ref::default()
                },
                target_ref: Ref {
                    branch: env_or_default(TARGET_BRANCH_ENV),
                    ..Ref::default()
                },
                ..PullRequest::default()
            },
            builder: BUILDER.to_string(),
            organization: Entity {
                name: parsed.organization,
                ..Entity::default()
            },
            pipeline_paths: pipeline_paths(&repository_path),
            environment: RepositorySource::Jenkins,
            scm_id,
            ..Configuration::default()
        };

        plugins::enhance_configuration(&mut configuration);
        if configuration.pusher.username.is_empty() {
            configuration.pusher.username = super::detect_pusher();
        }
        configuration.repository.clone_url =
            strip_credentials_from_url(&configuration.repository.clone_url);
        Ok(configuration)
    }

    fn build_link(&self) -> String {
        match env_or_default(BUILD_URL_ENV) {
            url if url.is_empty() => env_or_default(RUN_URL_ENV),
            url => url,
        }
    }

    fn step_link(&self) -> String {
        env_or_default(RUN_URL_ENV)
    }

    fn file_link(&self, _filename: &str, _branch: &str, _commit: &str) -> String {
        String::new()
    }

    fn file_line_link(
        &self,
        _filename: &str,
        _branch: &str,
        _commit: &str,
        _start_line: u32,
        _end_line: u32,
    ) -> String {
        String::new()
    }

    fn name(&self) -> &'static str {
        "jenkins"
    }

    fn is_current_environment(&self) -> bool {
        env_exists("JENKINS_HOME") || env_exists("JENKINS_URL")
    }
}

fn repository_clone_url(repository_path: &str) -> Result<String, EnvironmentError> {
    match std::env::var(CLONE_URL_ENV) {
        Ok(url) => Ok(url),
        Err(_) => Ok(git::remote_url(repository_path)?),
    }
}

fn branch_name(repository_path: &str, commit: &str) -> String {
    let branch = env_or_default(BRANCH_ENV);
    if branch.is_empty() {
        git::branch(repository_path, commit).unwrap_or_default()
    } else {
        branch
    }
}

fn pipeline_paths(root_dir: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let jenkinsfile = Path::new(root_dir).join("Jenkinsfile");
    if jenkinsfile.exists() {
        paths.push(jenkinsfile.display().to_string());
    }
    // A Jenkins job can build a GitHub repository whose workflow files are
    // still pipeline definitions worth reporting.
    paths.extend(super::github::workflow_paths(root_dir));
    paths
}
