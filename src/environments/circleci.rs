//! CircleCI.
//!
//! CircleCI builds repositories hosted elsewhere, so the repository source is
//! inferred from the clone URL's host and the SCM link is reconstructed
//! through the clone-URL parser rather than read from dedicated variables.

use std::path::Path;

use super::{env_or_default, source_from_host, Environment, EnvironmentError};
use crate::clone_url::{generate_scm_id, parse_data_from_clone_url};
use crate::models::{BuildRun, Configuration, Entity, Pipeline, PullRequest, Pusher, Ref, Repository, Runner};
use crate::source::RepositorySource;

const BUILDER: &str = "CircleCi";

const BUILD_NUMBER_ENV: &str = "CIRCLE_BUILD_NUM";
const CLONE_URL_ENV: &str = "CIRCLE_REPOSITORY_URL";
const COMMIT_SHA_ENV: &str = "CIRCLE_SHA1";
const REPOSITORY_NAME_ENV: &str = "CIRCLE_PROJECT_REPONAME";
const BRANCH_ENV: &str = "CIRCLE_BRANCH";
const PULL_REQUEST_URL_ENV: &str = "CIRCLE_PULL_REQUEST";
const WORKFLOW_ID_ENV: &str = "CIRCLE_WORKFLOW_ID";
const JOB_NAME_ENV: &str = "CIRCLE_JOB";
const JOB_ID_ENV: &str = "CIRCLE_WORKFLOW_JOB_ID";
const BUILD_URL_ENV: &str = "CIRCLE_BUILD_URL";

const CIRCLECI_URL: &str = "https://app.circleci.com";
const PIPELINE_FILE: &str = ".circleci/config.yml";

#[derive(Debug)]
pub(super) struct CircleCiEnvironment;

impl Environment for CircleCiEnvironment {
    fn configuration(&self) -> Result<Configuration, EnvironmentError> {
        let clone_url = env_or_default(CLONE_URL_ENV);
        let (source, api_url) = source_from_host(&clone_url);
        let parsed = parse_data_from_clone_url(&clone_url, api_url, source)?;

        let mut scm_link = parsed.repository_url.clone();
        if !scm_link.ends_with(".git") {
            scm_link.push_str(".git");
        }
        let scm_id = generate_scm_id(&scm_link);

        let pull_request_url = env_or_default(PULL_REQUEST_URL_ENV);
        let pull_request_id = pull_request_url
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(Configuration {
            url: CIRCLECI_URL.to_string(),
            scm_api_url: api_url.to_string(),
            local_path: clone_url,
            branch: env_or_default(BRANCH_ENV),
            commit_sha: env_or_default(COMMIT_SHA_ENV),
            repository: Repository {
                name: env_or_default(REPOSITORY_NAME_ENV),
                full_name: parsed.full_name,
                clone_url: scm_link,
                source,
                url: parsed.repository_url,
                ..Repository::default()
            },
            pipeline: Pipeline {
                id: env_or_default(WORKFLOW_ID_ENV),
                name: env_or_default(WORKFLOW_ID_ENV),
                path: pipeline_path(),
            },
            job: Entity {
                id: env_or_default(JOB_ID_ENV),
                name: env_or_default(JOB_NAME_ENV),
            },
            builder: BUILDER.to_string(),
            organization: Entity {
                name: parsed.organization,
                ..Entity::default()
            },
            run: BuildRun {
                build_id: env_or_default(BUILD_NUMBER_ENV),
                build_number: env_or_default(BUILD_NUMBER_ENV),
            },
            pusher: Pusher {
                username: super::detect_pusher(),
                ..Pusher::default()
            },
            runner: Runner {
                os: std::env::consts::OS.to_string(),
                architecture: std::env::consts::ARCH.to_string(),
                ..Runner::default()
            },
            pull_request: PullRequest {
                id: pull_request_id,
                source_ref: Ref {
                    branch: env_or_default(BRANCH_ENV),
                    ..Ref::default()
                },
                ..PullRequest::default()
            },
            environment: RepositorySource::CircleCi,
            scm_id,
            pipeline_paths: pipeline_paths(),
            ..Configuration::default()
        })
    }

    fn build_link(&self) -> String {
        env_or_default(BUILD_URL_ENV)
    }

    fn step_link(&self) -> String {
        String::new()
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
        "circleci"
    }

    fn is_current_environment(&self) -> bool {
        env_or_default("CIRCLECI") == "true"
    }
}

fn pipeline_path() -> String {
    if Path::new(PIPELINE_FILE).exists() {
        PIPELINE_FILE.to_string()
    } else {
        String::new()
    }
}

fn pipeline_paths() -> Vec<String> {
    let path = pipeline_path();
    if path.is_empty() {
        Vec::new()
    } else {
        vec![path]
    }
}
