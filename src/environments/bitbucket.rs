//! Bitbucket Pipelines.

use std::path::Path;

use super::{env_exists, env_or_default, Environment, EnvironmentError};
use crate::clone_url::{generate_scm_id, strip_credentials_from_url};
use crate::links;
use crate::models::{
    BuildRun, Configuration, Entity, Pipeline, PullRequest, Pusher, Ref, Repository, Runner,
};
use crate::source::RepositorySource;

const REPOSITORY_PATH_ENV: &str = "BITBUCKET_CLONE_DIR";
const REPOSITORY_NAME_ENV: &str = "BITBUCKET_REPO_SLUG";
const REPOSITORY_ID_ENV: &str = "BITBUCKET_REPO_UUID";
const REPOSITORY_URL_ENV: &str = "BITBUCKET_GIT_HTTP_ORIGIN";
const REPOSITORY_FULL_NAME_ENV: &str = "BITBUCKET_REPO_FULL_NAME";
const WORKSPACE_ENV: &str = "BITBUCKET_WORKSPACE";
const PR_DESTINATION_BRANCH_ENV: &str = "BITBUCKET_PR_DESTINATION_BRANCH";
const BUILD_NUMBER_ENV: &str = "BITBUCKET_BUILD_NUMBER";
const COMMIT_SHA_ENV: &str = "BITBUCKET_COMMIT";
const BRANCH_ENV: &str = "BITBUCKET_BRANCH";
const PULL_REQUEST_ID_ENV: &str = "BITBUCKET_PR_ID";
const PIPELINE_ID_ENV: &str = "BITBUCKET_PIPELINE_UUID";
const STEP_ID_ENV: &str = "BITBUCKET_STEP_UUID";

const BITBUCKET_URL: &str = "https://bitbucket.org";
const BITBUCKET_API_URL: &str = "https://api.bitbucket.org/2.0";
const PIPELINE_FILE: &str = "bitbucket-pipelines.yml";

#[derive(Debug)]
pub(super) struct BitbucketEnvironment;

impl Environment for BitbucketEnvironment {
    fn configuration(&self) -> Result<Configuration, EnvironmentError> {
        let source = RepositorySource::Bitbucket;
        let repo_path = env_or_default(REPOSITORY_PATH_ENV);
        let clone_url = format!("{}.git", env_or_default(REPOSITORY_URL_ENV));
        let mut clone_url = strip_credentials_from_url(&clone_url);
        if !clone_url.ends_with(".git") {
            clone_url.push_str(".git");
        }
        let scm_id = generate_scm_id(&clone_url);

        Ok(Configuration {
            url: BITBUCKET_URL.to_string(),
            scm_api_url: BITBUCKET_API_URL.to_string(),
            local_path: repo_path.clone(),
            branch: env_or_default(BRANCH_ENV),
            commit_sha: env_or_default(COMMIT_SHA_ENV),
            repository: Repository {
                id: env_or_default(REPOSITORY_ID_ENV),
                name: env_or_default(REPOSITORY_NAME_ENV),
                url: env_or_default(REPOSITORY_URL_ENV),
                clone_url,
                source,
                ..Repository::default()
            },
            organization: Entity {
                name: env_or_default(WORKSPACE_ENV),
                ..Entity::default()
            },
            pipeline: Pipeline {
                id: env_or_default(PIPELINE_ID_ENV),
                name: env_or_default(REPOSITORY_NAME_ENV),
                path: PIPELINE_FILE.to_string(),
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
                id: env_or_default(PULL_REQUEST_ID_ENV),
                target_ref: Ref {
                    branch: env_or_default(PR_DESTINATION_BRANCH_ENV),
                    ..Ref::default()
                },
                ..PullRequest::default()
            },
            pipeline_paths: pipeline_paths(&repo_path),
            environment: source,
            scm_id,
            ..Configuration::default()
        })
    }

    fn build_link(&self) -> String {
        format!(
            "{BITBUCKET_URL}/{}/pipelines/results/{}",
            env_or_default(REPOSITORY_FULL_NAME_ENV),
            urlencoding::encode(&env_or_default(BUILD_NUMBER_ENV))
        )
    }

    fn step_link(&self) -> String {
        format!(
            "{BITBUCKET_URL}/{}/pipelines/results/{}/steps/{}",
            env_or_default(REPOSITORY_FULL_NAME_ENV),
            env_or_default(BUILD_NUMBER_ENV),
            env_or_default(STEP_ID_ENV)
        )
    }

    fn file_link(&self, filename: &str, branch: &str, commit: &str) -> String {
        links::file_link(
            RepositorySource::Bitbucket,
            &repository_url(),
            filename,
            branch,
            commit,
        )
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
            RepositorySource::Bitbucket,
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
        "bitbucket"
    }

    fn is_current_environment(&self) -> bool {
        env_exists("BITBUCKET_PROJECT_KEY")
    }
}

fn repository_url() -> String {
    format!(
        "{BITBUCKET_URL}/{}",
        env_or_default(REPOSITORY_FULL_NAME_ENV)
    )
}

fn pipeline_paths(root_dir: &str) -> Vec<String> {
    let path = Path::new(root_dir).join(PIPELINE_FILE);
    if path.exists() {
        vec![path.display().to_string()]
    } else {
        Vec::new()
    }
}
