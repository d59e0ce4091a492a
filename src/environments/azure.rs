//! Azure Pipelines.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use url::Url;

use super::{env_exists, env_or_default, Environment, EnvironmentError};
use crate::clone_url::{generate_scm_id, strip_credentials_from_url};
use crate::git;
use crate::links;
use crate::models::{
    BuildRun, Configuration, Entity, Pipeline, PullRequest, Pusher, Ref, Repository, Runner,
};
use crate::source::RepositorySource;

const TASK_INSTANCE_ID_ENV: &str = "SYSTEM_TASKINSTANCEID";
const PROJECT_ID_ENV: &str = "SYSTEM_TEAMPROJECTID";
const DEFINITION_ID_ENV: &str = "SYSTEM_DEFINITIONID";
const PROJECT_NAME_ENV: &str = "SYSTEM_TEAMPROJECT";
const JOB_ID_ENV: &str = "SYSTEM_JOBID";
const JOB_NAME_ENV: &str = "SYSTEM_JOBDISPLAYNAME";
const REPOSITORY_PATH_ENV: &str = "BUILD_SOURCESDIRECTORY";
const BRANCH_ENV: &str = "BUILD_SOURCEBRANCH";
const USER_EMAIL_ENV: &str = "BUILD_REQUESTEDFOREMAIL";
const PIPELINE_NAME_ENV: &str = "BUILD_DEFINITIONNAME";
const BUILD_ID_ENV: &str = "BUILD_BUILDID";
const BUILD_NUMBER_ENV: &str = "BUILD_BUILDNUMBER";
const ENDPOINT_URL_ENV: &str = "SYSTEM_TASKDEFINITIONSURI";
const COLLECTION_URI_ENV: &str = "SYSTEM_COLLECTIONURI";
const COMMIT_SHA_ENV: &str = "BUILD_SOURCEVERSION";
const COLLECTION_ID_ENV: &str = "SYSTEM_COLLECTIONID";
const PULL_REQUEST_ID_ENV: &str = "SYSTEM_PULLREQUEST_PULLREQUESTID";
const PULL_REQUEST_SOURCE_BRANCH_ENV: &str = "SYSTEM_PULLREQUEST_SOURCEBRANCH";
const PULL_REQUEST_TARGET_BRANCH_ENV: &str = "SYSTEM_PULLREQUEST_TARGETBRANCH";
const REPOSITORY_ID_ENV: &str = "BUILD_REPOSITORY_ID";
const REPOSITORY_NAME_ENV: &str = "BUILD_REPOSITORY_NAME";
const REPOSITORY_URI_ENV: &str = "BUILD_REPOSITORY_URI";
const USERNAME_ENV: &str = "BUILD_REQUESTEDFOR";
const AGENT_ID_ENV: &str = "AGENT_ID";
const AGENT_NAME_ENV: &str = "AGENT_NAME";
const AGENT_OS_ARCHITECTURE_ENV: &str = "AGENT_OSARCHITECTURE";
const AGENT_OS_ENV: &str = "AGENT_OS";
const IMAGE_OS_ENV: &str = "ImageOS";
const BUILD_REASON_ENV: &str = "BUILD_REASON";
const API_URL_ENV: &str = "ENDPOINT_URL_SYSTEMVSSCONNECTION";

const PULL_REQUEST_REASON: &str = "PullRequest";
const PIPELINE_FILES: &[&str] = &["azure-pipelines.yml", "azure-pipelines.yaml"];

// Microsoft-operated hosts; anything else is a self-hosted Azure DevOps
// Server.
static SAAS_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"https://[\w.]*(dev\.azure\.com|vsassets\.io|msauth\.net|msftauth\.net|visualstudio\.com|azure\.net|microsoft\.com|azurecomcdn\.azureedge\.net|live\.com|microsoftonline\.com|management\.azure\.com|sharepointonline\.com|windows\.net|azureedge\.net)",
    )
    .expect("azure saas host pattern")
});

#[derive(Debug)]
pub(super) struct AzureEnvironment;

impl Environment for AzureEnvironment {
    fn configuration(&self) -> Result<Configuration, EnvironmentError> {
        let repo_path = env_or_default(REPOSITORY_PATH_ENV);
        let repo_url = env_or_default(REPOSITORY_URI_ENV);
        let clone_url = match git::remote_url(&repo_path) {
            Ok(url) if !url.is_empty() => url,
            _ => format!("{repo_url}.git"),
        };
        let clone_url = strip_credentials_from_url(&clone_url);
        let scm_id = generate_scm_id(&clone_url);
        let source = collection_source();

        let username = match env_or_default(USERNAME_ENV) {
            name if name.is_empty() => super::detect_pusher(),
            name => name,
        };

        Ok(Configuration {
            url: env_or_default(ENDPOINT_URL_ENV),
            scm_api_url: env_or_default(API_URL_ENV),
            local_path: repo_path.clone(),
            branch: branch(),
            project_id: env_or_default(PROJECT_ID_ENV),
            commit_sha: env_or_default(COMMIT_SHA_ENV),
            organization: Entity {
                id: env_or_default(COLLECTION_ID_ENV),
                name: organization_name(&env_or_default(COLLECTION_URI_ENV)),
            },
            repository: Repository {
                id: env_or_default(REPOSITORY_ID_ENV),
                name: env_or_default(REPOSITORY_NAME_ENV),
                url: repo_url,
                clone_url,
                source,
                ..Repository::default()
            },
            pusher: Pusher {
                username,
                email: env_or_default(USER_EMAIL_ENV),
                ..Pusher::default()
            },
            job: Entity {
                id: env_or_default(JOB_NAME_ENV),
                name: env_or_default(JOB_NAME_ENV),
            },
            pipeline: Pipeline {
                id: format!(
                    "{}-{}",
                    env_or_default(PROJECT_ID_ENV),
                    env_or_default(DEFINITION_ID_ENV)
                ),
                name: env_or_default(PIPELINE_NAME_ENV),
                ..Pipeline::default()
            },
            run: BuildRun {
                build_id: env_or_default(BUILD_ID_ENV),
                build_number: env_or_default(BUILD_NUMBER_ENV),
            },
            runner: Runner {
                id: env_or_default(AGENT_ID_ENV),
                name: env_or_default(AGENT_NAME_ENV),
                os: env_or_default(AGENT_OS_ENV),
                distribution: env_or_default(IMAGE_OS_ENV),
                architecture: env_or_default(AGENT_OS_ARCHITECTURE_ENV),
            },
            pull_request: PullRequest {
                id: env_or_default(PULL_REQUEST_ID_ENV),
                source_ref: Ref {
                    branch: env_or_default(PULL_REQUEST_SOURCE_BRANCH_ENV),
                    ..Ref::default()
                },
                target_ref: Ref {
                    branch: env_or_default(PULL_REQUEST_TARGET_BRANCH_ENV),
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
        // SYSTEM_TASKDEFINITIONSURI carries a trailing slash, so no separator
        // goes between it and the project name.
        format!(
            "{}{}/_build?definitionId={}&_a=summary",
            env_or_default(ENDPOINT_URL_ENV),
            env_or_default(PROJECT_NAME_ENV),
            env_or_default(DEFINITION_ID_ENV)
        )
    }

    fn step_link(&self) -> String {
        format!(
            "{}{}/_build/results?buildId={}&view=logs&j={}&t={}",
            env_or_default(ENDPOINT_URL_ENV),
            env_or_default(PROJECT_NAME_ENV),
            env_or_default(BUILD_ID_ENV),
            env_or_default(JOB_ID_ENV),
            env_or_default(TASK_INSTANCE_ID_ENV)
        )
    }

    fn file_link(&self, filename: &str, branch: &str, commit: &str) -> String {
        links::file_link(collection_source(), &repository_url(), filename, branch, commit)
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
            collection_source(),
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
        "azure"
    }

    fn is_current_environment(&self) -> bool {
        env_exists(BUILD_ID_ENV)
    }
}

fn collection_source() -> RepositorySource {
    if SAAS_HOST.is_match(&env_or_default(COLLECTION_URI_ENV)) {
        RepositorySource::Azure
    } else {
        RepositorySource::AzureServer
    }
}

fn branch() -> String {
    if env_or_default(BUILD_REASON_ENV) == PULL_REQUEST_REASON {
        env_or_default(PULL_REQUEST_SOURCE_BRANCH_ENV)
    } else {
        env_or_default(BRANCH_ENV)
    }
}

fn repository_url() -> String {
    format!(
        "{}_git/{}",
        env_or_default(ENDPOINT_URL_ENV),
        env_or_default(REPOSITORY_NAME_ENV)
    )
}

/// The last path segment of the collection URI, e.g. the organization in
/// `https://dev.azure.com/test-organization/`.
fn organization_name(collection_uri: &str) -> String {
    let Ok(parsed) = Url::parse(collection_uri) else {
        return String::new();
    };
    parsed
        .path()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn pipeline_paths(root_dir: &str) -> Vec<String> {
    PIPELINE_FILES
        .iter()
        .map(|file| Path::new(root_dir).join(file))
        .filter(|path| path.exists())
        .map(|path| path.display().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environments::test_support::EnvGuard;

    #[test]
    fn test_configuration() {
        let mut env = EnvGuard::acquire();
        env.set("SYSTEM_COLLECTIONURI", "https://dev.azure.com/test-organization/");
        env.set("SYSTEM_COLLECTIONID", "collection-1");
        env.set("SYSTEM_TASKDEFINITIONSURI", "https://dev.azure.com/test-organization/");
        env.set("SYSTEM_TEAMPROJECTID", "project-1");
        env.set("SYSTEM_DEFINITIONID", "12");
        env.set("BUILD_SOURCESDIRECTORY", "/nonexistent/agent/work");
        env.set("BUILD_REPOSITORY_ID", "repo-1");
        env.set("BUILD_REPOSITORY_NAME", "test-repo");
        env.set(
            "BUILD_REPOSITORY_URI",
            "https://dev.azure.com/test-organization/test-project/_git/test-repo",
        );
        env.set("BUILD_SOURCEVERSION", "abc123");
        env.set("BUILD_SOURCEBRANCH", "refs/heads/main");
        env.set("BUILD_REASON", "IndividualCI");
        env.set("BUILD_REQUESTEDFOR", "Jane Doe");
        env.set("BUILD_BUILDID", "777");
        env.set("BUILD_BUILDNUMBER", "20230101.1");

        let config = AzureEnvironment.configuration().unwrap();
        assert_eq!(config.repository.source, RepositorySource::Azure);
        assert_eq!(config.organization.name, "test-organization");
        assert_eq!(config.branch, "refs/heads/main");
        assert_eq!(config.pipeline.id, "project-1-12");
        assert_eq!(config.pusher.username, "Jane Doe");
        assert_eq!(
            config.repository.clone_url,
            "https://dev.azure.com/test-organization/test-project/_git/test-repo.git"
        );
    }

    #[test]
    fn test_pull_request_branch() {
        let mut env = EnvGuard::acquire();
        env.set("BUILD_REASON", "PullRequest");
        env.set("BUILD_SOURCEBRANCH", "refs/pull/4/merge");
        env.set("SYSTEM_PULLREQUEST_SOURCEBRANCH", "refs/heads/feature");
        assert_eq!(branch(), "refs/heads/feature");
    }

    #[test]
    fn test_self_hosted_collection() {
        let mut env = EnvGuard::acquire();
        env.set("SYSTEM_COLLECTIONURI", "https://azure-devops.server.com/tfs/Collection/");
        assert_eq!(collection_source(), RepositorySource::AzureServer);
    }

    #[test]
    fn test_links() {
        let mut env = EnvGuard::acquire();
        env.set("SYSTEM_TASKDEFINITIONSURI", "https://dev.azure.com/test-organization/");
        env.set("SYSTEM_COLLECTIONURI", "https://dev.azure.com/test-organization/");
        env.set("SYSTEM_TEAMPROJECT", "test-project");
        env.set("SYSTEM_DEFINITIONID", "12");
        env.set("SYSTEM_JOBID", "job-1");
        env.set("SYSTEM_TASKINSTANCEID", "task-1");
        env.set("BUILD_BUILDID", "777");
        env.set("BUILD_REPOSITORY_NAME", "test-repo");

        assert_eq!(
            AzureEnvironment.build_link(),
            "https://dev.azure.com/test-organization/test-project/_build?definitionId=12&_a=summary"
        );
        assert_eq!(
            AzureEnvironment.step_link(),
            "https://dev.azure.com/test-organization/test-project/_build/results?buildId=777&view=logs&j=job-1&t=task-1"
        );
        assert_eq!(
            AzureEnvironment.file_line_link("path/to/file", "branch", "", 1, 1),
            "https://dev.azure.com/test-organization/_git/test-repo?path=path%2Fto%2Ffile&version=GBbranch&line=1&lineEnd=2&lineStartColumn=1&lineEndColumn=1&lineStyle=plain&_a=contents"
        );
    }

    #[test]
    fn test_organization_name() {
        assert_eq!(
            organization_name("https://dev.azure.com/test-organization/"),
            "test-organization"
        );
        assert_eq!(organization_name("not a url"), "");
    }

    #[test]
    fn test_pipeline_paths() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("azure-pipelines.yml"), "trigger: []\n").unwrap();

        let paths = pipeline_paths(tmp.path().to_str().unwrap());
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("azure-pipelines.yml"));
    }
}
