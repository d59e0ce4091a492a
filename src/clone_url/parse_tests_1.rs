use super::{parse_data_from_clone_url, CloneUrlData};
use crate::source::RepositorySource;

struct Case {
    name: &'static str,
    clone_url: &'static str,
    api_url: &'static str,
    source: RepositorySource,
    expected: CloneUrlData,
}

fn data(url: &str, organization: &str, repository: &str, full_name: &str) -> CloneUrlData {
    CloneUrlData {
        repository_url: url.to_string(),
        organization: organization.to_string(),
        repository: repository.to_string(),
        full_name: full_name.to_string(),
    }
}

fn run(cases: &[Case]) {
    for case in cases {
        let parsed = parse_data_from_clone_url(case.clone_url, case.api_url, case.source)
            .unwrap_or_else(|e| panic!("{}: {e}", case.name));
        assert_eq!(parsed, case.expected, "{}", case.name);
    }
}

#[test]
fn test_github() {
    run(&[
        Case {
            name: "github http",
            clone_url: "https://github.com/test-organization/test-repo.git",
            api_url: "https://api.github.com",
            source: RepositorySource::Github,
            expected: data(
                "https://github.com/test-organization/test-repo",
                "test-organization",
                "test-repo",
                "test-organization/test-repo",
            ),
        },
        Case {
            name: "github ssh",
            clone_url: "git@github.com:test-organization/test-repo.git",
            api_url: "https://api.github.com",
            source: RepositorySource::Github,
            expected: data(
                "https://github.com/test-organization/test-repo",
                "test-organization",
                "test-repo",
                "test-organization/test-repo",
            ),
        },
    ]);
}

#[test]
fn test_gitlab_nested_groups() {
    run(&[
        Case {
            name: "gitlab http",
            clone_url: "https://gitlab.com/test-group/sub-group/test-repo.git",
            api_url: "https://gitlab.com/api/v4",
            source: RepositorySource::Gitlab,
            expected: data(
                "https://gitlab.com/test-group/sub-group/test-repo",
                "test-group",
                "test-repo",
                "test-group/sub-group/test-repo",
            ),
        },
        Case {
            name: "gitlab ssh",
            clone_url: "git@gitlab.com:test-group/sub-group/test-repo.git",
            api_url: "https://gitlab.com/api/v4",
            source: RepositorySource::Gitlab,
            expected: data(
                "https://gitlab.com/test-group/sub-group/test-repo",
                "test-group",
                "test-repo",
                "test-group/sub-group/test-repo",
            ),
        },
    ]);
}

#[test]
fn test_gitlab_server_with_path_prefix() {
    run(&[
        Case {
            // The API prefix is contained in the clone URL, so the base URL
            // keeps the `/gitlab` path component.
            name: "gitlab server http",
            clone_url: "https://server.com/gitlab/test-group/test-repo.git",
            api_url: "https://server.com/gitlab",
            source: RepositorySource::GitlabServer,
            expected: data(
                "https://server.com/gitlab/test-group/test-repo",
                "test-group",
                "test-repo",
                "test-group/test-repo",
            ),
        },
        Case {
            name: "gitlab server ssh",
            clone_url: "git@server.com/gitlab:test-group/test-repo.git",
            api_url: "https://server.com/gitlab",
            source: RepositorySource::GitlabServer,
            expected: data(
                "https://server.com/gitlab/test-group/test-repo",
                "test-group",
                "test-repo",
                "test-group/test-repo",
            ),
        },
    ]);
}

#[test]
fn test_azure() {
    run(&[
        Case {
            name: "azure http",
            clone_url: "https://dev.azure.com/test-organization/test-project/_git/test-repo",
            api_url: "",
            source: RepositorySource::Azure,
            expected: data(
                "https://dev.azure.com/test-organization/test-project/_git/test-repo",
                "test-organization",
                "test-repo",
                "test-organization/test-project/_git/test-repo",
            ),
        },
        Case {
            // SSH clones go through ssh.dev.azure.com with a `v3` API-version
            // segment; the web URL drops both and gains `_git`.
            name: "azure ssh",
            clone_url: "git@ssh.dev.azure.com:v3/test-organization/test-project/test-repo",
            api_url: "",
            source: RepositorySource::Azure,
            expected: data(
                "https://dev.azure.com/test-organization/test-project/_git/test-repo",
                "test-organization",
                "test-repo",
                "v3/test-organization/test-project/test-repo",
            ),
        },
    ]);
}

#[test]
fn test_azure_server() {
    run(&[
        Case {
            name: "azure server http",
            clone_url: "https://azure-devops.server.com/test-organization/test-project/_git/test-repo",
            api_url: "",
            source: RepositorySource::AzureServer,
            expected: data(
                "https://azure-devops.server.com/test-organization/test-project/_git/test-repo",
                "test-organization",
                "test-repo",
                "test-organization/test-project/_git/test-repo",
            ),
        },
        Case {
            name: "azure server ssh",
            clone_url: "ssh://azure-devops.server.com:22/test-organization/test-project/_git/test-repo",
            api_url: "",
            source: RepositorySource::AzureServer,
            expected: data(
                "https://azure-devops.server.com/test-organization/test-project/_git/test-repo",
                "test-organization",
                "test-repo",
                "test-organization/test-project/_git/test-repo",
            ),
        },
    ]);
}

#[test]
fn test_bitbucket() {
    run(&[
        Case {
            name: "bitbucket http",
            clone_url: "https://bitbucket.org/test-organization/test-repo.git",
            api_url: "https://api.bitbucket.org/2.0",
            source: RepositorySource::Bitbucket,
            expected: data(
                "https://bitbucket.org/test-organization/test-repo",
                "test-organization",
                "test-repo",
                "test-organization/test-repo",
            ),
        },
        Case {
            name: "bitbucket ssh",
            clone_url: "git@bitbucket.org:test-organization/test-repo.git",
            api_url: "https://api.bitbucket.org/2.0",
            source: RepositorySource::Bitbucket,
            expected: data(
                "https://bitbucket.org/test-organization/test-repo",
                "test-organization",
                "test-repo",
                "test-organization/test-repo",
            ),
        },
    ]);
}

#[test]
fn test_bitbucket_server() {
    run(&[
        Case {
            // HTTP clone paths carry an `scm/` prefix that survives into the
            // full name but not into the web URL.
            name: "bitbucket server http",
            clone_url: "https://bitbucket.server.com/scm/TS/test-repo.git",
            api_url: "",
            source: RepositorySource::BitbucketServer,
            expected: data(
                "https://bitbucket.server.com/projects/TS/repos/test-repo",
                "TS",
                "test-repo",
                "scm/TS/test-repo",
            ),
        },
        Case {
            name: "bitbucket server ssh",
            clone_url: "ssh://git@bitbucket.server.com:7999/TS/test-repo.git",
            api_url: "",
            source: RepositorySource::BitbucketServer,
            expected: data(
                "https://bitbucket.server.com/projects/TS/repos/test-repo",
                "TS",
                "test-repo",
                "TS/test-repo",
            ),
        },
    ]);
}

#[test]
fn test_unparseable_url_fails_closed() {
    let err = parse_data_from_clone_url("hello", "", RepositorySource::Github).unwrap_err();
    assert_eq!(err.to_string(), "could not parse clone url: hello");
}
