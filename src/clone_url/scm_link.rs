//! Canonical repository web URLs, per platform.
//!
//! Azure and Bitbucket Server inject fixed path tokens (`_git`,
//! `projects`/`repos`) that never appear in the clone URL's path grammar, so
//! link construction needs source-specific insertion rules on top of the
//! segmenter's output.

use crate::source::RepositorySource;

type ScmLinkBuilder = fn(&str, &str, &str, &str, bool) -> String;

/// Build the canonical web URL of a repository on its hosting platform.
///
/// Total: an `Unknown` source still gets the generic join, so an
/// unidentified platform yields a usable link rather than none.
#[must_use]
pub fn build_scm_link(
    base_url: &str,
    organization: &str,
    subgroups: &str,
    repository: &str,
    is_ssh_form: bool,
    source: RepositorySource,
) -> String {
    builder_for(source)(base_url, organization, subgroups, repository, is_ssh_form)
}

fn builder_for(source: RepositorySource) -> ScmLinkBuilder {
    match source {
        RepositorySource::Azure => azure_scm_link,
        RepositorySource::AzureServer => azure_server_scm_link,
        RepositorySource::BitbucketServer => bitbucket_server_scm_link,
        _ => generic_scm_link,
    }
}

fn generic_scm_link(
    base_url: &str,
    organization: &str,
    subgroups: &str,
    repository: &str,
    _is_ssh_form: bool,
) -> String {
    format!("{base_url}/{organization}/{subgroups}{repository}")
}

// Azure clones over SSH as git@ssh.dev.azure.com:v3/<org>/<project>/<repo>;
// the web UI lives on the bare host with a `_git` segment before the repo.
fn azure_scm_link(
    base_url: &str,
    organization: &str,
    subgroups: &str,
    repository: &str,
    is_ssh_form: bool,
) -> String {
    if !is_ssh_form {
        return generic_scm_link(base_url, organization, subgroups, repository, is_ssh_form);
    }
    let base_url = base_url.replacen("ssh.", "", 1);
    let mut subgroups = subgroups.to_string();
    if !subgroups.ends_with("_git/") {
        subgroups.push_str("_git/");
    }
    format!("{base_url}/{organization}/{subgroups}{repository}")
}

// Self-hosted Azure SSH URLs carry the `_git` segment in the path already, so
// only the host needs fixing up.
fn azure_server_scm_link(
    base_url: &str,
    organization: &str,
    subgroups: &str,
    repository: &str,
    _is_ssh_form: bool,
) -> String {
    let base_url = base_url.replacen("ssh.", "", 1);
    format!("{base_url}/{organization}/{subgroups}{repository}")
}

fn bitbucket_server_scm_link(
    base_url: &str,
    organization: &str,
    subgroups: &str,
    repository: &str,
    is_ssh_form: bool,
) -> String {
    let base_url = if is_ssh_form {
        base_url.replacen("git@", "", 1)
    } else {
        base_url.to_string()
    };
    format!("{base_url}/projects/{organization}/{subgroups}repos/{repository}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_join() {
        assert_eq!(
            build_scm_link(
                "https://github.com",
                "argonsecurity",
                "",
                "billy-integration-tests",
                false,
                RepositorySource::Github,
            ),
            "https://github.com/argonsecurity/billy-integration-tests"
        );
        assert_eq!(
            build_scm_link(
                "https://gitlab.com",
                "test-group",
                "sub1/sub2/",
                "project",
                false,
                RepositorySource::Gitlab,
            ),
            "https://gitlab.com/test-group/sub1/sub2/project"
        );
    }

    #[test]
    fn test_unknown_source_falls_back_to_generic() {
        assert_eq!(
            build_scm_link(
                "https://git.internal",
                "org",
                "",
                "repo",
                false,
                RepositorySource::Unknown,
            ),
            "https://git.internal/org/repo"
        );
    }

    #[test]
    fn test_azure_ssh_strips_host_prefix_and_inserts_git_segment() {
        assert_eq!(
            build_scm_link(
                "https://ssh.dev.azure.com",
                "org",
                "project/",
                "repo",
                true,
                RepositorySource::Azure,
            ),
            "https://dev.azure.com/org/project/_git/repo"
        );
    }

    #[test]
    fn test_azure_https_passes_through() {
        assert_eq!(
            build_scm_link(
                "https://dev.azure.com",
                "org",
                "project/_git/",
                "repo",
                false,
                RepositorySource::Azure,
            ),
            "https://dev.azure.com/org/project/_git/repo"
        );
    }

    #[test]
    fn test_azure_server_keeps_subgroups_as_given() {
        assert_eq!(
            build_scm_link(
                "https://azure-devops.server.com",
                "org",
                "project/_git/",
                "repo",
                true,
                RepositorySource::AzureServer,
            ),
            "https://azure-devops.server.com/org/project/_git/repo"
        );
    }

    #[test]
    fn test_bitbucket_server_layout() {
        assert_eq!(
            build_scm_link(
                "https://bitbucket.server.com",
                "TS",
                "",
                "repo",
                false,
                RepositorySource::BitbucketServer,
            ),
            "https://bitbucket.server.com/projects/TS/repos/repo"
        );
    }

    #[test]
    fn test_bitbucket_server_ssh_strips_user() {
        assert_eq!(
            build_scm_link(
                "https://git@bitbucket.server.com",
                "TS",
                "",
                "repo",
                true,
                RepositorySource::BitbucketServer,
            ),
            "https://bitbucket.server.com/projects/TS/repos/repo"
        );
    }
}
