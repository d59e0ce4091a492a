//! Deep links into repository web UIs.
//!
//! Every platform spells "this file at this ref, these lines" differently.
//! Each submodule implements one platform's format; this module dispatches
//! on the repository source.

mod azure;
mod bitbucket;
mod bitbucket_server;
mod github;
mod gitlab;

use crate::source::RepositorySource;

type FileLinkFn = fn(&str, &str, &str, &str) -> String;
type FileLineLinkFn = fn(&str, &str, &str, &str, u32, u32) -> String;

struct LinkFormat {
    file_link: FileLinkFn,
    file_line_link: FileLineLinkFn,
}

static GITHUB: LinkFormat = LinkFormat {
    file_link: github::file_link,
    file_line_link: github::file_line_link,
};
static GITLAB: LinkFormat = LinkFormat {
    file_link: gitlab::file_link,
    file_line_link: gitlab::file_line_link,
};
static AZURE: LinkFormat = LinkFormat {
    file_link: azure::file_link,
    file_line_link: azure::file_line_link,
};
static BITBUCKET: LinkFormat = LinkFormat {
    file_link: bitbucket::file_link,
    file_line_link: bitbucket::file_line_link,
};
static BITBUCKET_SERVER: LinkFormat = LinkFormat {
    file_link: bitbucket_server::file_link,
    file_line_link: bitbucket_server::file_line_link,
};

fn format_for(source: RepositorySource) -> Option<&'static LinkFormat> {
    match source {
        RepositorySource::Github | RepositorySource::GithubServer => Some(&GITHUB),
        RepositorySource::Gitlab | RepositorySource::GitlabServer => Some(&GITLAB),
        RepositorySource::Azure | RepositorySource::AzureServer => Some(&AZURE),
        RepositorySource::Bitbucket => Some(&BITBUCKET),
        RepositorySource::BitbucketServer => Some(&BITBUCKET_SERVER),
        _ => None,
    }
}

/// Link to `filename` in `repository_url` at the given ref. `None` when the
/// source has no known web UI format.
#[must_use]
pub fn file_link(
    source: RepositorySource,
    repository_url: &str,
    filename: &str,
    branch: &str,
    commit: &str,
) -> Option<String> {
    let format = format_for(source)?;
    Some((format.file_link)(repository_url, filename, branch, commit))
}

/// Like [`file_link`], with a line range appended. A `start_line` of zero
/// means no line anchor; an `end_line` of zero means a single line.
#[must_use]
pub fn file_line_link(
    source: RepositorySource,
    repository_url: &str,
    filename: &str,
    branch: &str,
    commit: &str,
    start_line: u32,
    end_line: u32,
) -> Option<String> {
    let format = format_for(source)?;
    Some((format.file_line_link)(
        repository_url,
        filename,
        branch,
        commit,
        start_line,
        end_line,
    ))
}
