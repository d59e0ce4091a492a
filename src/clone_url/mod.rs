//! Clone-URL parsing and SCM-link reconstruction.
//!
//! Takes a raw git remote URL (HTTP or SSH form, possibly with embedded
//! credentials, possibly with nested subgroups, possibly a self-hosted server
//! with a URL prefix) and decomposes it into base host, organization,
//! subgroup path, and repository name, then reconstructs the canonical web
//! URL for that repository on the detected platform.
//!
//! Supported URL forms:
//! - HTTPS: `https://[user[:pass]@]host[:port]/path...[.git]`
//! - SSH shorthand: `git@host:path...[.git]`
//! - SSH URI: `ssh://[user@]host[:port]/path...[.git]`

mod credentials;
mod dialect;
mod extract;
mod scm_id;
mod scm_link;
mod segment;
mod walk;

pub use credentials::strip_credentials_from_url;
pub use dialect::{is_ssh_clone_url, UrlGrammar};
pub use extract::{extract_location, ParsedLocation};
pub use scm_id::generate_scm_id;
pub use scm_link::build_scm_link;
pub use segment::{segment_path, PathSegments};
pub use walk::parse_git_url;

use crate::source::RepositorySource;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CloneUrlError {
    /// No grammar matched the input. Carries the original clone URL, never a
    /// normalized form, so the offending string is diagnosable as given.
    #[error("could not parse clone url: {0}")]
    Unparseable(String),
}

/// Everything derived from one clone URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneUrlData {
    /// Canonical, browser-navigable URL of the repository.
    pub repository_url: String,
    pub organization: String,
    pub repository: String,
    /// Full repository path (organization, subgroups, repository) as it
    /// appeared in the clone URL, `.git` suffix stripped.
    pub full_name: String,
}

/// Decompose `clone_url` and rebuild the canonical repository web URL.
///
/// `api_url` is used for self-hosted servers whose API lives under the same
/// path prefix as the clone URL (e.g. `https://server.com/gitlab`); it is
/// matched before the generic grammars so the prefix survives into the base
/// URL. Fails closed: a URL no grammar matches yields an error, never a
/// partially-parsed result.
pub fn parse_data_from_clone_url(
    clone_url: &str,
    api_url: &str,
    source: RepositorySource,
) -> Result<CloneUrlData, CloneUrlError> {
    let location = extract_location(clone_url, api_url)?;
    let grammar = UrlGrammar::select(location.is_ssh_form, source);
    let segments = segment_path(&location.uri, grammar)
        .ok_or_else(|| CloneUrlError::Unparseable(clone_url.to_string()))?;
    let repository_url = build_scm_link(
        &location.base_url,
        &segments.organization,
        &segments.subgroups,
        &segments.repository,
        location.is_ssh_form,
        source,
    );
    Ok(CloneUrlData {
        repository_url,
        organization: segments.organization,
        repository: segments.repository,
        full_name: segments.full_name,
    })
}

#[cfg(test)]
#[path = "parse_tests_1.rs"]
mod parse_tests_1;
#[cfg(test)]
#[path = "parse_tests_2.rs"]
mod parse_tests_2;
