//! Clone-URL dialect classification.

use crate::source::RepositorySource;
use once_cell::sync::Lazy;
use regex::Regex;

static SSH_IDENTIFICATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*@|ssh://").expect("ssh identification pattern"));

/// Whether a clone URL is in SSH form (a `user@` prefix or an `ssh://`
/// scheme). Total: anything else is treated as HTTPS-like.
#[must_use]
pub fn is_ssh_clone_url(clone_url: &str) -> bool {
    SSH_IDENTIFICATION.is_match(clone_url)
}

/// The path grammar applied to the URI part of a clone URL.
///
/// Selected once per parse. SSH takes priority over the source-specific
/// grammar, which takes priority over the generic one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlGrammar {
    /// Any SSH-form URL, regardless of source. Skips a leading `/v3` or
    /// `/<digits>` API-version segment (Azure).
    Ssh,
    /// Bitbucket Server HTTP clone paths: `scm/<project>/<repo>[.git]`.
    BitbucketServer,
    /// `/<org>/[<subgroups>/]<repo>[.git]` for everything else.
    Generic,
}

impl UrlGrammar {
    #[must_use]
    pub fn select(is_ssh_form: bool, source: RepositorySource) -> Self {
        if is_ssh_form {
            Self::Ssh
        } else if source == RepositorySource::BitbucketServer {
            Self::BitbucketServer
        } else {
            Self::Generic
        }
    }
}
