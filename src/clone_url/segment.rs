//! Path grammars over the URI half of a clone URL.

use super::dialect::UrlGrammar;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static GENERIC_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/?(.+?)/(?:(.+/))?(.+?)(?:\.git|$)").expect("generic uri pattern"));
static SSH_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:/(?:v3|[0-9]+))?/(?P<org>.+?)/(.+/)?(?P<repo>.+?)(?:\.git|$)")
        .expect("ssh uri pattern")
});
static BITBUCKET_SERVER_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"scm/(.*?)/(.*?)(?:\.git|$)").expect("bitbucket server uri pattern"));

/// The decomposed path of a clone URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSegments {
    /// First path segment; never empty on a successful parse.
    pub organization: String,
    /// Middle segments joined with trailing slashes (`sub1/sub2/`), empty for
    /// platforms without nesting.
    pub subgroups: String,
    /// Last segment, `.git` suffix stripped; never contains `/`.
    pub repository: String,
    /// Raw matched path with the leading `/` and `.git` suffix removed.
    /// Reflects the input's structure verbatim, which matters for GitLab
    /// subgroup paths consumed by downstream API calls.
    pub full_name: String,
}

/// Apply `grammar` to `uri`. `None` when the grammar does not match.
#[must_use]
pub fn segment_path(uri: &str, grammar: UrlGrammar) -> Option<PathSegments> {
    match grammar {
        UrlGrammar::Ssh => SSH_URI.captures(uri).map(three_part_segments),
        UrlGrammar::Generic => GENERIC_URI.captures(uri).map(three_part_segments),
        UrlGrammar::BitbucketServer => {
            let caps = BITBUCKET_SERVER_URI.captures(uri)?;
            Some(PathSegments {
                organization: caps[1].to_string(),
                subgroups: String::new(),
                repository: caps[2].to_string(),
                full_name: trim_full_name(&caps[0]),
            })
        }
    }
}

fn three_part_segments(caps: Captures<'_>) -> PathSegments {
    PathSegments {
        organization: caps[1].to_string(),
        subgroups: caps.get(2).map_or_else(String::new, |m| m.as_str().to_string()),
        repository: caps[3].to_string(),
        full_name: trim_full_name(&caps[0]),
    }
}

fn trim_full_name(matched: &str) -> String {
    let trimmed = matched.strip_prefix('/').unwrap_or(matched);
    trimmed.strip_suffix(".git").unwrap_or(trimmed).to_string()
}
