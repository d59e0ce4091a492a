//! Splitting a clone URL into its base-URL and URI halves.

use super::dialect::is_ssh_clone_url;
use super::CloneUrlError;
use once_cell::sync::Lazy;
use regex::Regex;

static HTTP_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(https?://.+?)(/.+)").expect("http url pattern"));
static SSH_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(ssh?://.+?)(?::[0-9]+)(/.+)").expect("ssh url pattern"));
static GIT_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"git@(.+?)(:.+)").expect("git url pattern"));

/// The two halves of a clone URL.
///
/// Concatenating `base_url + uri` reproduces a normalized form of the
/// original host and path: scheme rewritten to `https`, SSH port dropped,
/// the shorthand's `:` separator turned into `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLocation {
    /// Scheme and host, plus any self-hosted path prefix shared with the API
    /// base URL (e.g. `https://server.com/gitlab`).
    pub base_url: String,
    /// Everything after the base, always starting with `/`, typically ending
    /// in `.git` (trimmed downstream).
    pub uri: String,
    pub is_ssh_form: bool,
}

/// Split `clone_url` at the host/path boundary.
///
/// The API-URL containment check runs first: provider API URLs often share no
/// literal substring with the clone host (GitHub's `api.github.com`), but on
/// self-hosted servers the API can live under the same path prefix as the
/// clone URL, and only this branch recovers that prefix into the base.
pub fn extract_location(clone_url: &str, api_url: &str) -> Result<ParsedLocation, CloneUrlError> {
    let is_ssh_form = is_ssh_clone_url(clone_url);
    if !api_url.is_empty() && clone_url.contains(api_url) {
        return Ok(ParsedLocation {
            base_url: api_url.to_string(),
            uri: clone_url.replacen(api_url, "", 1),
            is_ssh_form,
        });
    }
    if let Some(caps) = HTTP_URL.captures(clone_url) {
        return Ok(ParsedLocation {
            base_url: caps[1].to_string(),
            uri: caps[2].to_string(),
            is_ssh_form,
        });
    }
    if let Some(caps) = SSH_URL.captures(clone_url) {
        return Ok(ParsedLocation {
            base_url: caps[1].replacen("ssh", "https", 1),
            uri: caps[2].to_string(),
            is_ssh_form,
        });
    }
    if let Some(caps) = GIT_URL.captures(clone_url) {
        return Ok(ParsedLocation {
            base_url: format!("https://{}", &caps[1]),
            uri: caps[2].replacen(':', "/", 1),
            is_ssh_form,
        });
    }
    Err(CloneUrlError::Unparseable(clone_url.to_string()))
}
