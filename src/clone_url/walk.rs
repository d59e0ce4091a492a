//! Progressive expansion of a clone URL into its ancestor web URLs.

use once_cell::sync::Lazy;
use regex::Regex;

use super::CloneUrlError;

static GIT_CLONE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(https?://|git@)(.*?(?::\d+)?)[/:](.+?)\.git").expect("invalid git url pattern")
});

/// Expand a clone URL into every ancestor URL from the host down to the
/// repository itself.
///
/// `https://github.com/org/group/repo.git` yields
/// `["https://github.com", "https://github.com/org",
/// "https://github.com/org/group", "https://github.com/org/group/repo"]`.
/// SSH shorthand (`git@host:path.git`) is rewritten to `https://`.
pub fn parse_git_url(git_url: &str) -> Result<Vec<String>, CloneUrlError> {
    let caps = GIT_CLONE_URL
        .captures(git_url)
        .ok_or_else(|| CloneUrlError::Unparseable(git_url.to_string()))?;

    let protocol = if &caps[1] == "git@" {
        "https://"
    } else {
        &caps[1]
    };
    let host = &caps[2];
    let path = &caps[3];

    let mut urls = vec![format!("{protocol}{host}")];
    for segment in path.split('/') {
        let last = &urls[urls.len() - 1];
        let next = format!("{last}/{segment}");
        urls.push(next);
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_https() {
        let urls = parse_git_url("https://github.com/org/repo.git").unwrap();
        assert_eq!(
            urls,
            vec![
                "https://github.com".to_string(),
                "https://github.com/org".to_string(),
                "https://github.com/org/repo".to_string(),
            ]
        );
    }

    #[test]
    fn test_github_ssh() {
        let urls = parse_git_url("git@github.com:org/repo.git").unwrap();
        assert_eq!(
            urls,
            vec![
                "https://github.com".to_string(),
                "https://github.com/org".to_string(),
                "https://github.com/org/repo".to_string(),
            ]
        );
    }

    #[test]
    fn test_nested_groups() {
        let urls = parse_git_url("https://gitlab.com/group/subgroup/repo.git").unwrap();
        assert_eq!(
            urls,
            vec![
                "https://gitlab.com".to_string(),
                "https://gitlab.com/group".to_string(),
                "https://gitlab.com/group/subgroup".to_string(),
                "https://gitlab.com/group/subgroup/repo".to_string(),
            ]
        );
    }

    #[test]
    fn test_port_preserved() {
        let urls = parse_git_url("https://bitbucket.server.com:7999/scm/TS/repo.git").unwrap();
        assert_eq!(
            urls,
            vec![
                "https://bitbucket.server.com:7999".to_string(),
                "https://bitbucket.server.com:7999/scm".to_string(),
                "https://bitbucket.server.com:7999/scm/TS".to_string(),
                "https://bitbucket.server.com:7999/scm/TS/repo".to_string(),
            ]
        );
    }

    #[test]
    fn test_unparseable() {
        let err = parse_git_url("hello").unwrap_err();
        assert_eq!(err.to_string(), "could not parse clone url: hello");
    }
}
