//! Best-effort identification of the user who triggered the build.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

const PUSHER_ENV_VARS: &[&str] = &[
    "BITBUCKET_ACTOR",
    "GITHUB_ACTOR",
    "CODEBUILD_GIT_AUTHOR",
    "CIRCLE_USERNAME",
];

static REFLOG_AUTHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^.*<(.+?)>").expect("reflog author pattern"));

/// The username behind the current build.
///
/// Checks platform actor variables first, then the author of the newest
/// reflog entry in the working directory's checkout, then the OS username.
/// Empty when nothing identifies a user.
#[must_use]
pub fn detect_pusher() -> String {
    for var in PUSHER_ENV_VARS {
        if let Ok(value) = std::env::var(var) {
            return value;
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(author) = last_reflog_author(&cwd) {
            return author;
        }
    }

    if let Ok(username) = std::env::var("USERNAME") {
        return format!("Fallback: {username}");
    }

    String::new()
}

fn last_reflog_author(repository_path: &Path) -> Option<String> {
    let logs_head = repository_path.join(".git").join("logs").join("HEAD");
    let contents = std::fs::read_to_string(logs_head).ok()?;
    REFLOG_AUTHOR
        .captures_iter(&contents)
        .last()
        .map(|caps| caps[1].to_string())
}
