//! Local repository inspection via the `git` binary.
//!
//! CI runners export `GIT_DIR`/`GIT_WORK_TREE` in some configurations; both
//! are scrubbed so commands resolve against the directory we were asked
//! about, not the runner's checkout.

use std::path::Path;
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git command failed: {0}")]
    Command(String),
    #[error("git produced non-utf8 output")]
    InvalidUtf8,
    #[error("no git remotes found")]
    NoRemotes,
}

fn run_git(repository_path: &str, args: &[&str]) -> Result<String, GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repository_path)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .output()?;
    let stdout = String::from_utf8(output.stdout).map_err(|_| GitError::InvalidUtf8)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::Command(format!("{stdout}{stderr}").trim().to_string()));
    }
    Ok(stdout.trim_end_matches('\n').to_string())
}

/// The URL of the `origin` remote, or of the first remote when no `origin`
/// exists.
pub fn remote_url(repository_path: &str) -> Result<String, GitError> {
    let output = run_git(repository_path, &["remote", "-v"])?;
    let remotes: Vec<Vec<&str>> = output
        .lines()
        .map(|line| line.split_whitespace().collect())
        .filter(|fields: &Vec<&str>| fields.len() >= 2)
        .collect();
    if remotes.is_empty() {
        return Err(GitError::NoRemotes);
    }
    for remote in &remotes {
        if remote[0] == "origin" {
            return Ok(remote[1].to_string());
        }
    }
    Ok(remotes[0][1].to_string())
}

pub fn head_commit(repository_path: &str) -> Result<String, GitError> {
    run_git(repository_path, &["rev-parse", "HEAD"])
}

/// The current branch name. A detached HEAD falls back to scanning branches
/// that contain `commit`; an empty string means no branch could be resolved.
pub fn branch(repository_path: &str, commit: &str) -> Result<String, GitError> {
    let name = run_git(repository_path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    if name == "HEAD" {
        return branch_containing_commit(repository_path, commit);
    }
    Ok(name)
}

fn branch_containing_commit(repository_path: &str, commit: &str) -> Result<String, GitError> {
    let output = run_git(repository_path, &["branch", "-a", "--contains", commit])?;
    for line in output.lines() {
        // Detached references show up as "(HEAD detached at ...)".
        if line.contains("HEAD") {
            continue;
        }
        if let Some(current) = line.strip_prefix('*') {
            return Ok(current.trim().to_string());
        }
        let candidate = line.trim();
        match run_git(repository_path, &["rev-parse", candidate]) {
            Ok(head) if head == commit => return Ok(trim_branch_name(candidate)),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(branch = candidate, error = %e, "failed to resolve branch head");
            }
        }
    }
    Ok(String::new())
}

static BRANCH_HEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+/\w+/").expect("branch head pattern"));

/// Strip a `remotes/origin/` style prefix from a branch name.
#[must_use]
pub fn trim_branch_name(branch_name: &str) -> String {
    BRANCH_HEAD.replace(branch_name, "").into_owned()
}

/// Whether `path` is a directory containing a `.git` entry.
#[must_use]
pub fn is_repository(path: &str) -> bool {
    let path = Path::new(path);
    path.is_dir() && path.join(".git").exists()
}
