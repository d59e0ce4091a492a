//! CI/CD environment detection and normalization.
//!
//! This crate detects which CI/CD platform (GitHub Actions, GitLab CI, Azure
//! Pipelines, Bitbucket Pipelines, Jenkins, CircleCI, or none) a process is
//! running under and normalizes that platform's environment variables and
//! repository metadata into one [`Configuration`] record.
//!
//! At its core sits a clone-URL engine ([`clone_url`]) that decomposes a git
//! remote URL (HTTPS or SSH form, possibly credentialed, possibly with nested
//! subgroups or a self-hosted path prefix) into its parts and reconstructs
//! the canonical web URL of the repository on the detected platform.

pub mod clone_url;
pub mod environments;
pub mod git;
pub mod links;
pub mod models;
pub mod source;

pub use clone_url::{
    generate_scm_id, parse_data_from_clone_url, parse_git_url, strip_credentials_from_url,
    CloneUrlData, CloneUrlError,
};
pub use environments::{
    detect_environment, get_environment, get_or_detect_environment, Environment, EnvironmentError,
};
pub use models::Configuration;
pub use source::RepositorySource;
