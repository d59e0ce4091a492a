//! The fallback environment when no CI platform is detected.

use super::{Environment, EnvironmentError};
use crate::models::{BuildRun, Configuration, Entity, Pipeline, Repository, Runner};
use crate::source::RepositorySource;

const LOCALHOST: &str = "localhost";

#[derive(Debug)]
pub(super) struct LocalhostEnvironment;

impl Environment for LocalhostEnvironment {
    fn configuration(&self) -> Result<Configuration, EnvironmentError> {
        Ok(Configuration {
            url: LOCALHOST.to_string(),
            repository: Repository {
                id: LOCALHOST.to_string(),
                name: LOCALHOST.to_string(),
                url: LOCALHOST.to_string(),
                source: RepositorySource::Localhost,
                ..Repository::default()
            },
            pipeline: Pipeline {
                id: LOCALHOST.to_string(),
                name: LOCALHOST.to_string(),
                ..Pipeline::default()
            },
            job: Entity {
                id: LOCALHOST.to_string(),
                name: LOCALHOST.to_string(),
            },
            run: BuildRun {
                build_id: LOCALHOST.to_string(),
                build_number: LOCALHOST.to_string(),
            },
            runner: Runner {
                id: LOCALHOST.to_string(),
                name: LOCALHOST.to_string(),
                os: LOCALHOST.to_string(),
                ..Runner::default()
            },
            environment: RepositorySource::Localhost,
            scm_id: LOCALHOST.to_string(),
            ..Configuration::default()
        })
    }

    fn build_link(&self) -> String {
        LOCALHOST.to_string()
    }

    fn step_link(&self) -> String {
        LOCALHOST.to_string()
    }

    fn file_link(&self, _filename: &str, _branch: &str, _commit: &str) -> String {
        LOCALHOST.to_string()
    }

    fn file_line_link(
        &self,
        _filename: &str,
        _branch: &str,
        _commit: &str,
        _start_line: u32,
        _end_line: u32,
    ) -> String {
        LOCALHOST.to_string()
    }

    fn name(&self) -> &'static str {
        "localhost"
    }

    // Localhost is the explicit fallback, never a detected match.
    fn is_current_environment(&self) -> bool {
        false
    }
}
