//! Run configuration: built-in jobs, the optional YAML job file, and how
//! command-line values combine with it.
//!
//! Precedence, highest first: command line (or its environment variable),
//! job file, built-in default.

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::models::{Job, JobFile, validate_topic};
use std::fs;
use tracing::{info, instrument};

/// Result cap used when neither the command line nor a job file sets one.
pub const DEFAULT_MAX_RESULTS: usize = 15000;

/// The standard daily jobs, used when no job file is given.
pub fn builtin_jobs() -> Vec<Job> {
    vec![
        Job::new(r#"all:LLM+AND+all:"reinforcement%20learning""#, "LLM-RL"),
        Job::new("all:LLM+AND+all:planning", "LLM-planning"),
        Job::new("all:LLM+AND+all:agent", "LLM-agent"),
    ]
}

/// Read and parse a YAML job file.
#[instrument(level = "info")]
pub fn load_job_file(path: &str) -> Result<JobFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    let file: JobFile = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
        path: path.to_string(),
        source,
    })?;
    if file.jobs.is_empty() {
        return Err(ConfigError::NoJobs(path.to_string()));
    }
    info!(jobs = file.jobs.len(), "Loaded job file");
    Ok(file)
}

/// Everything a run needs, resolved from the command line and job file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub output_dir: String,
    pub endpoint: String,
    pub max_results: usize,
    /// `Some(n)` restricts every job to papers submitted `n` days ago.
    pub day_offset: Option<u32>,
    pub jobs: Vec<Job>,
}

impl RunConfig {
    /// Combine command-line arguments with the job file they point at, if any.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = cli.config.as_deref().map(load_job_file).transpose()?;
        Self::resolve(cli, file)
    }

    fn resolve(cli: &Cli, file: Option<JobFile>) -> Result<Self, ConfigError> {
        let (jobs, file_max, file_offset) = match file {
            Some(f) => (f.jobs, f.max_results, f.day_offset),
            None => (builtin_jobs(), None, None),
        };
        for job in &jobs {
            validate_topic(&job.topic)?;
        }
        Ok(Self {
            output_dir: cli.output_dir.clone(),
            endpoint: cli.endpoint.clone(),
            max_results: cli.max_results.or(file_max).unwrap_or(DEFAULT_MAX_RESULTS),
            day_offset: cli.day_offset.or(file_offset),
            jobs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_use_builtin_jobs() {
        let cli = Cli::parse_from(["arxiv_digest"]);
        let config = RunConfig::from_cli(&cli).unwrap();
        assert_eq!(config.output_dir, "docs");
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(config.day_offset, None);
        let topics: Vec<&str> = config.jobs.iter().map(|j| j.topic.as_str()).collect();
        assert_eq!(topics, vec!["LLM-RL", "LLM-planning", "LLM-agent"]);
    }

    #[test]
    fn test_job_file_values_apply() {
        let yaml = write_yaml("max_results: 25\nday_offset: 1\njobs:\n  - topic: GNN\n    query: all:graph\n");
        let path = yaml.path().to_str().unwrap();
        let cli = Cli::parse_from(["arxiv_digest", "-c", path]);
        let config = RunConfig::from_cli(&cli).unwrap();
        assert_eq!(config.max_results, 25);
        assert_eq!(config.day_offset, Some(1));
        assert_eq!(config.jobs, vec![Job::new("all:graph", "GNN")]);
    }

    #[test]
    fn test_cli_overrides_job_file() {
        let yaml = write_yaml("max_results: 25\nday_offset: 1\njobs:\n  - topic: GNN\n    query: all:graph\n");
        let path = yaml.path().to_str().unwrap();
        let cli = Cli::parse_from(["arxiv_digest", "-c", path, "-n", "5", "-d", "0"]);
        let config = RunConfig::from_cli(&cli).unwrap();
        assert_eq!(config.max_results, 5);
        assert_eq!(config.day_offset, Some(0));
    }

    #[test]
    fn test_missing_job_file() {
        let err = load_job_file("/definitely/not/here/jobs.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let yaml = write_yaml("jobs: [unterminated");
        let err = load_job_file(yaml.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn test_empty_job_list() {
        let yaml = write_yaml("jobs: []\n");
        let err = load_job_file(yaml.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::NoJobs(_)));
    }

    #[test]
    fn test_invalid_topic_rejected() {
        let yaml = write_yaml("jobs:\n  - topic: ../escape\n    query: all:x\n");
        let path = yaml.path().to_str().unwrap();
        let cli = Cli::parse_from(["arxiv_digest", "-c", path]);
        let err = RunConfig::from_cli(&cli).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTopic(t) if t == "../escape"));
    }
}
