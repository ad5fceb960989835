use std::io;

use crate::scheduler::Pid;

/// Reasons a workload description is rejected
#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    #[error("line {line}: expected `P <id> <arrival> <services>`, got {text:?}")]
    BadHeader { line: usize, text: String },

    #[error("line {line}: invalid number {value:?}")]
    BadNumber { line: usize, value: String },

    #[error("line {line}: unknown service code {code:?}")]
    UnknownService { line: usize, code: String },

    #[error("line {line}: service {code} needs a duration")]
    MissingDuration { line: usize, code: char },

    #[error("process {pid}: expected {expected} services, found {found}")]
    MissingServices { pid: Pid, expected: usize, found: usize },

    #[error("process {0} has no services")]
    EmptyServices(Pid),

    #[error("duplicate process id {0}")]
    DuplicatePid(Pid),
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
