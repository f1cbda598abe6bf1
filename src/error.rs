//! Error types for wxo-import

#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wxo-import
#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Step execution errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Step {step} ({description}) failed with exit code {exit_code}")]
    StepFailed {
        step: usize,
        description: String,
        exit_code: i32,
    },

    #[error("Missing input file: {}", .0.display())]
    Preflight(PathBuf),
}

/// Result type alias using ImporterError
pub type Result<T> = std::result::Result<T, ImporterError>;
