//! Unified error types for nptui

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nptui operations
#[derive(Error, Debug)]
pub enum Error {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // Netplan document errors
    #[error("Failed to read netplan file '{path}': {source}")]
    DocumentRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse netplan file '{path}': {source}")]
    DocumentParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize netplan document: {0}")]
    DocumentSerialize(#[from] serde_yaml::Error),

    #[error("Failed to write netplan file '{path}': {source}")]
    DocumentWrite { path: PathBuf, source: io::Error },

    // Settings errors
    #[error("Failed to read settings file '{path}': {source}")]
    SettingsRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse settings: {0}")]
    SettingsParse(#[from] toml::de::Error),

    #[error("Settings validation failed: {0}")]
    SettingsValidation(String),

    // Interface enumeration errors
    #[error("Failed to list network interfaces in '{path}': {source}")]
    Enumeration { path: PathBuf, source: io::Error },

    // Activation errors
    #[error("{message}\nOutput: {output}")]
    Apply { message: String, output: String },

    #[error("Apply command timeout after {seconds} seconds\nOutput: {output}")]
    ApplyTimeout { seconds: u64, output: String },

    // System errors
    #[error("This program must be run as root to modify network configuration")]
    NotPrivileged,

    // Session errors
    #[error("Invalid transition: {0}")]
    Transition(String),

    #[error("Interface '{0}' not found")]
    InterfaceNotFound(String),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<state_machines::DynamicError> for Error {
    fn from(err: state_machines::DynamicError) -> Self {
        Error::Transition(format!("{:?}", err))
    }
}

/// Result type alias for nptui operations
pub type Result<T> = std::result::Result<T, Error>;
