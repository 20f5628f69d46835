//! Error types for document generation and configuration loading.

use std::path::PathBuf;

/// Errors that can occur while generating a document.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// There were no endpoints to document.
    #[error("no endpoints to document")]
    NoEndpoints,

    /// JSON serialization failed.
    #[error("failed to serialize Swagger document to JSON: {0}")]
    JsonSerialize(#[source] serde_json::Error),

    /// YAML serialization failed.
    #[error("failed to serialize Swagger document to YAML: {0}")]
    YamlSerialize(#[source] serde_yaml::Error),
}

/// Errors that can occur while loading a [`GeneratorConfig`](crate::GeneratorConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is not one of `json`, `yaml`, or `yml`.
    #[error("unsupported config file extension: {0:?}")]
    UnsupportedExtension(String),
}
