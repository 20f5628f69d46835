//! Generator configuration.
//!
//! Everything that shapes a document apart from the endpoints themselves:
//! document metadata, the definition identity policy, media-type defaults,
//! and the output format. Loadable from YAML or JSON.
//!
//! ```rust
//! use apidoc::{GeneratorConfig, MediaTypeMerge, OutputFormat, TypeIdentity};
//!
//! let config = GeneratorConfig::from_yaml_str(
//!     r#"
//! info:
//!   title: Shop API
//!   version: 2.1.0
//! base_path: /v2
//! identity: qualified
//! format: yaml
//! media_types:
//!   merge: replace
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.info.title, "Shop API");
//! assert_eq!(config.identity, TypeIdentity::Qualified);
//! assert_eq!(config.format, OutputFormat::Yaml);
//! assert_eq!(config.media_types.merge, MediaTypeMerge::Replace);
//! assert_eq!(config.media_types.consumes, vec!["application/json"]);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use strum::{Display, EnumString};
use tracing::debug;

use crate::definitions::TypeIdentity;
use crate::document::{Info, Scheme, SecurityScheme};
use crate::error::ConfigError;

/// Output format for the generated document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Pretty-printed JSON with two-space indentation.
    #[default]
    Json,
    /// YAML output format.
    Yaml,
}

/// How endpoint media-type overrides combine with the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaTypeMerge {
    /// Overrides are appended after the defaults; duplicates are kept.
    #[default]
    Append,
    /// A non-empty override list replaces the defaults.
    Replace,
}

impl MediaTypeMerge {
    /// Combines `defaults` with an endpoint's `overrides`.
    pub fn merge(&self, defaults: &[String], overrides: &[String]) -> Vec<String> {
        match self {
            Self::Replace if !overrides.is_empty() => overrides.to_vec(),
            _ => defaults.iter().chain(overrides).cloned().collect(),
        }
    }
}

/// Default `consumes`/`produces` lists and the merge policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaTypes {
    pub merge: MediaTypeMerge,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
}

impl Default for MediaTypes {
    fn default() -> Self {
        Self {
            merge: MediaTypeMerge::Append,
            consumes: vec!["application/json".to_string()],
            produces: vec!["application/json".to_string(), "application/xml".to_string()],
        }
    }
}

/// Settings for a [`SwaggerGenerator`](crate::SwaggerGenerator).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    pub schemes: Vec<Scheme>,
    pub identity: TypeIdentity,
    pub media_types: MediaTypes,
    pub format: OutputFormat,
    pub security_definitions: BTreeMap<String, SecurityScheme>,
}

impl GeneratorConfig {
    /// A configuration with the given document metadata and defaults elsewhere.
    pub fn new(info: Info) -> Self {
        Self {
            info,
            ..Self::default()
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a configuration file, choosing the parser by extension
    /// (`json`, `yaml`, or `yml`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if !matches!(extension.as_str(), "json" | "yaml" | "yml") {
            return Err(ConfigError::UnsupportedExtension(extension));
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded generator config");

        match extension.as_str() {
            "json" => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.schemes.push(scheme);
        self
    }

    pub fn with_identity(mut self, identity: TypeIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_media_type_merge(mut self, merge: MediaTypeMerge) -> Self {
        self.media_types.merge = merge;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Adds an entry to `securityDefinitions`.
    pub fn with_security_definition(
        mut self,
        name: impl Into<String>,
        scheme: SecurityScheme,
    ) -> Self {
        self.security_definitions.insert(name.into(), scheme);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ApiKeyLocation, SecurityKind};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_append_keeps_defaults_first_and_duplicates() {
        let merged = MediaTypeMerge::Append.merge(
            &strings(&["application/json"]),
            &strings(&["application/json", "text/plain"]),
        );
        assert_eq!(merged, strings(&["application/json", "application/json", "text/plain"]));
    }

    #[test]
    fn test_replace_uses_overrides_only_when_present() {
        let defaults = strings(&["application/json"]);
        assert_eq!(
            MediaTypeMerge::Replace.merge(&defaults, &strings(&["text/csv"])),
            strings(&["text/csv"])
        );
        assert_eq!(MediaTypeMerge::Replace.merge(&defaults, &[]), defaults);
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.info.title, "API");
        assert_eq!(config.identity, TypeIdentity::Name);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(
            config.media_types.produces,
            strings(&["application/json", "application/xml"])
        );
    }

    #[test]
    fn test_json_config_with_security_definitions() {
        let config = GeneratorConfig::from_json_str(
            r#"{
                "info": {"title": "Pets", "version": "1.0.0", "termsOfService": "https://example.com/tos"},
                "host": "pets.example.com",
                "schemes": ["https"],
                "security_definitions": {
                    "key": {"type": "apiKey", "name": "X-Key", "in": "header"}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.host.as_deref(), Some("pets.example.com"));
        assert_eq!(config.schemes, vec![Scheme::Https]);
        assert_eq!(
            config.info.terms_of_service.as_deref(),
            Some("https://example.com/tos")
        );
        assert_eq!(
            config.security_definitions["key"].kind,
            SecurityKind::ApiKey {
                name: "X-Key".to_string(),
                location: ApiKeyLocation::Header
            }
        );
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let err = GeneratorConfig::from_yaml_str("identity: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_unknown_identity_is_rejected() {
        let err = GeneratorConfig::from_json_str(r#"{"identity": "hash"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = GeneratorConfig::from_file("apidoc.toml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedExtension(ref ext) if ext == "toml"));
    }

    #[test]
    fn test_output_format_parses_case_insensitively() {
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
