//! Report configuration
//!
//! Optional TOML file controlling the policy knobs of report building.
//!
//! ```toml
//! duplicate_target_names = "last_write_wins"
//!
//! [[reference_systems]]
//! system = "https://example.org/advisories"
//! url_prefix = "https://example.org/advisories/"
//! url_suffix = ".html"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cross_index::DuplicateNamePolicy;
use crate::error::{ReportError, ReportResult};
use crate::references::{CustomReferenceSystem, ReferenceLinker};

/// Settings for building a report model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Policy for targets that share a friendly name
    pub duplicate_target_names: DuplicateNamePolicy,

    /// Reference systems in addition to the built-in table
    pub reference_systems: Vec<CustomReferenceSystem>,
}

impl ReportConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> ReportResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ReportError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicateNamePolicy) -> Self {
        self.duplicate_target_names = policy;
        self
    }

    /// Reference linker honoring the configured systems
    pub fn reference_linker(&self) -> ReferenceLinker {
        ReferenceLinker::with_custom(&self.reference_systems)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Reference;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReportConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.duplicate_target_names, DuplicateNamePolicy::Reject);
    }

    #[test]
    fn test_full_config() {
        let config = ReportConfig::from_toml_str(
            r#"
            duplicate_target_names = "last_write_wins"

            [[reference_systems]]
            system = "https://example.org/advisories"
            url_prefix = "https://example.org/advisories/"
            url_suffix = ".html"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.duplicate_target_names,
            DuplicateNamePolicy::LastWriteWins
        );
        assert_eq!(config.reference_systems.len(), 1);

        let url = config
            .reference_linker()
            .url(&Reference::new("https://example.org/advisories", "A-1"));
        assert_eq!(url.as_deref(), Some("https://example.org/advisories/A-1.html"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = ReportConfig::from_toml_str("pass_threshold = 80").unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ReportConfig::load("/nonexistent/report_kit/config.toml").unwrap_err();
        assert!(matches!(err, ReportError::ConfigIo { .. }));
    }

    #[test]
    fn test_with_duplicate_policy() {
        let config = ReportConfig::default().with_duplicate_policy(DuplicateNamePolicy::LastWriteWins);
        assert_eq!(
            config.duplicate_target_names,
            DuplicateNamePolicy::LastWriteWins
        );
    }
}
