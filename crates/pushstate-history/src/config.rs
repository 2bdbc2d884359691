//! History configuration

use serde::{Deserialize, Serialize};

use crate::normalize::{resolve_document_root, validate_top_level_domain, UrlNormalizer};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Path prefix under which rooted URLs are pushed. Accepts a bare path
    /// (`/app`) or a full URL on the primary domain.
    pub document_root: String,
    /// Primary domain name; the host's hostname when unset
    pub top_level_domain: Option<String>,
    /// Refuse pushes whose hostname differs from the top-level domain
    pub observe_top_level_domain: bool,
    /// Log push and pop failures at warn level instead of debug
    pub dev_mode: bool,
    /// Force the push-state capability instead of asking the host
    pub support_override: Option<bool>,
}

impl HistoryConfig {
    pub fn new() -> Self {
        Self {
            document_root: "/".to_string(),
            top_level_domain: None,
            observe_top_level_domain: true,
            dev_mode: false,
            support_override: None,
        }
    }

    pub fn with_document_root(mut self, document_root: impl Into<String>) -> Self {
        self.document_root = document_root.into();
        self
    }

    pub fn with_top_level_domain(mut self, top_level_domain: impl Into<String>) -> Self {
        self.top_level_domain = Some(top_level_domain.into());
        self
    }

    pub fn with_observe_top_level_domain(mut self, observe: bool) -> Self {
        self.observe_top_level_domain = observe;
        self
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn with_support_override(mut self, support: bool) -> Self {
        self.support_override = Some(support);
        self
    }

    /// Validate the configuration and build the URL normalizer it describes.
    ///
    /// `host_name` stands in for an unset top-level domain.
    pub(crate) fn build_normalizer(&self, host_name: &str) -> Result<UrlNormalizer> {
        let top_level_domain =
            validate_top_level_domain(self.top_level_domain.as_deref().unwrap_or(host_name))?;

        let document_root = resolve_document_root(
            &self.document_root,
            &top_level_domain,
            self.observe_top_level_domain,
        )?;

        Ok(UrlNormalizer::new(
            document_root,
            top_level_domain,
            self.observe_top_level_domain,
        ))
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HistoryError;

    #[test]
    fn test_defaults() {
        let config = HistoryConfig::default();
        assert_eq!(config.document_root, "/");
        assert!(config.observe_top_level_domain);
        assert!(!config.dev_mode);
        assert!(config.support_override.is_none());

        let normalizer = config.build_normalizer("example.com").unwrap();
        assert_eq!(normalizer.document_root(), "/");
        assert_eq!(normalizer.top_level_domain(), "example.com");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: HistoryConfig =
            serde_json::from_str(r#"{"document_root": "/app/", "dev_mode": true}"#).unwrap();
        assert_eq!(config.document_root, "/app/");
        assert!(config.dev_mode);
        assert!(config.observe_top_level_domain);

        let normalizer = config.build_normalizer("example.com").unwrap();
        assert_eq!(normalizer.document_root(), "/app");
    }

    #[test]
    fn test_explicit_top_level_domain_wins() {
        let config = HistoryConfig::new()
            .with_top_level_domain("Example.org")
            .with_document_root("https://example.org/docs");
        let normalizer = config.build_normalizer("localhost").unwrap();
        assert_eq!(normalizer.top_level_domain(), "example.org");
        assert_eq!(normalizer.document_root(), "/docs");
    }

    #[test]
    fn test_invalid_configurations() {
        let config = HistoryConfig::new().with_top_level_domain("not a domain");
        assert!(matches!(
            config.build_normalizer("example.com"),
            Err(HistoryError::InvalidConfig(_))
        ));

        let config = HistoryConfig::new().with_document_root("https://other.org/app");
        assert!(matches!(
            config.build_normalizer("example.com"),
            Err(HistoryError::DomainMismatch { .. })
        ));

        let config = HistoryConfig::new()
            .with_document_root("https://other.org/app")
            .with_observe_top_level_domain(false);
        assert_eq!(
            config.build_normalizer("example.com").unwrap().document_root(),
            "/app"
        );
    }
}
