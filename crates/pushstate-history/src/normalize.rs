//! URL normalization against the document root
//!
//! A pushed URL may be relative (`about`), rooted (`/about`), root-prefixed
//! (`/app/about`) or fully qualified (`https://example.com/about`). All of
//! them are decomposed by one pattern:
//!
//! ```text
//! ^
//! (?:(scheme)://(authority))?   optional scheme and host
//! ([^?#]*)                      path, including any leading slash
//! (\?[^#]*)?                    query string
//! (#!?.+)?                      hash or hash-bang trailer
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::HistoryError;
use crate::Result;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([A-Za-z][A-Za-z0-9+.\-]*)://([^/?#]*))?([^?#]*)(\?[^#]*)?(#!?.+)?")
        .expect("URL pattern is valid")
});

/// Normalizes URLs for the host history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlNormalizer {
    document_root: String,
    top_level_domain: String,
    observe_top_level_domain: bool,
}

impl UrlNormalizer {
    /// Build a normalizer from an already resolved document root.
    pub fn new(
        document_root: String,
        top_level_domain: String,
        observe_top_level_domain: bool,
    ) -> Self {
        Self {
            document_root,
            top_level_domain,
            observe_top_level_domain,
        }
    }

    pub fn document_root(&self) -> &str {
        &self.document_root
    }

    pub fn top_level_domain(&self) -> &str {
        &self.top_level_domain
    }

    pub fn observe_top_level_domain(&self) -> bool {
        self.observe_top_level_domain
    }

    /// Resolve and store a new document root.
    pub fn set_document_root(&mut self, raw: &str) -> Result<()> {
        self.document_root = resolve_document_root(
            raw,
            &self.top_level_domain,
            self.observe_top_level_domain,
        )?;
        Ok(())
    }

    pub fn set_top_level_domain(&mut self, top_level_domain: &str) -> Result<()> {
        self.top_level_domain = validate_top_level_domain(top_level_domain)?;
        Ok(())
    }

    pub fn set_observe_top_level_domain(&mut self, observe: bool) {
        self.observe_top_level_domain = observe;
    }

    /// Normalize a URL.
    ///
    /// Rooted paths are re-rooted under the document root when
    /// `include_document_root` is set; relative paths pass through. Query
    /// strings and hash trailers are kept only with `include_trailers`.
    pub fn normalize(
        &self,
        url: &str,
        include_document_root: bool,
        include_trailers: bool,
    ) -> Result<String> {
        let caps = decompose(url)?;

        if let Some(authority) = caps.get(2) {
            check_authority(
                authority.as_str(),
                &self.top_level_domain,
                self.observe_top_level_domain,
            )?;
        }

        let path = caps.get(3).map_or("", |m| m.as_str());

        let mut normalized = match self.split_root(path) {
            Some(rest) if include_document_root && self.document_root != "/" => {
                format!("{}/{}", self.document_root, rest)
            }
            Some(rest) => format!("/{}", rest),
            None if path.is_empty() => "/".to_string(),
            None => path.to_string(),
        };

        if include_trailers {
            if let Some(query) = caps.get(4) {
                normalized.push_str(query.as_str());
            }
            if let Some(hash) = caps.get(5) {
                normalized.push_str(hash.as_str());
            }
        }

        Ok(normalized)
    }

    /// Strip the document root or the leading slashes from a rooted path.
    ///
    /// Returns `None` for relative paths. The document root only matches on a
    /// segment boundary, so `/application` is not under `/app`. Every leading
    /// slash of the remainder is dropped, so the result never re-roots into a
    /// protocol-relative `//host/...` URL.
    fn split_root<'p>(&self, path: &'p str) -> Option<&'p str> {
        if self.document_root != "/" {
            if let Some(rest) = path.strip_prefix(self.document_root.as_str()) {
                if rest.is_empty() || rest.starts_with('/') {
                    return Some(rest.trim_start_matches('/'));
                }
            }
        }

        path.starts_with('/').then(|| path.trim_start_matches('/'))
    }
}

/// Resolve a raw document root into its canonical form.
///
/// Empty input and `/` resolve to `/`. Otherwise any `scheme://host` prefix
/// is checked against the top-level domain and dropped along with query and
/// hash trailers, and the remaining path is trimmed of slashes and given a
/// single leading `/`.
pub fn resolve_document_root(
    raw: &str,
    top_level_domain: &str,
    observe_top_level_domain: bool,
) -> Result<String> {
    if raw.is_empty() || raw == "/" {
        return Ok("/".to_string());
    }

    let caps = decompose(raw)?;

    if let Some(authority) = caps.get(2) {
        check_authority(authority.as_str(), top_level_domain, observe_top_level_domain)?;
    }

    let path = caps.get(3).map_or("", |m| m.as_str()).trim_matches('/');

    if path.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(format!("/{}", path))
    }
}

/// Validate a top-level domain, returning it lowercased.
pub(crate) fn validate_top_level_domain(top_level_domain: &str) -> Result<String> {
    let top_level_domain = top_level_domain.trim();
    if top_level_domain.is_empty() {
        return Err(HistoryError::InvalidConfig(
            "top level domain cannot be empty".to_string(),
        ));
    }

    url::Host::parse(top_level_domain).map_err(|e| {
        HistoryError::InvalidConfig(format!("invalid top level domain {top_level_domain}: {e}"))
    })?;

    Ok(top_level_domain.to_ascii_lowercase())
}

fn decompose(url: &str) -> Result<Captures<'_>> {
    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(HistoryError::MalformedUrl(url.escape_debug().to_string()));
    }

    URL_PATTERN
        .captures(url)
        .ok_or_else(|| HistoryError::MalformedUrl(url.to_string()))
}

fn check_authority(authority: &str, top_level_domain: &str, observe: bool) -> Result<()> {
    let host = host_of(authority);

    url::Host::parse(host)
        .map_err(|e| HistoryError::MalformedUrl(format!("invalid host {authority:?}: {e}")))?;

    if observe && !host.eq_ignore_ascii_case(top_level_domain) {
        return Err(HistoryError::DomainMismatch {
            found: host.to_string(),
            expected: top_level_domain.to_string(),
        });
    }

    Ok(())
}

/// Host portion of an authority, without user info or port
fn host_of(authority: &str) -> &str {
    let host = authority.rsplit('@').next().unwrap_or(authority);

    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    match host.rfind(':') {
        Some(idx) => &host[..idx],
        None => host,
    }
}
