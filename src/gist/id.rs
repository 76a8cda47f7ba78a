// src/gist/id.rs
// =============================================================================
// Resolving a gist id from the many ways people write a gist address.
//
// Supported formats:
//   - a1b2c3                               (bare id)
//   - a1b2c3.js                            (bare id + extension)
//   - https://gist.github.com/a1b2c3       (web page, http/https/"//")
//   - gist.github.com/octocat/a1b2c3       (no scheme, username segment)
//   - git@gist.github.com:a1b2c3.git       (SSH clone address)
//   - https://api.github.com/gists/a1b2c3  (API address)
//
// Matching ignores case; the id is always returned lowercased.
// The extension is ASCII word characters only.
// An address that fits none of these is simply "no match" (None).
// =============================================================================

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

static GIST_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:https?:)?//|git@)?(?:gist\.github\.com(?:/(?:[^/]+/)?|:)|api\.github\.com/gists/)?([0-9a-f]+)(?:\.[0-9A-Za-z_]*)?$",
    )
    .unwrap()
});

/// A gist identifier: hex characters, lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct GistId(String);

impl GistId {
    /// Wraps an id the caller (or the server) already has. The value is
    /// lowercased but not otherwise checked; use [`GistId::parse`] for
    /// free-form input.
    pub fn new(id: impl Into<String>) -> Self {
        GistId(id.into().to_lowercase())
    }

    /// Extracts the id from any supported address form.
    pub fn parse(address: &str) -> Option<Self> {
        resolve(address)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Extracts a gist id from a free-form address, or `None` if the address is
/// not one of the supported forms.
///
/// ```
/// use gistkit::resolve;
///
/// assert_eq!(resolve("https://gist.github.com/user/a1b2c3").unwrap().as_str(), "a1b2c3");
/// assert_eq!(resolve("git@gist.github.com:A1B2C3.git").unwrap().as_str(), "a1b2c3");
/// assert!(resolve("not a url").is_none());
/// ```
pub fn resolve(address: &str) -> Option<GistId> {
    GIST_ADDRESS
        .captures(address)
        .and_then(|caps| caps.get(1))
        .map(|id| GistId(id.as_str().to_lowercase()))
}

impl FromStr for GistId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s).ok_or_else(|| Error::UnrecognizedAddress {
            address: s.to_string(),
        })
    }
}

impl fmt::Display for GistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GistId {
    fn from(id: String) -> Self {
        GistId::new(id)
    }
}

impl From<GistId> for String {
    fn from(id: GistId) -> Self {
        id.0
    }
}

impl AsRef<str> for GistId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(address: &str) -> Option<String> {
        resolve(address).map(GistId::into_string)
    }

    #[test]
    fn test_scenario_addresses() {
        assert_eq!(id("https://gist.github.com/user/a1b2c3").as_deref(), Some("a1b2c3"));
        assert_eq!(id("git@gist.github.com:A1B2C3.git").as_deref(), Some("a1b2c3"));
        assert_eq!(id("not a url"), None);
    }

    #[test]
    fn test_every_form_same_id_any_case() {
        let forms = [
            "deadbeef",
            "deadbeef.txt",
            "https://gist.github.com/deadbeef",
            "http://gist.github.com/deadbeef",
            "//gist.github.com/deadbeef",
            "gist.github.com/deadbeef",
            "https://gist.github.com/octocat/deadbeef",
            "gist.github.com/octocat/deadbeef.js",
            "git@gist.github.com:deadbeef.git",
            "https://api.github.com/gists/deadbeef",
            "api.github.com/gists/deadbeef",
        ];

        for form in forms {
            assert_eq!(id(form).as_deref(), Some("deadbeef"), "lower: {form}");
            let upper = form.to_uppercase();
            assert_eq!(id(&upper).as_deref(), Some("deadbeef"), "upper: {upper}");
        }
    }

    #[test]
    fn test_trailing_dot_without_extension() {
        assert_eq!(id("abc123.").as_deref(), Some("abc123"));
    }

    #[test]
    fn test_non_ascii_extension_rejected() {
        assert_eq!(id("abc123.é"), None);
        assert_eq!(id("abc123.١٢"), None);
        assert_eq!(id("abc123.js").as_deref(), Some("abc123"));
    }

    #[test]
    fn test_non_hex_id_rejected() {
        assert_eq!(id("https://gist.github.com/user/xyz123"), None);
        assert_eq!(id("a1b2g3"), None);
        assert_eq!(id("git@gist.github.com:zz.git"), None);
    }

    #[test]
    fn test_unknown_host_rejected() {
        assert_eq!(id("https://example.com/a1b2c3"), None);
        assert_eq!(id("https://github.com/user/a1b2c3"), None);
        assert_eq!(id("ftp://gist.github.com/a1b2c3"), None);
        assert_eq!(id("git@github.com:a1b2c3.git"), None);
    }

    #[test]
    fn test_too_many_path_segments_rejected() {
        assert_eq!(id("https://gist.github.com/user/extra/a1b2c3"), None);
        assert_eq!(id(""), None);
    }

    #[test]
    fn test_from_str_and_new() {
        let parsed: GistId = "https://gist.github.com/AbC".parse().unwrap();
        assert_eq!(parsed, GistId::new("ABC"));
        assert!("nope nope".parse::<GistId>().is_err());
        assert_eq!(GistId::new("Xyz").to_string(), "xyz");
    }
}
