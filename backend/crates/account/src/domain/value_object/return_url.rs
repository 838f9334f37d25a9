//! Return URL Value Object
//!
//! A post-login/post-logout redirect target. Only same-origin relative paths
//! are accepted, which is what keeps logout from being an open redirect.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnUrl(String);

impl ReturnUrl {
    /// Accepts `/path` and `~/path`; rejects absolute URLs, `//host` and `/\host`
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.chars().any(|c| c.is_control()) {
            return None;
        }

        let path = match raw.strip_prefix('~') {
            Some(rest) => rest,
            None => raw,
        };

        let mut chars = path.chars();
        if chars.next() != Some('/') {
            return None;
        }

        match chars.next() {
            Some('/') | Some('\\') => None,
            _ => Some(Self(path.to_string())),
        }
    }

    /// Convenience for optional query/form values
    pub fn parse_opt(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::parse)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReturnUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
