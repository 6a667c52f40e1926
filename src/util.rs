//! Shared utilities for the promptcraft codebase

use std::fmt;

/// A string wrapper that masks its contents in Debug/Display output.
/// Keeps access tokens and anon keys out of logs.
#[derive(Clone, Default)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Intentionally access the raw secret value (for headers)
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<&str> for SecretString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Returns the value only if it carries visible text.
pub fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Join tag values with ", ", skipping blank entries.
/// Returns None when nothing is left to join.
pub fn join_tags(tags: &[String]) -> Option<String> {
    let kept: Vec<&str> = tags.iter().filter_map(|t| non_blank(t)).collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join(", "))
    }
}
