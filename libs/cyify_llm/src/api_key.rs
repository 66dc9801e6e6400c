//! API key wrapper that keeps the secret out of logs and serialized output.

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    inner: String,
}

impl ApiKey {
    pub fn new(key: String) -> Self {
        Self { inner: key }
    }

    /// Builds a key from user or environment input, treating blank input as
    /// no key at all. Surrounding whitespace is dropped.
    pub fn from_input(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::new(trimmed.to_string()))
        }
    }

    /// The actual key value. Only call this when handing the key to the
    /// transport.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl serde::Serialize for ApiKey {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(
            "ApiKey cannot be serialized - use as_str() explicitly",
        ))
    }
}
