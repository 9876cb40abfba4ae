// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logical ids and physical resource names.
//!
//! Every resource in a runner stack is named after the application and
//! environment it belongs to. [`StackPrefix`] produces those names and
//! [`LogicalId`] turns a construct id into something CloudFormation accepts.

use serde::Serialize;
use thiserror::Error;

/// Errors from turning a construct id into a [`LogicalId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("construct id '{0}' has no alphanumeric characters")]
    Empty(String),
    #[error("construct id '{id}' is {len} characters; logical ids are limited to {max}")]
    TooLong { id: String, len: usize, max: usize },
}

/// A CloudFormation logical id: ASCII alphanumerics only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LogicalId(String);

impl LogicalId {
    pub const MAX_LEN: usize = 255;

    /// Build a logical id from a construct id, dropping every character
    /// CloudFormation rejects.
    pub fn from_construct_id(id: &str) -> Result<Self, NamingError> {
        let sanitized: String = id.chars().filter(char::is_ascii_alphanumeric).collect();
        if sanitized.is_empty() {
            return Err(NamingError::Empty(id.to_string()));
        }
        if sanitized.len() > Self::MAX_LEN {
            return Err(NamingError::TooLong {
                id: id.to_string(),
                len: sanitized.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(sanitized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogicalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogicalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for LogicalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LogicalId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LogicalId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The `{App}{Environment}` pair every resource name is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackPrefix {
    app: String,
    environment: String,
}

impl StackPrefix {
    pub fn new(app: impl Into<String>, environment: impl Into<String>) -> Self {
        Self { app: app.into(), environment: environment.into() }
    }

    /// `{App}{Environment}`, used for the stack name and most resource names.
    pub fn joined(&self) -> String {
        format!("{}{}", self.app, self.environment)
    }

    /// `{App}-{Environment}`, used for the task family and cluster name.
    pub fn hyphenated(&self) -> String {
        format!("{}-{}", self.app, self.environment)
    }

    /// Construct id for a resource: `{App}{Environment}{suffix}`.
    pub fn construct_id(&self, suffix: &str) -> String {
        format!("{}{}{}", self.app, self.environment, suffix)
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
