// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for context loading and config validation.

use crate::context::Format;
use std::path::PathBuf;
use thiserror::Error;

/// A context record failed validation.
///
/// Loading stops at the first failure; every variant names the offending
/// field (as a dotted path) or the selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("context variable '{0}' missing; pass it as `-c {0}=<env>`")]
    MissingSelector(&'static str),

    #[error("environment '{0}' not found in context")]
    MissingEnvironment(String),

    #[error("{field} does not exist or is empty")]
    MissingOrEmpty { field: String },

    #[error("{field} must be {expected}")]
    WrongType { field: String, expected: &'static str },
}

impl ConfigError {
    /// The dotted path of the field that failed, if the error is about a field.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingOrEmpty { field } | ConfigError::WrongType { field, .. } => {
                Some(field)
            }
            ConfigError::MissingSelector(_) | ConfigError::MissingEnvironment(_) => None,
        }
    }
}

/// A context source could not be read or parsed.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {format} in {location}: {message}")]
    Parse { location: String, format: Format, message: String },

    #[error("{0}: context must be a mapping of names to values")]
    NotAMapping(String),

    #[error("invalid context pair '{0}'; expected key=value")]
    InvalidPair(String),

    #[error("unsupported context file {}; expected .json, .toml or .hcl", .0.display())]
    UnsupportedFormat(PathBuf),
}
