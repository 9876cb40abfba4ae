// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Context assembly
//!
//! The context is built in layers, later layers replacing earlier ones key by
//! key at the top level:
//!
//! 1. user defaults (`~/.ghr.json`), if present
//! 2. the project context file (`ghr.json`, `.toml` or `.hcl`)
//! 3. `-c key=value` pairs from the command line
//!
//! A JSON, TOML or HCL document whose top level holds a `context` mapping
//! (the `cdk.json` layout) contributes that mapping; any other document is
//! the context itself.
//!
//! ```hcl
//! config = "prod"
//!
//! prod {
//!   App = "runner"
//!   BuildParameters {
//!     taskCount = 2
//!   }
//! }
//! ```

use crate::error::ContextError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Key under which `cdk.json`-style documents nest their context.
const NESTED_CONTEXT_KEY: &str = "context";

/// Context file format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
    Hcl,
}

ghr_core::simple_display! {
    Format {
        Json => "JSON",
        Toml => "TOML",
        Hcl => "HCL",
    }
}

pub fn format_for_path(path: &Path) -> Option<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Some(Format::Json),
        Some("toml") => Some(Format::Toml),
        Some("hcl") => Some(Format::Hcl),
        _ => None,
    }
}

/// A flat mapping of context keys to untyped values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-parsed document. Unwraps a nested `context` mapping.
    pub fn from_value(value: Value, location: &str) -> Result<Self, ContextError> {
        let Value::Object(mut values) = value else {
            return Err(ContextError::NotAMapping(location.to_string()));
        };
        if matches!(values.get(NESTED_CONTEXT_KEY), Some(Value::Object(_))) {
            if let Some(Value::Object(nested)) = values.remove(NESTED_CONTEXT_KEY) {
                return Ok(Self { values: nested });
            }
        }
        Ok(Self { values })
    }

    /// Parse a context document. `location` names the source in errors.
    pub fn parse(content: &str, format: Format, location: &str) -> Result<Self, ContextError> {
        let parse_error = |message: String| ContextError::Parse {
            location: location.to_string(),
            format,
            message,
        };
        let value: Value = match format {
            Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
            Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
            Format::Hcl => hcl::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        };
        Self::from_value(value, location)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `other` on top of this context; its keys win.
    pub fn merge(&mut self, other: Context) {
        self.values.extend(other.values);
    }
}

/// Split a `key=value` command-line pair. The value may be empty or contain `=`.
pub fn parse_pair(pair: &str) -> Result<(String, String), ContextError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ContextError::InvalidPair(pair.to_string())),
    }
}

/// Read and parse a context file. Returns `Ok(None)` when the file does not exist.
pub fn read_context_file(path: &Path) -> Result<Option<Context>, ContextError> {
    let format =
        format_for_path(path).ok_or_else(|| ContextError::UnsupportedFormat(path.to_path_buf()))?;
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ContextError::Io { path: path.to_path_buf(), source: e }),
    };
    let context = Context::parse(&content, format, &path.display().to_string())?;
    tracing::debug!(path = %path.display(), keys = context.len(), "loaded context file");
    Ok(Some(context))
}

/// Assembles a [`Context`] from its layers.
#[derive(Debug, Clone, Default)]
pub struct ContextLoader {
    user_file: Option<PathBuf>,
    project_file: Option<PathBuf>,
    pairs: Vec<String>,
}

impl ContextLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Optional user-level defaults. A missing file is skipped silently.
    pub fn user_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_file = Some(path.into());
        self
    }

    /// Project context file. A missing file is skipped with a warning.
    pub fn project_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_file = Some(path.into());
        self
    }

    /// Raw `key=value` pairs from the command line, in order.
    pub fn pairs(mut self, pairs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.pairs = pairs.into_iter().map(Into::into).collect();
        self
    }

    pub fn load(&self) -> Result<Context, ContextError> {
        let mut context = Context::new();

        if let Some(ref path) = self.user_file {
            if let Some(user) = read_context_file(path)? {
                context.merge(user);
            }
        }

        if let Some(ref path) = self.project_file {
            match read_context_file(path)? {
                Some(project) => context.merge(project),
                None => tracing::warn!(
                    path = %path.display(),
                    "context file not found; using command-line context only"
                ),
            }
        }

        for pair in &self.pairs {
            let (key, value) = parse_pair(pair)?;
            context.set(key, Value::String(value));
        }

        Ok(context)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
