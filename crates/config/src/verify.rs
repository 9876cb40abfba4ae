// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Field verifiers for untyped context records.
//!
//! Each verifier returns the typed value or the first [`ConfigError`] for the
//! field. Absent and `null` fields are "missing"; present fields of another
//! JSON type are a type error, however truthy they look.

use crate::error::ConfigError;
use serde_json::{Map, Value};

/// A context record together with its dotted path, for error messages.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    path: Option<&'a str>,
    fields: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    /// A top-level record; field errors name the bare key.
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { path: None, fields }
    }

    /// A nested record; field errors name `path.key`.
    pub fn nested(path: &'a str, fields: &'a Map<String, Value>) -> Self {
        Self { path: Some(path), fields }
    }

    /// Present, non-null value for `key`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Dotted field name used in errors.
    pub fn field_name(&self, key: &str) -> String {
        match self.path {
            Some(path) => format!("{path}.{key}"),
            None => key.to_string(),
        }
    }

    fn missing(&self, key: &str) -> ConfigError {
        ConfigError::MissingOrEmpty { field: self.field_name(key) }
    }

    fn wrong_type(&self, key: &str, expected: &'static str) -> ConfigError {
        ConfigError::WrongType { field: self.field_name(key), expected }
    }
}

/// Trimmed string value; empty or all-whitespace strings count as missing.
pub fn verify_string(record: &Record<'_>, key: &str) -> Result<String, ConfigError> {
    match record.get(key) {
        None => Err(record.missing(key)),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(record.missing(key))
            } else {
                Ok(trimmed.to_string())
            }
        }
        Some(_) => Err(record.wrong_type(key, "a string")),
    }
}

/// Non-empty list of non-empty strings, each trimmed.
///
/// A bad element is reported as `key[index]`.
pub fn verify_array(record: &Record<'_>, key: &str) -> Result<Vec<String>, ConfigError> {
    let items = match record.get(key) {
        None => return Err(record.missing(key)),
        Some(Value::Array(items)) if items.is_empty() => return Err(record.missing(key)),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(record.wrong_type(key, "a list of strings")),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let element = format!("{key}[{index}]");
            match item {
                Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
                Value::String(_) | Value::Null => Err(record.missing(&element)),
                _ => Err(record.wrong_type(&element, "a string")),
            }
        })
        .collect()
}

/// Boolean value; only JSON `true`/`false` are accepted.
pub fn verify_bool(record: &Record<'_>, key: &str) -> Result<bool, ConfigError> {
    match record.get(key) {
        None => Err(record.missing(key)),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(record.wrong_type(key, "a boolean")),
    }
}

/// Numeric value; numeric-looking strings are rejected.
pub fn verify_number(record: &Record<'_>, key: &str) -> Result<f64, ConfigError> {
    match record.get(key) {
        None => Err(record.missing(key)),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| record.wrong_type(key, "a number")),
        Some(_) => Err(record.wrong_type(key, "a number")),
    }
}

/// A number that is also a whole, non-negative count (`3` or `3.0`).
pub fn verify_count(record: &Record<'_>, key: &str) -> Result<u32, ConfigError> {
    let value = verify_number(record, key)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(record.wrong_type(key, "a non-negative whole number"));
    }
    Ok(value as u32)
}

/// Nested mapping under `key`; its own field errors are prefixed with `key`.
pub fn verify_record<'a>(record: &Record<'a>, key: &'a str) -> Result<Record<'a>, ConfigError> {
    match record.get(key) {
        None => Err(record.missing(key)),
        Some(Value::Object(fields)) if fields.is_empty() => Err(record.missing(key)),
        Some(Value::Object(fields)) => Ok(Record::nested(key, fields)),
        Some(_) => Err(record.wrong_type(key, "a mapping")),
    }
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
