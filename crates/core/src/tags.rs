// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ownership tags applied to every taggable resource in a stack.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single `{ "Key": ..., "Value": ... }` tag as CloudFormation writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Ordered set of tags keyed by tag key. Later inserts replace earlier ones.
///
/// Serializes as a plain `{ key: value }` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(IndexMap<String, String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge this set into a resource's tag list.
    ///
    /// Keys already on the resource are overwritten; the result is sorted by
    /// key so synthesized output is stable.
    pub fn apply_to(&self, tags: &mut Vec<Tag>) {
        for (key, value) in &self.0 {
            match tags.iter_mut().find(|t| &t.key == key) {
                Some(existing) => existing.value = value.clone(),
                None => tags.push(Tag::new(key.clone(), value.clone())),
            }
        }
        tags.sort_by(|a, b| a.key.cmp(&b.key));
    }
}

#[cfg(test)]
#[path = "tags_tests.rs"]
mod tests;
