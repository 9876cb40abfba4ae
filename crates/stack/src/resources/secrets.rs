// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ghr_core::Tag;
use serde::Serialize;

/// Placeholder generation settings; the real value is stored out of band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateSecretString {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecretProps {
    pub name: String,
    pub generate_secret_string: GenerateSecretString,
    pub tags: Vec<Tag>,
}

impl SecretProps {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), generate_secret_string: GenerateSecretString {}, tags: Vec::new() }
    }
}
