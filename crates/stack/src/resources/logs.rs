// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ghr_core::Tag;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogGroupProps {
    pub log_group_name: String,
    pub retention_in_days: u32,
    pub tags: Vec<Tag>,
}

impl LogGroupProps {
    pub fn new(name: impl Into<String>, retention_in_days: u32) -> Self {
        Self { log_group_name: name.into(), retention_in_days, tags: Vec::new() }
    }
}
