// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ghr-config: context loading and BuildConfig validation
//!
//! A context is a JSON object of named environment records assembled from
//! context files and `-c key=value` pairs. [`load_config`] picks the record
//! named by the `config` selector and validates it into a [`BuildConfig`].

mod build_config;
mod context;
mod error;
mod verify;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use build_config::{
    environments, load_config, selected_environment, BuildConfig, BuildParameters,
    PARAMETERS_KEY, SELECTOR_KEY,
};
#[cfg(any(test, feature = "test-support"))]
pub use build_config::{BuildConfigBuilder, BuildParametersBuilder};
pub use context::{format_for_path, parse_pair, read_context_file, Context, ContextLoader, Format};
pub use error::{ConfigError, ContextError};
pub use verify::{
    verify_array, verify_bool, verify_count, verify_number, verify_record, verify_string, Record,
};
