// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use ghr_config::{ConfigError, ContextError};
use ghr_stack::StackError;
use std::fmt;

/// Exit code for configuration that cannot be loaded or declared.
pub const CONFIG_ERROR: i32 = 2;

/// Exit code for every other failure.
pub const FAILURE: i32 = 1;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

/// Process exit code for an error returned by a command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(exit) = err.downcast_ref::<ExitError>() {
        return exit.code;
    }
    let is_config = err.downcast_ref::<ConfigError>().is_some()
        || err.downcast_ref::<ContextError>().is_some()
        || err.downcast_ref::<StackError>().is_some();
    if is_config {
        CONFIG_ERROR
    } else {
        FAILURE
    }
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
