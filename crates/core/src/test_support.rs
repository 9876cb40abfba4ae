// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

/// Proptest strategies for naming inputs.
pub mod strategies {
    use proptest::prelude::*;

    /// Construct ids as users write them: mixed case, digits, separators,
    /// the odd non-ASCII letter.
    pub fn arb_construct_id() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_. é-]{0,40}"
    }

    /// Application or environment names that always yield a logical id.
    pub fn arb_name_part() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,15}"
    }
}
