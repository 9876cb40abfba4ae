// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ghr-core: shared primitives for the ghr runner stack tool

pub mod macros;

pub mod clock;
pub mod naming;
pub mod tags;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use naming::{LogicalId, NamingError, StackPrefix};
pub use tags::{Tag, TagSet};
