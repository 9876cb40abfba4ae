// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fargate task sizes.
//!
//! CPU is accepted as CPU units (`"1024"`) or vCPU (`"1 vCPU"`), memory as
//! MiB (`"2048"`) or GB (`"2 GB"`). Only combinations Fargate offers pass.

use crate::error::StackError;

/// A validated CPU/memory pair in CPU units and MiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSize {
    pub cpu: u32,
    pub memory: u32,
}

/// Memory offered per CPU size: `(cpu, min MiB, max MiB, step MiB)`.
const MEMORY_RANGES: &[(u32, u32, u32, u32)] = &[
    (512, 1024, 4096, 1024),
    (1024, 2048, 8192, 1024),
    (2048, 4096, 16384, 1024),
    (4096, 8192, 30720, 1024),
    (8192, 16384, 61440, 4096),
    (16384, 32768, 122880, 8192),
];

/// 0.25 vCPU only pairs with these.
const QUARTER_VCPU_MEMORY: &[u32] = &[512, 1024, 2048];

impl TaskSize {
    pub fn parse(cpu: &str, memory: &str) -> Result<Self, StackError> {
        let cpu_units = parse_units(cpu, "vCPU", 1024)
            .ok_or_else(|| StackError::InvalidTaskUnit { field: "taskCpu", value: cpu.to_string() })?;
        let memory_mib = parse_units(memory, "GB", 1024)
            .ok_or_else(|| StackError::InvalidTaskUnit { field: "taskMem", value: memory.to_string() })?;
        let size = Self { cpu: cpu_units, memory: memory_mib };
        if size.is_offered() {
            Ok(size)
        } else {
            Err(StackError::InvalidTaskSize { cpu: cpu_units, memory: memory_mib })
        }
    }

    fn is_offered(&self) -> bool {
        if self.cpu == 256 {
            return QUARTER_VCPU_MEMORY.contains(&self.memory);
        }
        MEMORY_RANGES.iter().any(|&(cpu, min, max, step)| {
            cpu == self.cpu && (min..=max).contains(&self.memory) && (self.memory - min) % step == 0
        })
    }
}

/// Parse a plain integer, or `<n> <suffix>` scaled by `scale`.
fn parse_units(value: &str, suffix: &str, scale: u32) -> Option<u32> {
    let value = value.trim();
    if let Ok(plain) = value.parse::<u32>() {
        return Some(plain);
    }
    let amount = value.strip_suffix(suffix)?.trim().parse::<f64>().ok()?;
    let scaled = amount * f64::from(scale);
    if !scaled.is_finite() || scaled <= 0.0 || scaled.fract() != 0.0 || scaled > f64::from(u32::MAX) {
        return None;
    }
    Some(scaled as u32)
}

#[cfg(test)]
#[path = "fargate_tests.rs"]
mod tests;
