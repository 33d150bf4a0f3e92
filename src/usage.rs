//! # Usage Module
//!
//! Derives the context-window snapshot shown on the statusline: how much of
//! the window is used, how many tokens remain, and which severity tier the
//! usage falls into.
//!
//! Out-of-range percentages pass straight through. Above 100% the remaining
//! token count is negative and the tier stays critical.

use crate::models::{Severity, StatusInput, UsageSnapshot};

pub const ELEVATED_THRESHOLD: f64 = 50.0;
pub const HIGH_THRESHOLD: f64 = 75.0;
pub const CRITICAL_THRESHOLD: f64 = 90.0;

/// Map a used percentage onto its tier. Lower bounds are inclusive.
pub fn severity_for(pct: f64) -> Severity {
    if pct < ELEVATED_THRESHOLD {
        Severity::Normal
    } else if pct < HIGH_THRESHOLD {
        Severity::Elevated
    } else if pct < CRITICAL_THRESHOLD {
        Severity::High
    } else {
        Severity::Critical
    }
}

/// Tokens left in the window, truncated toward zero.
pub fn remaining_tokens(window_size: f64, used_pct: f64) -> i64 {
    (window_size * ((100.0 - used_pct) / 100.0)) as i64
}

pub fn calc_usage(input: &StatusInput) -> UsageSnapshot {
    let used_percentage = input.used_percentage();
    UsageSnapshot {
        used_percentage,
        remaining_tokens: remaining_tokens(input.context_window_size(), used_percentage),
        severity: severity_for(used_percentage),
    }
}
