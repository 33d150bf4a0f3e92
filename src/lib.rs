//! # Context Statusline
//!
//! A single-line statusline for Claude Code that shows how much of the
//! model's context window is in use.
//!
//! ## Overview
//!
//! The host pipes a small JSON payload on stdin; one line goes to stdout:
//! - Model display name
//! - A fixed-width usage bar colored by severity
//! - Used percentage and remaining tokens
//! - The current git branch, when it can be resolved quickly
//!
//! Every failure degrades to a fallback line and the process always exits 0.
//!
//! ## Features
//!
//! - `git` (default): Branch lookup through a time-bounded `git` subprocess
//! - `colors` (default): Enables terminal color output via owo-colors
//! - `dotenv` (default): Loads a `.env` file before reading configuration

/// Command-line argument parsing and configuration
pub mod cli;

/// Bar rendering, line composition and JSON output
pub mod display;

/// Branch resolution via the git executable (feature-gated)
#[cfg(feature = "git")]
pub mod git;

/// Data models for the input payload, usage snapshot and branch state
pub mod models;

/// Time-bounded subprocess execution
#[cfg(feature = "git")]
pub mod process;

/// Context-window usage and severity tiers
pub mod usage;

/// Token formatting, stdin and environment helpers
pub mod utils;
