use anyhow::{bail, Result};
use std::env;

#[cfg(feature = "colors")]
use owo_colors::{AnsiColors, OwoColorize};

use crate::models::input::DEFAULT_MODEL_NAME;
use crate::models::{BranchState, Severity, UsageSnapshot};
use crate::utils::format_tokens;

pub const DEFAULT_BAR_WIDTH: usize = 15;
pub const SEPARATOR: &str = " | ";
pub const BAR_FILLED: char = '#';
pub const BAR_EMPTY: char = '-';
/// Longest run of bar glyphs we are willing to allocate.
pub const MAX_BAR_CELLS: i64 = 1 << 16;
/// Powerline branch glyph.
pub const BRANCH_GLYPH: char = '\u{e0a0}';

/// Fixed set of colors used on the statusline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Cyan,
    Green,
    Yellow,
    Red,
    BrightRed,
    Dim,
    Blue,
    Magenta,
}

#[cfg(feature = "colors")]
impl Palette {
    fn ansi(self) -> AnsiColors {
        match self {
            Palette::Cyan => AnsiColors::Cyan,
            Palette::Green => AnsiColors::Green,
            Palette::Yellow => AnsiColors::Yellow,
            Palette::Red => AnsiColors::Red,
            Palette::BrightRed => AnsiColors::BrightRed,
            Palette::Dim => AnsiColors::BrightBlack,
            Palette::Blue => AnsiColors::Blue,
            Palette::Magenta => AnsiColors::Magenta,
        }
    }
}

pub fn severity_color(severity: Severity) -> Palette {
    match severity {
        Severity::Normal => Palette::Green,
        Severity::Elevated => Palette::Yellow,
        Severity::High => Palette::Red,
        Severity::Critical => Palette::BrightRed,
    }
}

/// Wraps each fragment in its own color/reset pair, or leaves it plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn ansi() -> Self {
        Self { enabled: true }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Respect NO_COLOR if set.
    pub fn from_env() -> Self {
        Self {
            enabled: env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn paint(&self, text: &str, color: Palette) -> String {
        if !self.enabled {
            return text.to_string();
        }
        paint_ansi(text, color)
    }
}

#[cfg(feature = "colors")]
fn paint_ansi(text: &str, color: Palette) -> String {
    text.color(color.ansi()).to_string()
}

#[cfg(not(feature = "colors"))]
fn paint_ansi(text: &str, _color: Palette) -> String {
    text.to_string()
}

/// Filled and empty cell counts for a bar of `width` cells.
///
/// Neither is clamped: above 100% `filled` exceeds `width` and `empty` is
/// negative; below 0% the reverse.
pub fn bar_cells(pct: f64, width: usize) -> (i64, i64) {
    let width = width as i64;
    let filled = ((pct / 100.0) * width as f64) as i64;
    (filled, width.saturating_sub(filled))
}

/// Negative counts render as nothing; runs past [`MAX_BAR_CELLS`] are an error.
fn repeat_cells(glyph: char, count: i64) -> Result<String> {
    if count > MAX_BAR_CELLS {
        bail!("progress bar too long ({count} cells)");
    }
    Ok(glyph.to_string().repeat(count.max(0) as usize))
}

/// `[###----]` with the filled run colored by severity and the rest dimmed.
pub fn render_bar(
    painter: &Painter,
    pct: f64,
    width: usize,
    severity: Severity,
) -> Result<String> {
    let (filled, empty) = bar_cells(pct, width);
    Ok(format!(
        "[{}{}]",
        painter.paint(&repeat_cells(BAR_FILLED, filled)?, severity_color(severity)),
        painter.paint(&repeat_cells(BAR_EMPTY, empty)?, Palette::Dim),
    ))
}

/// Build the statusline fragments in display order.
pub fn status_fragments(
    painter: &Painter,
    model_name: &str,
    usage: &UsageSnapshot,
    branch: &BranchState,
    bar_width: usize,
) -> Result<Vec<String>> {
    let pct_color = severity_color(usage.severity);
    let mut parts = vec![
        painter.paint(&format!("[{model_name}]"), Palette::Cyan),
        format!(
            "{} {}",
            painter.paint("#", Palette::Magenta),
            render_bar(painter, usage.used_percentage, bar_width, usage.severity)?
        ),
        format!(
            "{} used",
            painter.paint(&format!("{:.1}%", usage.used_percentage), pct_color)
        ),
        painter.paint(
            &format!("~{} left", format_tokens(Some(usage.remaining_tokens))),
            Palette::Blue,
        ),
    ];
    if let Some(label) = branch.label() {
        parts.push(painter.paint(&format!("{BRANCH_GLYPH} {label}"), Palette::Dim));
    }
    Ok(parts)
}

pub fn compose_line(
    painter: &Painter,
    model_name: &str,
    usage: &UsageSnapshot,
    branch: &BranchState,
    bar_width: usize,
) -> Result<String> {
    Ok(status_fragments(painter, model_name, usage, branch, bar_width)?.join(SEPARATOR))
}

/// Fallback line used whenever the statusline cannot be built.
pub fn error_line(painter: &Painter, message: &str) -> String {
    painter.paint(
        &format!("[{DEFAULT_MODEL_NAME}] # Error: {message}"),
        Palette::Red,
    )
}

pub fn build_json_output(
    model_name: &str,
    usage: &UsageSnapshot,
    branch: &BranchState,
) -> serde_json::Value {
    serde_json::json!({
        "model": model_name,
        "used_percentage": usage.used_percentage,
        "remaining_tokens": usage.remaining_tokens,
        "remaining_display": format_tokens(Some(usage.remaining_tokens)),
        "severity": usage.severity,
        "branch": branch.label(),
    })
}

pub fn build_json_error(message: &str) -> serde_json::Value {
    serde_json::json!({
        "model": DEFAULT_MODEL_NAME,
        "error": message,
    })
}
