use serde::Serialize;

/// Usage tier shared by the bar color and the percentage color.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Elevated,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Elevated => "elevated",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// Values derived from the payload's context window fields.
///
/// `remaining_tokens` goes negative when `used_percentage` exceeds 100.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct UsageSnapshot {
    pub used_percentage: f64,
    pub remaining_tokens: i64,
    pub severity: Severity,
}
