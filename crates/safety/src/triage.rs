//! Crisis-keyword risk triage.

use serde::Serialize;

/// Phrases that route a query to the crisis path.
///
/// Matching is substring based, so "suicide" also catches "suicides".
pub const CRISIS_PHRASES: &[&str] = &[
    "kill myself",
    "killing myself",
    "suicide",
    "suicidal",
    "end my life",
    "ending my life",
    "take my life",
    "end it all",
    "hurt myself",
    "hurting myself",
    "harm myself",
    "self harm",
    "self-harm",
    "can't go on",
    "cannot go on",
    "want to die",
    "better off dead",
    "no reason to live",
];

/// Outcome of triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::High => "HIGH",
        }
    }
}

/// Classify a query as `High` when any crisis phrase occurs anywhere in it.
///
/// Runs of whitespace collapse to one space before matching.
pub fn classify(query_text: &str) -> RiskLevel {
    let lowered = query_text.to_lowercase().replace('\u{2019}', "'");
    let normalized = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    if CRISIS_PHRASES
        .iter()
        .any(|phrase| normalized.contains(phrase))
    {
        RiskLevel::High
    } else {
        RiskLevel::Low
    }
}
