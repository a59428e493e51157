//! Post-generation reflection filter.

use crate::messages::{HELP_REMINDER, SAFE_MESSAGE};
use serde::Serialize;

/// Phrases a draft must never contain.
pub const BANNED_PHRASES: &[&str] = &[
    "you have",
    "you are diagnosed",
    "this means you are",
    "disorder",
    "mental illness",
    "medication",
    "prescription",
    "treatment plan",
    "clinical condition",
    "you suffer from",
    "antidepressant",
    "dosage",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReflectionVerdict {
    /// Draft delivered unchanged
    Passed,
    /// Draft delivered with the help-seeking reminder appended
    Augmented,
    /// Draft discarded in favour of the safe message
    Replaced,
}

impl ReflectionVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReflectionVerdict::Passed => "passed",
            ReflectionVerdict::Augmented => "augmented",
            ReflectionVerdict::Replaced => "replaced",
        }
    }
}

/// A reflected draft and how it was treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflection {
    pub verdict: ReflectionVerdict,
    pub text: String,
}

/// Check a generated draft.
///
/// A banned phrase anywhere replaces the whole draft. A draft that mentions
/// neither "professional" nor "support" gets the reminder appended.
pub fn reflect(draft: &str) -> Reflection {
    let lowered = draft.to_lowercase();

    if let Some(phrase) = BANNED_PHRASES.iter().find(|p| lowered.contains(*p)) {
        tracing::debug!(phrase = %phrase, "Draft replaced by safe message");
        return Reflection {
            verdict: ReflectionVerdict::Replaced,
            text: SAFE_MESSAGE.to_string(),
        };
    }

    if !lowered.contains("professional") && !lowered.contains("support") {
        return Reflection {
            verdict: ReflectionVerdict::Augmented,
            text: format!("{}{}", draft, HELP_REMINDER),
        };
    }

    Reflection {
        verdict: ReflectionVerdict::Passed,
        text: draft.to_string(),
    }
}
