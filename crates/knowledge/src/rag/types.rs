//! Pipeline request and response types.

use navigator_safety::ReflectionVerdict;
use serde::{Deserialize, Serialize};

/// Reader the instruction is written for.
///
/// Unknown values parse as `Adult`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AgeGroup {
    Teen,
    #[default]
    Adult,
}

impl AgeGroup {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "teen" => AgeGroup::Teen,
            _ => AgeGroup::Adult,
        }
    }

    /// Audience line of the instruction payload.
    pub fn audience(&self) -> &'static str {
        match self {
            AgeGroup::Teen => "a teenager (roughly 13 to 17 years old), in simple and gentle language",
            AgeGroup::Adult => "an adult",
        }
    }
}

impl From<String> for AgeGroup {
    fn from(value: String) -> Self {
        AgeGroup::parse(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Safe,
    Crisis,
}

/// Final structured result delivered to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeResponse {
    pub status: ResponseStatus,
    pub summary: String,
    pub focus_areas: Vec<String>,
    pub plan_today: Vec<String>,
    pub plan_week: Vec<String>,
}

impl SafeResponse {
    /// Crisis result: the fixed message and empty lists.
    pub fn crisis() -> Self {
        Self {
            status: ResponseStatus::Crisis,
            summary: navigator_safety::CRISIS_MESSAGE.to_string(),
            focus_areas: Vec::new(),
            plan_today: Vec::new(),
            plan_week: Vec::new(),
        }
    }
}

/// Where a summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryOrigin {
    /// Generated, then reflected with the given verdict
    Model(ReflectionVerdict),
    /// Deterministic fallback
    Fallback,
}

impl SummaryOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryOrigin::Model(verdict) => verdict.as_str(),
            SummaryOrigin::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub origin: SummaryOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_group_parsing() {
        assert_eq!(AgeGroup::parse("teen"), AgeGroup::Teen);
        assert_eq!(AgeGroup::parse(" TEEN "), AgeGroup::Teen);
        assert_eq!(AgeGroup::parse("adult"), AgeGroup::Adult);
        assert_eq!(AgeGroup::parse("senior"), AgeGroup::Adult);
        assert_eq!(AgeGroup::default(), AgeGroup::Adult);
    }

    #[test]
    fn test_age_group_deserializes_unknown_as_adult() {
        let group: AgeGroup = serde_json::from_str("\"toddler\"").unwrap();
        assert_eq!(group, AgeGroup::Adult);
        let group: AgeGroup = serde_json::from_str("\"teen\"").unwrap();
        assert_eq!(group, AgeGroup::Teen);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_value(SafeResponse::crisis()).unwrap();
        assert_eq!(json["status"], "CRISIS");
        assert_eq!(json["focus_areas"], serde_json::json!([]));
    }

    #[test]
    fn test_origin_labels() {
        assert_eq!(SummaryOrigin::Fallback.as_str(), "fallback");
        assert_eq!(
            SummaryOrigin::Model(ReflectionVerdict::Replaced).as_str(),
            "replaced"
        );
    }
}
