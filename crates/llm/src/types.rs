//! Generation transport identifiers.

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// OpenAI-compatible chat-completion endpoint with bearer auth
    Hosted,
    /// Language-model runner spawned as a subprocess
    LocalRunner,
}

impl ProviderType {
    /// Parse provider type from its configured name.
    ///
    /// Accepts exactly the names `AppConfig::validate` allows.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hosted" => Some(Self::Hosted),
            "local" => Some(Self::LocalRunner),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hosted => "hosted",
            Self::LocalRunner => "local",
        }
    }
}
