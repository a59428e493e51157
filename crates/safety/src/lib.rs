//! Safety gates for Navigator.
//!
//! Everything here is pure and synchronous:
//! - [`classify`] decides whether a query takes the crisis path
//! - [`reflect`] checks a generated draft before it reaches the user
//! - [`fallback`] builds the response used when generation is unavailable

pub mod messages;
pub mod reflection;
pub mod triage;

pub use messages::{fallback, CRISIS_MESSAGE, FALLBACK_EXCERPT_CHARS, HELP_REMINDER, SAFE_MESSAGE};
pub use reflection::{reflect, Reflection, ReflectionVerdict, BANNED_PHRASES};
pub use triage::{classify, RiskLevel, CRISIS_PHRASES};
