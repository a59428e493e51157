//! Grounded answering over the knowledge corpus.
//!
//! Combines retrieval, the grounded generator and the safety gates into one
//! pipeline that always produces a [`SafeResponse`].

pub mod focus;
pub mod generate;
pub mod navigator;
pub mod types;

pub use focus::{focus_areas, plan_today, plan_week, GENERAL_FOCUS};
pub use generate::{GenerationSettings, GroundedGenerator};
pub use navigator::Navigator;
pub use types::{AgeGroup, ResponseStatus, SafeResponse, Summary, SummaryOrigin};
