//! Crate-level scenario tests.

pub(crate) mod support;

mod rag_ranking;
