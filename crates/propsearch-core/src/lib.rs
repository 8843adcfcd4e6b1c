//! # propsearch Core
//!
//! Search pipeline of the propsearch engine.
//!
//! ## Components
//!
//! - [`FilterNormalizer`] - Canonicalizes extractor output
//! - [`ModeSelector`] - Chooses structured or semantic retrieval
//! - [`structured_search`] / [`semantic_search`] - The two retrieval strategies
//! - [`format_card`] - Display projection of a record
//! - [`SummaryGenerator`] - Natural-language result summaries
//! - [`SearchEngine`] - Runs the whole pipeline for one query

pub mod engine;
pub mod formatter;
pub mod mode;
pub mod normalizer;
pub mod outcome;
pub mod policy;
pub mod semantic;
pub mod structured;
pub mod summary;

#[cfg(test)]
mod testing;

pub use engine::SearchEngine;
pub use formatter::{format_card, format_price};
pub use mode::ModeSelector;
pub use normalizer::FilterNormalizer;
pub use outcome::{Degradation, Retrieval, SearchOutcome};
pub use policy::SearchPolicy;
pub use semantic::{semantic_constraints, semantic_search};
pub use structured::{structured_constraints, structured_search};
pub use summary::{SummaryGenerator, SummaryStats};
