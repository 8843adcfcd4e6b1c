//! Error types for the propsearch protocol layer.

mod embedding;
mod extraction;
mod search;
mod store;

pub use embedding::*;
pub use extraction::*;
pub use search::*;
pub use store::*;
