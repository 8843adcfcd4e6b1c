//! Common types used across propsearch.

mod filters;
mod property;
mod search;

pub use filters::*;
pub use property::*;
pub use search::*;
