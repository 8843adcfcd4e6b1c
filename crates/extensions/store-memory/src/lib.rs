//! In-memory property store.
//!
//! Keeps records in insertion order and answers vector queries by
//! brute-force cosine distance. Suited to tests and small seed files.

mod store;

pub use store::InMemoryPropertyStore;
