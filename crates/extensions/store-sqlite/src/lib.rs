//! SQLite property store for propsearch.
//!
//! Provides persistent listing storage using SQLite. Predicates and ordering
//! run in SQL; cosine ranking runs over the filtered rows in process.

mod codec;
mod schema;
mod sql;
mod store;

pub use store::SqlitePropertyStore;
