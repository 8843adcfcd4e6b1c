//! HTTP routes and handlers.

pub mod handlers;
pub mod monitoring;
pub mod routes;
