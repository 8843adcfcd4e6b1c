//! # propsearch API
//!
//! HTTP surface of the propsearch engine.
//!
//! ```text
//! POST /api/chat                 - Run a search for {"query": "..."}
//! GET  /api/properties/{id}      - Look up one property
//! GET  /api/cities               - Distinct known cities
//! GET  /api/cities/stats         - Record count per city
//! GET  /health, /livez           - Health and liveness probes
//! ```

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::handlers::PropertyDetail;
pub use http::routes::create_router;
pub use server::{ApiConfig, ApiServer};
pub use state::AppState;
