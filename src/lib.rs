pub mod auth;
pub mod error;
pub mod events;
pub mod listing;
pub mod models;
pub mod openapi;
pub mod repo;
pub mod routes;
pub mod security;
pub mod storage; // expose storage for routes
pub mod rate_limit; // in-memory rate limiting
#[cfg(feature = "embed-frontend")]
pub mod frontend;

// Re-export commonly used items for tests / external users
pub use routes::{config, AppState};
pub use security::SecurityHeaders;
