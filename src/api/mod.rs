//! API layer - HTTP surface of the service

pub mod health;
pub mod query;
pub mod router;
pub mod state;
pub mod types;

pub use router::create_router_with_state;
pub use state::AppState;
