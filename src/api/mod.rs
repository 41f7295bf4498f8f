//! DeFi Score HTTP API
//! Score calculation, recent results and health endpoints

pub mod handlers;
pub mod history;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use history::RecentScores;
pub use routes::create_router;
pub use types::*;
