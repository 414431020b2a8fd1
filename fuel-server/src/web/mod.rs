//! Web layer for the fuel route planner.
//!
//! Provides HTTP endpoints for finding nearby stations and planning
//! fuel stops along a route.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
