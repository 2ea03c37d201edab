//! HTTP API module for the HR KPI engine.
//!
//! This module provides the REST endpoints that compute a metrics snapshot
//! and import spreadsheet exports into engine records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::MetricsRequest;
pub use response::{ApiError, ApiErrorResponse, ImportResponse, MetricsResponse};
pub use state::AppState;
