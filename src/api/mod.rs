//! HTTP API module for the Net Salary Engine.
//!
//! This module exposes the salary breakdown over REST: `POST /breakdown`
//! returns the full JSON result and `POST /breakdown/text` the rendered report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::BreakdownRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
