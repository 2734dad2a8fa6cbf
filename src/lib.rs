//! Punting Form API connectivity test service.
//!
//! Answers one question: can this deployment region reach the Punting Form
//! API? Each request to the service issues a single GET against the meetings
//! list endpoint, classifies the outcome and renders it as an HTML page or a
//! JSON payload.
//!
//! ```text
//! 200 → success            connectivity and API both working
//! 403 → blocked            likely geo-restricted, consider another region
//! 401 → auth-error         connectivity fine, API key rejected
//! ??? → api-error          connectivity fine, API unhappy
//! transport failure → connection-failed
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`clock`]: Injected time source for the test date and timestamps
//! - [`error`]: Unified error types
//! - [`probe`]: The outbound request and its result
//! - [`present`]: Classification, HTML and JSON rendering
//! - [`api`]: HTTP routes
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod present;
pub mod probe;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
