//! Turning probe results into something a person can read.

pub mod classify;
pub mod html;
pub mod json;

pub use classify::{classify, Category, Verdict};
pub use html::{render_index, PageContext};
pub use json::{ApiTestResponse, HealthResponse};
