//! Outbound connectivity probe against the Punting Form API.

pub mod body;
pub mod prober;
pub mod result;

pub use prober::{Prober, MEETINGS_PATH};
pub use result::{BodySummary, Meetings, ProbeFailure, ProbeResult, ProbeSuccess};
