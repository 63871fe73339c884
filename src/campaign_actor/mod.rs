//! Pre-order campaigns: registry, intake, close and fulfillment.
//!
//! Campaigns and their pre-order entries are owned by a single actor so that
//! intake (entry + aggregate increments) and close (bulk entry transitions +
//! campaign status) each happen in one uninterrupted turn.

pub mod book;
pub mod error;
pub mod messages;
pub mod service;

pub use book::*;
pub use error::*;
pub use messages::*;
pub use service::*;
