//! User accounts and their royalty balance counters.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
