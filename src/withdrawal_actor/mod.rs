//! Royalty payout requests.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;
