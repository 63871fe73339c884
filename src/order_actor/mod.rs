//! Regular storefront orders and their payment state.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
