//! Custom designs and marketplace submissions: the two sources of design ownership.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;
