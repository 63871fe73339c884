//! System orchestration, startup, and shutdown logic.

pub mod shop_system;
pub mod telemetry;

pub use shop_system::*;
pub use telemetry::*;
