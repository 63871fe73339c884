//! Business entities shared by the actors, clients and HTTP layer.

pub mod campaign;
pub mod design;
pub mod order;
pub mod preorder;
pub mod product;
pub mod user;
pub mod withdrawal;

pub use campaign::*;
pub use design::*;
pub use order::*;
pub use preorder::*;
pub use product::*;
pub use user::*;
pub use withdrawal::*;
