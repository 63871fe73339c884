//! Typed clients over the actors. Clients own the cross-actor orchestration.

#[macro_use]
mod macros;

mod campaign_client;
mod design_client;
mod order_client;
mod product_client;
mod user_client;
mod withdrawal_client;

pub use campaign_client::*;
pub use design_client::*;
pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
pub use withdrawal_client::*;

use crate::design_actor::DesignError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use crate::withdrawal_actor::WithdrawalError;

impl_from_framework_error!(UserError);
impl_from_framework_error!(ProductError);
impl_from_framework_error!(DesignError);
impl_from_framework_error!(OrderError);
impl_from_framework_error!(WithdrawalError);
