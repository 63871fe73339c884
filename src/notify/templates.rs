use super::{EmailKind, Notification};

/// A rendered message ready for the mail provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub fn render(notification: &Notification) -> OutboundEmail {
    let name = &notification.to_name;
    let (subject, body) = match &notification.kind {
        EmailKind::PreOrderReceived { campaign_name, entry_id, quantity, amount } => (
            format!("Pre-order received: {campaign_name}"),
            format!(
                "Hi {name},\n\nWe received your pre-order {entry_id} for {quantity} item(s) \
                 from {campaign_name}, totalling {amount}.\nProduction starts once the \
                 campaign reaches its minimum quantity. If it does not, you will be refunded \
                 in full."
            ),
        ),
        EmailKind::PreOrderConfirmed { campaign_name, entry_id, estimated_delivery } => {
            let eta = estimated_delivery
                .map(|d| format!(" Estimated delivery: {}.", d.format("%B %-d, %Y")))
                .unwrap_or_default();
            (
                format!("{campaign_name} is going into production"),
                format!(
                    "Hi {name},\n\n{campaign_name} reached its goal and your pre-order \
                     {entry_id} is confirmed.{eta}"
                ),
            )
        }
        EmailKind::ProductionStarted { campaign_name, entry_id } => (
            format!("Production started: {campaign_name}"),
            format!("Hi {name},\n\nYour pre-order {entry_id} from {campaign_name} is now in production."),
        ),
        EmailKind::Shipped { campaign_name, entry_id, tracking_number } => (
            format!("Your {campaign_name} order has shipped"),
            format!(
                "Hi {name},\n\nYour pre-order {entry_id} is on its way. \
                 Tracking number: {tracking_number}."
            ),
        ),
        EmailKind::PreOrderRefunded { campaign_name, entry_id, amount, reason } => (
            format!("Refund for {campaign_name}"),
            format!(
                "Hi {name},\n\nYour pre-order {entry_id} was refunded ({reason}). \
                 {amount} will be returned to your original payment method."
            ),
        ),
        EmailKind::OrderPaid { order_id, total } => (
            format!("Order {order_id} confirmed"),
            format!("Hi {name},\n\nWe received your payment of {total} for order {order_id}."),
        ),
        EmailKind::WithdrawalReviewed { withdrawal_id, amount, approved } => {
            let outcome = if *approved { "approved" } else { "rejected" };
            let tail = if *approved {
                "The payout is on its way."
            } else {
                "The amount has been returned to your royalty balance."
            };
            (
                format!("Withdrawal {outcome}"),
                format!("Hi {name},\n\nYour withdrawal {withdrawal_id} of {amount} was {outcome}. {tail}"),
            )
        }
    };
    OutboundEmail { to: notification.to_email.clone(), subject, body }
}
