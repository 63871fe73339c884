use chrono::Utc;
use rust_decimal::Decimal;

use super::{OrderAction, OrderError};
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, PaymentStatus};

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    fn id(&self) -> &String { &self.id }

    /// Creates a pending, unpaid Order. The total is derived from the priced lines.
    fn from_create(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError("order has no items".to_string()));
        }
        if params.items.iter().any(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError("quantity must be at least 1".to_string()));
        }
        let total = params.items.iter().map(|item| item.line_total()).sum::<Decimal>();
        Ok(Self {
            id,
            user_id: params.user_id,
            items: params.items,
            total,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_id: None,
            created_at: Utc::now(),
            paid_at: None,
        })
    }

    /// Orders are immutable once placed.
    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        if self.status != OrderStatus::Pending {
            return Err(OrderError::InvalidState(self.status));
        }
        match action {
            OrderAction::MarkPaid { payment_id } => {
                self.status = OrderStatus::Paid;
                self.payment_status = PaymentStatus::Paid;
                self.payment_id = Some(payment_id);
                self.paid_at = Some(Utc::now());
            }
            OrderAction::Cancel => {
                self.status = OrderStatus::Cancelled;
            }
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderItem, Size};

    fn order() -> Order {
        Order::from_create(
            "ord_1".into(),
            OrderCreate {
                user_id: "usr_1".into(),
                items: vec![
                    OrderItem {
                        product_id: "prd_1".into(),
                        design_id: None,
                        size: Size::M,
                        quantity: 2,
                        unit_price: Decimal::new(1250, 2),
                    },
                    OrderItem {
                        product_id: "prd_2".into(),
                        design_id: Some("dsg_1".into()),
                        size: Size::L,
                        quantity: 1,
                        unit_price: Decimal::new(3000, 2),
                    },
                ],
            },
        )
        .unwrap()
    }

    #[test]
    fn total_is_sum_of_lines() {
        assert_eq!(order().total, Decimal::new(5500, 2));
    }

    #[test]
    fn paid_order_cannot_be_paid_again() {
        let mut o = order();
        o.handle_action(OrderAction::MarkPaid { payment_id: "pay_1".into() }).unwrap();
        assert_eq!(o.payment_status, PaymentStatus::Paid);
        let err = o
            .handle_action(OrderAction::MarkPaid { payment_id: "pay_2".into() })
            .unwrap_err();
        assert_eq!(err, OrderError::InvalidState(OrderStatus::Paid));
    }
}
