#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Records a verified gateway payment.
    MarkPaid { payment_id: String },
    /// Abandons an unpaid order.
    Cancel,
}
