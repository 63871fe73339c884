use rust_decimal::Decimal;

/// Balance mutations applied inside the user actor so they never interleave.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Adds a royalty credit to both the withdrawable points and lifetime earnings.
    CreditRoyalty(Decimal),
    /// Removes points for a withdrawal request.
    ///
    /// # Errors
    /// Fails if the amount exceeds the available points.
    DebitPoints(Decimal),
    /// Returns points from a rejected withdrawal. Lifetime earnings are untouched.
    RestorePoints(Decimal),
}
