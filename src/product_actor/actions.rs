/// Custom actions for Product entities.
///
/// These actions represent domain-specific operations that can be performed
/// on a product beyond standard CRUD operations.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Reserves a specified amount of stock.
    ///
    /// # Errors
    /// Will fail if the requested amount exceeds available stock or the
    /// product is no longer sold.
    ReserveStock(u32),
    /// Puts previously reserved stock back.
    ReleaseStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    StockLevel(u32),
    Reserved,
    Released,
}
