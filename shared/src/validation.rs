//! Validation utilities and pure stock/pricing derivations
//!
//! Everything here is side-effect free so the rules can be tested without a
//! database. The backend services apply the same rules inside their SQL.

use rust_decimal::Decimal;

/// Fallback alert threshold for ingredients without a configured one.
pub const DEFAULT_MIN_STOCK_ALERT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

// ============================================================================
// Stock Derivations
// ============================================================================

/// An ingredient is critical when its stock has fallen to or below its alert
/// threshold. The boundary itself counts as critical.
pub fn is_critical_stock(stock_qty: Decimal, min_stock_alert: Option<Decimal>) -> bool {
    stock_qty <= min_stock_alert.unwrap_or(DEFAULT_MIN_STOCK_ALERT)
}

/// Soft-deleted ingredients block production. Rows predating the flag carry
/// `None` and are treated as active; only an explicit `false` blocks.
pub fn is_archived(is_active: Option<bool>) -> bool {
    is_active == Some(false)
}

/// Ingredient quantity consumed by a production request.
pub fn required_quantity(quantity_per_batch: Decimal, batch_qty: Decimal) -> Decimal {
    quantity_per_batch * batch_qty
}

/// Check whether applying a signed delta would drive a stock projection
/// negative. The ledger rejects such appends.
pub fn would_go_negative(current_stock: Decimal, change_qty: Decimal) -> bool {
    current_stock + change_qty < Decimal::ZERO
}

// ============================================================================
// Quantity Validations
// ============================================================================

/// Restock and production batch quantities must be strictly positive.
pub fn validate_positive_qty(qty: Decimal) -> Result<(), &'static str> {
    if qty <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Cart line quantities are whole units and must be at least 1.
pub fn validate_cart_qty(qty: i32) -> Result<(), &'static str> {
    if qty <= 0 {
        return Err("Cart quantity must be at least 1");
    }
    Ok(())
}

/// Selling-unit prices may be zero (free items) but never negative.
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Entity names must be non-blank after trimming.
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // ========================================================================
    // Stock Derivation Tests
    // ========================================================================

    #[test]
    fn test_critical_stock_below_threshold() {
        assert!(is_critical_stock(dec("3"), Some(dec("5"))));
    }

    #[test]
    fn test_critical_stock_at_boundary() {
        // Exactly at the threshold counts as critical (<=, not <)
        assert!(is_critical_stock(dec("5"), Some(dec("5"))));
    }

    #[test]
    fn test_critical_stock_above_threshold() {
        assert!(!is_critical_stock(dec("5.01"), Some(dec("5"))));
    }

    #[test]
    fn test_critical_stock_default_threshold() {
        assert!(is_critical_stock(dec("5"), None));
        assert!(!is_critical_stock(dec("6"), None));
    }

    #[test]
    fn test_archived_flag() {
        assert!(is_archived(Some(false)));
        assert!(!is_archived(Some(true)));
        // Legacy rows without the flag stay usable
        assert!(!is_archived(None));
    }

    #[test]
    fn test_required_quantity_scales_linearly() {
        assert_eq!(required_quantity(dec("4"), dec("2")), dec("8"));
        assert_eq!(required_quantity(dec("0.5"), dec("3")), dec("1.5"));
    }

    #[test]
    fn test_would_go_negative() {
        assert!(would_go_negative(dec("2"), dec("-4")));
        assert!(!would_go_negative(dec("2"), dec("-2")));
        assert!(!would_go_negative(dec("2"), dec("10")));
    }

    // ========================================================================
    // Quantity Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_positive_qty() {
        assert!(validate_positive_qty(dec("0.1")).is_ok());
        assert!(validate_positive_qty(Decimal::ZERO).is_err());
        assert!(validate_positive_qty(dec("-1")).is_err());
    }

    #[test]
    fn test_validate_cart_qty() {
        assert!(validate_cart_qty(1).is_ok());
        assert!(validate_cart_qty(0).is_err());
        assert!(validate_cart_qty(-3).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(dec("5000")).is_ok());
        assert!(validate_price(dec("-1")).is_err());
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_email() {
        assert!(validate_email("kasir@mangiyan.id").is_ok());
        assert!(validate_email("invalid").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("rahasia-dapur").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Tepung Terigu").is_ok());
        assert!(validate_name("   ").is_err());
    }
}
