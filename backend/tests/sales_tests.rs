//! Tests for checkout pricing and sales valuation
//!
//! Revenue values a sale at the price snapshotted at checkout; the
//! current menu price is only a fallback for rows predating the
//! snapshot, and zero is the last resort.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::models::effective_sale_price;
use shared::validation::validate_cart_qty;

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

mod price_snapshot {
    use super::*;

    #[test]
    fn snapshot_wins_over_current_price() {
        // Sold at 25000, menu later raised to 30000: history stays 25000
        assert_eq!(
            effective_sale_price(Some(dec("25000")), Some(dec("30000"))),
            dec("25000")
        );
    }

    #[test]
    fn snapshot_survives_price_drop_too() {
        assert_eq!(
            effective_sale_price(Some(dec("25000")), Some(dec("20000"))),
            dec("25000")
        );
    }

    #[test]
    fn legacy_row_falls_back_to_current_price() {
        assert_eq!(
            effective_sale_price(None, Some(dec("30000"))),
            dec("30000")
        );
    }

    #[test]
    fn missing_both_prices_values_at_zero() {
        assert_eq!(effective_sale_price(None, None), Decimal::ZERO);
    }

    #[test]
    fn revenue_uses_snapshot_per_line() {
        // 3 units sold at a 25000 snapshot while the menu says 30000
        let line_total = effective_sale_price(Some(dec("25000")), Some(dec("30000"))) * dec("3");
        assert_eq!(line_total, dec("75000"));
    }
}

mod cart_validation {
    use super::*;

    #[test]
    fn cart_quantity_must_be_at_least_one() {
        assert!(validate_cart_qty(1).is_ok());
        assert!(validate_cart_qty(25).is_ok());
        assert!(validate_cart_qty(0).is_err());
        assert!(validate_cart_qty(-1).is_err());
    }
}

mod pagination {
    use shared::types::Pagination;

    #[test]
    fn offset_and_limit_match_page_math() {
        let p = Pagination { page: 3, per_page: 10 };
        assert_eq!(p.offset(), 20);
        assert_eq!(p.limit(), 10);
    }

    #[test]
    fn page_zero_is_treated_as_first_page() {
        let p = Pagination { page: 0, per_page: 10 };
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        // Query params are untrusted; u32::MAX pages must still yield a
        // well-defined i64 offset instead of wrapping
        let p = Pagination { page: u32::MAX, per_page: 100 };
        assert_eq!(p.offset(), (u32::MAX as i64 - 1) * 100);
    }
}

mod checkout_lock_order {
    use shared::models::CartLine;
    use uuid::Uuid;

    #[test]
    fn reversed_carts_lock_in_the_same_order() {
        // Checkout sorts lines by selling unit id before locking, so two
        // carts with the same units in opposite order cannot deadlock
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut cart_one = vec![
            CartLine { selling_unit_id: a, qty: 1 },
            CartLine { selling_unit_id: b, qty: 2 },
        ];
        let mut cart_two = vec![
            CartLine { selling_unit_id: b, qty: 3 },
            CartLine { selling_unit_id: a, qty: 4 },
        ];

        cart_one.sort_by_key(|l| l.selling_unit_id);
        cart_two.sort_by_key(|l| l.selling_unit_id);

        let order_one: Vec<Uuid> = cart_one.iter().map(|l| l.selling_unit_id).collect();
        let order_two: Vec<Uuid> = cart_two.iter().map(|l| l.selling_unit_id).collect();
        assert_eq!(order_one, order_two);
    }
}

mod property_tests {
    use super::*;

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A present snapshot is always the effective price, whatever the
        /// current menu says
        #[test]
        fn prop_snapshot_is_authoritative(
            snapshot in price_strategy(),
            current in proptest::option::of(price_strategy())
        ) {
            prop_assert_eq!(effective_sale_price(Some(snapshot), current), snapshot);
        }

        /// Without a snapshot the current price decides, then zero
        #[test]
        fn prop_fallback_order(current in proptest::option::of(price_strategy())) {
            let effective = effective_sale_price(None, current);
            match current {
                Some(price) => prop_assert_eq!(effective, price),
                None => prop_assert_eq!(effective, Decimal::ZERO),
            }
        }

        /// The effective price is never negative for valid inputs
        #[test]
        fn prop_effective_price_non_negative(
            snapshot in proptest::option::of(price_strategy()),
            current in proptest::option::of(price_strategy())
        ) {
            prop_assert!(effective_sale_price(snapshot, current) >= Decimal::ZERO);
        }
    }
}
