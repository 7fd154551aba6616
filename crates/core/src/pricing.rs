//! Order pricing: per-line discounts, customer discount, tax, cash change.
//!
//! All arithmetic is exact decimal. Rates are whole-percent values and are
//! applied without clamping or rounding; display layers round for receipts.
//! The pricing pipeline is: per-product discount per line, then the customer
//! discount over the subtotal, then tax over the discounted amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;

/// Breakdown of a priced order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount_pct: Decimal,
    pub discount_amount: Decimal,
    pub tax_rate_pct: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Unit price after the per-product promotional discount, if any.
pub fn effective_unit_price(unit_price: Decimal, discount_pct: Option<Decimal>) -> Decimal {
    match discount_pct {
        Some(pct) => unit_price * (Decimal::ONE - pct / Decimal::ONE_HUNDRED),
        None => unit_price,
    }
}

/// Prices an order.
///
/// `customer_discount_pct` applies to the subtotal; tax applies to the
/// discounted amount. Rates outside 0..=100 are not clamped, so a discount
/// over 100 produces a negative total. Callers validate ranges where that
/// matters; the arithmetic itself stays faithful to its inputs.
pub fn order_totals(
    lines: &[CartLine],
    customer_discount_pct: Decimal,
    tax_rate_pct: Decimal,
) -> OrderTotals {
    let subtotal: Decimal = lines
        .iter()
        .map(|line| effective_unit_price(line.unit_price, line.discount_pct) * Decimal::from(line.quantity))
        .sum();
    let discount_amount = subtotal * (customer_discount_pct / Decimal::ONE_HUNDRED);
    let taxable = subtotal - discount_amount;
    let tax = taxable * (tax_rate_pct / Decimal::ONE_HUNDRED);
    OrderTotals {
        subtotal,
        discount_pct: customer_discount_pct,
        discount_amount,
        tax_rate_pct,
        tax,
        total: taxable + tax,
    }
}

/// Cash tendered against a total. A negative `change` means the cash handed
/// over does not cover the order; that is data for the caller, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashChange {
    pub tendered: Decimal,
    pub change: Decimal,
}

impl CashChange {
    pub fn sufficient(&self) -> bool {
        self.change >= Decimal::ZERO
    }
}

pub fn cash_change(tendered: Decimal, total: Decimal) -> CashChange {
    CashChange { tendered, change: tendered - total }
}
