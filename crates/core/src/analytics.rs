//! Aggregates settled sales into the dashboard summary.

use chrono::Timelike;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::cart::LineKind;
use crate::checkout::Sale;
use crate::pricing::effective_unit_price;

/// Trading-hour windows the dashboard buckets revenue into.
pub const SALES_WINDOWS: [(u32, u32); 4] = [(9, 12), (12, 15), (15, 18), (18, 21)];

const TOP_PRODUCT_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub name: String,
    pub units: u32,
    pub revenue: Decimal,
}

/// Revenue taken during one trading window. `share_pct` is the window's share
/// of all windowed revenue; sales outside trading hours are not bucketed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourWindow {
    pub label: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub amount: Decimal,
    pub share_pct: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub revenue: Decimal,
    pub chocolates_sold: u32,
    pub gift_boxes_sold: u32,
    pub repeat_customers: usize,
    pub top_products: Vec<TopProduct>,
    pub sales_by_hour: Vec<HourWindow>,
}

/// Rolls settled sales up into dashboard numbers.
///
/// Chocolates inside gift boxes count towards `chocolates_sold`; a gift box
/// line counts as `box_count` boxes per unit sold. Top products rank every
/// line, boxes included, by revenue.
pub fn summarize(sales: &[Sale]) -> DashboardSummary {
    let revenue: Decimal = sales.iter().map(|sale| sale.totals.total).sum();

    let mut chocolates_sold = 0u32;
    let mut gift_boxes_sold = 0u32;
    let mut by_product: HashMap<String, (u32, Decimal)> = HashMap::new();
    for sale in sales {
        for line in &sale.lines {
            match &line.kind {
                LineKind::Product { .. } => chocolates_sold += line.quantity,
                LineKind::GiftBox { contents } => {
                    chocolates_sold += contents.chocolate_count() * line.quantity;
                    gift_boxes_sold += contents.box_count * line.quantity;
                }
            }
            let line_revenue = effective_unit_price(line.unit_price, line.discount_pct)
                * Decimal::from(line.quantity);
            let entry = by_product.entry(line.name.clone()).or_insert((0, Decimal::ZERO));
            entry.0 += line.quantity;
            entry.1 += line_revenue;
        }
    }

    let mut top_products: Vec<TopProduct> = by_product
        .into_iter()
        .map(|(name, (units, revenue))| TopProduct { name, units, revenue })
        .collect();
    top_products.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.name.cmp(&b.name)));
    top_products.truncate(TOP_PRODUCT_LIMIT);

    let mut sale_counts: HashMap<&str, usize> = HashMap::new();
    for sale in sales {
        if let Some(customer_id) = &sale.customer_id {
            *sale_counts.entry(customer_id.as_str()).or_insert(0) += 1;
        }
    }
    let repeat_customers = sale_counts.values().filter(|&&count| count >= 2).count();

    let mut window_amounts = [Decimal::ZERO; SALES_WINDOWS.len()];
    for sale in sales {
        let hour = sale.completed_at.hour();
        for (index, (start, end)) in SALES_WINDOWS.iter().enumerate() {
            if hour >= *start && hour < *end {
                window_amounts[index] += sale.totals.total;
                break;
            }
        }
    }
    let windowed_total: Decimal = window_amounts.iter().copied().sum();
    let sales_by_hour = SALES_WINDOWS
        .iter()
        .zip(window_amounts)
        .map(|(&(start_hour, end_hour), amount)| {
            let share_pct = if windowed_total.is_zero() {
                Decimal::ZERO
            } else {
                amount / windowed_total * Decimal::ONE_HUNDRED
            };
            HourWindow {
                label: format!("{start_hour:02}:00-{end_hour:02}:00"),
                start_hour,
                end_hour,
                amount,
                share_pct,
            }
        })
        .collect();

    DashboardSummary {
        revenue,
        chocolates_sold,
        gift_boxes_sold,
        repeat_customers,
        top_products,
        sales_by_hour,
    }
}
