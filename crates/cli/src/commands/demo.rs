//! A scripted end-to-end sale against the seeded demo shop: a returning
//! customer, a few chocolates, one composed gift box, cash payment.

use chrono::Utc;
use rust_decimal::Decimal;

use bonbon_core::checkout::{CheckoutRequest, PaymentMethod, Sale};
use bonbon_core::domain::customer::CustomerId;
use bonbon_core::domain::product::ProductId;
use bonbon_core::errors::DomainError;
use bonbon_core::pricing::effective_unit_price;
use bonbon_core::{seed, DashboardSummary};

use crate::commands::{money, CommandResult};

const CASH_TENDERED: i64 = 600;

pub fn run() -> CommandResult {
    match script() {
        Ok(output) => CommandResult::text(output),
        Err(error) => {
            tracing::error!(event_name = "cli.demo_failed", error = %error, "demo flow failed");
            CommandResult::failure("demo", "demo_flow", error.to_string(), 1)
        }
    }
}

fn script() -> Result<String, DomainError> {
    let mut app = seed::demo_app();

    let customer_id = CustomerId::new("cust-001");
    app.select_customer(&customer_id)?;
    let (customer_name, customer_discount) = match app.directory().find(&customer_id) {
        Some(customer) => (customer.name.clone(), customer.discount_level),
        None => ("walk-in".to_string(), Decimal::ZERO),
    };

    app.add_to_cart(&ProductId::new("1"))?;
    app.add_to_cart(&ProductId::new("1"))?;
    app.add_to_cart(&ProductId::new("3"))?;

    app.select_box_size("small")?;
    app.add_chocolate_to_box(&ProductId::new("2"))?;
    app.add_chocolate_to_box(&ProductId::new("2"))?;
    app.add_chocolate_to_box(&ProductId::new("4"))?;
    app.commit_gift_box()?;

    let request = CheckoutRequest::new(PaymentMethod::cash(Decimal::from(CASH_TENDERED)));
    let sale = app.checkout(request, Utc::now())?;

    let mut out = Vec::new();
    out.push(format!("demo session: {}", app.settings().business_name));
    out.push(format!("customer: {customer_name} ({customer_discount}% discount)"));
    render_receipt(&mut out, &sale);
    render_analytics(&mut out, &app.analytics());
    Ok(out.join("\n"))
}

fn render_receipt(out: &mut Vec<String>, sale: &Sale) {
    out.push("receipt:".to_string());
    for line in &sale.lines {
        let unit = effective_unit_price(line.unit_price, line.discount_pct);
        let mut rendered = format!("  {} x {} @ {}", line.quantity, line.name, money(line.unit_price));
        if let Some(discount) = line.discount_pct {
            rendered.push_str(&format!(" ({discount}% off)"));
        }
        rendered.push_str(&format!(" = {}", money(unit * Decimal::from(line.quantity))));
        out.push(rendered);
    }
    out.push(format!("  subtotal: {}", money(sale.totals.subtotal)));
    out.push(format!(
        "  discount ({}%): -{}",
        sale.totals.discount_pct,
        money(sale.totals.discount_amount)
    ));
    out.push(format!("  tax ({}%): {}", sale.totals.tax_rate_pct, money(sale.totals.tax)));
    out.push(format!("  total: {}", money(sale.totals.total)));
    match sale.change_due {
        Some(change) => {
            out.push(format!("  cash tendered: {CASH_TENDERED}, change due: {}", money(change)));
        }
        None => out.push("  paid without cash".to_string()),
    }
}

fn render_analytics(out: &mut Vec<String>, summary: &DashboardSummary) {
    out.push("analytics:".to_string());
    out.push(format!("  revenue: {}", money(summary.revenue)));
    out.push(format!("  chocolates sold: {}", summary.chocolates_sold));
    out.push(format!("  gift boxes sold: {}", summary.gift_boxes_sold));
    for product in &summary.top_products {
        out.push(format!(
            "  top seller: {} ({} units, {})",
            product.name,
            product.units,
            money(product.revenue)
        ));
    }
}
