use bonbon_core::domain::product::Product;
use bonbon_core::{filter_catalog, seed};

use crate::commands::{money, CommandResult};

pub fn run(category: &str, search: &str) -> CommandResult {
    let products = seed::demo_products();
    let visible = filter_catalog(&products, category, search);

    let mut lines = vec![format!(
        "catalog: {} of {} products (category: {category}, search: {search:?})",
        visible.len(),
        products.len()
    )];
    if visible.is_empty() {
        lines.push("no products match".to_string());
    }
    for product in &visible {
        lines.push(render_product(product));
    }
    CommandResult::text(lines.join("\n"))
}

fn render_product(product: &Product) -> String {
    let mut line = format!(
        "- [{}] {} - {} ({})",
        product.id.as_str(),
        product.name,
        money(product.price),
        product.category.label()
    );
    if let Some(discount) = product.discount_pct {
        line.push_str(&format!(", {discount}% off"));
    }
    if !product.in_stock {
        line.push_str(" [out of stock]");
    }
    line
}
