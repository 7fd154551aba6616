//! Catalog products and their categories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalog product.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of product categories carried by the shop.
///
/// Categories double as catalog filters. Each variant has a stable string id
/// used at the interface boundary and a human-readable label shown on receipts
/// and category chips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Truffles,
    Praline,
    Dark,
    Caramel,
    White,
    Ganache,
    Milk,
    Special,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Truffles,
        Category::Praline,
        Category::Dark,
        Category::Caramel,
        Category::White,
        Category::Ganache,
        Category::Milk,
        Category::Special,
    ];

    /// Stable identifier used by catalog filters.
    pub fn id(&self) -> &'static str {
        match self {
            Category::Truffles => "truffles",
            Category::Praline => "praline",
            Category::Dark => "dark",
            Category::Caramel => "caramel",
            Category::White => "white",
            Category::Ganache => "ganache",
            Category::Milk => "milk",
            Category::Special => "special",
        }
    }

    /// Display label for category chips and pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Truffles => "Truffles",
            Category::Praline => "Pralines",
            Category::Dark => "Dark chocolate",
            Category::Caramel => "Caramel",
            Category::White => "White chocolate",
            Category::Ganache => "Ganache",
            Category::Milk => "Milk chocolate",
            Category::Special => "Specials",
        }
    }

    /// Resolves a filter id back to a category. Unknown ids resolve to `None`.
    pub fn from_id(id: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|category| category.id() == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A chocolate in the shop catalog.
///
/// `discount_pct` is a per-product promotional discount in whole percent,
/// applied before any customer-level discount. `rating` is the average review
/// score kept for display ordering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: Category,
    pub description: String,
    pub rating: Decimal,
    pub in_stock: bool,
    #[serde(default)]
    pub discount_pct: Option<Decimal>,
    #[serde(default)]
    pub allergens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ids_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_id(category.id()), Some(category));
        }
    }

    #[test]
    fn unknown_category_id_resolves_to_none() {
        assert_eq!(Category::from_id("pastry"), None);
        assert_eq!(Category::from_id(""), None);
        assert_eq!(Category::from_id("Truffles"), None);
    }

    #[test]
    fn category_serializes_as_snake_case() {
        let json = serde_json::to_string(&Category::Dark).expect("serialize category");
        assert_eq!(json, "\"dark\"");

        let parsed: Category = serde_json::from_str("\"special\"").expect("parse category");
        assert_eq!(parsed, Category::Special);
    }

    #[test]
    fn product_round_trips_through_json() {
        let product = Product {
            id: ProductId::new("3"),
            name: "Dark 85%".to_string(),
            price: Decimal::from(65),
            category: Category::Dark,
            description: "Intense dark chocolate with 85% cocoa".to_string(),
            rating: Decimal::new(47, 1),
            in_stock: true,
            discount_pct: Some(Decimal::from(10)),
            allergens: Vec::new(),
        };

        let json = serde_json::to_string(&product).expect("serialize product");
        let parsed: Product = serde_json::from_str(&json).expect("parse product");
        assert_eq!(parsed, product);
    }
}
