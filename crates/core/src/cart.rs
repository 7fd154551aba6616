//! The order cart: lines for single products and committed gift boxes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::product::{Product, ProductId};

/// Identifier of a cart line.
///
/// Product lines reuse the product id so repeated adds merge into one line.
/// Gift box lines get a unique id per committed box.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(pub String);

impl LineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("product `{product_id}` is not in the catalog")]
    UnknownProduct { product_id: ProductId },
    #[error("product `{product_id}` is out of stock")]
    OutOfStock { product_id: ProductId },
    #[error("cart line `{line_id}` does not exist")]
    UnknownLine { line_id: LineId },
}

/// One chocolate inside a committed gift box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxedChocolate {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
}

/// Snapshot of a committed gift box carried on its cart line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftBoxContents {
    pub size_name: String,
    pub box_count: u32,
    pub chocolates: Vec<BoxedChocolate>,
}

impl GiftBoxContents {
    /// Total chocolates across all boxes on the line.
    pub fn chocolate_count(&self) -> u32 {
        let per_box: u32 = self.chocolates.iter().map(|entry| entry.quantity).sum();
        per_box * self.box_count
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LineKind {
    Product { product_id: ProductId },
    GiftBox { contents: GiftBoxContents },
}

/// A priced line in the cart.
///
/// `unit_price` and `discount_pct` are snapshots taken when the line was
/// added, so later catalog edits do not reprice an open order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: LineId,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_pct: Option<Decimal>,
    pub quantity: u32,
    pub kind: LineKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Adds one unit of a product, merging into an existing line for the same
    /// product instead of creating a duplicate.
    pub fn add_product(&mut self, product: &Product) {
        let line_id = LineId::new(product.id.as_str());
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == line_id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            id: line_id,
            name: product.name.clone(),
            unit_price: product.price,
            discount_pct: product.discount_pct,
            quantity: 1,
            kind: LineKind::Product { product_id: product.id.clone() },
        });
    }

    /// Appends a prebuilt line, used for committed gift boxes.
    pub fn add_line(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Sets the quantity of a line. Zero removes the line.
    pub fn set_quantity(&mut self, id: &LineId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove(id)?;
            return Ok(());
        }
        let line = self
            .lines
            .iter_mut()
            .find(|line| &line.id == id)
            .ok_or_else(|| CartError::UnknownLine { line_id: id.clone() })?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, id: &LineId) -> Result<CartLine, CartError> {
        let position = self
            .lines
            .iter()
            .position(|line| &line.id == id)
            .ok_or_else(|| CartError::UnknownLine { line_id: id.clone() })?;
        Ok(self.lines.remove(position))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Category;

    fn truffle() -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Cognac Truffle".to_string(),
            price: Decimal::from(85),
            category: Category::Truffles,
            description: "Delicate truffle with French cognac".to_string(),
            rating: Decimal::new(49, 1),
            in_stock: true,
            discount_pct: None,
            allergens: vec!["Milk".to_string(), "Alcohol".to_string()],
        }
    }

    #[test]
    fn adding_the_same_product_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add_product(&truffle());
        cart.add_product(&truffle());

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn line_snapshots_price_and_discount() {
        let mut product = truffle();
        product.discount_pct = Some(Decimal::from(10));

        let mut cart = Cart::new();
        cart.add_product(&product);

        let line = &cart.lines()[0];
        assert_eq!(line.unit_price, Decimal::from(85));
        assert_eq!(line.discount_pct, Some(Decimal::from(10)));
        assert_eq!(line.kind, LineKind::Product { product_id: ProductId::new("1") });
    }

    #[test]
    fn setting_quantity_to_zero_removes_the_line() {
        let mut cart = Cart::new();
        cart.add_product(&truffle());

        cart.set_quantity(&LineId::new("1"), 0).expect("line exists");
        assert!(cart.is_empty());
    }

    #[test]
    fn unknown_line_is_rejected() {
        let mut cart = Cart::new();
        let missing = LineId::new("giftbox-missing");

        let err = cart.set_quantity(&missing, 3).expect_err("no such line");
        assert_eq!(err, CartError::UnknownLine { line_id: missing.clone() });
        assert!(cart.remove(&missing).is_err());
    }

    #[test]
    fn gift_box_contents_count_multiplies_by_box_count() {
        let contents = GiftBoxContents {
            size_name: "Small (6 chocolates)".to_string(),
            box_count: 3,
            chocolates: vec![
                BoxedChocolate {
                    product_id: ProductId::new("2"),
                    name: "Hazelnut Praline".to_string(),
                    quantity: 4,
                },
                BoxedChocolate {
                    product_id: ProductId::new("9"),
                    name: "Rum Truffle".to_string(),
                    quantity: 2,
                },
            ],
        };

        assert_eq!(contents.chocolate_count(), 18);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add_product(&truffle());
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
