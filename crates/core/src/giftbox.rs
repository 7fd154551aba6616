//! Gift box composition.
//!
//! A composer session picks a box size, fills it with chocolates up to the
//! size capacity, and commits the finished box into the cart as one priced
//! line. `box_count` orders several identical copies of the composed box; the
//! capacity always constrains a single box.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::cart::{BoxedChocolate, CartLine, GiftBoxContents, LineId, LineKind};
use crate::domain::product::{Product, ProductId};

/// Size id a fresh composer starts on.
pub const DEFAULT_SIZE_ID: &str = "medium";

/// A configurable gift box size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSize {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub price: Decimal,
    pub dimensions: String,
    pub enabled: bool,
}

/// Where a composition session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionPhase {
    /// Nothing selected yet.
    Empty,
    /// Chocolates selected but no size available to commit into.
    Composing,
    /// Has chocolates and an active size; `commit` will succeed.
    ReadyToCommit,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ComposerError {
    #[error("product `{product_id}` is not in the catalog")]
    UnknownProduct { product_id: ProductId },
    #[error("product `{product_id}` is out of stock")]
    OutOfStock { product_id: ProductId },
    #[error("`{product_id}` is not in the box")]
    UnknownSelection { product_id: ProductId },
    #[error("box size `{size_id}` is not available")]
    UnknownSize { size_id: String },
    #[error("the box holds at most {capacity} chocolates")]
    CapacityExceeded { capacity: u32 },
    #[error("no box size is available")]
    NoActiveSize,
    #[error("cannot order zero boxes")]
    ZeroBoxCount,
    #[error("the box has no chocolates in it")]
    EmptySelection,
}

/// A chocolate picked into the box, with a price snapshot.
///
/// Gift boxes price contents at the full catalog price; per-product
/// promotional discounts do not apply inside a box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChocolateSelection {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Snapshot of the composer for display surfaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerSummary {
    pub phase: CompositionPhase,
    pub selected_quantity: u32,
    pub capacity: Option<u32>,
    pub box_count: u32,
    pub contents_cost: Decimal,
    pub total_cost: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftBoxComposer {
    sizes: Vec<BoxSize>,
    size_id: String,
    box_count: u32,
    selections: Vec<ChocolateSelection>,
}

impl GiftBoxComposer {
    pub fn new(sizes: Vec<BoxSize>) -> Self {
        Self { sizes, size_id: DEFAULT_SIZE_ID.to_string(), box_count: 1, selections: Vec::new() }
    }

    /// Replaces the configured sizes, keeping the current selection. If the
    /// active size disappears, [`GiftBoxComposer::active_size`] falls back to
    /// the first enabled size.
    pub fn set_sizes(&mut self, sizes: Vec<BoxSize>) {
        self.sizes = sizes;
    }

    pub fn available_sizes(&self) -> impl Iterator<Item = &BoxSize> {
        self.sizes.iter().filter(|size| size.enabled)
    }

    /// The size the box will be committed in: the selected size if it is still
    /// enabled, otherwise the first enabled size.
    pub fn active_size(&self) -> Option<&BoxSize> {
        self.available_sizes()
            .find(|size| size.id == self.size_id)
            .or_else(|| self.available_sizes().next())
    }

    pub fn phase(&self) -> CompositionPhase {
        if self.selections.is_empty() {
            CompositionPhase::Empty
        } else if self.active_size().is_some() {
            CompositionPhase::ReadyToCommit
        } else {
            CompositionPhase::Composing
        }
    }

    pub fn selections(&self) -> &[ChocolateSelection] {
        &self.selections
    }

    pub fn box_count(&self) -> u32 {
        self.box_count
    }

    /// Chocolates selected so far, counted against a single box.
    pub fn selected_quantity(&self) -> u32 {
        self.selections.iter().map(|selection| selection.quantity).sum()
    }

    pub fn contents_cost(&self) -> Decimal {
        self.selections
            .iter()
            .map(|selection| selection.unit_price * Decimal::from(selection.quantity))
            .sum()
    }

    /// Price of the whole order: contents plus box price, times the number of
    /// identical boxes.
    pub fn total_cost(&self) -> Decimal {
        let size_price = self.active_size().map(|size| size.price).unwrap_or(Decimal::ZERO);
        (self.contents_cost() + size_price) * Decimal::from(self.box_count)
    }

    pub fn select_size(&mut self, size_id: &str) -> Result<(), ComposerError> {
        if !self.available_sizes().any(|size| size.id == size_id) {
            return Err(ComposerError::UnknownSize { size_id: size_id.to_string() });
        }
        self.size_id = size_id.to_string();
        Ok(())
    }

    pub fn set_box_count(&mut self, count: u32) -> Result<(), ComposerError> {
        if count == 0 {
            return Err(ComposerError::ZeroBoxCount);
        }
        self.box_count = count;
        Ok(())
    }

    /// Adds one unit of a chocolate, merging repeated picks into one entry.
    pub fn add_chocolate(&mut self, product: &Product) -> Result<(), ComposerError> {
        if !product.in_stock {
            return Err(ComposerError::OutOfStock { product_id: product.id.clone() });
        }
        let capacity =
            self.active_size().map(|size| size.capacity).ok_or(ComposerError::NoActiveSize)?;
        if self.selected_quantity() >= capacity {
            return Err(ComposerError::CapacityExceeded { capacity });
        }
        if let Some(selection) =
            self.selections.iter_mut().find(|selection| selection.product_id == product.id)
        {
            selection.quantity += 1;
            return Ok(());
        }
        self.selections.push(ChocolateSelection {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        });
        Ok(())
    }

    /// Sets the quantity of a selected chocolate. Zero removes the entry, even
    /// when it is not present.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ComposerError> {
        if quantity == 0 {
            self.remove_chocolate(product_id);
            return Ok(());
        }
        let capacity =
            self.active_size().map(|size| size.capacity).ok_or(ComposerError::NoActiveSize)?;
        let current = self
            .selections
            .iter()
            .find(|selection| &selection.product_id == product_id)
            .map(|selection| selection.quantity)
            .ok_or_else(|| ComposerError::UnknownSelection { product_id: product_id.clone() })?;
        let others = self.selected_quantity() - current;
        if others + quantity > capacity {
            return Err(ComposerError::CapacityExceeded { capacity });
        }
        if let Some(selection) =
            self.selections.iter_mut().find(|selection| &selection.product_id == product_id)
        {
            selection.quantity = quantity;
        }
        Ok(())
    }

    pub fn remove_chocolate(&mut self, product_id: &ProductId) {
        self.selections.retain(|selection| &selection.product_id != product_id);
    }

    /// Commits the composed box as a single cart line and clears the selection
    /// for the next box. The chosen size and box count are kept.
    pub fn commit(&mut self) -> Result<CartLine, ComposerError> {
        if self.selections.is_empty() {
            return Err(ComposerError::EmptySelection);
        }
        let size = self.active_size().cloned().ok_or(ComposerError::NoActiveSize)?;
        let listing = self
            .selections
            .iter()
            .map(|selection| format!("{} x{}", selection.name, selection.quantity))
            .collect::<Vec<_>>()
            .join(", ");
        let name = format!("Gift box {} ({} pcs): {}", size.name, self.box_count, listing);
        let chocolates = self
            .selections
            .iter()
            .map(|selection| BoxedChocolate {
                product_id: selection.product_id.clone(),
                name: selection.name.clone(),
                quantity: selection.quantity,
            })
            .collect();
        let line = CartLine {
            id: LineId::new(format!("giftbox-{}", Uuid::new_v4())),
            name,
            unit_price: self.total_cost(),
            discount_pct: None,
            quantity: 1,
            kind: LineKind::GiftBox {
                contents: GiftBoxContents {
                    size_name: size.name.clone(),
                    box_count: self.box_count,
                    chocolates,
                },
            },
        };
        self.selections.clear();
        Ok(line)
    }

    pub fn summary(&self) -> ComposerSummary {
        ComposerSummary {
            phase: self.phase(),
            selected_quantity: self.selected_quantity(),
            capacity: self.active_size().map(|size| size.capacity),
            box_count: self.box_count,
            contents_cost: self.contents_cost(),
            total_cost: self.total_cost(),
        }
    }
}
