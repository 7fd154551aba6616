//! One POS session: catalog, cart, gift box composer, customers, settings,
//! and the sales taken so far.
//!
//! `PosApp` owns the module states and serializes every mutation through
//! `&mut self`, so cross-module invariants (capacity checks against the
//! configured sizes, totals against the selected customer) hold by
//! construction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::{summarize, DashboardSummary};
use crate::cart::{Cart, CartError, LineId};
use crate::catalog::Catalog;
use crate::checkout::{settle, CheckoutRequest, Sale};
use crate::directory::{CustomerDirectory, DirectoryError};
use crate::domain::customer::CustomerId;
use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;
use crate::giftbox::{ComposerError, GiftBoxComposer};
use crate::pricing::{order_totals, OrderTotals};
use crate::settings::PosSettings;

/// The screen the operator is on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    #[default]
    Sales,
    GiftBoxes,
    Customers,
    Analytics,
    Settings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PosApp {
    view: ActiveView,
    active_category: String,
    search_text: String,
    catalog: Catalog,
    cart: Cart,
    composer: GiftBoxComposer,
    directory: CustomerDirectory,
    selected_customer: Option<CustomerId>,
    settings: PosSettings,
    sales: Vec<Sale>,
}

impl PosApp {
    pub fn new(catalog: Catalog, directory: CustomerDirectory, settings: PosSettings) -> Self {
        let composer = GiftBoxComposer::new(settings.gift_box_settings.sizes.clone());
        Self {
            view: ActiveView::default(),
            active_category: "all".to_string(),
            search_text: String::new(),
            catalog,
            cart: Cart::new(),
            composer,
            directory,
            selected_customer: None,
            settings,
            sales: Vec::new(),
        }
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn set_view(&mut self, view: ActiveView) {
        self.view = view;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn composer(&self) -> &GiftBoxComposer {
        &self.composer
    }

    pub fn directory(&self) -> &CustomerDirectory {
        &self.directory
    }

    /// Directory mutations (sign-ups, updates, relation linking) go straight
    /// to the directory; it enforces its own rules.
    pub fn directory_mut(&mut self) -> &mut CustomerDirectory {
        &mut self.directory
    }

    pub fn settings(&self) -> &PosSettings {
        &self.settings
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn selected_customer(&self) -> Option<&CustomerId> {
        self.selected_customer.as_ref()
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn set_category(&mut self, category_id: impl Into<String>) {
        self.active_category = category_id.into();
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Products visible on the sales grid under the current category and
    /// search.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.catalog.filter(&self.active_category, &self.search_text)
    }

    pub fn select_customer(&mut self, id: &CustomerId) -> Result<(), DomainError> {
        if self.directory.find(id).is_none() {
            return Err(DirectoryError::UnknownCustomer { customer_id: id.clone() }.into());
        }
        self.selected_customer = Some(id.clone());
        Ok(())
    }

    pub fn clear_customer(&mut self) {
        self.selected_customer = None;
    }

    /// Discount of the selected customer, zero when no one is selected.
    pub fn customer_discount(&self) -> Decimal {
        self.selected_customer
            .as_ref()
            .and_then(|id| self.directory.find(id))
            .map(|customer| customer.discount_level)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn add_to_cart(&mut self, product_id: &ProductId) -> Result<(), DomainError> {
        let product = self
            .catalog
            .find(product_id)
            .ok_or_else(|| CartError::UnknownProduct { product_id: product_id.clone() })?;
        if !product.in_stock {
            return Err(CartError::OutOfStock { product_id: product_id.clone() }.into());
        }
        self.cart.add_product(product);
        tracing::debug!(event_name = "pos.cart_add", product_id = %product_id, "product added to cart");
        Ok(())
    }

    pub fn set_cart_quantity(&mut self, line_id: &LineId, quantity: u32) -> Result<(), DomainError> {
        self.cart.set_quantity(line_id, quantity)?;
        Ok(())
    }

    pub fn remove_from_cart(&mut self, line_id: &LineId) -> Result<(), DomainError> {
        self.cart.remove(line_id)?;
        Ok(())
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn select_box_size(&mut self, size_id: &str) -> Result<(), DomainError> {
        self.composer.select_size(size_id)?;
        Ok(())
    }

    pub fn set_box_count(&mut self, count: u32) -> Result<(), DomainError> {
        self.composer.set_box_count(count)?;
        Ok(())
    }

    pub fn add_chocolate_to_box(&mut self, product_id: &ProductId) -> Result<(), DomainError> {
        let product = self
            .catalog
            .find(product_id)
            .ok_or_else(|| ComposerError::UnknownProduct { product_id: product_id.clone() })?;
        self.composer.add_chocolate(product)?;
        Ok(())
    }

    pub fn update_box_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), DomainError> {
        self.composer.update_quantity(product_id, quantity)?;
        Ok(())
    }

    pub fn remove_from_box(&mut self, product_id: &ProductId) {
        self.composer.remove_chocolate(product_id);
    }

    /// Commits the composed gift box into the cart and returns the new line
    /// id.
    pub fn commit_gift_box(&mut self) -> Result<LineId, DomainError> {
        let line = self.composer.commit()?;
        let line_id = line.id.clone();
        self.cart.add_line(line);
        tracing::info!(
            event_name = "pos.giftbox_committed",
            line_id = %line_id,
            "gift box committed to cart"
        );
        Ok(line_id)
    }

    /// Prices the current cart with the selected customer's discount and the
    /// configured tax rate.
    pub fn totals(&self) -> OrderTotals {
        order_totals(self.cart.lines(), self.customer_discount(), self.settings.tax_rate)
    }

    /// Settles the current cart. On success the sale is recorded and the
    /// session resets for the next customer; on failure nothing changes.
    pub fn checkout(
        &mut self,
        request: CheckoutRequest,
        now: DateTime<Utc>,
    ) -> Result<Sale, DomainError> {
        let totals = self.totals();
        let sale = settle(&self.cart, self.selected_customer.clone(), totals, request, now)?;
        self.sales.push(sale.clone());
        self.cart.clear();
        self.selected_customer = None;
        tracing::info!(
            event_name = "pos.checkout_completed",
            sale_id = %sale.id.as_str(),
            total = %sale.totals.total,
            "checkout completed"
        );
        Ok(sale)
    }

    /// Applies new settings after validating them. The composer picks up the
    /// new size catalog; the current selection survives where it still fits.
    pub fn update_settings(&mut self, settings: PosSettings) -> Result<(), DomainError> {
        settings.validate()?;
        self.composer.set_sizes(settings.gift_box_settings.sizes.clone());
        self.settings = settings;
        tracing::info!(event_name = "pos.settings_updated", "settings updated");
        Ok(())
    }

    pub fn analytics(&self) -> DashboardSummary {
        summarize(&self.sales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{CheckoutError, PaymentMethod};
    use crate::seed;
    use chrono::TimeZone;

    fn app() -> PosApp {
        seed::demo_app()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).single().expect("valid timestamp")
    }

    #[test]
    fn adding_a_known_product_twice_merges_lines() {
        let mut app = app();

        app.add_to_cart(&ProductId::new("1")).expect("in catalog");
        app.add_to_cart(&ProductId::new("1")).expect("in catalog");

        assert_eq!(app.cart().lines().len(), 1);
        assert_eq!(app.cart().item_count(), 2);
    }

    #[test]
    fn unknown_and_out_of_stock_products_are_refused() {
        let mut app = app();

        let err = app.add_to_cart(&ProductId::new("99")).expect_err("not in catalog");
        assert!(matches!(err, DomainError::Cart(CartError::UnknownProduct { .. })));

        // Product 6 is seeded out of stock.
        let err = app.add_to_cart(&ProductId::new("6")).expect_err("out of stock");
        assert!(matches!(err, DomainError::Cart(CartError::OutOfStock { .. })));
        assert!(app.cart().is_empty());
    }

    #[test]
    fn category_and_search_drive_the_visible_grid() {
        let mut app = app();

        app.set_category("truffles");
        assert_eq!(app.visible_products().len(), 2);

        app.set_search("rum");
        let visible = app.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Rum Truffle");

        app.set_category("unknown");
        assert!(app.visible_products().is_empty());
    }

    #[test]
    fn totals_apply_the_selected_customer_discount_and_tax() {
        let mut app = app();
        app.add_to_cart(&ProductId::new("7")).expect("in catalog");

        // No customer: 60 + 20% tax.
        assert_eq!(app.totals().total, Decimal::from(72));

        // Anna has a 15% personal discount: 60 -> 51 -> 61.2.
        app.select_customer(&CustomerId::new("cust-001")).expect("seeded");
        let totals = app.totals();
        assert_eq!(totals.discount_pct, Decimal::from(15));
        assert_eq!(totals.total, Decimal::new(612, 1));
    }

    #[test]
    fn selecting_an_unknown_customer_fails() {
        let mut app = app();

        let err = app.select_customer(&CustomerId::new("cust-404")).expect_err("not seeded");
        assert!(matches!(err, DomainError::Directory(DirectoryError::UnknownCustomer { .. })));
        assert!(app.selected_customer().is_none());
    }

    #[test]
    fn checkout_records_the_sale_and_resets_the_session() {
        let mut app = app();
        app.add_to_cart(&ProductId::new("7")).expect("in catalog");
        app.select_customer(&CustomerId::new("cust-003")).expect("seeded");

        let request = CheckoutRequest::new(PaymentMethod::cash(Decimal::from(100)));
        let sale = app.checkout(request, now()).expect("cash covers the total");

        assert_eq!(sale.totals.total, Decimal::from(72));
        assert_eq!(sale.change_due, Some(Decimal::from(28)));
        assert_eq!(sale.customer_id, Some(CustomerId::new("cust-003")));
        assert_eq!(app.sales().len(), 1);
        assert!(app.cart().is_empty());
        assert!(app.selected_customer().is_none());
    }

    #[test]
    fn checkout_with_an_empty_cart_is_refused() {
        let mut app = app();

        let request = CheckoutRequest::new(PaymentMethod::cash(Decimal::from(100)));
        let err = app.checkout(request, now()).expect_err("nothing to sell");
        assert!(matches!(err, DomainError::Checkout(CheckoutError::EmptyCart)));
    }

    #[test]
    fn failed_checkout_leaves_the_session_untouched() {
        let mut app = app();
        app.add_to_cart(&ProductId::new("1")).expect("in catalog");

        // 85 + tax = 102, 50 in cash is not enough.
        let request = CheckoutRequest::new(PaymentMethod::cash(Decimal::from(50)));
        let err = app.checkout(request, now()).expect_err("insufficient cash");
        assert!(matches!(err, DomainError::Checkout(CheckoutError::InsufficientCash { .. })));

        assert_eq!(app.cart().lines().len(), 1);
        assert!(app.sales().is_empty());
    }

    #[test]
    fn gift_box_flow_lands_one_line_in_the_cart() {
        let mut app = app();
        app.select_box_size("small").expect("configured size");
        app.add_chocolate_to_box(&ProductId::new("2")).expect("in stock");
        app.add_chocolate_to_box(&ProductId::new("2")).expect("capacity left");

        let line_id = app.commit_gift_box().expect("box is ready");

        let line = app
            .cart()
            .lines()
            .iter()
            .find(|line| line.id == line_id)
            .expect("committed line is in the cart");
        // 75 * 2 chocolates + 50 box.
        assert_eq!(line.unit_price, Decimal::from(200));
        assert_eq!(app.composer().selections().len(), 0);
    }

    #[test]
    fn box_picks_are_validated_against_the_catalog() {
        let mut app = app();

        let err = app.add_chocolate_to_box(&ProductId::new("99")).expect_err("not in catalog");
        assert!(matches!(err, DomainError::Composer(ComposerError::UnknownProduct { .. })));

        let err = app.add_chocolate_to_box(&ProductId::new("12")).expect_err("out of stock");
        assert!(matches!(err, DomainError::Composer(ComposerError::OutOfStock { .. })));
    }

    #[test]
    fn settings_updates_are_validated_and_reach_the_composer() {
        let mut app = app();

        let mut bad = app.settings().clone();
        bad.tax_rate = Decimal::from(250);
        let err = app.update_settings(bad).expect_err("tax rate out of range");
        assert!(matches!(err, DomainError::Settings(_)));
        assert_eq!(app.settings().tax_rate, Decimal::from(20));

        let mut good = app.settings().clone();
        for size in &mut good.gift_box_settings.sizes {
            size.enabled = size.id == "large";
        }
        app.update_settings(good).expect("valid settings");
        assert_eq!(app.composer().active_size().map(|size| size.id.as_str()), Some("large"));
    }

    #[test]
    fn analytics_reflect_recorded_sales() {
        let mut app = app();
        app.add_to_cart(&ProductId::new("7")).expect("in catalog");
        let request = CheckoutRequest::new(PaymentMethod::cash(Decimal::from(100)));
        app.checkout(request, now()).expect("settles");

        let summary = app.analytics();
        assert_eq!(summary.chocolates_sold, 1);
        assert_eq!(summary.revenue, Decimal::from(72));
    }
}
