pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod directory;
pub mod domain;
pub mod errors;
pub mod giftbox;
pub mod pricing;
pub mod relations;
pub mod seed;
pub mod settings;
pub mod state;

pub use analytics::{summarize, DashboardSummary, HourWindow, TopProduct};
pub use cart::{BoxedChocolate, Cart, CartError, CartLine, GiftBoxContents, LineId, LineKind};
pub use catalog::{filter_catalog, pickable_chocolates, Catalog, CategorySummary};
pub use checkout::{
    format_card_number, format_expiry, settle, validate_payment, CheckoutError, CheckoutRequest,
    PaymentMethod, Sale, SaleId,
};
pub use directory::{
    CustomerDirectory, DirectoryError, EventKind, LinkOutcome, NewCustomer, UpcomingEvent,
};
pub use domain::customer::{
    Customer, CustomerGroup, CustomerId, PastOrder, PastOrderItem, PaymentKind, Preferences,
    Relation, SocialMedia,
};
pub use domain::product::{Category, Product, ProductId};
pub use errors::DomainError;
pub use giftbox::{
    BoxSize, ChocolateSelection, ComposerError, ComposerSummary, CompositionPhase, GiftBoxComposer,
};
pub use pricing::{cash_change, effective_unit_price, order_totals, CashChange, OrderTotals};
pub use relations::{inverse_of, FALLBACK_RELATIONSHIP};
pub use settings::{AddOn, GiftBoxSettings, NotificationSettings, PosSettings, Ribbon, SettingsError};
pub use state::{ActiveView, PosApp};
