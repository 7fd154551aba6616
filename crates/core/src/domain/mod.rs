pub mod customer;
pub mod product;

pub use customer::{Customer, CustomerGroup, CustomerId, PastOrder, PastOrderItem, PaymentKind, Preferences, Relation, SocialMedia};
pub use product::{Category, Product, ProductId};
