//! Customer records, relations, and purchase history.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a customer record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh id for a customer created at runtime.
    pub fn generate() -> Self {
        Self(format!("cust-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerGroup {
    #[default]
    B2c,
    B2b,
    B2b2c,
    B2g,
    Other,
}

/// How a completed sale was paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Card,
    Cash,
    Transfer,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMedia {
    pub instagram: Option<String>,
    pub telegram: Option<String>,
    pub facebook: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub favorite_chocolates: Vec<String>,
    pub favorite_drink: Option<String>,
    pub allergies: Vec<String>,
}

/// A person related to a customer, used for occasion reminders.
///
/// `customer_id` is set when the relative has a customer record of their own;
/// relations entered free-form stay unlinked until the directory links them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub name: String,
    pub relationship: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastOrderItem {
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// A line in a customer's purchase history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastOrder {
    pub id: String,
    pub date: NaiveDate,
    pub total: Decimal,
    pub items: Vec<PastOrderItem>,
    pub payment: PaymentKind,
}

/// A customer of the shop.
///
/// `discount_level` is the personal discount in whole percent applied to the
/// whole order at checkout. `next_level_spend` is how much more the customer
/// has to spend before the next discount tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub anniversary: Option<NaiveDate>,
    pub join_date: NaiveDate,
    pub group: CustomerGroup,
    pub discount_level: Decimal,
    pub total_spent: Decimal,
    pub balance: Decimal,
    pub loyalty_points: u32,
    pub next_level_spend: Decimal,
    #[serde(default)]
    pub social: SocialMedia,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub orders: Vec<PastOrder>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Customer {
    /// Builds a customer with the defaults applied to walk-in sign-ups: B2C
    /// group, a 5% starter discount, and 10000 left to the next tier. The
    /// birthday defaults to the sign-up date until the customer provides one.
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        email: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: None,
            birthday: Some(today),
            anniversary: None,
            join_date: today,
            group: CustomerGroup::B2c,
            discount_level: Decimal::from(5),
            total_spent: Decimal::ZERO,
            balance: Decimal::ZERO,
            loyalty_points: 0,
            next_level_spend: Decimal::from(10_000),
            social: SocialMedia::default(),
            preferences: Preferences::default(),
            relations: Vec::new(),
            orders: Vec::new(),
            notes: None,
        }
    }

    /// Whether any relation already points at the given customer record.
    pub fn has_relation_to(&self, id: &CustomerId) -> bool {
        self.relations.iter().any(|relation| relation.customer_id.as_ref() == Some(id))
    }
}
