//! Shop settings: business identity, tax, notifications, and the gift box
//! catalog.
//!
//! The wire format is camelCase JSON, the same blob the settings store
//! persists. Every section tolerates missing fields by falling back to the
//! defaults, so a partially edited blob still loads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::giftbox::BoxSize;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("tax rate {value} must be between 0 and 100")]
    TaxRateOutOfRange { value: Decimal },
    #[error("at least one gift box size must be configured")]
    NoBoxSizes,
    #[error("gift box size id `{size_id}` is configured twice")]
    DuplicateSizeId { size_id: String },
    #[error("gift box size `{size_id}` must hold at least one chocolate")]
    ZeroCapacity { size_id: String },
    #[error("gift box size `{size_id}` has a negative price")]
    NegativePrice { size_id: String },
}

/// An optional gift box extra such as a decoration, card, or personalization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ribbon {
    pub id: String,
    pub name: String,
    pub color: String,
    pub price: Decimal,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GiftBoxSettings {
    pub sizes: Vec<BoxSize>,
    pub decorations: Vec<AddOn>,
    pub ribbons: Vec<Ribbon>,
    pub cards: Vec<AddOn>,
    pub personalizations: Vec<AddOn>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub low_stock: bool,
    pub new_orders: bool,
    pub customer_updates: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { low_stock: true, new_orders: true, customer_updates: false }
    }
}

/// All shop settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PosSettings {
    pub business_name: String,
    pub business_address: String,
    pub business_phone: String,
    pub business_email: String,
    pub tax_rate: Decimal,
    /// Currency symbol prefixed to displayed amounts; empty means bare
    /// numbers.
    pub currency: String,
    pub notifications: NotificationSettings,
    pub gift_box_settings: GiftBoxSettings,
}

impl Default for PosSettings {
    fn default() -> Self {
        Self {
            business_name: "Bonbon Artisan Chocolate".to_string(),
            business_address: "4 Cocoa Court, Brighton".to_string(),
            business_phone: "+44 1273 555 0134".to_string(),
            business_email: "hello@bonbon.example".to_string(),
            tax_rate: Decimal::from(20),
            currency: String::new(),
            notifications: NotificationSettings::default(),
            gift_box_settings: GiftBoxSettings::default(),
        }
    }
}

impl PosSettings {
    /// Checks the invariants the rest of the system assumes. Called before
    /// settings are persisted; a stored blob that fails these checks is
    /// replaced by the defaults on load.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE_HUNDRED {
            return Err(SettingsError::TaxRateOutOfRange { value: self.tax_rate });
        }
        let sizes = &self.gift_box_settings.sizes;
        if sizes.is_empty() {
            return Err(SettingsError::NoBoxSizes);
        }
        for (index, size) in sizes.iter().enumerate() {
            if sizes.iter().take(index).any(|earlier| earlier.id == size.id) {
                return Err(SettingsError::DuplicateSizeId { size_id: size.id.clone() });
            }
            if size.capacity == 0 {
                return Err(SettingsError::ZeroCapacity { size_id: size.id.clone() });
            }
            if size.price < Decimal::ZERO {
                return Err(SettingsError::NegativePrice { size_id: size.id.clone() });
            }
        }
        Ok(())
    }
}

impl Default for GiftBoxSettings {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            decorations: vec![
                add_on("basic", "Basic wrap", 0, true),
                add_on("premium", "Premium decor", 100, true),
                add_on("luxury", "Luxury decor", 200, true),
                add_on("seasonal", "Seasonal decor", 150, false),
            ],
            ribbons: vec![
                ribbon("gold", "Gold ribbon", "#d4af37", 25),
                ribbon("brown", "Brown ribbon", "#8b4513", 20),
                ribbon("cream", "Cream ribbon", "#f5f0e8", 20),
                ribbon("red", "Red ribbon", "#dc2626", 30),
                ribbon("none", "No ribbon", "transparent", 0),
            ],
            cards: vec![
                add_on("none", "No card", 0, true),
                add_on("simple", "Simple card", 15, true),
                add_on("premium", "Premium card", 35, true),
                add_on("custom", "Personalized card", 50, true),
            ],
            personalizations: vec![
                add_on("none", "None", 0, true),
                add_on("engraving", "Box engraving", 100, true),
                add_on("photo", "Photo on card", 75, true),
                add_on("message", "Personal message", 25, true),
            ],
        }
    }
}

fn default_sizes() -> Vec<BoxSize> {
    vec![
        size("small", "Small (6 chocolates)", 6, 50, "15x15x5 cm"),
        size("medium", "Medium (12 chocolates)", 12, 75, "20x20x6 cm"),
        size("large", "Large (24 chocolates)", 24, 100, "30x20x7 cm"),
        size("premium", "Premium (36 chocolates)", 36, 150, "35x25x8 cm"),
    ]
}

fn size(id: &str, name: &str, capacity: u32, price: i64, dimensions: &str) -> BoxSize {
    BoxSize {
        id: id.to_string(),
        name: name.to_string(),
        capacity,
        price: Decimal::from(price),
        dimensions: dimensions.to_string(),
        enabled: true,
    }
}

fn add_on(id: &str, name: &str, price: i64, enabled: bool) -> AddOn {
    AddOn { id: id.to_string(), name: name.to_string(), price: Decimal::from(price), enabled }
}

fn ribbon(id: &str, name: &str, color: &str, price: i64) -> Ribbon {
    Ribbon {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        price: Decimal::from(price),
        enabled: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_pass_validation() {
        PosSettings::default().validate().expect("defaults are valid");
    }

    #[test]
    fn default_gift_box_catalog_matches_the_shop_lineup() {
        let settings = PosSettings::default();
        let boxes = &settings.gift_box_settings;

        let ids: Vec<&str> = boxes.sizes.iter().map(|size| size.id.as_str()).collect();
        assert_eq!(ids, vec!["small", "medium", "large", "premium"]);
        let capacities: Vec<u32> = boxes.sizes.iter().map(|size| size.capacity).collect();
        assert_eq!(capacities, vec![6, 12, 24, 36]);
        assert!(boxes.sizes.iter().all(|size| size.enabled));

        let seasonal = boxes
            .decorations
            .iter()
            .find(|decoration| decoration.id == "seasonal")
            .expect("seasonal decor exists");
        assert!(!seasonal.enabled);
        assert_eq!(boxes.ribbons.len(), 5);
        assert_eq!(settings.tax_rate, Decimal::from(20));
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = serde_json::to_string(&PosSettings::default()).expect("serialize settings");

        assert!(json.contains("\"businessName\""));
        assert!(json.contains("\"taxRate\""));
        assert!(json.contains("\"giftBoxSettings\""));
        assert!(json.contains("\"lowStock\""));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: PosSettings =
            serde_json::from_str("{\"taxRate\": 15}").expect("partial blob parses");

        assert_eq!(settings.tax_rate, Decimal::from(15));
        assert_eq!(settings.business_name, "Bonbon Artisan Chocolate");
        assert_eq!(settings.gift_box_settings.sizes.len(), 4);
    }

    #[test]
    fn out_of_range_tax_rate_fails_validation() {
        let mut settings = PosSettings::default();
        settings.tax_rate = Decimal::from(120);

        let err = settings.validate().expect_err("invalid tax rate");
        assert_eq!(err, SettingsError::TaxRateOutOfRange { value: Decimal::from(120) });
    }

    #[test]
    fn gift_box_sizes_are_checked() {
        let mut settings = PosSettings::default();
        settings.gift_box_settings.sizes.clear();
        assert_eq!(settings.validate().expect_err("no sizes"), SettingsError::NoBoxSizes);

        let mut settings = PosSettings::default();
        settings.gift_box_settings.sizes[1].id = "small".to_string();
        assert_eq!(
            settings.validate().expect_err("duplicate id"),
            SettingsError::DuplicateSizeId { size_id: "small".to_string() }
        );

        let mut settings = PosSettings::default();
        settings.gift_box_settings.sizes[0].capacity = 0;
        assert_eq!(
            settings.validate().expect_err("zero capacity"),
            SettingsError::ZeroCapacity { size_id: "small".to_string() }
        );
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = PosSettings::default();
        let json = serde_json::to_string(&settings).expect("serialize settings");
        let parsed: PosSettings = serde_json::from_str(&json).expect("parse settings");
        assert_eq!(parsed, settings);
    }
}
