//! Demo data: the shop catalog and a few customers with history.
//!
//! The demo state is rebuilt from here on every start; only settings persist
//! between sessions.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::directory::CustomerDirectory;
use crate::domain::customer::{
    Customer, CustomerGroup, CustomerId, PastOrder, PastOrderItem, PaymentKind, Preferences,
    Relation, SocialMedia,
};
use crate::domain::product::{Category, Product, ProductId};
use crate::settings::PosSettings;
use crate::state::PosApp;

/// A ready-to-use demo app: seeded catalog, seeded customers, default
/// settings.
pub fn demo_app() -> PosApp {
    PosApp::new(
        Catalog::new(demo_products()),
        CustomerDirectory::new(demo_customers()),
        PosSettings::default(),
    )
}

/// The fifteen-chocolate demo catalog. Two products are out of stock and two
/// carry a promotional discount.
pub fn demo_products() -> Vec<Product> {
    vec![
        chocolate(
            "1",
            "Cognac Truffle",
            85,
            Category::Truffles,
            49,
            true,
            None,
            &["Milk", "Alcohol"],
            "Delicate truffle with French cognac in a dark chocolate shell",
        ),
        chocolate(
            "2",
            "Hazelnut Praline",
            75,
            Category::Praline,
            48,
            true,
            None,
            &["Milk", "Nuts"],
            "Crunchy praline with roasted hazelnuts in milk chocolate",
        ),
        chocolate(
            "3",
            "Dark 85%",
            65,
            Category::Dark,
            47,
            true,
            Some(10),
            &[],
            "Intense dark chocolate with 85% cocoa",
        ),
        chocolate(
            "4",
            "Sea Salt Caramel",
            70,
            Category::Caramel,
            46,
            true,
            None,
            &["Milk"],
            "Soft caramel with sea salt flakes in milk chocolate",
        ),
        chocolate(
            "5",
            "White Raspberry",
            80,
            Category::White,
            45,
            true,
            None,
            &["Milk"],
            "Silky white chocolate with freeze-dried raspberry pieces",
        ),
        chocolate(
            "6",
            "Lavender Ganache",
            90,
            Category::Ganache,
            44,
            false,
            None,
            &["Milk"],
            "Fine ganache with lavender blossom in dark chocolate",
        ),
        chocolate(
            "7",
            "Classic Milk",
            60,
            Category::Milk,
            43,
            true,
            None,
            &["Milk"],
            "Classic milk chocolate with a mellow taste",
        ),
        chocolate(
            "8",
            "Chocolate Madeleine",
            95,
            Category::Special,
            48,
            true,
            Some(15),
            &["Milk", "Gluten", "Eggs"],
            "French madeleine dipped in dark Belgian chocolate",
        ),
        chocolate(
            "9",
            "Rum Truffle",
            88,
            Category::Truffles,
            46,
            true,
            None,
            &["Milk", "Alcohol"],
            "Aromatic truffle with Caribbean rum and vanilla",
        ),
        chocolate(
            "10",
            "Almond Praline",
            78,
            Category::Praline,
            47,
            true,
            None,
            &["Milk", "Nuts"],
            "Delicate praline with roasted California almonds",
        ),
        chocolate(
            "11",
            "Dark Orange",
            72,
            Category::Dark,
            45,
            true,
            None,
            &[],
            "Dark chocolate with candied Sicilian orange zest",
        ),
        chocolate(
            "12",
            "Espresso Caramel",
            74,
            Category::Caramel,
            44,
            false,
            None,
            &["Milk", "Caffeine"],
            "Caramel with a double shot of roasted espresso",
        ),
        chocolate(
            "13",
            "White Lemon",
            82,
            Category::White,
            43,
            true,
            None,
            &["Milk"],
            "White chocolate with organic lemon zest",
        ),
        chocolate(
            "14",
            "Rose Ganache",
            95,
            Category::Ganache,
            49,
            true,
            None,
            &["Milk"],
            "Silky ganache with Damask rose petals",
        ),
        chocolate(
            "15",
            "Milk Caramel Heart",
            68,
            Category::Milk,
            42,
            true,
            None,
            &["Milk"],
            "Milk chocolate heart with a liquid caramel center",
        ),
    ]
}

/// Three demo customers: a loyal B2C regular, a B2B buyer, and a relative
/// record created through relation linking.
pub fn demo_customers() -> Vec<Customer> {
    vec![anna(), mikhail(), sofia()]
}

fn anna() -> Customer {
    Customer {
        id: CustomerId::new("cust-001"),
        name: "Anna Petrova".to_string(),
        email: "anna.petrova@email.com".to_string(),
        phone: Some("+1 (555) 123-4567".to_string()),
        birthday: NaiveDate::from_ymd_opt(1985, 6, 15),
        anniversary: NaiveDate::from_ymd_opt(2005, 8, 30),
        join_date: seed_date(2023, 1, 20),
        group: CustomerGroup::B2c,
        discount_level: Decimal::from(15),
        total_spent: Decimal::from(47_850),
        balance: Decimal::from(2_500),
        loyalty_points: 1_435,
        next_level_spend: Decimal::from(2_150),
        social: SocialMedia {
            instagram: Some("@anna_petrova".to_string()),
            telegram: None,
            facebook: Some("anna.petrova.7".to_string()),
        },
        preferences: Preferences {
            favorite_chocolates: vec![
                "Truffles".to_string(),
                "Ganache".to_string(),
                "Dark chocolate".to_string(),
            ],
            favorite_drink: Some("Cappuccino".to_string()),
            allergies: vec!["Nuts".to_string()],
        },
        relations: vec![
            Relation {
                name: "Mikhail Petrov".to_string(),
                relationship: "Spouse".to_string(),
                birthday: NaiveDate::from_ymd_opt(1982, 9, 12),
                customer_id: None,
            },
            Relation {
                name: "Sofia Petrova".to_string(),
                relationship: "Daughter".to_string(),
                birthday: NaiveDate::from_ymd_opt(2010, 4, 20),
                customer_id: Some(CustomerId::new("cust-003")),
            },
        ],
        orders: vec![
            PastOrder {
                id: "ord-123".to_string(),
                date: seed_date(2024, 12, 20),
                total: Decimal::from(1_240),
                items: vec![
                    item("Cognac Truffle", 6, 85),
                    item("Gift box Medium (12 chocolates)", 1, 730),
                ],
                payment: PaymentKind::Card,
            },
            PastOrder {
                id: "ord-122".to_string(),
                date: seed_date(2024, 12, 10),
                total: Decimal::from(850),
                items: vec![
                    item("Cognac Truffle", 2, 85),
                    item("Hazelnut Praline", 8, 75),
                    item("White Raspberry", 1, 80),
                ],
                payment: PaymentKind::Cash,
            },
        ],
        notes: Some("Prefers dark chocolate; buys gifts for the whole family.".to_string()),
    }
}

fn mikhail() -> Customer {
    Customer {
        id: CustomerId::new("cust-002"),
        name: "Mikhail Sidorov".to_string(),
        email: "m.sidorov@email.com".to_string(),
        phone: Some("+1 (555) 234-5678".to_string()),
        birthday: NaiveDate::from_ymd_opt(1978, 3, 22),
        anniversary: None,
        join_date: seed_date(2022, 11, 10),
        group: CustomerGroup::B2b,
        discount_level: Decimal::from(20),
        total_spent: Decimal::from(85_200),
        balance: Decimal::from(-150),
        loyalty_points: 2_840,
        next_level_spend: Decimal::ZERO,
        social: SocialMedia {
            instagram: Some("@mikhail_sid".to_string()),
            telegram: None,
            facebook: None,
        },
        preferences: Preferences {
            favorite_chocolates: vec![
                "Milk chocolate".to_string(),
                "Caramel".to_string(),
                "Pralines".to_string(),
            ],
            favorite_drink: Some("Espresso".to_string()),
            allergies: Vec::new(),
        },
        relations: Vec::new(),
        orders: vec![PastOrder {
            id: "ord-124".to_string(),
            date: seed_date(2024, 12, 22),
            total: Decimal::from(662),
            items: vec![item("Milk Caramel Heart", 4, 68), item("Almond Praline", 5, 78)],
            payment: PaymentKind::Cash,
        }],
        notes: Some("Orders corporate gifts each quarter.".to_string()),
    }
}

fn sofia() -> Customer {
    Customer {
        id: CustomerId::new("cust-003"),
        name: "Sofia Petrova".to_string(),
        email: "sofia.petrova@family.local".to_string(),
        phone: None,
        birthday: NaiveDate::from_ymd_opt(2010, 4, 20),
        anniversary: None,
        join_date: seed_date(2024, 6, 1),
        group: CustomerGroup::B2c,
        discount_level: Decimal::ZERO,
        total_spent: Decimal::ZERO,
        balance: Decimal::ZERO,
        loyalty_points: 0,
        next_level_spend: Decimal::from(10_000),
        social: SocialMedia::default(),
        preferences: Preferences::default(),
        relations: vec![Relation {
            name: "Anna Petrova".to_string(),
            relationship: "Mother".to_string(),
            birthday: NaiveDate::from_ymd_opt(1985, 6, 15),
            customer_id: Some(CustomerId::new("cust-001")),
        }],
        orders: Vec::new(),
        notes: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn chocolate(
    id: &str,
    name: &str,
    price: i64,
    category: Category,
    rating_tenths: i64,
    in_stock: bool,
    discount_pct: Option<i64>,
    allergens: &[&str],
    description: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Decimal::from(price),
        category,
        description: description.to_string(),
        rating: Decimal::new(rating_tenths, 1),
        in_stock,
        discount_pct: discount_pct.map(Decimal::from),
        allergens: allergens.iter().map(|allergen| allergen.to_string()).collect(),
    }
}

fn item(name: &str, quantity: u32, price: i64) -> PastOrderItem {
    PastOrderItem { name: name.to_string(), quantity, price: Decimal::from(price) }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
