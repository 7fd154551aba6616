//! Checkout: payment validation, input shaping, and sale settlement.
//!
//! Card numbers and CVV codes are held in [`SecretString`] and never serialize
//! or print. A completed [`Sale`] records only the payment kind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::domain::customer::{CustomerId, PaymentKind};
use crate::pricing::{cash_change, OrderTotals};

pub const MIN_CARD_DIGITS: usize = 16;
pub const EXPIRY_LENGTH: usize = 5;
pub const MIN_CVV_DIGITS: usize = 3;
pub const MIN_TRANSFER_PHONE_CHARS: usize = 10;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("the cart is empty")]
    EmptyCart,
    #[error("card number must have at least {min} digits")]
    CardNumberTooShort { min: usize },
    #[error("card expiry must use the MM/YY format")]
    InvalidExpiry,
    #[error("card cvv must have at least {min} digits")]
    CvvTooShort { min: usize },
    #[error("cash tendered {tendered} does not cover the total {total}")]
    InsufficientCash { tendered: Decimal, total: Decimal },
    #[error("transfer phone number must have at least {min} characters")]
    TransferPhoneTooShort { min: usize },
}

/// How the customer pays. Card credentials stay redacted in logs and are
/// dropped once the sale settles.
#[derive(Clone, Debug)]
pub enum PaymentMethod {
    Card { number: SecretString, expiry: String, cvv: SecretString },
    Cash { tendered: Decimal },
    Transfer { phone: String },
}

impl PaymentMethod {
    pub fn card(
        number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self::Card {
            number: SecretString::from(number.into()),
            expiry: expiry.into(),
            cvv: SecretString::from(cvv.into()),
        }
    }

    pub fn cash(tendered: Decimal) -> Self {
        Self::Cash { tendered }
    }

    pub fn transfer(phone: impl Into<String>) -> Self {
        Self::Transfer { phone: phone.into() }
    }

    pub fn kind(&self) -> PaymentKind {
        match self {
            PaymentMethod::Card { .. } => PaymentKind::Card,
            PaymentMethod::Cash { .. } => PaymentKind::Cash,
            PaymentMethod::Transfer { .. } => PaymentKind::Transfer,
        }
    }
}

/// Keeps only digits, groups them in fours, and caps the number at 16 digits.
pub fn format_card_number(raw: &str) -> String {
    let digits: Vec<char> =
        raw.chars().filter(|ch| ch.is_ascii_digit()).take(MIN_CARD_DIGITS).collect();
    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shapes expiry input towards MM/YY. The slash appears as soon as two digits
/// are typed, so partial input like "12" renders as "12/".
pub fn format_expiry(raw: &str) -> String {
    let digits: String = raw.chars().filter(|ch| ch.is_ascii_digit()).take(4).collect();
    if digits.len() < 2 {
        return digits;
    }
    format!("{}/{}", &digits[..2], &digits[2..])
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(|ch| ch.is_ascii_digit()).count()
}

fn expiry_is_well_formed(expiry: &str) -> bool {
    let bytes = expiry.as_bytes();
    bytes.len() == EXPIRY_LENGTH
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b'/'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
}

/// Checks a payment method against the order total.
pub fn validate_payment(method: &PaymentMethod, total: Decimal) -> Result<(), CheckoutError> {
    match method {
        PaymentMethod::Card { number, expiry, cvv } => {
            if digit_count(number.expose_secret()) < MIN_CARD_DIGITS {
                return Err(CheckoutError::CardNumberTooShort { min: MIN_CARD_DIGITS });
            }
            if !expiry_is_well_formed(expiry) {
                return Err(CheckoutError::InvalidExpiry);
            }
            if digit_count(cvv.expose_secret()) < MIN_CVV_DIGITS {
                return Err(CheckoutError::CvvTooShort { min: MIN_CVV_DIGITS });
            }
            Ok(())
        }
        PaymentMethod::Cash { tendered } => {
            if *tendered < total {
                return Err(CheckoutError::InsufficientCash { tendered: *tendered, total });
            }
            Ok(())
        }
        PaymentMethod::Transfer { phone } => {
            if phone.chars().count() < MIN_TRANSFER_PHONE_CHARS {
                return Err(CheckoutError::TransferPhoneTooShort {
                    min: MIN_TRANSFER_PHONE_CHARS,
                });
            }
            Ok(())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleId(pub String);

impl SaleId {
    pub fn generate() -> Self {
        Self(format!("sale-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A checkout about to be settled.
#[derive(Clone, Debug)]
pub struct CheckoutRequest {
    pub payment: PaymentMethod,
    pub print_receipt: bool,
    pub note: Option<String>,
}

impl CheckoutRequest {
    pub fn new(payment: PaymentMethod) -> Self {
        Self { payment, print_receipt: true, note: None }
    }
}

/// A settled sale. This is the durable record of a checkout; payment
/// credentials are reduced to the payment kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    pub completed_at: DateTime<Utc>,
    pub customer_id: Option<CustomerId>,
    pub lines: Vec<CartLine>,
    pub totals: OrderTotals,
    pub payment: PaymentKind,
    pub change_due: Option<Decimal>,
    pub print_receipt: bool,
    pub note: Option<String>,
}

/// Validates the payment against the priced totals and produces the sale
/// record. Cash payments record the change due; a tendered amount below the
/// total is rejected before anything is recorded.
pub fn settle(
    cart: &Cart,
    customer_id: Option<CustomerId>,
    totals: OrderTotals,
    request: CheckoutRequest,
    completed_at: DateTime<Utc>,
) -> Result<Sale, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    validate_payment(&request.payment, totals.total)?;
    let change_due = match &request.payment {
        PaymentMethod::Cash { tendered } => Some(cash_change(*tendered, totals.total).change),
        _ => None,
    };
    Ok(Sale {
        id: SaleId::generate(),
        completed_at,
        customer_id,
        lines: cart.lines().to_vec(),
        totals,
        payment: request.payment.kind(),
        change_due,
        print_receipt: request.print_receipt,
        note: request.note,
    })
}
