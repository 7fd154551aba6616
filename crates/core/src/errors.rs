use thiserror::Error;

use crate::cart::CartError;
use crate::checkout::CheckoutError;
use crate::directory::DirectoryError;
use crate::giftbox::ComposerError;
use crate::settings::SettingsError;

/// Any rule violation the POS core can report.
///
/// Each module owns its error enum; this aggregates them for callers that
/// drive the whole app state. Every variant is recoverable: the operation is
/// refused and the state stays as it was.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Composer(#[from] ComposerError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl DomainError {
    /// A short operator-facing message. The full detail stays in `Display`
    /// for logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Cart(_) => "The cart could not be updated.",
            Self::Composer(_) => "The gift box could not be updated.",
            Self::Checkout(_) => "Payment details are incomplete or invalid.",
            Self::Directory(_) => "The customer record could not be saved.",
            Self::Settings(_) => "Settings are invalid and were not applied.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineId;

    #[test]
    fn module_errors_convert_transparently() {
        let cart_error = CartError::UnknownLine { line_id: LineId::new("giftbox-1") };
        let domain: DomainError = cart_error.clone().into();

        assert_eq!(domain, DomainError::Cart(cart_error.clone()));
        assert_eq!(domain.to_string(), cart_error.to_string());
    }

    #[test]
    fn user_messages_stay_free_of_detail() {
        let domain = DomainError::Checkout(CheckoutError::EmptyCart);

        assert_eq!(domain.user_message(), "Payment details are incomplete or invalid.");
        assert_ne!(domain.user_message(), domain.to_string());
    }
}
