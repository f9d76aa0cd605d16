//! Value objects for orders: shipping address, payment method, order lines.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;

use super::CheckoutError;

/// Destination address for an order. All five fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Checks structural completeness: every field non-blank.
    ///
    /// The request layer validates too, but the core re-checks before
    /// anything is persisted.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let fields = [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("zip_code", &self.zip_code),
            ("country", &self.country),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(CheckoutError::InvalidShippingAddress { field });
            }
        }
        Ok(())
    }
}

/// How the customer chose to pay.
///
/// Recorded as an opaque tag; no payment processing happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    /// Returns the wire name of the payment method.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    /// Parses a wire payment method name.
    pub fn parse(value: &str) -> Result<Self, CheckoutError> {
        match value {
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "paypal" => Ok(PaymentMethod::Paypal),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            other => Err(CheckoutError::InvalidPaymentMethod {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable copy of a cart line taken at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product this line refers to.
    pub product_id: ProductId,

    /// Product name as it was in the cart.
    pub name: String,

    /// Unit price as snapshotted in the cart, not re-read from the catalog.
    pub unit_price: Money,

    /// Units ordered.
    pub quantity: u32,

    /// Product image URL.
    pub image: String,
}

impl OrderItem {
    /// Copies a cart line into an order line.
    pub fn from_cart_item(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            image: item.image.clone(),
        }
    }

    /// Returns unit price times quantity for this line.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}
