use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a registered customer.
///
/// Wraps a UUID to prevent mixing customer ids up with other
/// UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Creates a new random customer ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a customer ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CustomerId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// The owner of a cart.
///
/// Requests without a resolved customer identity all share the single
/// [`ShopperId::Anonymous`] bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopperId {
    /// A resolved customer.
    Customer(CustomerId),

    /// The shared bucket for unidentified requests.
    Anonymous,
}

impl ShopperId {
    /// Returns the customer ID when the shopper is identified.
    pub fn customer(&self) -> Option<CustomerId> {
        match self {
            ShopperId::Customer(id) => Some(*id),
            ShopperId::Anonymous => None,
        }
    }
}

impl From<CustomerId> for ShopperId {
    fn from(id: CustomerId) -> Self {
        Self::Customer(id)
    }
}

impl std::fmt::Display for ShopperId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShopperId::Customer(id) => write!(f, "{id}"),
            ShopperId::Anonymous => write!(f, "anonymous"),
        }
    }
}

/// Product identifier (SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Order number assigned by the ledger.
///
/// Order numbers are strictly increasing over the lifetime of a ledger and
/// are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Creates an order ID from a raw number.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw order number.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_id_new_creates_unique_ids() {
        let id1 = CustomerId::new();
        let id2 = CustomerId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn customer_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = CustomerId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn shopper_id_customer_lookup() {
        let customer = CustomerId::new();
        assert_eq!(ShopperId::Customer(customer).customer(), Some(customer));
        assert_eq!(ShopperId::Anonymous.customer(), None);
    }

    #[test]
    fn shopper_id_display() {
        assert_eq!(ShopperId::Anonymous.to_string(), "anonymous");
        let customer = CustomerId::new();
        assert_eq!(
            ShopperId::Customer(customer).to_string(),
            customer.to_string()
        );
    }

    #[test]
    fn product_id_string_conversion() {
        let id = ProductId::new("PRF-001");
        assert_eq!(id.as_str(), "PRF-001");

        let id2: ProductId = "PRF-002".into();
        assert_eq!(id2.as_str(), "PRF-002");
    }

    #[test]
    fn order_id_ordering() {
        assert!(OrderId::new(2) > OrderId::new(1));
        assert_eq!(OrderId::new(7).as_u64(), 7);
    }

    #[test]
    fn order_id_serialization_is_transparent() {
        let json = serde_json::to_string(&OrderId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderId::new(42));
    }
}
