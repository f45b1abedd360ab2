use serde::{Deserialize, Serialize};
use std::fmt;

pub mod protocol;

use protocol::{FilePart, MultipartForm};

// =========================================================
// Constants
// =========================================================

/// Storage key for the bearer token.
pub const STORAGE_TOKEN_KEY: &str = "token";
/// Storage key for the serialized user profile.
pub const STORAGE_USER_KEY: &str = "user";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Server-defined fields of a record, kept verbatim.
pub type Fields = serde_json::Map<String, serde_json::Value>;

// =========================================================
// Identifiers
// =========================================================

/// Identifier of a server record.
///
/// The API mixes numeric and textual keys, so both are accepted as-is.
/// Equality is strict: `7` and `"7"` are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(v) => write!(f, "{}", v),
            EntityId::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for EntityId {
    fn from(v: i64) -> Self {
        EntityId::Int(v)
    }
}

impl From<&str> for EntityId {
    fn from(v: &str) -> Self {
        EntityId::Text(v.to_string())
    }
}

impl From<String> for EntityId {
    fn from(v: String) -> Self {
        EntityId::Text(v)
    }
}

impl EntityId {
    /// Parses a route or form segment, preferring the numeric form.
    pub fn parse(raw: &str) -> Self {
        raw.parse::<i64>()
            .map(EntityId::Int)
            .unwrap_or_else(|_| EntityId::Text(raw.to_string()))
    }
}

/// A record the client reconciles by identifier.
pub trait Entity: Clone {
    /// Wire name of the identifier field, e.g. `categoryId`.
    const ID_FIELD: &'static str;

    fn id(&self) -> &EntityId;
}

// =========================================================
// Domain Models
// =========================================================

macro_rules! entity {
    ($(#[$meta:meta])* $name:ident { $field:ident: $wire:literal }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(rename = $wire)]
            pub $field: EntityId,
            #[serde(flatten)]
            pub fields: Fields,
        }

        impl Entity for $name {
            const ID_FIELD: &'static str = $wire;

            fn id(&self) -> &EntityId {
                &self.$field
            }
        }
    };
}

entity!(
    /// Product category.
    Category { category_id: "categoryId" }
);
entity!(Product { product_id: "productId" });
entity!(Cart { cart_id: "cartId" });
entity!(
    /// An order. The API calls orders checkouts.
    Checkout { checkout_id: "checkoutId" }
);
entity!(Transaction { transaction_id: "transactionId" });
entity!(User { user_id: "userId" });
entity!(Wallet { wallet_id: "walletId" });
entity!(Notification { notification_id: "notificationId" });

/// A line of some cart. The API exposes no stable key for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartProduct {
    pub fields: Fields,
}

// =========================================================
// Session Models
// =========================================================

/// Profile of the signed-in administrator.
///
/// The dashboard only displays it, so the server shape is kept opaque.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(pub serde_json::Value);

impl UserProfile {
    /// Best-effort label for the navbar.
    pub fn display_name(&self) -> Option<&str> {
        ["name", "userName", "fullName", "email"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(|v| v.as_str()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: UserProfile,
}

// =========================================================
// Form Payloads
// =========================================================

/// Product payload, sent as `multipart/form-data`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    /// Present on update, absent on create.
    pub product_id: Option<EntityId>,
    pub fields: Vec<(String, String)>,
    pub image: Option<FilePart>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.product_id = Some(id.into());
        self
    }

    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn with_image(mut self, image: FilePart) -> Self {
        self.image = Some(image);
        self
    }

    pub fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new();
        if let Some(id) = &self.product_id {
            form = form.text(Product::ID_FIELD, id.to_string());
        }
        for (name, value) in &self.fields {
            form = form.text(name, value.clone());
        }
        if let Some(image) = &self.image {
            form = form.file(image.clone());
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entity_keeps_unknown_fields() {
        let raw = json!({"categoryId": 7, "name": "Books", "parentId": null});
        let category: Category = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(category.id(), &EntityId::Int(7));
        assert_eq!(category.fields.get("name"), Some(&json!("Books")));
        assert_eq!(serde_json::to_value(&category).unwrap(), raw);
    }

    #[test]
    fn entity_id_accepts_text_keys() {
        let user: User = serde_json::from_value(json!({"userId": "a1b2"})).unwrap();
        assert_eq!(user.user_id, EntityId::from("a1b2"));
        assert_ne!(EntityId::from(7), EntityId::from("7"));
        assert_eq!(EntityId::parse("42"), EntityId::Int(42));
        assert_eq!(EntityId::parse("a-1"), EntityId::from("a-1"));
    }

    #[test]
    fn product_form_carries_id_on_update() {
        let form = ProductForm::new()
            .with_id(3)
            .with_field("name", "Pen")
            .to_multipart();

        let names: Vec<&str> = form.parts.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["productId", "name"]);
    }

    #[test]
    fn profile_display_name_falls_back_to_email() {
        let profile = UserProfile(json!({"email": "admin@shop.test"}));
        assert_eq!(profile.display_name(), Some("admin@shop.test"));
        assert_eq!(UserProfile::default().display_name(), None);
    }
}
