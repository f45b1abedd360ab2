use crate::{
    Cart, CartProduct, Category, Checkout, EntityId, Fields, LoginCredentials, LoginResponse,
    Notification, Product, ProductForm, Transaction, User, Wallet,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned, de::IgnoredAny};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

// =========================================================
// Request Bodies
// =========================================================

/// A file attached to a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// Form field name, e.g. `image`.
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File(FilePart),
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } => name,
            FormPart::File(file) => &file.field,
        }
    }
}

/// Transport-neutral `multipart/form-data` payload.
///
/// The boundary is chosen by the transport when the form is encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, file: FilePart) -> Self {
        self.parts.push(FormPart::File(file));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path, relative to the API base URL.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Query parameters, in order. Values are not yet encoded.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Result<RequestBody, serde_json::Error> {
        Ok(RequestBody::Empty)
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// Parameterless collection read.
macro_rules! list_request {
    ($(#[$meta:meta])* $name:ident => $resp:ty, $path:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl ApiRequest for $name {
            type Response = $resp;
            const PATH: &'static str = $path;
            const METHOD: HttpMethod = HttpMethod::Get;
        }
    };
}

/// Request addressed by a single identifier in the query string.
macro_rules! id_request {
    ($(#[$meta:meta])* $name:ident => $resp:ty, $method:ident $path:literal, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub EntityId);

        impl ApiRequest for $name {
            type Response = $resp;
            const PATH: &'static str = $path;
            const METHOD: HttpMethod = HttpMethod::$method;

            fn query(&self) -> Vec<(&'static str, String)> {
                vec![($param, self.0.to_string())]
            }
        }
    };
}

/// Request carrying a JSON body.
macro_rules! json_request {
    ($(#[$meta:meta])* $name:ident($payload:ty) => $resp:ty, $method:ident $path:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub $payload);

        impl ApiRequest for $name {
            type Response = $resp;
            const PATH: &'static str = $path;
            const METHOD: HttpMethod = HttpMethod::$method;

            fn body(&self) -> Result<RequestBody, serde_json::Error> {
                Ok(RequestBody::Json(serde_json::to_value(&self.0)?))
            }
        }
    };
}

/// Request carrying a product form.
macro_rules! multipart_request {
    ($name:ident => $resp:ty, $method:ident $path:literal) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub ProductForm);

        impl ApiRequest for $name {
            type Response = $resp;
            const PATH: &'static str = $path;
            const METHOD: HttpMethod = HttpMethod::$method;

            fn body(&self) -> Result<RequestBody, serde_json::Error> {
                Ok(RequestBody::Multipart(self.0.to_multipart()))
            }
        }
    };
}

// --- Category ---

json_request!(CreateCategory(Fields) => Category, Post "/api/Category/create");
json_request!(UpdateCategory(Category) => Category, Put "/api/Category/update");
id_request!(DeleteCategory => IgnoredAny, Delete "/api/Category/delete", "id");
id_request!(GetCategory => Category, Get "/api/Category/get", "id");
list_request!(GetAllCategories => Vec<Category>, "/api/Category/getall");

// --- Product ---

multipart_request!(CreateProduct => Product, Post "/api/Product/create");
multipart_request!(UpdateProduct => Product, Put "/api/Product/update");
id_request!(DeleteProduct => IgnoredAny, Delete "/api/Product/delete", "id");
id_request!(GetProduct => Product, Get "/api/Product/get", "id");
list_request!(GetAllProducts => Vec<Product>, "/api/Product/getall");

// --- Cart ---

list_request!(GetAllCartProducts => Vec<CartProduct>, "/api/Cart/get_all_cart_products");
list_request!(GetAllCarts => Vec<Cart>, "/api/Cart/get_all_carts");

// --- Checkout ---

json_request!(
    /// Status changes and other edits of an order.
    ManageCheckout(Fields) => serde_json::Value, Put "/api/Checkout/manage_checkout"
);
id_request!(GetUserCheckout => Vec<Checkout>, Get "/api/Checkout/get_user_checkout", "userId");
list_request!(GetAllCompletedCheckouts => Vec<Checkout>, "/api/Checkout/get_all_completed_checkout");
list_request!(GetAllOngoingCheckouts => Vec<Checkout>, "/api/Checkout/get_all_ongoing_checkout");
id_request!(GetCheckoutById => Checkout, Get "/api/Checkout/get_checkout_by_id", "checkoutId");

// --- Notification ---

json_request!(CreateNotification(Fields) => Notification, Post "/api/Notification/create");

// --- Transaction ---

list_request!(GetAllTransactions => Vec<Transaction>, "/api/Transaction/getAll");
id_request!(GetUserTransactions => Vec<Transaction>, Get "/api/Transaction/getUsersTransactions", "userId");
id_request!(GetTransactionById => Transaction, Get "/api/Transaction/getTransactionById", "id");

// --- User ---

id_request!(GetUser => User, Get "/api/User/get", "id");
id_request!(GetUserWithContact => User, Get "/api/User/get-with-contact", "id");
list_request!(GetAllUsers => Vec<User>, "/api/User/getall");
json_request!(
    /// Exchanges admin credentials for a bearer token.
    Login(LoginCredentials) => LoginResponse, Post "/api/User/login"
);

// --- Wallet ---

id_request!(GetWallet => Wallet, Get "/api/Wallet/get", "id");
list_request!(GetAllWallets => Vec<Wallet>, "/api/Wallet/getall");
id_request!(GetUserWallets => Vec<Wallet>, Get "/api/Wallet/getuserAll", "userId");
