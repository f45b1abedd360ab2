//! REST client
//!
//! One configured client for the admin API. Every call goes through two
//! interceptors:
//! - request: reads the token from durable storage and adds a bearer header
//! - response: on 401, expires the session and calls the unauthorized hook
//!
//! The hook is supplied by the embedder, so the client itself knows nothing
//! about navigation.

use std::rc::Rc;

use serde::de::IgnoredAny;
use storeadmin_shared::protocol::{self, ApiRequest, RequestBody};
use storeadmin_shared::{
    CONTENT_TYPE_JSON, Cart, CartProduct, Category, Checkout, EntityId, Fields,
    HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, LoginCredentials, LoginResponse, Notification,
    Product, ProductForm, Transaction, User, Wallet,
};
use tracing::{debug, warn};
use url::Url;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpBody, HttpClient, HttpRequest, HttpResponse};
use crate::session::SessionStore;

type UnauthorizedHook = Box<dyn Fn()>;

pub struct RestClient<C> {
    base_url: String,
    transport: C,
    session: Rc<SessionStore>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<C: HttpClient> RestClient<C> {
    pub fn new(config: &AppConfig, transport: C, session: Rc<SessionStore>) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            transport,
            session,
            on_unauthorized: None,
        }
    }

    /// Called after the session has been expired by a 401 response.
    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Box::new(hook));
        self
    }

    pub fn session(&self) -> &Rc<SessionStore> {
        &self.session
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &[(&'static str, String)]) -> ApiResult<String> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&joined)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    /// Sends a typed request and decodes its response.
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let url = self.url(R::PATH, &req.query())?;
        let body = req
            .body()
            .map_err(|e| ApiError::Encode(format!("{}: {}", R::PATH, e)))?;

        let mut http = HttpRequest::new(&url, R::METHOD);
        http = match body {
            RequestBody::Empty => http.with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON),
            RequestBody::Json(value) => http
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(HttpBody::Text(value.to_string())),
            RequestBody::Multipart(form) => http.with_body(HttpBody::Multipart(form)),
        };

        let http = self.intercept_request(http);
        debug!(method = R::METHOD.as_str(), path = R::PATH, "api request");

        let response = self.transport.send(http).await?;
        let response = self.intercept_response(response)?;
        response.json::<R::Response>()
    }

    fn intercept_request(&self, req: HttpRequest) -> HttpRequest {
        match self.session.persisted_token() {
            Some(token) => req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token)),
            None => req,
        }
    }

    fn intercept_response(&self, resp: HttpResponse) -> ApiResult<HttpResponse> {
        if resp.is_success() {
            return Ok(resp);
        }
        let err = ApiError::from_status(resp.status, resp.body);
        if err.is_unauthorized() {
            warn!("api rejected the session token, signing out");
            self.session.expire();
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        }
        Err(err)
    }

    // --- Call catalog ---

    pub fn category(&self) -> CategoryApi<'_, C> {
        CategoryApi { client: self }
    }

    pub fn product(&self) -> ProductApi<'_, C> {
        ProductApi { client: self }
    }

    pub fn cart(&self) -> CartApi<'_, C> {
        CartApi { client: self }
    }

    pub fn checkout(&self) -> CheckoutApi<'_, C> {
        CheckoutApi { client: self }
    }

    pub fn notification(&self) -> NotificationApi<'_, C> {
        NotificationApi { client: self }
    }

    pub fn transaction(&self) -> TransactionApi<'_, C> {
        TransactionApi { client: self }
    }

    pub fn user(&self) -> UserApi<'_, C> {
        UserApi { client: self }
    }

    pub fn wallet(&self) -> WalletApi<'_, C> {
        WalletApi { client: self }
    }
}

pub struct CategoryApi<'a, C> {
    client: &'a RestClient<C>,
}

impl<C: HttpClient> CategoryApi<'_, C> {
    pub async fn create(&self, data: Fields) -> ApiResult<Category> {
        self.client.send(&protocol::CreateCategory(data)).await
    }

    pub async fn update(&self, data: Category) -> ApiResult<Category> {
        self.client.send(&protocol::UpdateCategory(data)).await
    }

    pub async fn delete(&self, id: EntityId) -> ApiResult<IgnoredAny> {
        self.client.send(&protocol::DeleteCategory(id)).await
    }

    pub async fn get(&self, id: EntityId) -> ApiResult<Category> {
        self.client.send(&protocol::GetCategory(id)).await
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Category>> {
        self.client.send(&protocol::GetAllCategories).await
    }
}

pub struct ProductApi<'a, C> {
    client: &'a RestClient<C>,
}

impl<C: HttpClient> ProductApi<'_, C> {
    pub async fn create(&self, form: ProductForm) -> ApiResult<Product> {
        self.client.send(&protocol::CreateProduct(form)).await
    }

    pub async fn update(&self, form: ProductForm) -> ApiResult<Product> {
        self.client.send(&protocol::UpdateProduct(form)).await
    }

    pub async fn delete(&self, id: EntityId) -> ApiResult<IgnoredAny> {
        self.client.send(&protocol::DeleteProduct(id)).await
    }

    pub async fn get(&self, id: EntityId) -> ApiResult<Product> {
        self.client.send(&protocol::GetProduct(id)).await
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Product>> {
        self.client.send(&protocol::GetAllProducts).await
    }
}

pub struct CartApi<'a, C> {
    client: &'a RestClient<C>,
}

impl<C: HttpClient> CartApi<'_, C> {
    pub async fn get_all_cart_products(&self) -> ApiResult<Vec<CartProduct>> {
        self.client.send(&protocol::GetAllCartProducts).await
    }

    pub async fn get_all_carts(&self) -> ApiResult<Vec<Cart>> {
        self.client.send(&protocol::GetAllCarts).await
    }
}

pub struct CheckoutApi<'a, C> {
    client: &'a RestClient<C>,
}

impl<C: HttpClient> CheckoutApi<'_, C> {
    pub async fn manage_checkout(&self, data: Fields) -> ApiResult<serde_json::Value> {
        self.client.send(&protocol::ManageCheckout(data)).await
    }

    pub async fn get_user_checkout(&self, user_id: EntityId) -> ApiResult<Vec<Checkout>> {
        self.client.send(&protocol::GetUserCheckout(user_id)).await
    }

    pub async fn get_all_completed(&self) -> ApiResult<Vec<Checkout>> {
        self.client.send(&protocol::GetAllCompletedCheckouts).await
    }

    pub async fn get_all_ongoing(&self) -> ApiResult<Vec<Checkout>> {
        self.client.send(&protocol::GetAllOngoingCheckouts).await
    }

    pub async fn get_by_id(&self, id: EntityId) -> ApiResult<Checkout> {
        self.client.send(&protocol::GetCheckoutById(id)).await
    }
}

pub struct NotificationApi<'a, C> {
    client: &'a RestClient<C>,
}

impl<C: HttpClient> NotificationApi<'_, C> {
    pub async fn create(&self, data: Fields) -> ApiResult<Notification> {
        self.client.send(&protocol::CreateNotification(data)).await
    }
}

pub struct TransactionApi<'a, C> {
    client: &'a RestClient<C>,
}

impl<C: HttpClient> TransactionApi<'_, C> {
    pub async fn get_all(&self) -> ApiResult<Vec<Transaction>> {
        self.client.send(&protocol::GetAllTransactions).await
    }

    pub async fn get_user_transactions(&self, user_id: EntityId) -> ApiResult<Vec<Transaction>> {
        self.client.send(&protocol::GetUserTransactions(user_id)).await
    }

    pub async fn get_by_id(&self, id: EntityId) -> ApiResult<Transaction> {
        self.client.send(&protocol::GetTransactionById(id)).await
    }
}

pub struct UserApi<'a, C> {
    client: &'a RestClient<C>,
}

impl<C: HttpClient> UserApi<'_, C> {
    pub async fn get(&self, id: EntityId) -> ApiResult<User> {
        self.client.send(&protocol::GetUser(id)).await
    }

    pub async fn get_with_contact(&self, id: EntityId) -> ApiResult<User> {
        self.client.send(&protocol::GetUserWithContact(id)).await
    }

    pub async fn get_all(&self) -> ApiResult<Vec<User>> {
        self.client.send(&protocol::GetAllUsers).await
    }

    pub async fn login(&self, credentials: LoginCredentials) -> ApiResult<LoginResponse> {
        self.client.send(&protocol::Login(credentials)).await
    }
}

pub struct WalletApi<'a, C> {
    client: &'a RestClient<C>,
}

impl<C: HttpClient> WalletApi<'_, C> {
    pub async fn get(&self, id: EntityId) -> ApiResult<Wallet> {
        self.client.send(&protocol::GetWallet(id)).await
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Wallet>> {
        self.client.send(&protocol::GetAllWallets).await
    }

    pub async fn get_user_all(&self, user_id: EntityId) -> ApiResult<Vec<Wallet>> {
        self.client.send(&protocol::GetUserWallets(user_id)).await
    }
}

#[cfg(test)]
mod tests;
