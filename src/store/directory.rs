//! Read-only stores behind the carts, transactions, users and wallets views.

use std::rc::Rc;

use storeadmin_shared::{Cart, CartProduct, EntityId, Transaction, User, Wallet};

use super::StoreCell;
use crate::api::RestClient;
use crate::error::ApiResult;
use crate::request::HttpClient;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartsData {
    pub carts: Vec<Cart>,
    pub cart_products: Vec<CartProduct>,
}

pub struct CartsStore<C> {
    api: Rc<RestClient<C>>,
    state: StoreCell<CartsData>,
}

impl<C: HttpClient> CartsStore<C> {
    pub fn new(api: Rc<RestClient<C>>) -> Self {
        Self {
            api,
            state: StoreCell::new(),
        }
    }

    pub fn state(&self) -> &StoreCell<CartsData> {
        &self.state
    }

    pub async fn fetch_carts(&self) {
        self.state
            .refresh("carts", self.api.cart().get_all_carts(), |data, items| {
                data.carts = items
            })
            .await;
    }

    pub async fn fetch_cart_products(&self) {
        self.state
            .refresh(
                "cart products",
                self.api.cart().get_all_cart_products(),
                |data, items| data.cart_products = items,
            )
            .await;
    }
}

pub struct TransactionsStore<C> {
    api: Rc<RestClient<C>>,
    state: StoreCell<Vec<Transaction>>,
}

impl<C: HttpClient> TransactionsStore<C> {
    pub fn new(api: Rc<RestClient<C>>) -> Self {
        Self {
            api,
            state: StoreCell::new(),
        }
    }

    pub fn state(&self) -> &StoreCell<Vec<Transaction>> {
        &self.state
    }

    pub async fn fetch_transactions(&self) {
        self.state
            .refresh("transactions", self.api.transaction().get_all(), |list, items| {
                *list = items
            })
            .await;
    }

    /// Narrows the list to one user's transactions.
    pub async fn fetch_user_transactions(&self, user_id: EntityId) {
        self.state
            .refresh(
                "user transactions",
                self.api.transaction().get_user_transactions(user_id),
                |list, items| *list = items,
            )
            .await;
    }

    pub async fn fetch_transaction_by_id(&self, id: EntityId) -> ApiResult<Transaction> {
        self.state
            .settle(self.api.transaction().get_by_id(id), |_, found| found)
            .await
    }
}

pub struct UsersStore<C> {
    api: Rc<RestClient<C>>,
    state: StoreCell<Vec<User>>,
}

impl<C: HttpClient> UsersStore<C> {
    pub fn new(api: Rc<RestClient<C>>) -> Self {
        Self {
            api,
            state: StoreCell::new(),
        }
    }

    pub fn state(&self) -> &StoreCell<Vec<User>> {
        &self.state
    }

    pub async fn fetch_users(&self) {
        self.state
            .refresh("users", self.api.user().get_all(), |list, items| {
                *list = items
            })
            .await;
    }

    /// Profile including contact details; the list is left alone.
    pub async fn fetch_user_with_contact(&self, id: EntityId) -> ApiResult<User> {
        self.state
            .settle(self.api.user().get_with_contact(id), |_, user| user)
            .await
    }
}

pub struct WalletsStore<C> {
    api: Rc<RestClient<C>>,
    state: StoreCell<Vec<Wallet>>,
}

impl<C: HttpClient> WalletsStore<C> {
    pub fn new(api: Rc<RestClient<C>>) -> Self {
        Self {
            api,
            state: StoreCell::new(),
        }
    }

    pub fn state(&self) -> &StoreCell<Vec<Wallet>> {
        &self.state
    }

    pub async fn fetch_wallets(&self) {
        self.state
            .refresh("wallets", self.api.wallet().get_all(), |list, items| {
                *list = items
            })
            .await;
    }

    pub async fn fetch_user_wallets(&self, user_id: EntityId) {
        self.state
            .refresh(
                "user wallets",
                self.api.wallet().get_user_all(user_id),
                |list, items| *list = items,
            )
            .await;
    }
}
