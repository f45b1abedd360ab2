use std::rc::Rc;

use storeadmin_shared::{Checkout, EntityId, Fields};

use super::StoreCell;
use crate::api::RestClient;
use crate::error::ApiResult;
use crate::request::HttpClient;

/// Both order lists share one `loading` flag and one `error`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderLists {
    pub completed: Vec<Checkout>,
    pub ongoing: Vec<Checkout>,
}

pub struct OrdersStore<C> {
    api: Rc<RestClient<C>>,
    state: StoreCell<OrderLists>,
}

impl<C: HttpClient> OrdersStore<C> {
    pub fn new(api: Rc<RestClient<C>>) -> Self {
        Self {
            api,
            state: StoreCell::new(),
        }
    }

    pub fn state(&self) -> &StoreCell<OrderLists> {
        &self.state
    }

    pub async fn fetch_all_completed_orders(&self) {
        self.state
            .refresh(
                "completed orders",
                self.api.checkout().get_all_completed(),
                |lists, items| lists.completed = items,
            )
            .await;
    }

    pub async fn fetch_all_ongoing_orders(&self) {
        self.state
            .refresh(
                "ongoing orders",
                self.api.checkout().get_all_ongoing(),
                |lists, items| lists.ongoing = items,
            )
            .await;
    }

    /// Returns the order without touching either list.
    pub async fn fetch_order_by_id(&self, id: EntityId) -> ApiResult<Checkout> {
        self.state
            .settle(self.api.checkout().get_by_id(id), |_, order| order)
            .await
    }

    /// Lists are not patched; callers refetch to see the new state.
    pub async fn manage_checkout(&self, data: Fields) -> ApiResult<serde_json::Value> {
        self.state
            .settle(self.api.checkout().manage_checkout(data), |_, reply| reply)
            .await
    }
}
