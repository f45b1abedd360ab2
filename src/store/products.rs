use std::rc::Rc;

use storeadmin_shared::{EntityId, Product, ProductForm};
use tracing::warn;

use super::{StoreCell, remove_by_id, replace_by_id};
use crate::api::RestClient;
use crate::error::ApiResult;
use crate::request::HttpClient;

pub struct ProductsStore<C> {
    api: Rc<RestClient<C>>,
    state: StoreCell<Vec<Product>>,
}

impl<C: HttpClient> ProductsStore<C> {
    pub fn new(api: Rc<RestClient<C>>) -> Self {
        Self {
            api,
            state: StoreCell::new(),
        }
    }

    pub fn state(&self) -> &StoreCell<Vec<Product>> {
        &self.state
    }

    pub async fn fetch_products(&self) {
        self.state
            .refresh("products", self.api.product().get_all(), |list, items| {
                *list = items
            })
            .await;
    }

    pub async fn create_product(&self, form: ProductForm) -> ApiResult<Product> {
        self.state
            .settle(self.api.product().create(form), |list, created| {
                list.push(created.clone());
                created
            })
            .await
    }

    /// A form without `product_id` still goes out; it just matches nothing
    /// locally.
    pub async fn update_product(&self, form: ProductForm) -> ApiResult<Product> {
        let id = form.product_id.clone();
        if id.is_none() {
            warn!("updating a product without productId");
        }
        self.state
            .settle(self.api.product().update(form), |list, updated| {
                if let Some(id) = &id {
                    replace_by_id(list, id, updated.clone());
                }
                updated
            })
            .await
    }

    pub async fn delete_product(&self, id: EntityId) -> ApiResult<()> {
        let target = id.clone();
        self.state
            .settle(self.api.product().delete(id), |list, _| {
                remove_by_id(list, &target)
            })
            .await
    }
}
