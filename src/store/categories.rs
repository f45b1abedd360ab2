use std::rc::Rc;

use storeadmin_shared::{Category, EntityId, Fields};

use super::{StoreCell, remove_by_id, replace_by_id};
use crate::api::RestClient;
use crate::error::ApiResult;
use crate::request::HttpClient;

pub struct CategoriesStore<C> {
    api: Rc<RestClient<C>>,
    state: StoreCell<Vec<Category>>,
}

impl<C: HttpClient> CategoriesStore<C> {
    pub fn new(api: Rc<RestClient<C>>) -> Self {
        Self {
            api,
            state: StoreCell::new(),
        }
    }

    pub fn state(&self) -> &StoreCell<Vec<Category>> {
        &self.state
    }

    pub async fn fetch_categories(&self) {
        self.state
            .refresh("categories", self.api.category().get_all(), |list, items| {
                *list = items
            })
            .await;
    }

    /// Appends the server's copy of the new category.
    pub async fn create_category(&self, data: Fields) -> ApiResult<Category> {
        self.state
            .settle(self.api.category().create(data), |list, created| {
                list.push(created.clone());
                created
            })
            .await
    }

    /// Replaces the local entry matching `data.category_id`, if there is one.
    pub async fn update_category(&self, data: Category) -> ApiResult<Category> {
        let id = data.category_id.clone();
        self.state
            .settle(self.api.category().update(data), |list, updated| {
                replace_by_id(list, &id, updated.clone());
                updated
            })
            .await
    }

    pub async fn delete_category(&self, id: EntityId) -> ApiResult<()> {
        let target = id.clone();
        self.state
            .settle(self.api.category().delete(id), |list, _| {
                remove_by_id(list, &target)
            })
            .await
    }
}
