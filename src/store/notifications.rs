use std::rc::Rc;

use storeadmin_shared::{Fields, Notification};

use super::StoreCell;
use crate::api::RestClient;
use crate::error::ApiResult;
use crate::request::HttpClient;

/// Notifications sent during this visit, newest first. The API has no
/// listing endpoint.
pub struct NotificationsStore<C> {
    api: Rc<RestClient<C>>,
    state: StoreCell<Vec<Notification>>,
}

impl<C: HttpClient> NotificationsStore<C> {
    pub fn new(api: Rc<RestClient<C>>) -> Self {
        Self {
            api,
            state: StoreCell::new(),
        }
    }

    pub fn state(&self) -> &StoreCell<Vec<Notification>> {
        &self.state
    }

    pub async fn create_notification(&self, data: Fields) -> ApiResult<Notification> {
        self.state
            .settle(self.api.notification().create(data), |list, sent| {
                list.insert(0, sent.clone());
                sent
            })
            .await
    }
}
