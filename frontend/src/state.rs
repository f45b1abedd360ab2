//! Application services and their reactive mirrors.
//!
//! The core stores live behind `Rc` and notify through listeners. Each one
//! is mirrored into a signal here once, at startup, so views only ever read
//! signals and call store operations.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use storeadmin::store::{
    CartsData, CartsStore, CategoriesStore, ListSnapshot, NotificationsStore, OrderLists,
    OrdersStore, ProductsStore, TransactionsStore, UsersStore, WalletsStore,
};
use storeadmin::{AppConfig, AppRoute, RestClient, Session, SessionStore, Snapshot, StoreCell};
use storeadmin_shared::{Category, Notification, Product, Transaction, User, Wallet};

use crate::web::{BrowserStorage, FetchClient, hard_redirect};

pub type Api = RestClient<FetchClient>;

pub struct Services {
    pub session: Rc<SessionStore>,
    pub api: Rc<Api>,
    pub categories: CategoriesStore<FetchClient>,
    pub products: ProductsStore<FetchClient>,
    pub orders: OrdersStore<FetchClient>,
    pub notifications: NotificationsStore<FetchClient>,
    pub carts: CartsStore<FetchClient>,
    pub transactions: TransactionsStore<FetchClient>,
    pub users: UsersStore<FetchClient>,
    pub wallets: WalletsStore<FetchClient>,
}

impl Services {
    /// Restores the persisted session and wires the 401 redirect.
    fn new(config: &AppConfig) -> Self {
        let session = Rc::new(SessionStore::restore(Rc::new(BrowserStorage)));

        let api = Rc::new(
            RestClient::new(config, FetchClient, Rc::clone(&session))
                .on_unauthorized(|| hard_redirect(&AppRoute::auth_failure_redirect())),
        );

        Self {
            categories: CategoriesStore::new(Rc::clone(&api)),
            products: ProductsStore::new(Rc::clone(&api)),
            orders: OrdersStore::new(Rc::clone(&api)),
            notifications: NotificationsStore::new(Rc::clone(&api)),
            carts: CartsStore::new(Rc::clone(&api)),
            transactions: TransactionsStore::new(Rc::clone(&api)),
            users: UsersStore::new(Rc::clone(&api)),
            wallets: WalletsStore::new(Rc::clone(&api)),
            session,
            api,
        }
    }
}

fn mirror<S>(cell: &StoreCell<S>) -> ReadSignal<Snapshot<S>>
where
    S: Clone + Default + Send + Sync + 'static,
{
    let (read, write) = signal(cell.snapshot());
    cell.subscribe(move |snap| write.set(snap.clone()));
    read
}

/// Everything a view needs, shared through context.
#[derive(Clone, Copy)]
pub struct AppState {
    services: StoredValue<Rc<Services>, LocalStorage>,
    pub session: ReadSignal<Session>,
    pub categories: ReadSignal<ListSnapshot<Category>>,
    pub products: ReadSignal<ListSnapshot<Product>>,
    pub orders: ReadSignal<Snapshot<OrderLists>>,
    pub notifications: ReadSignal<ListSnapshot<Notification>>,
    pub carts: ReadSignal<Snapshot<CartsData>>,
    pub transactions: ReadSignal<ListSnapshot<Transaction>>,
    pub users: ReadSignal<ListSnapshot<User>>,
    pub wallets: ReadSignal<ListSnapshot<Wallet>>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let services = Services::new(config);

        let (session, set_session) = signal(services.session.snapshot());
        services
            .session
            .subscribe(move |current| set_session.set(current.clone()));

        Self {
            session,
            categories: mirror(services.categories.state()),
            products: mirror(services.products.state()),
            orders: mirror(services.orders.state()),
            notifications: mirror(services.notifications.state()),
            carts: mirror(services.carts.state()),
            transactions: mirror(services.transactions.state()),
            users: mirror(services.users.state()),
            wallets: mirror(services.wallets.state()),
            services: StoredValue::new_local(Rc::new(services)),
        }
    }

    pub fn services(&self) -> Rc<Services> {
        self.services.get_value()
    }

    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(Session::is_authenticated))
    }

    /// Runs a store operation in the background.
    pub fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce(Rc<Services>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(op(self.services()));
    }
}

pub fn provide_app_state(config: &AppConfig) -> AppState {
    let state = AppState::new(config);
    provide_context(state);
    state
}

pub fn use_app() -> AppState {
    use_context::<AppState>().expect("AppState should be provided")
}
