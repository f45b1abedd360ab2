use super::*;
use crate::api::RestClient;
use crate::config::AppConfig;
use crate::request::{GatedHttpClient, HttpClient, MockHttpClient};
use crate::session::SessionStore;
use crate::storage::{KeyValueStorage, MemoryStorage};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use storeadmin_shared::{Category, EntityId, Fields, Product, ProductForm, UserProfile};

// =========================================================
// Shared fixtures
// =========================================================

const BASE: &str = "http://api.test";

struct Harness<C> {
    storage: Rc<MemoryStorage>,
    redirects: Rc<Cell<u32>>,
    api: Rc<RestClient<C>>,
}

fn harness<C: HttpClient>(transport: C) -> Harness<C> {
    let storage = Rc::new(MemoryStorage::new());
    let session = Rc::new(SessionStore::new(storage.clone()));
    session.login(UserProfile(json!({"name": "Ada"})), "tok-1");
    let redirects = Rc::new(Cell::new(0));
    let counter = Rc::clone(&redirects);
    let api = RestClient::new(&AppConfig::new(BASE), transport, session)
        .on_unauthorized(move || counter.set(counter.get() + 1));
    Harness {
        storage,
        redirects,
        api: Rc::new(api),
    }
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn category(id: i64, name: &str) -> Category {
    serde_json::from_value(json!({"categoryId": id, "name": name})).unwrap()
}

fn fields(value: serde_json::Value) -> Fields {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Fields::new(),
    }
}

/// Records `(loading, error)` on every change.
fn record<S: Clone + Default + 'static>(
    cell: &StoreCell<S>,
) -> Rc<std::cell::RefCell<Vec<(bool, Option<String>)>>> {
    let log = Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    cell.subscribe(move |snap| sink.borrow_mut().push((snap.loading, snap.error.clone())));
    log
}

async fn seed_categories(h: &Harness<MockHttpClient>, store: &CategoriesStore<MockHttpClient>) {
    h.api.transport().mock_response(
        &url("/api/Category/getall"),
        200,
        json!([
            {"categoryId": 1, "name": "Books"},
            {"categoryId": 2, "name": "Games"},
            {"categoryId": 1, "name": "Books (dup)"}
        ]),
    );
    store.fetch_categories().await;
}

// =========================================================
// Categories
// =========================================================

#[tokio::test]
async fn create_category_appends_server_copy() {
    let h = harness(MockHttpClient::new());
    let store = CategoriesStore::new(h.api.clone());
    seed_categories(&h, &store).await;
    h.api.transport().mock_response(
        &url("/api/Category/create"),
        200,
        json!({"categoryId": 7, "name": "Books"}),
    );

    let created = store
        .create_category(fields(json!({"name": "Books"})))
        .await
        .unwrap();

    let snap = store.state().snapshot();
    assert_eq!(created, category(7, "Books"));
    assert_eq!(snap.data.len(), 4);
    assert_eq!(snap.data.last(), Some(&category(7, "Books")));
    assert_eq!(
        serde_json::to_value(snap.data.last().unwrap()).unwrap(),
        json!({"categoryId": 7, "name": "Books"})
    );
}

#[tokio::test]
async fn fetch_failure_is_recorded_not_raised() {
    let h = harness(MockHttpClient::new());
    let store = CategoriesStore::new(h.api.clone());
    seed_categories(&h, &store).await;
    h.api
        .transport()
        .mock_response(&url("/api/Category/getall"), 500, json!("boom"));

    store.fetch_categories().await;

    let snap = store.state().snapshot();
    assert!(!snap.loading);
    assert_eq!(
        snap.error.as_deref(),
        Some("Request failed with status code 500")
    );
    assert_eq!(snap.data.len(), 3);
}

#[tokio::test]
async fn mutation_failure_is_recorded_and_raised() {
    let h = harness(MockHttpClient::new());
    let store = CategoriesStore::new(h.api.clone());
    h.api
        .transport()
        .mock_unreachable(&url("/api/Category/create"));

    let err = store
        .create_category(fields(json!({"name": "X"})))
        .await
        .unwrap_err();

    let snap = store.state().snapshot();
    assert_eq!(snap.error, Some(err.to_string()));
    assert!(!snap.loading);
    assert!(snap.data.is_empty());
}

#[tokio::test]
async fn loading_and_error_follow_the_lifecycle() {
    let h = harness(MockHttpClient::new());
    let store = CategoriesStore::new(h.api.clone());
    let log = record(store.state());

    // Unmocked URL answers 404.
    store.fetch_categories().await;
    h.api
        .transport()
        .mock_response(&url("/api/Category/getall"), 200, json!([]));
    store.fetch_categories().await;

    let fail = Some("Request failed with status code 404".to_string());
    assert_eq!(
        *log.borrow(),
        vec![(true, None), (false, fail), (true, None), (false, None)]
    );
}

#[tokio::test]
async fn update_replaces_matching_entry_in_place() {
    let h = harness(MockHttpClient::new());
    let store = CategoriesStore::new(h.api.clone());
    seed_categories(&h, &store).await;
    h.api.transport().mock_response(
        &url("/api/Category/update"),
        200,
        json!({"categoryId": 2, "name": "Board Games"}),
    );

    store
        .update_category(category(2, "Board Games"))
        .await
        .unwrap();

    let names: Vec<String> = store.state().with(|snap| {
        snap.data
            .iter()
            .map(|c| c.fields["name"].as_str().unwrap_or_default().to_string())
            .collect()
    });
    assert_eq!(names, vec!["Books", "Board Games", "Books (dup)"]);
}

#[tokio::test]
async fn update_with_unknown_id_leaves_list_unchanged() {
    let h = harness(MockHttpClient::new());
    let store = CategoriesStore::new(h.api.clone());
    seed_categories(&h, &store).await;
    let before = store.state().snapshot().data;
    h.api.transport().mock_response(
        &url("/api/Category/update"),
        200,
        json!({"categoryId": 99, "name": "Ghost"}),
    );

    let updated = store.update_category(category(99, "Ghost")).await.unwrap();

    assert_eq!(updated, category(99, "Ghost"));
    let snap = store.state().snapshot();
    assert_eq!(snap.data, before);
    assert_eq!(snap.error, None);
}

#[tokio::test]
async fn delete_removes_exactly_the_matching_entries() {
    let h = harness(MockHttpClient::new());
    let store = CategoriesStore::new(h.api.clone());
    seed_categories(&h, &store).await;
    h.api
        .transport()
        .mock_response(&url("/api/Category/delete?id=1"), 200, json!(null));

    store.delete_category(EntityId::from(1)).await.unwrap();

    assert_eq!(store.state().snapshot().data, vec![category(2, "Games")]);
}

#[tokio::test]
async fn failed_delete_keeps_the_list() {
    let h = harness(MockHttpClient::new());
    let store = CategoriesStore::new(h.api.clone());
    seed_categories(&h, &store).await;

    let err = store.delete_category(EntityId::from(2)).await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert_eq!(store.state().snapshot().data.len(), 3);
}

// =========================================================
// Products
// =========================================================

#[tokio::test]
async fn product_update_matches_on_form_id() {
    let h = harness(MockHttpClient::new());
    let store = ProductsStore::new(h.api.clone());
    h.api.transport().mock_response(
        &url("/api/Product/getall"),
        200,
        json!([{"productId": 3, "name": "Pen", "price": 2}]),
    );
    h.api.transport().mock_response(
        &url("/api/Product/update"),
        200,
        json!({"productId": 3, "name": "Pen", "price": 3}),
    );
    store.fetch_products().await;

    let form = ProductForm::new().with_id(3).with_field("price", "3");
    store.update_product(form).await.unwrap();

    let expected: Product =
        serde_json::from_value(json!({"productId": 3, "name": "Pen", "price": 3})).unwrap();
    assert_eq!(store.state().snapshot().data, vec![expected]);
}

#[tokio::test]
async fn product_update_without_id_changes_nothing_locally() {
    let h = harness(MockHttpClient::new());
    let store = ProductsStore::new(h.api.clone());
    h.api.transport().mock_response(
        &url("/api/Product/getall"),
        200,
        json!([{"productId": 3, "name": "Pen"}]),
    );
    h.api.transport().mock_response(
        &url("/api/Product/update"),
        200,
        json!({"productId": 3, "name": "Marker"}),
    );
    store.fetch_products().await;
    let before = store.state().snapshot().data;

    store
        .update_product(ProductForm::new().with_field("name", "Marker"))
        .await
        .unwrap();

    assert_eq!(store.state().snapshot().data, before);
}

#[tokio::test]
async fn product_create_and_delete() {
    let h = harness(MockHttpClient::new());
    let store = ProductsStore::new(h.api.clone());
    h.api.transport().mock_response(
        &url("/api/Product/create"),
        201,
        json!({"productId": 4, "name": "Ink"}),
    );
    h.api
        .transport()
        .mock_response(&url("/api/Product/delete?id=4"), 204, json!(null));

    let created = store
        .create_product(ProductForm::new().with_field("name", "Ink"))
        .await
        .unwrap();
    assert_eq!(store.state().snapshot().data, vec![created]);

    store.delete_product(EntityId::from(4)).await.unwrap();
    assert!(store.state().snapshot().data.is_empty());
}

// =========================================================
// Notifications & orders
// =========================================================

#[tokio::test]
async fn notifications_are_prepended() {
    let h = harness(MockHttpClient::new());
    let store = NotificationsStore::new(h.api.clone());
    h.api.transport().mock_response(
        &url("/api/Notification/create"),
        200,
        json!({"notificationId": 1, "title": "Sale"}),
    );
    store
        .create_notification(fields(json!({"title": "Sale"})))
        .await
        .unwrap();
    h.api.transport().mock_response(
        &url("/api/Notification/create"),
        200,
        json!({"notificationId": 2, "title": "Restock"}),
    );
    store
        .create_notification(fields(json!({"title": "Restock"})))
        .await
        .unwrap();

    let ids: Vec<EntityId> = store
        .state()
        .with(|snap| snap.data.iter().map(|n| n.notification_id.clone()).collect());
    assert_eq!(ids, vec![EntityId::from(2), EntityId::from(1)]);
}

#[tokio::test]
async fn order_lists_are_fetched_independently() {
    let h = harness(MockHttpClient::new());
    let store = OrdersStore::new(h.api.clone());
    h.api.transport().mock_response(
        &url("/api/Checkout/get_all_completed_checkout"),
        200,
        json!([{"checkoutId": 1, "status": "Delivered"}]),
    );
    h.api.transport().mock_response(
        &url("/api/Checkout/get_all_ongoing_checkout"),
        200,
        json!([{"checkoutId": 2}, {"checkoutId": 3}]),
    );

    store.fetch_all_completed_orders().await;
    store.fetch_all_ongoing_orders().await;

    let lists = store.state().snapshot().data;
    assert_eq!(lists.completed.len(), 1);
    assert_eq!(lists.ongoing.len(), 2);
}

#[tokio::test]
async fn order_by_id_and_manage_checkout_raise_failures() {
    let h = harness(MockHttpClient::new());
    let store = OrdersStore::new(h.api.clone());
    h.api.transport().mock_response(
        &url("/api/Checkout/get_checkout_by_id?checkoutId=5"),
        200,
        json!({"checkoutId": 5, "status": "Pending"}),
    );

    let order = store.fetch_order_by_id(EntityId::from(5)).await.unwrap();
    assert_eq!(order.checkout_id, EntityId::from(5));
    assert_eq!(store.state().snapshot().data, OrderLists::default());

    let err = store
        .manage_checkout(fields(json!({"checkoutId": 5, "status": "Shipped"})))
        .await
        .unwrap_err();
    assert_eq!(
        store.state().snapshot().error,
        Some(err.to_string())
    );
}

// =========================================================
// Read-only stores
// =========================================================

#[tokio::test]
async fn directory_stores_fill_their_lists() {
    let h = harness(MockHttpClient::new());
    let mock = h.api.transport();
    mock.mock_response(&url("/api/Cart/get_all_carts"), 200, json!([{"cartId": 1}]));
    mock.mock_response(
        &url("/api/Cart/get_all_cart_products"),
        200,
        json!([{"cartId": 1, "productId": 3, "quantity": 2}]),
    );
    mock.mock_response(
        &url("/api/Transaction/getUsersTransactions?userId=9"),
        200,
        json!([{"transactionId": "t-1", "amount": 10}]),
    );
    mock.mock_response(
        &url("/api/User/get-with-contact?id=9"),
        200,
        json!({"userId": 9, "phone": "555"}),
    );
    mock.mock_response(
        &url("/api/Wallet/getall"),
        200,
        json!([{"walletId": 1}, {"walletId": 2}]),
    );

    let carts = CartsStore::new(h.api.clone());
    carts.fetch_carts().await;
    carts.fetch_cart_products().await;
    let transactions = TransactionsStore::new(h.api.clone());
    transactions.fetch_user_transactions(EntityId::from(9)).await;
    let users = UsersStore::new(h.api.clone());
    let user = users.fetch_user_with_contact(EntityId::from(9)).await.unwrap();
    let wallets = WalletsStore::new(h.api.clone());
    wallets.fetch_wallets().await;

    let cart_data = carts.state().snapshot().data;
    assert_eq!(cart_data.carts.len(), 1);
    assert_eq!(cart_data.cart_products.len(), 1);
    assert_eq!(
        transactions.state().snapshot().data[0].transaction_id,
        EntityId::from("t-1")
    );
    assert_eq!(user.fields["phone"], json!("555"));
    assert!(users.state().snapshot().data.is_empty());
    assert_eq!(wallets.state().snapshot().data.len(), 2);
}

// =========================================================
// Authentication failures
// =========================================================

#[tokio::test]
async fn unauthorized_from_any_store_signs_out() {
    let h = harness(MockHttpClient::new());
    let wallets = WalletsStore::new(h.api.clone());
    h.api
        .transport()
        .mock_response(&url("/api/Wallet/getall"), 401, json!({}));

    wallets.fetch_wallets().await;

    assert_eq!(h.storage.get("token"), None);
    assert!(!h.api.session().is_authenticated());
    assert_eq!(h.redirects.get(), 1);
    assert_eq!(
        wallets.state().snapshot().error.as_deref(),
        Some("Request failed with status code 401")
    );

    h.api
        .transport()
        .mock_response(&url("/api/Category/create"), 401, json!({}));
    let categories = CategoriesStore::new(h.api.clone());
    let err = categories
        .create_category(fields(json!({"name": "X"})))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(h.redirects.get(), 2);
}

// =========================================================
// Overlapping calls
// =========================================================

#[tokio::test]
async fn loading_is_raised_while_request_is_pending() {
    let h = harness(GatedHttpClient::new());
    let store = CategoriesStore::new(h.api.clone());

    let fetch = store.fetch_categories();
    let probe = async {
        tokio::task::yield_now().await;
        assert!(store.state().snapshot().loading);
        h.api.transport().release(0, 200, json!([{"categoryId": 1}]));
    };
    futures::join!(fetch, probe);

    let snap = store.state().snapshot();
    assert!(!snap.loading);
    assert_eq!(snap.data.len(), 1);
}

#[tokio::test]
async fn last_response_wins_and_loading_drops_early() {
    let h = harness(GatedHttpClient::new());
    let store = CategoriesStore::new(h.api.clone());

    let seed = async {
        tokio::task::yield_now().await;
        h.api
            .transport()
            .release(0, 200, json!([{"categoryId": 1, "name": "A"}]));
    };
    futures::join!(store.fetch_categories(), seed);

    let first = store.update_category(category(1, "B"));
    let second = store.update_category(category(1, "C"));
    let driver = async {
        tokio::task::yield_now().await;
        assert_eq!(h.api.transport().issued(), 3);

        // The later request is answered first.
        h.api
            .transport()
            .release(2, 200, json!({"categoryId": 1, "name": "C"}));
        tokio::task::yield_now().await;
        let mid = store.state().snapshot();
        assert!(!mid.loading);
        assert_eq!(mid.data, vec![category(1, "C")]);

        h.api
            .transport()
            .release(1, 200, json!({"categoryId": 1, "name": "B"}));
    };
    let (a, b, ()) = futures::join!(first, second, driver);

    assert!(a.is_ok() && b.is_ok());
    let snap = store.state().snapshot();
    assert!(!snap.loading);
    assert_eq!(snap.data, vec![category(1, "B")]);
}

// =========================================================
// Reconciliation helpers
// =========================================================

#[test]
fn replace_by_id_touches_only_the_first_match() {
    let mut items = vec![category(1, "a"), category(1, "b")];
    assert!(replace_by_id(&mut items, &EntityId::from(1), category(1, "z")));
    assert_eq!(items, vec![category(1, "z"), category(1, "b")]);
    assert!(!replace_by_id(&mut items, &EntityId::from("1"), category(1, "q")));
}

#[test]
fn remove_by_id_uses_strict_equality() {
    let mut items = vec![category(1, "a"), category(2, "b")];
    remove_by_id(&mut items, &EntityId::from("1"));
    assert_eq!(items.len(), 2);
    remove_by_id(&mut items, &EntityId::from(1));
    assert_eq!(items, vec![category(2, "b")]);
}
