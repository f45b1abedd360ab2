use super::*;
use crate::request::MockHttpClient;
use crate::storage::{KeyValueStorage, MemoryStorage};
use serde_json::json;
use std::cell::Cell;
use storeadmin_shared::UserProfile;
use storeadmin_shared::protocol::{FilePart, FormPart, HttpMethod};

const BASE: &str = "http://api.test";

struct TestEnv {
    storage: Rc<MemoryStorage>,
    redirects: Rc<Cell<u32>>,
    client: RestClient<MockHttpClient>,
}

fn setup() -> TestEnv {
    let storage = Rc::new(MemoryStorage::new());
    let session = Rc::new(SessionStore::new(storage.clone()));
    let redirects = Rc::new(Cell::new(0));
    let counter = Rc::clone(&redirects);
    let client = RestClient::new(&AppConfig::new(BASE), MockHttpClient::new(), session)
        .on_unauthorized(move || counter.set(counter.get() + 1));
    TestEnv {
        storage,
        redirects,
        client,
    }
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

#[tokio::test]
async fn attaches_bearer_token_from_storage() {
    let env = setup();
    env.client
        .session()
        .login(UserProfile(json!({"name": "Ada"})), "tok-1");
    env.client
        .transport()
        .mock_response(&url("/api/Category/getall"), 200, json!([]));

    env.client.category().get_all().await.unwrap();

    let req = env.client.transport().last_request().unwrap();
    assert_eq!(req.header("Authorization"), Some("Bearer tok-1"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn reads_token_from_storage_on_every_request() {
    let env = setup();
    // Written behind the session's back, e.g. by another tab.
    env.storage.set("token", "from-disk");
    env.client
        .transport()
        .mock_response(&url("/api/User/getall"), 200, json!([]));

    env.client.user().get_all().await.unwrap();

    let req = env.client.transport().last_request().unwrap();
    assert_eq!(req.header("Authorization"), Some("Bearer from-disk"));
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let env = setup();
    env.client
        .transport()
        .mock_response(&url("/api/Wallet/getall"), 200, json!([]));

    env.client.wallet().get_all().await.unwrap();

    let req = env.client.transport().last_request().unwrap();
    assert_eq!(req.header("Authorization"), None);
}

#[tokio::test]
async fn unauthorized_expires_session_and_redirects() {
    let env = setup();
    env.client
        .session()
        .login(UserProfile(json!({"name": "Ada"})), "tok-1");
    env.client.transport().mock_response(
        &url("/api/Checkout/get_all_ongoing_checkout"),
        401,
        json!({"message": "expired"}),
    );

    let err = env.client.checkout().get_all_ongoing().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(env.storage.get("token"), None);
    assert!(!env.client.session().is_authenticated());
    assert_eq!(env.redirects.get(), 1);
}

#[tokio::test]
async fn other_failures_pass_through_untouched() {
    let env = setup();
    env.client
        .session()
        .login(UserProfile(json!({"name": "Ada"})), "tok-1");
    env.client
        .transport()
        .mock_response(&url("/api/Transaction/getAll"), 500, json!("boom"));
    env.client
        .transport()
        .mock_unreachable(&url("/api/Wallet/getall"));

    let server = env.client.transaction().get_all().await.unwrap_err();
    let network = env.client.wallet().get_all().await.unwrap_err();

    assert_eq!(server.status_code(), Some(500));
    assert!(matches!(network, ApiError::Transport(_)));
    assert!(env.client.session().is_authenticated());
    assert_eq!(env.redirects.get(), 0);
}

#[tokio::test]
async fn identifiers_travel_in_the_query_string() {
    let env = setup();
    let mock = env.client.transport();
    mock.mock_response(&url("/api/Category/delete?id=7"), 200, json!(true));
    mock.mock_response(
        &url("/api/Checkout/get_checkout_by_id?checkoutId=12"),
        200,
        json!({"checkoutId": 12, "status": "Pending"}),
    );
    mock.mock_response(
        &url("/api/Wallet/getuserAll?userId=a+b"),
        200,
        json!([{"walletId": 1}]),
    );

    env.client.category().delete(EntityId::from(7)).await.unwrap();
    let order = env.client.checkout().get_by_id(EntityId::from(12)).await.unwrap();
    let wallets = env
        .client
        .wallet()
        .get_user_all(EntityId::from("a b"))
        .await
        .unwrap();

    assert_eq!(order.checkout_id, EntityId::from(12));
    assert_eq!(wallets.len(), 1);
    let methods: Vec<HttpMethod> = mock.requests.borrow().iter().map(|r| r.method).collect();
    assert_eq!(
        methods,
        vec![HttpMethod::Delete, HttpMethod::Get, HttpMethod::Get]
    );
}

#[tokio::test]
async fn create_sends_json_body() {
    let env = setup();
    env.client.transport().mock_response(
        &url("/api/Category/create"),
        200,
        json!({"categoryId": 7, "name": "Books"}),
    );
    let mut data = Fields::new();
    data.insert("name".into(), json!("Books"));

    let created = env.client.category().create(data).await.unwrap();

    assert_eq!(created.category_id, EntityId::from(7));
    let req = env.client.transport().last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.body, HttpBody::Text(json!({"name": "Books"}).to_string()));
}

#[tokio::test]
async fn product_writes_use_multipart() {
    let env = setup();
    env.client.transport().mock_response(
        &url("/api/Product/update"),
        200,
        json!({"productId": 3, "name": "Pen"}),
    );
    let image = FilePart {
        field: "image".into(),
        file_name: "pen.png".into(),
        content_type: "image/png".into(),
        bytes: vec![1, 2, 3],
    };
    let form = ProductForm::new()
        .with_id(3)
        .with_field("name", "Pen")
        .with_image(image);

    env.client.product().update(form).await.unwrap();

    let req = env.client.transport().last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Put);
    assert_eq!(req.header("Content-Type"), None);
    let HttpBody::Multipart(form) = req.body else {
        panic!("expected multipart body");
    };
    assert!(matches!(&form.parts[2], FormPart::File(f) if f.file_name == "pen.png"));
}

#[tokio::test]
async fn empty_success_body_is_accepted_for_deletes() {
    let env = setup();
    env.client
        .transport()
        .mock_response(&url("/api/Product/delete?id=3"), 204, json!(null));

    assert!(env.client.product().delete(EntityId::from(3)).await.is_ok());
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let env = setup();
    env.client
        .transport()
        .mock_response(&url("/api/Product/getall"), 200, json!({"not": "a list"}));

    let err = env.client.product().get_all().await.unwrap_err();
    assert_eq!(err.kind(), crate::error::ApiErrorKind::Decode);
}

#[tokio::test]
async fn base_url_prefix_is_preserved() {
    let storage = Rc::new(MemoryStorage::new());
    let session = Rc::new(SessionStore::new(storage));
    let client = RestClient::new(
        &AppConfig::new("http://api.test/v2/"),
        MockHttpClient::new(),
        session,
    );
    client.transport().mock_response(
        "http://api.test/v2/api/User/login",
        200,
        json!({"token": "tok-5", "user": {"name": "Ada"}}),
    );

    let reply = client
        .user()
        .login(LoginCredentials {
            email: "ada@shop.test".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(reply.token, "tok-5");
    assert_eq!(reply.user.display_name(), Some("Ada"));
}
