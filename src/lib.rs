//! Store admin client core
//!
//! Platform-agnostic half of the dashboard: session handling, the REST
//! client and its call catalog, navigation rules and the resource stores.
//! The browser crate plugs in `fetch` and `localStorage` through
//! [`request::HttpClient`] and [`storage::KeyValueStorage`].

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod notify;
pub mod request;
pub mod route;
pub mod session;
pub mod storage;
pub mod store;

pub use api::RestClient;
pub use config::AppConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use guard::{Navigation, evaluate};
pub use route::AppRoute;
pub use session::{Session, SessionStore};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{Snapshot, StoreCell};
