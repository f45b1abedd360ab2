//! Browser bindings
//!
//! Thin wrappers over native Web APIs that plug the browser into the core
//! crate's seams.

mod console;
mod http;
pub mod router;
mod storage;

pub use console::init_tracing;
pub use http::FetchClient;
pub use router::hard_redirect;
pub use storage::BrowserStorage;
