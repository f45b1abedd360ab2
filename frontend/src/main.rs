use leptos::prelude::*;
use storeadmin::AppConfig;
use storeadmin_frontend::App;
use storeadmin_frontend::web::init_tracing;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    init_tracing(config.max_level());
    tracing::info!(api = %config.api_base_url, "starting store admin");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
