//! HTTP API for the Batcomputer.
//!
//! Serves the gadget inventory and contact registry, proxies the external
//! contact directory, queues background jobs for Alfred and renders a couple
//! of HTML pages. Requests are traced with `tracing` and counted with
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;
pub mod tasks;
pub mod templates;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use domain::{
    ApiKeyVerifier, ContactRegistry, InventoryService, Operator, default_inventory,
};
use metrics_exporter_prometheus::PrometheusHandle;
use record_store::InMemoryRecordStore;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use upstream::Directory;

use config::Config;
use session::SessionPool;
pub use state::AppState;
use tasks::{TaskQueue, TaskWorker};

/// Builds the CORS layer for the configured origins.
///
/// Credentials are allowed, so methods and headers mirror the request
/// instead of using a wildcard.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<D: Directory + 'static>(
    state: Arc<AppState<D>>,
    metrics_handle: PrometheusHandle,
    config: &Config,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/", get(routes::system::root))
        .route("/status", get(routes::system::status))
        .route("/health", get(routes::system::health))
        .route("/locations/{name}", get(routes::recon::scan_location))
        .route(
            "/locations/{name}/details",
            get(routes::recon::location_details),
        )
        .route(
            "/rogues/{name}/cases/{case_id}",
            get(routes::recon::rogue_case),
        )
        .route("/search-database", get(routes::recon::search_database))
        .route("/filter-gadgets", get(routes::gadgets::filter))
        .route("/gadgets", post(routes::gadgets::create::<D>))
        .route("/gadgets/{id}", get(routes::gadgets::get::<D>))
        .route(
            "/contacts",
            post(routes::contacts::create::<D>)
                .get(routes::contacts::list::<D>)
                .delete(routes::contacts::clear::<D>),
        )
        .route("/contacts/me", get(routes::contacts::me))
        .route("/contacts/{id}", get(routes::contacts::get::<D>))
        .route(
            "/fetch-contacts/{id}",
            get(routes::directory::fetch_contact::<D>),
        )
        .route("/fetch-posts", get(routes::directory::fetch_posts::<D>))
        .route("/gcpd-files", get(routes::secure::gcpd_files))
        .route(
            "/batcave/control-panel",
            get(routes::secure::control_panel),
        )
        .route(
            "/log-activity/{email}",
            post(routes::activity::log_activity::<D>),
        )
        .route(
            "/request-intel-report",
            post(routes::activity::request_intel_report::<D>),
        )
        .route("/batcomputer-logs", get(routes::logs::read_logs))
        .route(
            "/batcomputer-logs-error",
            get(routes::logs::read_logs_failing),
        )
        .route("/batcave-display", get(routes::pages::batcave_display::<D>))
        .route("/contacts-view", get(routes::pages::contacts_view::<D>))
        .with_state(state)
        .merge(metrics_router)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        // CORS answers preflights itself, so it sits inside the header
        // middleware to keep those responses stamped too.
        .layer(cors_layer(&config.cors_origins))
        .layer(axum::middleware::from_fn(middleware::api_version))
        .layer(axum::middleware::from_fn(middleware::process_time))
        .layer(TraceLayer::new_for_http())
}

/// Creates application state with the seeded inventory, an empty contact
/// registry and the given directory.
///
/// The returned worker must be spawned for background jobs to run.
pub fn create_default_state<D: Directory + 'static>(
    config: &Config,
    directory: D,
) -> (Arc<AppState<D>>, TaskWorker) {
    let (tasks, worker) = TaskQueue::new();

    let state = Arc::new(AppState {
        inventory: InventoryService::new(seeded_inventory()),
        contacts: ContactRegistry::new(InMemoryRecordStore::new()),
        directory,
        api_keys: ApiKeyVerifier::new(config.api_key.clone()),
        operator: Operator::batman(),
        tasks,
        sessions: SessionPool::new(),
    });

    (state, worker)
}

fn seeded_inventory() -> InMemoryRecordStore<domain::Gadget> {
    // The seed list has unique names, so seeding cannot conflict.
    InMemoryRecordStore::with_records(default_inventory()).unwrap_or_else(|err| {
        tracing::error!(error = %err, "default inventory rejected, starting empty");
        InMemoryRecordStore::new()
    })
}
