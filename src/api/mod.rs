mod handlers;

use std::sync::{Arc, Mutex};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app::OrgChart;

/// The single chart behind the server. Handlers take the lock for the whole
/// of one operation, so requests are applied strictly in arrival order.
pub type SharedChart = Arc<Mutex<OrgChart>>;

pub fn create_router(chart: OrgChart) -> Router {
    let state: SharedChart = Arc::new(Mutex::new(chart));

    let api = Router::new()
        // Reads
        .route("/tree", get(handlers::get_tree))
        .route("/tree/render", get(handlers::render_tree))
        .route("/stats", get(handlers::get_stats))
        .route("/export", get(handlers::export_tree))
        // Session
        .route("/session", get(handlers::get_session))
        .route("/session/login", post(handlers::login))
        .route("/session/logout", post(handlers::logout))
        // Nodes
        .route("/nodes/{id}", delete(handlers::delete_node))
        .route("/nodes/{id}/name", put(handlers::rename_node))
        .route("/nodes/{id}/leads", post(handlers::add_lead))
        .route("/nodes/{id}/members", post(handlers::add_member))
        .route("/nodes/{id}/toggle", post(handlers::toggle_expand))
        .route("/nodes/{id}/expanded", put(handlers::set_expanded))
        .route("/nodes/{id}/reorder", post(handlers::reorder_node))
        .route("/nodes/{id}/move", post(handlers::move_member))
        // History
        .route("/history", get(handlers::get_history))
        .route("/history/undo", post(handlers::undo))
        .route("/history/redo", post(handlers::redo))
        // Import
        .route("/import", post(handlers::import_tree))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
