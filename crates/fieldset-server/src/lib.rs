//! Fieldset Server: axum HTTP surface over the custom field
//! administration service.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use surrealdb::{Connection, Surreal};

use fieldset_admin::{FieldAdminConfig, FieldService};
use fieldset_db::repository::SurrealCustomFieldRepository;

mod config;
mod http;

pub use config::ServerConfig;

/// Shared state handed to every handler.
pub struct AppState<C: Connection> {
    pub service: Arc<FieldService<SurrealCustomFieldRepository<C>>>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, config: FieldAdminConfig) -> Self {
        let repo = SurrealCustomFieldRepository::new(db);
        Self {
            service: Arc::new(FieldService::new(repo, config)),
        }
    }
}

/// Build the administration API router.
///
/// Generic over the connection type so production (WebSocket) and
/// tests (in-memory engine) share one code path.
pub fn build_router<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route("/api/health", get(http::health))
        .route(
            "/api/custom-fields/process",
            post(http::process_custom_field::<C>),
        )
        .route(
            "/api/custom-fields/scope/:org_id/:scope",
            get(http::fields_by_scope::<C>),
        )
        .route("/api/custom-fields", get(http::list_custom_fields::<C>))
        .route(
            "/api/custom-fields/:id",
            get(http::get_custom_field::<C>).delete(http::delete_custom_field::<C>),
        )
        .with_state(state)
}
