//! Public storefront: server-rendered pages backed by the catalog API.

pub mod render;
pub mod routes;

use axum::{middleware, Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::ApiClient;
use crate::middleware::logging_middleware;

#[derive(Clone, Debug)]
pub struct AppState {
    pub client: ApiClient,
    pub page_size: u32,
}

impl AppState {
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
        }
    }
}

pub fn storefront_router(state: AppState) -> Router {
    routes::page_router()
        .layer(Extension(Arc::new(state)))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
