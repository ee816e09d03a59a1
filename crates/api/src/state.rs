use std::sync::Arc;

use atelier_core::blob::BlobStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and everything else sits
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: atelier_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Destination for uploaded design images.
    pub blobs: Arc<dyn BlobStore>,
}
