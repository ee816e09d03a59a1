//! Shared query parameter types for API handlers.

use atelier_core::pagination::Page;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped through [`Page::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}
