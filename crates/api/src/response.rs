//! Shared response envelope types for API handlers.
//!
//! Entities go out as `{ "data": ... }`, pages as
//! `{ "data": [...], "total", "limit", "offset" }`.

use atelier_core::pagination::Page;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a listing together with the unpaged total.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T: Serialize> PageResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: Page) -> Self {
        Self {
            data,
            total,
            limit: page.limit,
            offset: page.offset,
        }
    }

    pub fn map<U: Serialize>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Fixed `{ "status": ... }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}
