//! Offset/limit pagination over filtered results

use serde::Serialize;

use crate::error::{Error, Result};

/// Page size used when a caller does not ask for one
pub const DEFAULT_LIMIT: usize = 1000;

/// Offset/limit window applied after filtering.
///
/// # Example
/// ```ignore
/// let page = Pagination::new().offset(20).limit(10);
/// let visible = page.slice(&matches);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from signed values as supplied by a caller, rejecting negatives.
    pub fn from_signed(offset: i64, limit: Option<i64>, default_limit: usize) -> Result<Self> {
        let offset = usize::try_from(offset)
            .map_err(|_| Error::InvalidQuery(format!("offset must not be negative (got {})", offset)))?;
        let limit = match limit {
            Some(l) => usize::try_from(l)
                .map_err(|_| Error::InvalidQuery(format!("limit must not be negative (got {})", l)))?,
            None => default_limit,
        };
        Ok(Self { offset, limit })
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The window of `items` this page covers, clamped to the slice bounds.
    ///
    /// An offset past the end yields an empty page rather than an error.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }
}
