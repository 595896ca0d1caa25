//! Local store abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::Aggregate;
use crate::error::DomainError;
use crate::record::Record;
use crate::{EntityId, IdSet};

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 0.
    pub page: u32,
    /// Page size, between 1 and [`PageRequest::MAX_SIZE`].
    pub size: u32,
}

impl PageRequest {
    /// Page size used when the caller does not ask for one.
    pub const DEFAULT_SIZE: u32 = 10;
    /// Largest page a caller may request.
    pub const MAX_SIZE: u32 = 100;

    /// Creates a page request, clamping `size` into `1..=MAX_SIZE`.
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// One page of a scan, with totals for the whole result set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Entries on this page.
    pub content: Vec<T>,
    /// Zero-based page number.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Number of entries across all pages.
    pub total_elements: u64,
    /// Number of pages of `size` needed to hold `total_elements`.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Wraps `content` as the page described by `request`.
    #[must_use]
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(request.size)),
        }
    }
}

/// Which slice of the store a paginated scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanScope {
    /// Every record.
    All,
    /// Records whose [`Aggregate::parent_id`] equals the given identifier.
    Parent(EntityId),
}

impl ScanScope {
    /// Returns `true` if `fields` falls inside this scope.
    pub fn admits<T: Aggregate>(&self, fields: &T) -> bool {
        match self {
            Self::All => true,
            Self::Parent(id) => fields.parent_id() == Some(*id),
        }
    }
}

/// Typed accessor for the service's own aggregate.
#[async_trait]
pub trait Repository<T: Aggregate>: Send + Sync {
    /// Loads one record, `None` when the identity is unknown.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Record<T>>, DomainError>;

    /// Loads every record whose identity is in `ids`. Missing identities are
    /// simply absent from the result.
    async fn find_by_ids(&self, ids: &IdSet) -> Result<Vec<Record<T>>, DomainError>;

    /// Loads one page of records in identity order.
    async fn find_page(
        &self,
        scope: ScanScope,
        request: PageRequest,
    ) -> Result<Page<Record<T>>, DomainError>;

    /// Persists a new aggregate, assigning its identity. Both timestamps are
    /// set to `now`.
    async fn insert(&self, fields: T, now: DateTime<Utc>) -> Result<Record<T>, DomainError>;

    /// Persists a revision of an existing record. `created_at` is never
    /// rewritten.
    async fn update(&self, record: &Record<T>) -> Result<Record<T>, DomainError>;

    /// Removes a record.
    async fn delete(&self, id: EntityId) -> Result<(), DomainError>;
}
