use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request. `page` is 1-based.
///
/// Only built through [`PaginationParams::new`], so `size` is never zero and
/// `offset` always matches `page`. Deserialization goes through the same check
/// and recomputes the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageRequest")]
pub struct PaginationParams {
    page: u32,
    size: u32,
    offset: u64,
}

#[derive(Deserialize)]
struct PageRequest {
    page: u32,
    size: u32,
}

impl TryFrom<PageRequest> for PaginationParams {
    type Error = AppError;

    fn try_from(request: PageRequest) -> Result<Self, Self::Error> {
        Self::new(request.page, request.size)
    }
}

impl PaginationParams {
    pub fn new(page: u32, size: u32) -> Result<Self, AppError> {
        if page < 1 {
            return Err(AppError::BadRequest("page must be at least 1".into()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(AppError::BadRequest(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(Self {
            page,
            size,
            offset: u64::from(page - 1) * u64::from(size),
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

/// Columns a comment listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortParams {
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
}

/// One page of a bounded query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pagination_params: PaginationParams,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> PaginationResult<T> {
    pub fn new(items: Vec<T>, pagination_params: PaginationParams, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(u64::from(pagination_params.size()));
        Self {
            items,
            pagination_params,
            total_count,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginationResult<U> {
        PaginationResult {
            items: self.items.into_iter().map(f).collect(),
            pagination_params: self.pagination_params,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}
