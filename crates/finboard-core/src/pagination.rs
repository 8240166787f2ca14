use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Page window over a list the caller has already filtered and sorted.
///
/// Describes which page to show; slicing the items is left to the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub page_size: u64,
}

impl PageWindow {
    /// Clamps `requested_page` into `[1, total_pages]`; there is always at least one page.
    pub fn compute(
        requested_page: i64,
        page_size: i64,
        total_count: usize,
    ) -> Result<Self, ValidationError> {
        if page_size <= 0 {
            return Err(ValidationError::NonPositivePageSize(page_size));
        }
        let page_size = page_size as u64;
        let total_count = total_count as u64;
        let total_pages = total_count.div_ceil(page_size).max(1);
        let current_page = requested_page.clamp(1, total_pages as i64) as u64;
        Ok(Self {
            current_page,
            total_pages,
            total_count,
            page_size,
        })
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        ((self.current_page - 1) * self.page_size) as usize
    }

    /// Item indices covered by the current page, bounded by the total count.
    pub fn item_range(&self) -> Range<usize> {
        let start = self.offset().min(self.total_count as usize);
        let end = (start + self.page_size as usize).min(self.total_count as usize);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
