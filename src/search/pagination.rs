//! Page arithmetic and the sliding page-number window.

use std::fmt;

use serde::Serialize;

/// Results per page. The server paginates with the same size.
pub const PAGE_SIZE: u64 = 10;

/// Number of page buttons shown around the current page.
pub const DEFAULT_WINDOW: u32 = 5;

/// Pages needed for `total_results`, never less than one.
pub fn total_pages(total_results: u64, page_size: u64) -> u32 {
    let pages = total_results.div_ceil(page_size.max(1)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Current position within a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub current_page: u32,
    pub total_results: u64,
    pub total_pages: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_results: 0,
            total_pages: 1,
        }
    }
}

impl PageState {
    pub fn from_total(current_page: u32, total_results: u64) -> Self {
        Self {
            current_page,
            total_results,
            total_pages: total_pages(total_results, PAGE_SIZE),
        }
    }

    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// Which page-number buttons to render.
///
/// `first_page` / `last_page` are the edge anchors shown outside the window;
/// each ellipsis is only ever shown together with its anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current: u32,
    pub pages: Vec<u32>,
    pub first_page: Option<u32>,
    pub leading_ellipsis: bool,
    pub last_page: Option<u32>,
    pub trailing_ellipsis: bool,
}

/// Compute the page window around `current_page`.
///
/// The window is `window_size` wide, centered on the current page and pinned
/// to the edges. With the default width of 5 the anchors follow fixed
/// thresholds: page 1 shows when `current > 3` (ellipsis when `> 4`), the last
/// page shows when `current < total - 2` (ellipsis when `< total - 3`).
/// Anchors that would repeat a page already inside the window are dropped.
pub fn compute_page_window(current_page: u32, total_pages: u32, window_size: u32) -> PageWindow {
    let total = i64::from(total_pages.max(1));
    let size = i64::from(window_size.max(1));
    let current = i64::from(current_page).clamp(1, total);
    let half = size / 2;

    let start = (current - half).min(total - size + 1).max(1);
    let end = start + size.min(total) - 1;

    let show_first = current > half + 1 && start > 1;
    let show_last = current < total - half && end < total;

    PageWindow {
        current: current as u32,
        pages: (start..=end).map(|p| p as u32).collect(),
        first_page: show_first.then_some(1),
        leading_ellipsis: show_first && current > half + 2,
        last_page: show_last.then_some(total as u32),
        trailing_ellipsis: show_last && current < total - half - 1,
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(first) = self.first_page {
            parts.push(first.to_string());
            if self.leading_ellipsis {
                parts.push("…".to_string());
            }
        }
        for &page in &self.pages {
            if page == self.current {
                parts.push(format!("[{page}]"));
            } else {
                parts.push(page.to_string());
            }
        }
        if let Some(last) = self.last_page {
            if self.trailing_ellipsis {
                parts.push("…".to_string());
            }
            parts.push(last.to_string());
        }
        write!(f, "{}", parts.join(" "))
    }
}
