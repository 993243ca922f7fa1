//! Client-side search session.

pub mod controller;
pub mod criteria;
pub mod pagination;

pub use controller::{RequestPhase, SearchSessionController, SearchTicket, SessionSettings};
pub use criteria::{CATEGORIES, SearchCriteria};
pub use pagination::{
    DEFAULT_WINDOW, PAGE_SIZE, PageState, PageWindow, compute_page_window, total_pages,
};

#[cfg(test)]
mod tests;
