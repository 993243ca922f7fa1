pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod region;
pub mod search;

pub use api::{ConectaClient, ProviderSummary, SearchApi, SearchPage, SearchParams};
pub use config::Config;
pub use error::{ConectaError, Result};
pub use region::{Region, RegionCatalog};
pub use search::{
    PageState, PageWindow, RequestPhase, SearchCriteria, SearchSessionController,
    SessionSettings, compute_page_window,
};
