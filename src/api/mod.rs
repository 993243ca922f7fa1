//! Client side of the directory REST API.
//!
//! The search session only needs [`SearchApi`]; everything else (auth, likes,
//! comments, account) lives on [`ConectaClient`] directly.

pub mod client;
pub mod error;
pub mod token;
pub mod types;

use std::future::Future;

use crate::error::Result;

pub use client::ConectaClient;
pub use error::ApiError;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{AccountUpdate, Comment, LikeAction, ProviderSummary, SearchPage, SearchParams, User};

/// Remote search collaborator: one page of matches for the given criteria.
pub trait SearchApi: Send + Sync {
    fn search_providers(
        &self,
        params: &SearchParams,
    ) -> impl Future<Output = Result<SearchPage>> + Send;
}
