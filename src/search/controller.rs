//! The search session: criteria, pagination and request lifecycle in one place.
//!
//! Each session owns its [`SearchApi`] and is driven by one UI surface. A
//! search is either run end to end with [`SearchSessionController::search`],
//! or split into [`begin_search`](SearchSessionController::begin_search) and
//! [`finish_search`](SearchSessionController::finish_search) when the caller
//! drives the request itself. Every issued request carries a sequence number;
//! only the most recently issued one may change the displayed results.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::{LikeAction, ProviderSummary, SearchApi, SearchPage, SearchParams};
use crate::config::{Config, Messages};
use crate::error::{ConectaError, Result};
use crate::region::{Region, RegionCatalog};

use super::criteria::SearchCriteria;
use super::pagination::{DEFAULT_WINDOW, PageState, PageWindow, compute_page_window};

/// Request lifecycle. The two loading states are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "phase", content = "message", rename_all = "snake_case")]
pub enum RequestPhase {
    #[default]
    Idle,
    /// First page of a new search (full-page spinner)
    LoadingInitial,
    /// Later page of the current search (pagination spinner)
    LoadingPage,
    Error(String),
}

impl RequestPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestPhase::LoadingInitial | RequestPhase::LoadingPage)
    }

    pub fn is_loading_page(&self) -> bool {
        matches!(self, RequestPhase::LoadingPage)
    }
}

/// Static inputs of a session.
#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    pub catalog: RegionCatalog,
    pub initial_region: Region,
    pub messages: Messages,
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            catalog: config.regions.clone(),
            initial_region: config.default_region.clone(),
            messages: config.messages.clone(),
        }
    }
}

/// An issued request awaiting its response.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    seq: u64,
    page: u32,
    params: SearchParams,
}

impl SearchTicket {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }
}

pub struct SearchSessionController<A> {
    api: A,
    catalog: RegionCatalog,
    messages: Messages,
    criteria: SearchCriteria,
    page: PageState,
    results: Vec<ProviderSummary>,
    phase: RequestPhase,
    error: Option<String>,
    issued: u64,
}

impl<A: SearchApi> SearchSessionController<A> {
    pub fn new(api: A, settings: SessionSettings) -> Self {
        Self {
            api,
            catalog: settings.catalog,
            messages: settings.messages,
            criteria: SearchCriteria::new(settings.initial_region),
            page: PageState::default(),
            results: Vec::new(),
            phase: RequestPhase::Idle,
            error: None,
            issued: 0,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn region(&self) -> &Region {
        &self.criteria.region
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn results(&self) -> &[ProviderSummary] {
        &self.results
    }

    pub fn phase(&self) -> &RequestPhase {
        &self.phase
    }

    /// Last surfaced error, including rejected queries.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the free-text term verbatim. Does not search.
    pub fn set_search_term(&mut self, text: impl Into<String>) {
        self.criteria.search_term = text.into();
    }

    /// Select `tag` and search its first page, or clear the search when `tag`
    /// is already the active one.
    pub async fn toggle_tag(&mut self, tag: &str) -> Result<()> {
        if self.criteria.tag == tag {
            self.clear_search();
            return Ok(());
        }

        self.criteria.tag = tag.to_string();
        self.search(1).await
    }

    /// Move the search to another region and back to page 1. Does not search.
    ///
    /// Without a city the state's first configured city is used; a state with
    /// no configured cities is a configuration defect and fails with
    /// `UnknownRegion` without touching the session.
    pub fn set_region(&mut self, state: &str, city: Option<&str>) -> Result<()> {
        let city = match city {
            Some(city) => city.to_string(),
            None => self.catalog.first_city(state)?.to_string(),
        };

        debug!("region set to {city}, {state}");
        self.criteria.region = Region::new(state, city);
        self.page.current_page = 1;
        Ok(())
    }

    /// Validate the criteria and mark a request for `page` as in flight.
    ///
    /// With neither a term nor a tag the configured prompt is surfaced as the
    /// error and `InvalidQuery` is returned; nothing else changes.
    pub fn begin_search(&mut self, page: u32) -> Result<SearchTicket> {
        if !self.criteria.is_searchable() {
            let prompt = self.messages.invalid_query.clone();
            self.error = Some(prompt.clone());
            return Err(ConectaError::InvalidQuery(prompt));
        }

        let page = page.max(1);
        self.phase = if page == 1 {
            RequestPhase::LoadingInitial
        } else {
            RequestPhase::LoadingPage
        };
        self.error = None;
        self.issued += 1;

        let params = SearchParams::new(
            &self.criteria.region.state,
            &self.criteria.region.city,
            page,
            &self.criteria.search_term,
            &self.criteria.tag,
        );
        debug!(seq = self.issued, ?params, "search issued");

        Ok(SearchTicket {
            seq: self.issued,
            page,
            params,
        })
    }

    /// Fold a response into the session.
    ///
    /// Returns `Ok(true)` when applied and `Ok(false)` when the ticket was
    /// superseded by a newer request (the response is dropped). A failure for
    /// the current ticket keeps the previous results, moves to
    /// `RequestPhase::Error` and is returned.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        response: Result<SearchPage>,
    ) -> Result<bool> {
        if ticket.seq != self.issued {
            warn!(
                seq = ticket.seq,
                latest = self.issued,
                "discarding response for superseded search"
            );
            return Ok(false);
        }

        match response {
            Ok(found) => {
                self.page = PageState::from_total(ticket.page, found.total);
                self.results = found.providers;
                self.phase = RequestPhase::Idle;
                info!(
                    page = self.page.current_page,
                    total = self.page.total_results,
                    "search applied"
                );
                Ok(true)
            }
            Err(err) => {
                let message = err.user_message();
                warn!("search failed: {message}");
                self.phase = RequestPhase::Error(message.clone());
                self.error = Some(message);
                Err(err)
            }
        }
    }

    /// Run one search for `page` against the API. Failures are not retried.
    pub async fn search(&mut self, page: u32) -> Result<()> {
        let ticket = self.begin_search(page)?;
        let response = self.api.search_providers(ticket.params()).await;
        self.finish_search(ticket, response).map(|_| ())
    }

    /// Whether `go_to_page(page)` would issue a request.
    pub fn can_go_to(&self, page: u32) -> bool {
        self.page.contains(page) && page != self.page.current_page && !self.phase.is_loading_page()
    }

    /// Search `page` if it is in range, not current, and no pagination
    /// request is in flight. Returns whether a request was issued.
    pub async fn go_to_page(&mut self, page: u32) -> Result<bool> {
        if !self.can_go_to(page) {
            return Ok(false);
        }
        self.search(page).await.map(|_| true)
    }

    pub async fn next_page(&mut self) -> Result<bool> {
        if !self.page.has_next() {
            return Ok(false);
        }
        self.go_to_page(self.page.current_page + 1).await
    }

    pub async fn prev_page(&mut self) -> Result<bool> {
        if !self.page.has_prev() {
            return Ok(false);
        }
        self.go_to_page(self.page.current_page - 1).await
    }

    /// Drop criteria, results and errors. The region is kept and any request
    /// still in flight is superseded.
    pub fn clear_search(&mut self) {
        self.criteria.tag.clear();
        self.criteria.search_term.clear();
        self.results.clear();
        self.page = PageState::default();
        self.error = None;
        self.phase = RequestPhase::Idle;
        self.issued += 1;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        if matches!(self.phase, RequestPhase::Error(_)) {
            self.phase = RequestPhase::Idle;
        }
    }

    /// Window of page buttons for the current position.
    pub fn page_window(&self) -> PageWindow {
        compute_page_window(self.page.current_page, self.page.total_pages, DEFAULT_WINDOW)
    }

    /// Reflect a like toggle on the listed provider. Returns whether it was listed.
    pub fn record_like(&mut self, cnpj_basico: &str, action: LikeAction) -> bool {
        let Some(provider) = self
            .results
            .iter_mut()
            .find(|p| p.cnpj_basico == cnpj_basico)
        else {
            return false;
        };

        provider.user_liked = action == LikeAction::Added;
        provider.like_count += match action {
            LikeAction::Added => 1,
            LikeAction::Removed => -1,
        };
        true
    }

    /// Swap in an updated listing with the same `cnpj_basico`.
    pub fn replace_result(&mut self, updated: ProviderSummary) -> bool {
        match self
            .results
            .iter_mut()
            .find(|p| p.cnpj_basico == updated.cnpj_basico)
        {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }
}
