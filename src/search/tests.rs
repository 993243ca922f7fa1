use std::collections::VecDeque;
use std::future::Future;

use parking_lot::Mutex;

use super::*;
use crate::api::{LikeAction, ProviderSummary, SearchApi, SearchPage, SearchParams};
use crate::error::{ConectaError, Result};
use crate::region::{Region, RegionCatalog, StateEntry};

/// Search API that replays queued responses and records every call.
#[derive(Default)]
struct ScriptedApi {
    responses: Mutex<VecDeque<Result<SearchPage>>>,
    calls: Mutex<Vec<SearchParams>>,
}

impl ScriptedApi {
    fn with(responses: Vec<Result<SearchPage>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::default(),
        }
    }

    fn calls(&self) -> Vec<SearchParams> {
        self.calls.lock().clone()
    }
}

impl SearchApi for ScriptedApi {
    fn search_providers(
        &self,
        params: &SearchParams,
    ) -> impl Future<Output = Result<SearchPage>> + Send {
        self.calls.lock().push(params.clone());
        let next = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ConectaError::Network("no scripted response".to_string())));
        async move { next }
    }
}

fn provider(id: usize) -> ProviderSummary {
    ProviderSummary {
        cnpj_basico: format!("{id:08}"),
        cnpj_ordem: "0001".to_string(),
        cnpj_dv: "00".to_string(),
        razao_social: format!("Prestador {id}"),
        ..ProviderSummary::default()
    }
}

fn page_of(count: usize, total: u64) -> Result<SearchPage> {
    Ok(SearchPage {
        providers: (0..count).map(provider).collect(),
        total,
    })
}

fn settings() -> SessionSettings {
    let mut catalog = RegionCatalog::default();
    catalog.insert("SC", "Santa Catarina", "Joinville");
    catalog.insert("SC", "Santa Catarina", "Blumenau");
    SessionSettings {
        catalog,
        ..SessionSettings::default()
    }
}

fn controller(responses: Vec<Result<SearchPage>>) -> SearchSessionController<ScriptedApi> {
    SearchSessionController::new(ScriptedApi::with(responses), settings())
}

#[tokio::test]
async fn test_search_without_term_or_tag_is_rejected() {
    let mut session = controller(vec![]);

    let err = session.search(1).await.unwrap_err();

    assert!(matches!(err, ConectaError::InvalidQuery(_)));
    assert_eq!(
        session.error(),
        Some("select a category or enter a search term")
    );
    assert_eq!(session.phase(), &RequestPhase::Idle);
    assert_eq!(session.page_state(), PageState::default());
    assert!(session.api().calls().is_empty());
}

#[tokio::test]
async fn test_tag_selection_searches_first_page() {
    let mut session = controller(vec![page_of(8, 8)]);

    session.set_region("PR", Some("Campo Largo")).unwrap();
    session.toggle_tag("Eletricista").await.unwrap();

    let state = session.page_state();
    assert_eq!(state.total_pages, 1);
    assert_eq!(state.current_page, 1);
    assert_eq!(state.total_results, 8);
    assert_eq!(session.results().len(), 8);
    assert_eq!(session.phase(), &RequestPhase::Idle);

    let calls = session.api().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        SearchParams {
            state: "PR".to_string(),
            city: "Campo Largo".to_string(),
            page: 1,
            search_term: None,
            tag: Some("Eletricista".to_string()),
        }
    );
}

#[tokio::test]
async fn test_next_page_stops_at_last_page() {
    let mut session = controller(vec![page_of(10, 25), page_of(10, 25), page_of(5, 25)]);
    session.set_search_term("pintura");
    session.search(1).await.unwrap();
    assert_eq!(session.page_state().total_pages, 3);

    assert!(session.next_page().await.unwrap());
    assert!(session.next_page().await.unwrap());
    assert_eq!(session.page_state().current_page, 3);

    assert!(!session.next_page().await.unwrap());
    assert_eq!(session.page_state().current_page, 3);
    assert_eq!(session.api().calls().len(), 3);
    assert_eq!(session.results().len(), 5);
}

#[tokio::test]
async fn test_go_to_page_outside_range_is_noop() {
    let mut session = controller(vec![page_of(10, 25)]);
    session.set_search_term("pintura");
    session.search(1).await.unwrap();

    for page in [0, 1, 4, 99] {
        assert!(!session.go_to_page(page).await.unwrap());
        assert_eq!(session.page_state().current_page, 1);
    }
    assert!(!session.prev_page().await.unwrap());
    assert_eq!(session.api().calls().len(), 1);
}

#[tokio::test]
async fn test_toggle_same_tag_twice_clears() {
    let mut session = controller(vec![page_of(3, 3)]);

    session.toggle_tag("Pintor").await.unwrap();
    assert_eq!(session.criteria().tag, "Pintor");
    assert_eq!(session.results().len(), 3);

    session.toggle_tag("Pintor").await.unwrap();
    assert_eq!(session.criteria().tag, "");
    assert!(session.results().is_empty());
    assert_eq!(session.page_state(), PageState::default());
    assert_eq!(session.api().calls().len(), 1);
}

#[tokio::test]
async fn test_switching_tag_searches_again() {
    let mut session = controller(vec![page_of(3, 3), page_of(2, 2)]);

    session.toggle_tag("Pintor").await.unwrap();
    session.toggle_tag("Encanador").await.unwrap();

    assert_eq!(session.criteria().tag, "Encanador");
    assert_eq!(session.results().len(), 2);
    let calls = session.api().calls();
    assert_eq!(calls[1].tag.as_deref(), Some("Encanador"));
}

#[tokio::test]
async fn test_failed_tag_switch_keeps_page_position() {
    let mut session = controller(vec![
        page_of(10, 50),
        page_of(10, 50),
        Err(ConectaError::Network("could not reach the server".to_string())),
        page_of(4, 4),
    ]);

    session.toggle_tag("Pintor").await.unwrap();
    assert!(session.go_to_page(3).await.unwrap());

    session.toggle_tag("Encanador").await.unwrap_err();

    let state = session.page_state();
    assert_eq!(state.current_page, 3);
    assert_eq!(state.total_pages, 5);
    assert_eq!(session.results().len(), 10);
    assert_eq!(
        session.phase(),
        &RequestPhase::Error("could not reach the server".to_string())
    );

    // page 1 of the new tag is still reachable
    assert!(session.go_to_page(1).await.unwrap());
    let state = session.page_state();
    assert_eq!(state.current_page, 1);
    assert_eq!(state.total_results, 4);
    assert_eq!(
        session.api().calls().last().unwrap().tag.as_deref(),
        Some("Encanador")
    );
}

#[tokio::test]
async fn test_prev_page_on_first_page_is_noop() {
    let mut session = controller(vec![page_of(10, 30)]);
    session.set_search_term("reforma");
    session.search(1).await.unwrap();

    assert!(!session.prev_page().await.unwrap());
    assert_eq!(session.api().calls().len(), 1);
}

#[test]
fn test_set_region_defaults_city_and_resets_page() {
    let mut session = controller(vec![]);

    session.set_region("SC", None).unwrap();
    assert_eq!(session.region(), &Region::new("SC", "Joinville"));

    session.set_region("PR", None).unwrap();
    assert_eq!(session.region(), &Region::new("PR", "Campo Largo"));
    assert_eq!(session.page_state().current_page, 1);
}

#[tokio::test]
async fn test_set_region_resets_current_page() {
    let mut session = controller(vec![page_of(10, 30), page_of(10, 30)]);
    session.set_search_term("reforma");
    session.search(1).await.unwrap();
    session.go_to_page(2).await.unwrap();
    assert_eq!(session.page_state().current_page, 2);

    session.set_region("SC", Some("Blumenau")).unwrap();
    assert_eq!(session.page_state().current_page, 1);
    assert_eq!(session.region().city, "Blumenau");
}

#[test]
fn test_set_region_unknown_state_leaves_session() {
    let mut session = SearchSessionController::new(
        ScriptedApi::default(),
        SessionSettings {
            catalog: RegionCatalog::new(vec![StateEntry {
                code: "PR".to_string(),
                name: "Paraná".to_string(),
                cities: vec!["Campo Largo".to_string()],
            }]),
            ..SessionSettings::default()
        },
    );

    let err = session.set_region("AM", None).unwrap_err();
    assert!(matches!(err, ConectaError::UnknownRegion(ref s) if s == "AM"));
    assert_eq!(session.region(), &Region::default());
}

#[tokio::test]
async fn test_failure_keeps_previous_results() {
    let mut session = controller(vec![
        page_of(10, 25),
        Err(ConectaError::Server {
            status: 500,
            message: "Erro interno".to_string(),
        }),
        page_of(10, 25),
    ]);
    session.set_search_term("eletricista");
    session.search(1).await.unwrap();

    let err = session.next_page().await.unwrap_err();
    assert!(matches!(err, ConectaError::Server { status: 500, .. }));
    assert_eq!(
        session.phase(),
        &RequestPhase::Error("Erro interno".to_string())
    );
    assert_eq!(session.error(), Some("Erro interno"));
    assert_eq!(session.page_state().current_page, 1);
    assert_eq!(session.results().len(), 10);

    // usable again after a failure
    assert!(session.next_page().await.unwrap());
    assert_eq!(session.page_state().current_page, 2);
    assert_eq!(session.phase(), &RequestPhase::Idle);
    assert_eq!(session.error(), None);
}

#[tokio::test]
async fn test_network_failure_uses_generic_message() {
    let mut session = controller(vec![Err(ConectaError::Network(
        "could not reach the server".to_string(),
    ))]);
    session.set_search_term("marceneiro");

    assert!(session.search(1).await.is_err());
    assert_eq!(
        session.phase(),
        &RequestPhase::Error("could not reach the server".to_string())
    );
}

#[test]
fn test_loading_phases_are_exclusive() {
    let mut session = controller(vec![]);
    session.set_search_term("pedreiro");

    let first = session.begin_search(1).unwrap();
    assert_eq!(session.phase(), &RequestPhase::LoadingInitial);

    let second = session.begin_search(2).unwrap();
    assert_eq!(session.phase(), &RequestPhase::LoadingPage);
    assert!(session.phase().is_loading());

    assert_eq!(first.page(), 1);
    assert_eq!(second.page(), 2);
}

#[test]
fn test_pagination_blocked_while_page_in_flight() {
    let mut session = controller(vec![]);
    session.set_search_term("pedreiro");
    let ticket = session.begin_search(1).unwrap();
    session.finish_search(ticket, page_of(10, 40)).unwrap();

    let _pending = session.begin_search(2).unwrap();
    assert!(!session.can_go_to(3));

    session.clear_search();
    assert!(!session.phase().is_loading());
}

#[test]
fn test_stale_response_is_discarded() {
    let mut session = controller(vec![]);
    session.set_search_term("pintor");
    let stale = session.begin_search(1).unwrap();

    session.set_search_term("pintor de paredes");
    let latest = session.begin_search(1).unwrap();
    assert_eq!(latest.params().search_term.as_deref(), Some("pintor de paredes"));

    // latest completes first, then the older one arrives
    assert!(session.finish_search(latest, page_of(2, 2)).unwrap());
    assert!(!session.finish_search(stale, page_of(9, 9)).unwrap());

    assert_eq!(session.results().len(), 2);
    assert_eq!(session.page_state().total_results, 2);
    assert_eq!(session.phase(), &RequestPhase::Idle);
}

#[test]
fn test_stale_failure_is_discarded() {
    let mut session = controller(vec![]);
    session.set_search_term("pintor");
    let stale = session.begin_search(1).unwrap();
    let latest = session.begin_search(1).unwrap();

    let dropped = session.finish_search(stale, Err(ConectaError::Network("timeout".to_string())));
    assert!(matches!(dropped, Ok(false)));
    assert_eq!(session.phase(), &RequestPhase::LoadingInitial);

    assert!(session.finish_search(latest, page_of(1, 1)).unwrap());
}

#[test]
fn test_clear_search_supersedes_in_flight_request() {
    let mut session = controller(vec![]);
    session.set_region("SC", None).unwrap();
    session.set_search_term("dentista");
    let ticket = session.begin_search(1).unwrap();

    session.clear_search();
    assert!(!session.finish_search(ticket, page_of(4, 4)).unwrap());

    assert!(session.results().is_empty());
    assert_eq!(session.criteria().search_term, "");
    assert_eq!(session.region().state, "SC");
    assert_eq!(session.phase(), &RequestPhase::Idle);
}

#[tokio::test]
async fn test_clear_error_keeps_results() {
    let mut session = controller(vec![
        page_of(10, 20),
        Err(ConectaError::Network("offline".to_string())),
    ]);
    session.set_search_term("advogado");
    session.search(1).await.unwrap();
    let _ = session.next_page().await;

    session.clear_error();
    assert_eq!(session.error(), None);
    assert_eq!(session.phase(), &RequestPhase::Idle);
    assert_eq!(session.results().len(), 10);
}

#[tokio::test]
async fn test_search_term_and_tag_both_sent() {
    let mut session = controller(vec![page_of(1, 1)]);
    session.set_search_term("24h");
    session.toggle_tag("Encanador").await.unwrap();

    let calls = session.api().calls();
    assert_eq!(calls[0].search_term.as_deref(), Some("24h"));
    assert_eq!(calls[0].tag.as_deref(), Some("Encanador"));
}

#[tokio::test]
async fn test_page_window_follows_session() {
    let mut session = controller(vec![page_of(10, 100)]);
    session.set_search_term("contador");
    session.search(1).await.unwrap();

    let window = session.page_window();
    assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);
    assert_eq!(window.last_page, Some(10));
}

#[tokio::test]
async fn test_record_like_updates_listing() {
    let mut session = controller(vec![page_of(3, 3)]);
    session.toggle_tag("Manicure").await.unwrap();
    let id = session.results()[1].cnpj_basico.clone();

    assert!(session.record_like(&id, LikeAction::Added));
    assert!(session.results()[1].user_liked);
    assert_eq!(session.results()[1].like_count, 1);

    assert!(session.record_like(&id, LikeAction::Removed));
    assert!(!session.results()[1].user_liked);
    assert_eq!(session.results()[1].like_count, 0);

    assert!(!session.record_like("99999999", LikeAction::Added));
}

#[tokio::test]
async fn test_replace_result_by_cnpj() {
    let mut session = controller(vec![page_of(2, 2)]);
    session.toggle_tag("Médico").await.unwrap();

    let mut updated = session.results()[0].clone();
    updated.razao_social = "Clínica Nova".to_string();
    assert!(session.replace_result(updated));
    assert_eq!(session.results()[0].razao_social, "Clínica Nova");
}
