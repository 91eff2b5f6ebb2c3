//! End-to-end flows of the notes manager through the runtime, against an
//! in-memory notes backend on a paused clock.

mod common;

use common::{RecordingSink, StubNotes};
use notehub::api::Services;
use notehub::app::{Event, NotesApp, Pagination, Runtime, ViewState};
use notehub::domain::{CreateNotePayload, ItemId, NoteTag};
use rstest::rstest;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

fn runtime(stub: &Arc<StubNotes>) -> Runtime<NotesApp, RecordingSink> {
    Runtime::new(NotesApp::default(), RecordingSink::default(), Services::notes(stub.clone()))
}

async fn started(stub: &Arc<StubNotes>) -> Runtime<NotesApp, RecordingSink> {
    let mut rt = runtime(stub);
    rt.dispatch(Event::Start).unwrap();
    rt.run_until_idle().await.unwrap();
    rt
}

fn first_title(rt: &Runtime<NotesApp, RecordingSink>) -> String {
    rt.app().displayed().unwrap().items[0].title.clone()
}

// =============================================================================
// Loading and pagination
// =============================================================================

#[tokio::test(start_paused = true)]
async fn start_loads_first_unfiltered_page() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let rt = started(&stub).await;

    let fetches = stub.fetches();
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].page, 1);
    assert_eq!(fetches[0].per_page, 12);
    assert_eq!(fetches[0].search, None);

    let view = rt.app().browser().view();
    assert_eq!(view.state.result().unwrap().items.len(), 12);
    assert_eq!(
        view.pagination,
        Some(Pagination {
            page: 1,
            total_pages: 3
        })
    );
}

#[rstest]
#[case(0, false)]
#[case(5, false)]
#[case(12, false)]
#[case(13, true)]
#[tokio::test(start_paused = true)]
async fn pagination_shown_only_with_more_than_one_page(#[case] notes: usize, #[case] shown: bool) {
    let stub = Arc::new(StubNotes::with_notes(notes));
    let rt = started(&stub).await;

    assert_eq!(rt.app().browser().view().pagination.is_some(), shown);
}

#[tokio::test(start_paused = true)]
async fn page_change_keeps_search_term() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let mut rt = started(&stub).await;

    rt.dispatch(Event::SearchInput("note".to_string())).unwrap();
    rt.run_until_idle().await.unwrap();
    rt.dispatch(Event::NextPage).unwrap();
    rt.run_until_idle().await.unwrap();

    let last = stub.fetches().pop().unwrap();
    assert_eq!(last.page, 2);
    assert_eq!(last.search.as_deref(), Some("note"));
}

#[tokio::test(start_paused = true)]
async fn out_of_range_page_is_ignored() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let mut rt = started(&stub).await;

    assert!(!rt.dispatch(Event::PageChange(4)).unwrap());
    assert!(!rt.dispatch(Event::PageChange(0)).unwrap());
    assert!(!rt.dispatch(Event::PrevPage).unwrap());
    assert_eq!(rt.pending_len(), 0);
    assert_eq!(stub.fetch_count(), 1);
}

// =============================================================================
// Debounced search
// =============================================================================

#[tokio::test(start_paused = true)]
async fn rapid_input_coalesces_into_one_fetch_on_page_one() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let mut rt = started(&stub).await;
    rt.dispatch(Event::PageChange(2)).unwrap();
    rt.run_until_idle().await.unwrap();
    assert_eq!(stub.fetch_count(), 2);

    for text in ["n", "no", "not", "note 1"] {
        rt.dispatch(Event::SearchInput(text.to_string())).unwrap();
    }
    assert_eq!(stub.fetch_count(), 2);
    rt.run_until_idle().await.unwrap();

    let fetches = stub.fetches();
    assert_eq!(fetches.len(), 3);
    assert_eq!(fetches[2].page, 1);
    assert_eq!(fetches[2].search.as_deref(), Some("note 1"));
    assert_eq!(rt.app().browser().list().page(), 1);
}

#[tokio::test(start_paused = true)]
async fn input_settles_only_after_quiet_window() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let mut rt = started(&stub).await;

    rt.dispatch(Event::SearchInput("note 2".to_string())).unwrap();
    let early = tokio::time::timeout(Duration::from_millis(299), rt.next_event()).await;
    assert!(early.is_err());

    let settled = rt.next_event().await.unwrap();
    assert!(matches!(settled, Event::DebounceElapsed { .. }));
}

#[tokio::test(start_paused = true)]
async fn blank_input_clears_the_filter() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let mut rt = started(&stub).await;

    rt.dispatch(Event::SearchInput("note 3".to_string())).unwrap();
    rt.run_until_idle().await.unwrap();
    assert_eq!(rt.app().displayed().unwrap().items.len(), 2);

    rt.dispatch(Event::SearchInput("   ".to_string())).unwrap();
    rt.run_until_idle().await.unwrap();

    assert_eq!(stub.fetch_count(), 2);
    assert_eq!(rt.app().browser().list().search_term(), "");
    assert_eq!(rt.app().displayed().unwrap().items.len(), 12);
    assert!(rt.sink().errors().is_empty());
}

#[tokio::test(start_paused = true)]
async fn whitespace_after_empty_search_reuses_cached_list() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let mut rt = started(&stub).await;

    rt.dispatch(Event::SearchInput("   ".to_string())).unwrap();
    rt.run_until_idle().await.unwrap();

    assert_eq!(stub.fetch_count(), 1);
    assert_eq!(first_title(&rt), "Note 1");
}

// =============================================================================
// Cache behavior
// =============================================================================

#[tokio::test(start_paused = true)]
async fn revisiting_a_loaded_page_does_not_refetch() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let mut rt = started(&stub).await;

    rt.dispatch(Event::PageChange(2)).unwrap();
    rt.run_until_idle().await.unwrap();
    rt.dispatch(Event::PageChange(1)).unwrap();
    rt.run_until_idle().await.unwrap();

    assert_eq!(stub.fetch_count(), 2);
    assert_eq!(first_title(&rt), "Note 1");
}

#[tokio::test(start_paused = true)]
async fn key_already_in_flight_is_not_fetched_twice() {
    let stub = Arc::new(StubNotes::with_notes(30));
    stub.delay_next_fetch(Duration::from_millis(500));
    let mut rt = runtime(&stub);

    rt.dispatch(Event::Start).unwrap();
    rt.dispatch(Event::PageChange(2)).unwrap();
    rt.dispatch(Event::PageChange(1)).unwrap();
    rt.run_until_idle().await.unwrap();

    let mut pages: Vec<u32> = stub.fetches().iter().map(|f| f.page).collect();
    pages.sort_unstable();
    assert_eq!(pages, vec![1, 2]);
    assert_eq!(first_title(&rt), "Note 1");
}

#[tokio::test(start_paused = true)]
async fn previous_results_stay_visible_while_next_key_loads() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let mut rt = started(&stub).await;
    stub.delay_next_fetch(Duration::from_secs(1));

    rt.dispatch(Event::PageChange(2)).unwrap();

    let view = rt.app().browser().view();
    let ViewState::Updating {
        result,
        from_previous_query,
    } = &view.state
    else {
        panic!("expected the previous page while loading, got {view:?}");
    };
    assert!(*from_previous_query);
    assert_eq!(result.items[0].title, "Note 1");

    rt.run_until_idle().await.unwrap();
    assert_eq!(first_title(&rt), "Note 13");
}

#[tokio::test(start_paused = true)]
async fn empty_state_never_shows_while_loading() {
    let stub = Arc::new(StubNotes::with_notes(0));
    stub.delay_next_fetch(Duration::from_millis(100));
    let mut rt = runtime(&stub);

    rt.dispatch(Event::Start).unwrap();
    assert_eq!(rt.app().browser().view().state, ViewState::InitialLoading);

    rt.run_until_idle().await.unwrap();
    assert_eq!(rt.app().browser().view().state, ViewState::Empty);

    stub.delay_next_fetch(Duration::from_millis(100));
    rt.dispatch(Event::SearchInput("anything".to_string())).unwrap();
    while let Some(event) = rt.next_event().await {
        rt.dispatch(event).unwrap();
        if rt.app().browser().cache().snapshot().is_some_and(|s| s.is_fetching) {
            assert_ne!(rt.app().browser().view().state, ViewState::Empty);
        }
    }
    assert_eq!(rt.app().browser().view().state, ViewState::Empty);
}

#[tokio::test(start_paused = true)]
async fn failed_load_shows_error_and_notifies_once() {
    let stub = Arc::new(StubNotes::with_notes(30));
    stub.fail_fetch.store(true, Ordering::SeqCst);
    let rt = started(&stub).await;

    assert!(matches!(rt.app().browser().view().state, ViewState::Error { .. }));
    assert_eq!(rt.sink().errors(), vec!["Failed to load notes."]);
}

// =============================================================================
// Mutations
// =============================================================================

fn payload(title: &str) -> CreateNotePayload {
    CreateNotePayload {
        title: title.to_string(),
        content: "from the test".to_string(),
        tag: NoteTag::Work,
    }
}

#[tokio::test(start_paused = true)]
async fn create_refetches_and_closes_form() {
    let stub = Arc::new(StubNotes::with_notes(3));
    let mut rt = started(&stub).await;

    rt.dispatch(Event::OpenCreateForm).unwrap();
    rt.dispatch(Event::CreateItem(payload("Fresh"))).unwrap();
    assert!(rt.app().mutations().is_creating());
    rt.run_until_idle().await.unwrap();

    assert_eq!(stub.fetch_count(), 2);
    assert_eq!(first_title(&rt), "Fresh");
    assert!(!rt.app().is_form_open());
    assert!(!rt.app().mutations().is_creating());
    assert_eq!(rt.sink().messages(), vec!["Note created"]);
}

#[tokio::test(start_paused = true)]
async fn second_create_while_pending_is_refused() {
    let stub = Arc::new(StubNotes::with_notes(3));
    let mut rt = started(&stub).await;

    rt.dispatch(Event::CreateItem(payload("One"))).unwrap();
    rt.dispatch(Event::CreateItem(payload("Two"))).unwrap();
    rt.run_until_idle().await.unwrap();

    assert_eq!(stub.create_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_create_keeps_form_and_cache() {
    let stub = Arc::new(StubNotes::with_notes(3));
    stub.fail_create.store(true, Ordering::SeqCst);
    let mut rt = started(&stub).await;

    rt.dispatch(Event::OpenCreateForm).unwrap();
    rt.dispatch(Event::CreateItem(payload("Nope"))).unwrap();
    rt.run_until_idle().await.unwrap();

    assert_eq!(stub.fetch_count(), 1);
    assert!(rt.app().is_form_open());
    assert_eq!(rt.sink().errors(), vec!["Failed to create note"]);
}

#[tokio::test(start_paused = true)]
async fn deletes_are_tracked_per_id() {
    let stub = Arc::new(StubNotes::with_notes(5));
    let mut rt = started(&stub).await;
    let first = ItemId::new("n1");
    let second = ItemId::new("n2");

    rt.dispatch(Event::DeleteItem(first.clone())).unwrap();
    rt.dispatch(Event::DeleteItem(second.clone())).unwrap();
    rt.dispatch(Event::DeleteItem(first.clone())).unwrap();

    assert!(rt.app().mutations().is_deleting(&first));
    assert!(rt.app().mutations().is_deleting(&second));
    assert!(!rt.app().mutations().is_deleting(&ItemId::new("n3")));

    rt.run_until_idle().await.unwrap();

    assert_eq!(stub.delete_count(), 2);
    assert!(!rt.app().mutations().is_deleting(&first));
    assert!(!rt.app().mutations().is_deleting(&second));
    assert_eq!(rt.sink().messages(), vec!["Note deleted", "Note deleted"]);
    assert_eq!(first_title(&rt), "Note 3");
}

#[tokio::test(start_paused = true)]
async fn failed_delete_clears_marker_so_retry_works() {
    let stub = Arc::new(StubNotes::with_notes(5));
    stub.fail_delete.store(true, Ordering::SeqCst);
    let mut rt = started(&stub).await;
    let id = ItemId::new("n1");

    rt.dispatch(Event::DeleteItem(id.clone())).unwrap();
    rt.run_until_idle().await.unwrap();

    assert!(!rt.app().mutations().is_deleting(&id));
    assert_eq!(rt.sink().errors(), vec!["Failed to delete note"]);
    assert_eq!(stub.fetch_count(), 1);

    stub.fail_delete.store(false, Ordering::SeqCst);
    rt.dispatch(Event::DeleteItem(id)).unwrap();
    rt.run_until_idle().await.unwrap();

    assert_eq!(stub.delete_count(), 2);
    assert_eq!(first_title(&rt), "Note 2");
}

#[tokio::test(start_paused = true)]
async fn failed_delete_releases_only_its_own_id() {
    let stub = Arc::new(StubNotes::with_notes(50));
    let slow = ItemId::new("n7");
    let failing = ItemId::new("n42");
    stub.delay_delete_of(&slow, Duration::from_secs(1));
    stub.fail_delete_of(&failing);
    let mut rt = started(&stub).await;

    rt.dispatch(Event::DeleteItem(slow.clone())).unwrap();
    rt.dispatch(Event::DeleteItem(failing.clone())).unwrap();

    while let Some(event) = rt.next_event().await {
        let failed_delete = matches!(&event, Event::NoteDeleted { id, .. } if *id == failing);
        rt.dispatch(event).unwrap();
        if failed_delete {
            break;
        }
    }

    assert!(!rt.app().mutations().is_deleting(&failing));
    assert!(rt.app().mutations().is_deleting(&slow));
    assert_eq!(rt.sink().errors(), vec!["Failed to delete note"]);

    rt.run_until_idle().await.unwrap();

    assert!(!rt.app().mutations().is_deleting(&slow));
    assert_eq!(rt.sink().messages(), vec!["Failed to delete note", "Note deleted"]);
}

#[tokio::test(start_paused = true)]
async fn refetch_after_mutation_wins_over_older_response() {
    let stub = Arc::new(StubNotes::with_notes(3));
    stub.delay_next_fetch(Duration::from_secs(1));
    let mut rt = runtime(&stub);

    rt.dispatch(Event::Start).unwrap();
    // Let the slow initial fetch start and capture the old list.
    let none_yet = tokio::time::timeout(Duration::from_millis(10), rt.next_event()).await;
    assert!(none_yet.is_err());

    rt.dispatch(Event::CreateItem(payload("Newest"))).unwrap();
    rt.run_until_idle().await.unwrap();

    assert_eq!(stub.fetch_count(), 2);
    assert_eq!(first_title(&rt), "Newest");
    assert_eq!(rt.app().displayed().unwrap().items.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn dispose_cancels_pending_search() {
    let stub = Arc::new(StubNotes::with_notes(3));
    let mut rt = started(&stub).await;

    rt.dispatch(Event::SearchInput("note".to_string())).unwrap();
    rt.dispatch(Event::Dispose).unwrap();
    rt.run_until_idle().await.unwrap();

    assert_eq!(stub.fetch_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn closed_input_still_settles_pending_search() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let mut rt = runtime(&stub);
    let (tx, rx) = tokio::sync::mpsc::channel(4);
    tx.send(Event::SearchInput("note 2".to_string())).await.unwrap();
    drop(tx);

    let mut renders = 0;
    rt.run(rx, |_, _| renders += 1).await.unwrap();

    let last = stub.fetches().pop().unwrap();
    assert_eq!(last.search.as_deref(), Some("note 2"));
    assert_eq!(first_title(&rt), "Note 2");
    assert_eq!(rt.pending_len(), 0);
    assert!(renders >= 3);
}

#[tokio::test(start_paused = true)]
async fn dispose_from_input_stops_without_settling() {
    let stub = Arc::new(StubNotes::with_notes(30));
    let mut rt = runtime(&stub);
    let (tx, rx) = tokio::sync::mpsc::channel(4);
    tx.send(Event::SearchInput("note 2".to_string())).await.unwrap();
    tx.send(Event::Dispose).await.unwrap();

    rt.run(rx, |_, _| {}).await.unwrap();

    assert!(stub.fetches().iter().all(|f| f.search.is_none()));
}
