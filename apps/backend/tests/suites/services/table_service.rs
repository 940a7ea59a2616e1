use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use cardtable::adapters::{DocKind, DocumentStore, MemoryDocumentStore};
use cardtable::domain::table::TablePhase;
use cardtable::domain::timer::{TimerOp, TimerPhase};
use cardtable::errors::domain::DomainError;
use cardtable::protocol::table_view::NoticeKind;
use cardtable::repos::draw_states;
use cardtable::services::table::TableService;

use crate::support::fixtures::{ACTIONS_CSV, TRIVIA_CSV};
use crate::support::test_state::{build_test_state, import, state_over};

/// Memory store whose draw-state writes can be switched off.
#[derive(Debug, Default)]
struct FlakyStore {
    inner: MemoryDocumentStore,
    fail_state_writes: AtomicBool,
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn get(&self, kind: DocKind, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        self.inner.get(kind, key).await
    }

    async fn put(&self, kind: DocKind, key: &str, body: Vec<u8>) -> Result<(), DomainError> {
        if kind == DocKind::DrawState && self.fail_state_writes.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("disk full"));
        }
        self.inner.put(kind, key, body).await
    }

    async fn delete(&self, kind: DocKind, key: &str) -> Result<bool, DomainError> {
        self.inner.delete(kind, key).await
    }

    async fn keys(&self, kind: DocKind) -> Result<Vec<String>, DomainError> {
        self.inner.keys(kind).await
    }
}

#[tokio::test]
async fn failed_save_is_a_notice_and_keeps_the_move() {
    let store = Arc::new(FlakyStore::default());
    let state = state_over(store.clone()).await;
    import(&state, TRIVIA_CSV).await;
    let service = TableService::for_state(&state);

    service.open("Trivia").await.unwrap();
    store.fail_state_writes.store(true, Ordering::SeqCst);

    let view = service.draw("Trivia").await.unwrap();
    assert_eq!(view.phase, TablePhase::FaceShown);
    assert_eq!(view.remaining, 2);
    assert_eq!(
        view.notice.map(|n| n.kind),
        Some(NoticeKind::PersistenceFailure)
    );

    // stored state is still the fresh shuffle
    let saved = draw_states::load_draw_state(state.store(), "Trivia")
        .await
        .unwrap()
        .unwrap();
    assert!(saved.drawn_cards.is_empty());

    store.fail_state_writes.store(false, Ordering::SeqCst);
    let view = service.draw("Trivia").await.unwrap();
    assert!(view.notice.is_none());
    let saved = draw_states::load_draw_state(state.store(), "Trivia")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.drawn_cards.len(), 2);
}

#[tokio::test]
async fn fresh_open_reports_unsaved_shuffle() {
    let store = Arc::new(FlakyStore::default());
    store.fail_state_writes.store(true, Ordering::SeqCst);
    let state = state_over(store.clone()).await;
    import(&state, TRIVIA_CSV).await;

    let view = TableService::for_state(&state).open("Trivia").await.unwrap();
    assert_eq!(view.phase, TablePhase::WaitingToStart);
    assert_eq!(
        view.notice.map(|n| n.kind),
        Some(NoticeKind::PersistenceFailure)
    );
}

#[tokio::test]
async fn unreadable_state_starts_fresh() {
    let state = build_test_state().await;
    import(&state, TRIVIA_CSV).await;
    state
        .store()
        .put(DocKind::DrawState, "Trivia", b"{not json".to_vec())
        .await
        .unwrap();

    let view = TableService::for_state(&state).open("Trivia").await.unwrap();
    assert_eq!(view.remaining, 3);
    assert!(view.notice.is_none());
    let saved = draw_states::load_draw_state(state.store(), "Trivia")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.shuffled_order.len(), 3);
}

#[tokio::test]
async fn stale_indices_show_no_card() {
    let state = build_test_state().await;
    import(&state, TRIVIA_CSV).await;
    let doc = serde_json::json!({"shuffledOrder": [7, 0], "drawnCards": [7], "currentCardIndex": 0});
    draw_states::save_raw_state(state.store(), "Trivia", &doc)
        .await
        .unwrap();

    let view = TableService::for_state(&state).open("Trivia").await.unwrap();
    assert_eq!(view.phase, TablePhase::FaceShown);
    assert!(view.card.is_none());
    assert!(view.offer.is_empty());
}

#[tokio::test(start_paused = true)]
async fn timer_runs_in_the_background_and_stops_on_eviction() {
    let state = build_test_state().await;
    import(&state, ACTIONS_CSV).await;
    let service = TableService::for_state(&state);

    service.draw("Timers").await.unwrap();
    service.timer("Timers", TimerOp::Start).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

    let view = service.action("Timers").await.unwrap();
    assert_eq!(view.action.timer.phase, TimerPhase::Running);
    assert_eq!(view.action.timer.remaining_seconds, Some(28));

    let session = state.tables.get("Timers").unwrap();
    assert!(state.tables.evict("Timers"));
    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    assert_eq!(session.deck().name, "Timers");
    assert_eq!(session.action_state().timer.remaining_seconds, Some(28));

    // a reopened table starts with a fresh action state
    let view = service.action("Timers").await.unwrap();
    assert_eq!(view.action.timer.phase, TimerPhase::Idle);
}

#[tokio::test]
async fn dice_rolls_are_reported_on_the_action_view() {
    let state = build_test_state().await;
    import(&state, ACTIONS_CSV).await;
    let service = TableService::for_state(&state);

    service.draw("Dice").await.unwrap();
    for _ in 0..20 {
        let view = service.roll_dice("Dice").await.unwrap();
        let face = view.action.dice.last_roll.unwrap();
        assert!((1..=6).contains(&face));
    }
}
