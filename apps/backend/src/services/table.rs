//! Open tables: one in-process session per deck, persisted after every move.
//!
//! The session keeps the deck, the presentation [`Table`] and the live
//! [`ActionSession`] of the visible card. Draw-state writes happen after the
//! in-memory transition and never roll it back; a failed write surfaces as a
//! [`Notice`] on the returned view.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::action_session::ActionSession;
use crate::adapters::DocumentStore;
use crate::domain::action::ActionState;
use crate::domain::cards::ActionOffer;
use crate::domain::deck::Deck;
use crate::domain::draw::DrawState;
use crate::domain::table::{DrawOutcome, ResumePolicy, Table};
use crate::domain::timer::TimerOp;
use crate::errors::domain::DomainError;
use crate::protocol::table_view::{ActionView, Notice, TableView, VisibleCard};
use crate::repos::{decks, draw_states};
use crate::state::{AppState, SharedRandom};

#[derive(Debug)]
pub struct TableSession {
    deck: Arc<Deck>,
    table: Mutex<Table>,
    action: ActionSession,
}

impl TableSession {
    fn new(deck: Deck, table: Table) -> Self {
        let session = Self {
            deck: Arc::new(deck),
            table: Mutex::new(table),
            action: ActionSession::new(),
        };
        session.action.show(session.visible_offer());
        session
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn action_state(&self) -> ActionState {
        self.action.snapshot()
    }

    fn visible_offer(&self) -> ActionOffer {
        self.table
            .lock()
            .visible_card()
            .and_then(|i| self.deck.card(i))
            .map(|card| card.offer())
            .unwrap_or_default()
    }

    fn view(&self, notice: Option<Notice>) -> TableView {
        let table = self.table.lock();
        let card = table.visible_card().and_then(|index| {
            self.deck.card(index).map(|card| VisibleCard {
                index,
                card: card.clone(),
            })
        });
        TableView {
            deck: self.deck.name.clone(),
            phase: table.phase(),
            remaining: table.remaining(),
            total: self.deck.len(),
            back_icon: self.deck.back_icon().to_string(),
            offer: card.as_ref().map(|c| c.card.offer()).unwrap_or_default(),
            card,
            action: self.action.snapshot(),
            notice,
        }
    }

    fn action_view(&self) -> ActionView {
        let action = self.action.snapshot();
        ActionView {
            deck: self.deck.name.clone(),
            card_index: self.table.lock().visible_card(),
            offer: action.offer(),
            action,
        }
    }
}

/// Open sessions keyed by deck name.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    sessions: Arc<DashMap<String, Arc<TableSession>>>,
}

impl TableRegistry {
    pub fn get(&self, name: &str) -> Option<Arc<TableSession>> {
        self.sessions.get(name).map(|s| Arc::clone(s.value()))
    }

    /// Insert unless another request got there first; returns the winner.
    fn insert_if_absent(&self, name: &str, session: Arc<TableSession>) -> Arc<TableSession> {
        let entry = self
            .sessions
            .entry(name.to_string())
            .or_insert(session);
        Arc::clone(entry.value())
    }

    /// Drop the open session for `name`, stopping its ticker.
    pub fn evict(&self, name: &str) -> bool {
        match self.sessions.remove(name) {
            Some((_, session)) => {
                session.action.shutdown();
                debug!(deck = %name, "table session evicted");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Table operations for one request.
pub struct TableService<'a> {
    store: &'a dyn DocumentStore,
    tables: &'a TableRegistry,
    random: &'a SharedRandom,
    policy: ResumePolicy,
}

impl<'a> TableService<'a> {
    pub fn new(
        store: &'a dyn DocumentStore,
        tables: &'a TableRegistry,
        random: &'a SharedRandom,
        policy: ResumePolicy,
    ) -> Self {
        Self {
            store,
            tables,
            random,
            policy,
        }
    }

    pub fn for_state(state: &'a AppState) -> Self {
        Self::new(
            state.store(),
            &state.tables,
            &state.random,
            state.resume_policy,
        )
    }

    /// Open the table for `name`, resuming saved progress if there is any.
    pub async fn open(&self, name: &str) -> Result<TableView, DomainError> {
        let (session, notice) = self.session(name).await?;
        Ok(session.view(notice))
    }

    pub async fn draw(&self, name: &str) -> Result<TableView, DomainError> {
        let (session, open_notice) = self.session(name).await?;
        let size = session.deck.len();

        let (outcome, snapshot) = {
            let mut table = session.table.lock();
            let outcome = self.random.with(|rng| table.draw(size, rng));
            (outcome, table.state().clone())
        };

        let mut notice = match outcome {
            DrawOutcome::Revealed { card_index } => {
                let offer = session
                    .deck
                    .card(card_index)
                    .map(|c| c.offer())
                    .unwrap_or_default();
                session.action.show(offer);
                debug!(deck = %name, card_index, "card drawn");
                None
            }
            DrawOutcome::Reshuffled => {
                session.action.clear();
                debug!(deck = %name, "deck exhausted, reshuffled");
                Some(Notice::deck_exhausted())
            }
        };

        if let Some(failed) = self.persist(name, &snapshot).await {
            notice = Some(failed);
        }
        Ok(session.view(notice.or(open_notice)))
    }

    pub async fn reset(&self, name: &str) -> Result<TableView, DomainError> {
        let (session, _) = self.session(name).await?;
        let size = session.deck.len();

        let snapshot = {
            let mut table = session.table.lock();
            self.random.with(|rng| table.reset(size, rng));
            table.state().clone()
        };
        session.action.clear();
        debug!(deck = %name, "table reset");

        let notice = self.persist(name, &snapshot).await;
        Ok(session.view(notice))
    }

    pub async fn action(&self, name: &str) -> Result<ActionView, DomainError> {
        let (session, _) = self.session(name).await?;
        Ok(session.action_view())
    }

    pub async fn timer(&self, name: &str, op: TimerOp) -> Result<ActionView, DomainError> {
        let (session, _) = self.session(name).await?;
        session.action.apply(op)?;
        Ok(session.action_view())
    }

    pub async fn roll_dice(&self, name: &str) -> Result<ActionView, DomainError> {
        let (session, _) = self.session(name).await?;
        self.random.with(|rng| session.action.roll_dice(rng))?;
        Ok(session.action_view())
    }

    /// Existing session, or a new one built from storage.
    async fn session(&self, name: &str) -> Result<(Arc<TableSession>, Option<Notice>), DomainError> {
        if let Some(session) = self.tables.get(name) {
            return Ok((session, None));
        }

        let deck = decks::load_deck(self.store, name).await?;
        let mut notice = None;

        let saved = match draw_states::load_draw_state(self.store, name).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!(deck = %name, error = %e, "draw state unavailable, starting fresh");
                notice = Some(Notice::persistence_failure());
                None
            }
        };

        let (table, fresh) = self
            .random
            .with(|rng| Table::resume(saved, deck.len(), self.policy, rng));
        debug!(deck = %name, fresh, phase = ?table.phase(), "table opened");

        let (session, failed) = self.adopt(name, TableSession::new(deck, table), fresh).await;
        Ok((session, failed.or(notice)))
    }

    /// Register `candidate` and, when it is a fresh shuffle that won the race
    /// for the registry slot, persist it. A losing candidate is discarded
    /// without touching storage.
    async fn adopt(
        &self,
        name: &str,
        candidate: TableSession,
        fresh: bool,
    ) -> (Arc<TableSession>, Option<Notice>) {
        let fresh_state = fresh.then(|| candidate.table.lock().state().clone());
        let candidate = Arc::new(candidate);
        let session = self.tables.insert_if_absent(name, Arc::clone(&candidate));

        if !Arc::ptr_eq(&session, &candidate) {
            candidate.action.shutdown();
            debug!(deck = %name, "concurrent open won, discarding shuffle");
            return (session, None);
        }

        let notice = match fresh_state {
            Some(state) => self.persist(name, &state).await,
            None => None,
        };
        (session, notice)
    }

    async fn persist(&self, name: &str, state: &DrawState) -> Option<Notice> {
        match draw_states::save_draw_state(self.store, name, state).await {
            Ok(()) => None,
            Err(e) => {
                warn!(deck = %name, error = %e, "failed to save draw state");
                Some(Notice::persistence_failure())
            }
        }
    }
}
