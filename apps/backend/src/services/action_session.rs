//! Live action state of the card face up on one table, plus its ticker.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::action::{ActionError, ActionState};
use crate::domain::cards::ActionOffer;
use crate::domain::rng::RandomSource;
use crate::domain::timer::TimerOp;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct ActionInner {
    state: ActionState,
    /// Bumped whenever a ticker starts or the card changes. A ticker only
    /// applies ticks while the generation it was spawned with is current.
    generation: u64,
    ticker: Option<CancellationToken>,
}

impl ActionInner {
    fn cancel_ticker(&mut self) {
        if let Some(token) = self.ticker.take() {
            token.cancel();
        }
        self.generation += 1;
    }
}

/// Owns the [`ActionState`] of the visible card and drives its timer.
///
/// The ticker is a Tokio task holding only a weak handle, so dropping the
/// session (or replacing the card) ends it.
#[derive(Debug, Default)]
pub struct ActionSession {
    inner: Arc<Mutex<ActionInner>>,
}

impl ActionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a fresh state for a newly visible card.
    pub fn show(&self, offer: ActionOffer) {
        let mut inner = self.inner.lock();
        inner.cancel_ticker();
        inner.state = ActionState::for_card(offer);
    }

    /// Nothing face up.
    pub fn clear(&self) {
        self.show(ActionOffer::default());
    }

    pub fn snapshot(&self) -> ActionState {
        self.inner.lock().state
    }

    pub fn apply(&self, op: TimerOp) -> Result<ActionState, ActionError> {
        let mut inner = self.inner.lock();
        match op {
            TimerOp::Start => {
                inner.state.start_timer()?;
                self.spawn_ticker(&mut inner);
            }
            TimerOp::Resume => {
                inner.state.timer.resume()?;
                self.spawn_ticker(&mut inner);
            }
            TimerOp::Pause => {
                inner.state.timer.pause()?;
                inner.cancel_ticker();
            }
            TimerOp::Stop => {
                inner.state.timer.stop();
                inner.cancel_ticker();
            }
            TimerOp::Reset => {
                inner.state.timer.reset()?;
                inner.cancel_ticker();
            }
        }
        debug!(%op, phase = %inner.state.timer.phase, "timer transition");
        Ok(inner.state)
    }

    pub fn roll_dice(&self, rng: &mut dyn RandomSource) -> Result<ActionState, ActionError> {
        let mut inner = self.inner.lock();
        let face = inner.state.roll_dice(rng)?;
        debug!(face, "dice rolled");
        Ok(inner.state)
    }

    /// Stop any running ticker without touching the timer state.
    pub fn shutdown(&self) {
        self.inner.lock().cancel_ticker();
    }

    fn spawn_ticker(&self, inner: &mut ActionInner) {
        inner.cancel_ticker();
        let generation = inner.generation;
        let token = CancellationToken::new();
        inner.ticker = Some(token.clone());

        let handle = Arc::downgrade(&self.inner);
        tokio::spawn(run_ticker(handle, generation, token));
    }
}

impl Drop for ActionSession {
    fn drop(&mut self) {
        self.inner.lock().cancel_ticker();
    }
}

async fn run_ticker(handle: Weak<Mutex<ActionInner>>, generation: u64, token: CancellationToken) {
    let mut interval = interval_at(Instant::now() + TICK, TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                let Some(inner) = handle.upgrade() else { break };
                if !apply_tick(&inner, generation) {
                    break;
                }
            }
        }
    }
}

/// Apply one tick if `generation` is still current. Returns whether the
/// ticker should keep going.
fn apply_tick(inner: &Mutex<ActionInner>, generation: u64) -> bool {
    let mut inner = inner.lock();
    if inner.generation != generation {
        return false;
    }
    inner.state.timer.tick();
    if inner.state.timer.is_running() {
        return true;
    }
    debug!("timer finished");
    inner.ticker = None;
    false
}
