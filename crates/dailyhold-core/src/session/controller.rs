//! Hold session state machine.
//!
//! The controller is tick-driven: it has no internal threads, the host
//! calls `tick()` once per second while a hold is running. All ancillary
//! I/O (completion record, wake lock, celebration) goes through injected
//! ports, and none of it can fail a transition.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running -> Completed -> AlreadyCompleted
//!         Running -> Idle          (give up)
//! ```
//!
//! Completion is two-phase. Phase 1 flips the state and returns the event
//! so the host can paint "completed" immediately. Phase 2 (wake-lock
//! release, persistence write, celebration) sits in a deferred queue until
//! the host calls [`SessionController::drain_deferred`], so the completion
//! frame is never blocked on I/O.

use std::collections::VecDeque;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::effects::{CelebrationParams, Celebrator};
use crate::events::Event;
use crate::keep_alive::ScreenKeepAlive;
use crate::reset_clock::{countdown_at, is_same_local_day};
use crate::storage::CompletionStore;

/// One hold lasts a minute.
pub const HOLD_DURATION_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    Idle,
    Running,
    Completed,
    AlreadyCompleted,
}

/// Side effects queued during a transition, run on the next drain.
enum DeferredEffect {
    ReleaseKeepAlive,
    PersistCompletion(DateTime<Utc>),
    Celebrate,
}

/// Owns the hold state machine and coordinates the surrounding resources.
pub struct SessionController<S: CompletionStore> {
    store: S,
    keep_alive: ScreenKeepAlive,
    celebrator: Box<dyn Celebrator + Send>,
    celebration: CelebrationParams,
    status: SessionStatus,
    remaining_secs: u32,
    duration_secs: u32,
    /// Set only on the transition into Completed; also restored from the
    /// persisted record when today's hold is already satisfied.
    completed_at: Option<DateTime<Utc>>,
    deferred: VecDeque<DeferredEffect>,
}

impl<S: CompletionStore> SessionController<S> {
    /// Create a controller in the Idle state with the full duration ready.
    ///
    /// Call [`initialize`](Self::initialize) afterwards to apply daily
    /// gating from the persisted record.
    pub fn new(
        store: S,
        keep_alive: ScreenKeepAlive,
        celebrator: Box<dyn Celebrator + Send>,
    ) -> Self {
        Self {
            store,
            keep_alive,
            celebrator,
            celebration: CelebrationParams::default(),
            status: SessionStatus::Idle,
            remaining_secs: HOLD_DURATION_SECS,
            duration_secs: HOLD_DURATION_SECS,
            completed_at: None,
            deferred: VecDeque::new(),
        }
    }

    /// Override the hold duration (development configuration).
    pub fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs.max(1);
        self.remaining_secs = self.duration_secs;
        self
    }

    /// Override the celebration parameters.
    pub fn with_celebration(mut self, params: CelebrationParams) -> Self {
        self.celebration = params;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Build a full state snapshot event for polling hosts.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            status: self.status,
            remaining_secs: self.remaining_secs,
            duration_secs: self.duration_secs,
            completed_at: self.completed_at,
            next_hold_in: countdown_at(Local::now()),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply daily gating from the persisted completion record.
    ///
    /// A stored timestamp on today's local calendar day puts the session
    /// straight into AlreadyCompleted. Anything else - no record, a prior
    /// day, an unreadable store, an unparseable value - leaves it Idle.
    pub fn initialize(&mut self) -> Event {
        self.initialize_at(Local::now())
    }

    pub fn initialize_at(&mut self, now: DateTime<Local>) -> Event {
        match self.store.read_last_completed() {
            Ok(Some(raw)) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(stored) => {
                    let stored = stored.with_timezone(&Utc);
                    if is_same_local_day(stored, now) {
                        self.status = SessionStatus::AlreadyCompleted;
                        self.completed_at = Some(stored);
                    }
                }
                Err(err) => {
                    debug!("ignoring unparseable completion timestamp: {err}");
                }
            },
            Ok(None) => {}
            Err(err) => {
                debug!("completion store unavailable, assuming no prior completion: {err}");
            }
        }
        self.snapshot()
    }

    /// Begin today's hold. Valid only from Idle; a stray call from any
    /// other state is ignored.
    pub fn start(&mut self) -> Option<Event> {
        if self.status != SessionStatus::Idle {
            return None;
        }
        // Best effort: a missing wake lock never blocks the hold.
        self.keep_alive.acquire();
        self.remaining_secs = self.duration_secs;
        self.status = SessionStatus::Running;
        Some(Event::HoldStarted {
            duration_secs: self.duration_secs,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Ticks arriving while not Running are dropped, which defends against
    /// stale timers firing after a give-up or completion. The tick that
    /// exhausts the count finalizes completion directly: there is no
    /// observable "0 seconds remaining, still running" frame.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(Utc::now())
    }

    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.status != SessionStatus::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.complete_at(now));
        }
        Some(Event::HoldTick {
            remaining_secs: self.remaining_secs,
            at: now,
        })
    }

    /// Phase 1 of completion: flip the state and report. Phase 2 is queued
    /// for [`drain_deferred`](Self::drain_deferred).
    fn complete_at(&mut self, now: DateTime<Utc>) -> Event {
        self.status = SessionStatus::Completed;
        self.completed_at = Some(now);
        self.deferred.push_back(DeferredEffect::ReleaseKeepAlive);
        self.deferred.push_back(DeferredEffect::PersistCompletion(now));
        self.deferred.push_back(DeferredEffect::Celebrate);
        Event::HoldCompleted { at: now }
    }

    /// Run side effects queued by the last transition. Hosts call this
    /// after rendering the new state, so completion feedback is never
    /// blocked by storage latency.
    pub fn drain_deferred(&mut self) {
        while let Some(effect) = self.deferred.pop_front() {
            match effect {
                DeferredEffect::ReleaseKeepAlive => self.keep_alive.release(),
                DeferredEffect::PersistCompletion(at) => {
                    if let Err(err) = self.store.write_last_completed(&at.to_rfc3339()) {
                        // The session still counts for this run.
                        warn!("completion not persisted: {err}");
                    }
                }
                DeferredEffect::Celebrate => self.celebrator.fire(&self.celebration),
            }
        }
    }

    /// Abandon the running hold. Discards all progress, leaves no durable
    /// trace. No-op outside Running.
    pub fn give_up(&mut self) -> Option<Event> {
        if self.status != SessionStatus::Running {
            return None;
        }
        self.keep_alive.release();
        let abandoned_at = self.remaining_secs;
        self.remaining_secs = self.duration_secs;
        self.status = SessionStatus::Idle;
        Some(Event::HoldAbandoned {
            remaining_secs: abandoned_at,
            at: Utc::now(),
        })
    }

    /// Dismiss the completion view. Pure view transition, no side effects.
    pub fn dismiss(&mut self) -> Option<Event> {
        if self.status != SessionStatus::Completed {
            return None;
        }
        self.status = SessionStatus::AlreadyCompleted;
        Some(Event::CompletionDismissed { at: Utc::now() })
    }

    /// Forward a foreground-regained signal to the keep-alive manager so
    /// it can recover a platform-revoked wake lock.
    pub fn on_foreground_regained(&mut self) {
        self.keep_alive.on_foreground_regained();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::NoopCelebrator;
    use crate::error::StorageError;
    use crate::storage::Database;
    use chrono::TimeZone;

    /// Store whose reads and writes always fail.
    struct BrokenStore;

    impl CompletionStore for BrokenStore {
        fn read_last_completed(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::QueryFailed("disk on fire".into()))
        }

        fn write_last_completed(&self, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QueryFailed("disk on fire".into()))
        }
    }

    fn controller() -> SessionController<Database> {
        SessionController::new(
            Database::open_memory().unwrap(),
            ScreenKeepAlive::unsupported(),
            Box::new(NoopCelebrator),
        )
    }

    fn run_to_completion(ctl: &mut SessionController<Database>) {
        ctl.start().unwrap();
        for _ in 0..ctl.duration_secs() {
            ctl.tick();
        }
    }

    #[test]
    fn counts_down_one_second_per_tick() {
        let mut ctl = controller();
        ctl.start().unwrap();
        for n in 1..HOLD_DURATION_SECS {
            ctl.tick();
            assert_eq!(ctl.remaining_secs(), HOLD_DURATION_SECS - n);
            assert_eq!(ctl.status(), SessionStatus::Running);
        }
    }

    #[test]
    fn final_tick_completes_atomically() {
        let mut ctl = controller();
        ctl.start().unwrap();
        for _ in 0..HOLD_DURATION_SECS - 1 {
            ctl.tick();
        }
        assert_eq!(ctl.remaining_secs(), 1);
        let event = ctl.tick().unwrap();
        // No intermediate "0 remaining, still running" frame.
        assert!(matches!(event, Event::HoldCompleted { .. }));
        assert_eq!(ctl.status(), SessionStatus::Completed);
        assert_eq!(ctl.remaining_secs(), 0);
        assert!(ctl.completed_at().is_some());
    }

    #[test]
    fn persistence_happens_on_drain_not_on_tick() {
        let mut ctl = controller();
        run_to_completion(&mut ctl);
        assert!(ctl.store.read_last_completed().unwrap().is_none());
        ctl.drain_deferred();
        let stored = ctl.store.read_last_completed().unwrap().unwrap();
        let stored = DateTime::parse_from_rfc3339(&stored).unwrap();
        assert_eq!(stored.with_timezone(&Utc), ctl.completed_at().unwrap());
    }

    #[test]
    fn start_outside_idle_is_ignored() {
        let mut ctl = controller();
        ctl.start().unwrap();
        assert!(ctl.start().is_none());
        ctl.tick();
        let remaining = ctl.remaining_secs();
        assert!(ctl.start().is_none());
        assert_eq!(ctl.remaining_secs(), remaining);
    }

    #[test]
    fn give_up_outside_running_is_ignored() {
        let mut ctl = controller();
        assert!(ctl.give_up().is_none());
        assert_eq!(ctl.status(), SessionStatus::Idle);
    }

    #[test]
    fn give_up_resets_and_leaves_no_trace() {
        let mut ctl = controller();
        ctl.start().unwrap();
        for _ in 0..17 {
            ctl.tick();
        }
        let event = ctl.give_up().unwrap();
        assert!(matches!(
            event,
            Event::HoldAbandoned {
                remaining_secs: 43,
                ..
            }
        ));
        assert_eq!(ctl.status(), SessionStatus::Idle);
        assert_eq!(ctl.remaining_secs(), HOLD_DURATION_SECS);
        ctl.drain_deferred();
        assert!(ctl.store.read_last_completed().unwrap().is_none());
    }

    #[test]
    fn stale_ticks_are_dropped() {
        let mut ctl = controller();
        assert!(ctl.tick().is_none());
        ctl.start().unwrap();
        ctl.give_up().unwrap();
        assert!(ctl.tick().is_none());
        assert_eq!(ctl.remaining_secs(), HOLD_DURATION_SECS);
    }

    #[test]
    fn dismiss_only_from_completed() {
        let mut ctl = controller();
        assert!(ctl.dismiss().is_none());
        run_to_completion(&mut ctl);
        ctl.dismiss().unwrap();
        assert_eq!(ctl.status(), SessionStatus::AlreadyCompleted);
        assert!(ctl.dismiss().is_none());
    }

    #[test]
    fn round_trip_keeps_completion_timestamp() {
        let mut ctl = controller();
        run_to_completion(&mut ctl);
        let completed_at = ctl.completed_at().unwrap();
        ctl.drain_deferred();
        ctl.dismiss().unwrap();
        assert_eq!(ctl.status(), SessionStatus::AlreadyCompleted);
        assert_eq!(ctl.completed_at().unwrap(), completed_at);
    }

    #[test]
    fn initializes_already_completed_on_same_day() {
        let today_morning = Local.with_ymd_and_hms(2026, 3, 14, 8, 0, 0).unwrap();
        let today_evening = Local.with_ymd_and_hms(2026, 3, 14, 20, 0, 0).unwrap();
        let db = Database::open_memory().unwrap();
        db.write_last_completed(&today_morning.with_timezone(&Utc).to_rfc3339())
            .unwrap();
        let mut ctl = SessionController::new(
            db,
            ScreenKeepAlive::unsupported(),
            Box::new(NoopCelebrator),
        );
        ctl.initialize_at(today_evening);
        assert_eq!(ctl.status(), SessionStatus::AlreadyCompleted);
        assert_eq!(
            ctl.completed_at().unwrap(),
            today_morning.with_timezone(&Utc)
        );
    }

    #[test]
    fn completion_at_2359_does_not_gate_0001_next_day() {
        let just_before_midnight = Local.with_ymd_and_hms(2026, 3, 14, 23, 59, 0).unwrap();
        let just_after_midnight = Local.with_ymd_and_hms(2026, 3, 15, 0, 1, 0).unwrap();
        let db = Database::open_memory().unwrap();
        db.write_last_completed(&just_before_midnight.with_timezone(&Utc).to_rfc3339())
            .unwrap();
        let mut ctl = SessionController::new(
            db,
            ScreenKeepAlive::unsupported(),
            Box::new(NoopCelebrator),
        );
        ctl.initialize_at(just_after_midnight);
        assert_eq!(ctl.status(), SessionStatus::Idle);
    }

    #[test]
    fn unreadable_store_initializes_idle() {
        let mut ctl = SessionController::new(
            BrokenStore,
            ScreenKeepAlive::unsupported(),
            Box::new(NoopCelebrator),
        );
        ctl.initialize();
        assert_eq!(ctl.status(), SessionStatus::Idle);
    }

    #[test]
    fn garbage_timestamp_initializes_idle() {
        let db = Database::open_memory().unwrap();
        db.write_last_completed("not a timestamp").unwrap();
        let mut ctl = SessionController::new(
            db,
            ScreenKeepAlive::unsupported(),
            Box::new(NoopCelebrator),
        );
        ctl.initialize();
        assert_eq!(ctl.status(), SessionStatus::Idle);
    }

    #[test]
    fn failed_persistence_does_not_roll_back_completion() {
        let mut ctl = SessionController::new(
            BrokenStore,
            ScreenKeepAlive::unsupported(),
            Box::new(NoopCelebrator),
        )
        .with_duration(3);
        ctl.start().unwrap();
        ctl.tick();
        ctl.tick();
        ctl.tick();
        assert_eq!(ctl.status(), SessionStatus::Completed);
        ctl.drain_deferred();
        assert_eq!(ctl.status(), SessionStatus::Completed);
        assert!(ctl.completed_at().is_some());
    }

    #[test]
    fn keep_alive_failure_does_not_block_start() {
        // Unsupported platform: acquire always fails.
        let mut ctl = controller();
        assert!(ctl.start().is_some());
        assert_eq!(ctl.status(), SessionStatus::Running);
    }

    #[test]
    fn celebration_uses_configured_params() {
        use std::sync::mpsc;

        struct CapturingCelebrator(mpsc::Sender<CelebrationParams>);

        impl Celebrator for CapturingCelebrator {
            fn fire(&mut self, params: &CelebrationParams) {
                let _ = self.0.send(params.clone());
            }
        }

        let (tx, rx) = mpsc::channel();
        let params = CelebrationParams {
            particle_count: 40,
            ..CelebrationParams::default()
        };
        let mut ctl = SessionController::new(
            Database::open_memory().unwrap(),
            ScreenKeepAlive::unsupported(),
            Box::new(CapturingCelebrator(tx)),
        )
        .with_duration(2)
        .with_celebration(params.clone());
        ctl.start().unwrap();
        ctl.tick();
        ctl.tick();
        ctl.drain_deferred();
        assert_eq!(rx.try_recv().unwrap(), params);
    }

    #[test]
    fn shortened_duration_for_dev() {
        let mut ctl = SessionController::new(
            Database::open_memory().unwrap(),
            ScreenKeepAlive::unsupported(),
            Box::new(NoopCelebrator),
        )
        .with_duration(5);
        ctl.start().unwrap();
        for _ in 0..5 {
            ctl.tick();
        }
        assert_eq!(ctl.status(), SessionStatus::Completed);
    }
}
