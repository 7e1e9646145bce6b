//! # DailyHold Core Library
//!
//! Core business logic for DailyHold, a one-hold-per-day habit tracker:
//! the user holds for 60 seconds once per calendar day, completion is
//! celebrated and persisted, and re-entry is gated until the next local
//! midnight.
//!
//! ## Architecture
//!
//! - **Session controller**: a tick-driven state machine; the host calls
//!   `tick()` once per second while a hold is running
//! - **Keep-alive**: best-effort screen wake lock behind a capability port,
//!   with recovery after platform revocation
//! - **Reset clock**: free-running countdown to the next local midnight
//! - **Storage**: a single SQLite kv slot for the completion record and
//!   TOML-based configuration
//!
//! Everything that can fail outside the state machine (storage, wake lock,
//! celebration) is advisory: the session's logical correctness never
//! depends on ancillary I/O succeeding.
//!
//! ## Key Components
//!
//! - [`SessionController`]: hold state machine
//! - [`ScreenKeepAlive`]: wake-lock resource manager
//! - [`DailyResetClock`]: midnight countdown
//! - [`Database`]: persisted completion record

pub mod effects;
pub mod error;
pub mod events;
pub mod keep_alive;
pub mod reset_clock;
pub mod session;
pub mod share;
pub mod storage;

pub use effects::{CelebrationParams, Celebrator, NoopCelebrator};
pub use error::{ConfigError, CoreError, KeepAliveError, ShareError, StorageError};
pub use events::Event;
pub use keep_alive::{ScreenKeepAlive, UnsupportedWakeLock, WakeLock};
pub use reset_clock::DailyResetClock;
pub use session::{SessionController, SessionStatus, HOLD_DURATION_SECS};
pub use share::{share_completion, share_text, Clipboard, ShareOutcome, ShareTarget};
pub use storage::{CompletionStore, Config, Database, LAST_COMPLETED_KEY};
