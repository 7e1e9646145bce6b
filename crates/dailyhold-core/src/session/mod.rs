mod controller;

pub use controller::{SessionController, SessionStatus, HOLD_DURATION_SECS};
