//! Screen keep-alive management.
//!
//! Keeps the display from sleeping while a hold is running. The platform
//! capability may be missing entirely, may refuse the request, and may
//! revoke a granted handle whenever the app loses foreground visibility.
//! Every operation here is advisory: no failure from this module ever
//! propagates into a session transition.

use tracing::{debug, info};

use crate::error::KeepAliveError;

/// Platform wake-lock capability.
///
/// Implementations come in two flavors: supported platforms hold a real
/// handle behind `request`/`release`, unsupported platforms refuse
/// `request` and report `is_supported() == false`. The handle is never
/// exposed; `is_released` reports whether the platform has invalidated it
/// out from under us.
pub trait WakeLock {
    fn is_supported(&self) -> bool;

    /// Request the resource. On success the implementation holds the
    /// handle internally until `release` or platform revocation.
    fn request(&mut self) -> Result<(), KeepAliveError>;

    /// Release the held handle, if any.
    fn release(&mut self) -> Result<(), KeepAliveError>;

    /// True when no handle is currently held, including after the
    /// platform revoked it asynchronously.
    fn is_released(&self) -> bool;
}

/// Capability stub for platforms without a wake lock. Always degrades.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedWakeLock;

impl WakeLock for UnsupportedWakeLock {
    fn is_supported(&self) -> bool {
        false
    }

    fn request(&mut self) -> Result<(), KeepAliveError> {
        Err(KeepAliveError::Unsupported)
    }

    fn release(&mut self) -> Result<(), KeepAliveError> {
        Ok(())
    }

    fn is_released(&self) -> bool {
        true
    }
}

/// Owns the wake-lock capability for the duration of a session.
///
/// Tracks "last known active" separately from the platform handle: when the
/// platform revokes the handle while the app is backgrounded, the flag still
/// says a session conceptually holds the lock, and `on_foreground_regained`
/// re-requests it.
pub struct ScreenKeepAlive {
    lock: Box<dyn WakeLock + Send>,
    active: bool,
}

impl ScreenKeepAlive {
    pub fn new(lock: Box<dyn WakeLock + Send>) -> Self {
        Self {
            lock,
            active: false,
        }
    }

    /// Manager over a platform with no capability at all.
    pub fn unsupported() -> Self {
        Self::new(Box::new(UnsupportedWakeLock))
    }

    /// Whether the display is currently being held awake.
    pub fn is_holding(&self) -> bool {
        self.active && !self.lock.is_released()
    }

    /// Best-effort acquire. Returns whether the display is now held awake;
    /// callers proceed either way.
    pub fn acquire(&mut self) -> bool {
        if !self.lock.is_supported() {
            debug!("wake lock not supported on this platform");
            return false;
        }
        match self.lock.request() {
            Ok(()) => {
                self.active = true;
                info!("wake lock acquired, display will stay on");
                true
            }
            Err(err) => {
                debug!("wake lock request failed: {err}");
                false
            }
        }
    }

    /// Best-effort release. Tolerates an already-revoked handle and
    /// swallows platform errors; always clears the active flag.
    pub fn release(&mut self) {
        if self.active && !self.lock.is_released() {
            if let Err(err) = self.lock.release() {
                debug!("wake lock release failed: {err}");
            }
        }
        self.active = false;
    }

    /// The platform revokes the handle when the app is backgrounded. If a
    /// session conceptually still holds the lock, re-request it now that
    /// the app is visible again. Fire-and-forget: failure is not reported.
    pub fn on_foreground_regained(&mut self) {
        if self.active && self.lock.is_released() {
            debug!("foreground regained, re-requesting wake lock");
            if let Err(err) = self.lock.request() {
                debug!("wake lock re-acquire failed: {err}");
            }
        }
    }
}
