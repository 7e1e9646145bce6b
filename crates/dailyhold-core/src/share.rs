//! Share/export of a completed hold.
//!
//! Peripheral to the session core: composes a fixed text template from the
//! completion date and hands it to the platform share sheet, falling back
//! to the clipboard when no native share target exists.

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use crate::error::ShareError;

/// Platform share sheet.
pub trait ShareTarget {
    fn is_available(&self) -> bool;
    fn share(&mut self, title: &str, text: &str, url: &str) -> Result<(), ShareError>;
}

/// Clipboard fallback.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ShareError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    CopiedToClipboard,
    /// The user backed out of the share sheet. Nothing else happens.
    Cancelled,
}

/// `DailyHold 3/14` + checkmark, month and day unpadded.
pub fn share_text(completed_at: DateTime<Utc>) -> String {
    let local = completed_at.with_timezone(&Local);
    format!("DailyHold {}\n\u{2705}", local.format("%-m/%-d"))
}

/// Share a completion, preferring the native sheet.
///
/// A cancelled or failed native share is final (matching share-sheet
/// conventions); the clipboard is only used when no native target exists.
/// The clipboard itself failing is the one share error callers see.
pub fn share_completion(
    completed_at: DateTime<Utc>,
    url: &str,
    target: &mut dyn ShareTarget,
    clipboard: &mut dyn Clipboard,
) -> Result<ShareOutcome, ShareError> {
    let text = share_text(completed_at);
    if target.is_available() {
        return match target.share("DailyHold", &text, url) {
            Ok(()) => Ok(ShareOutcome::Shared),
            Err(err) => {
                debug!("native share did not complete: {err}");
                Ok(ShareOutcome::Cancelled)
            }
        };
    }
    clipboard.copy(&text)?;
    Ok(ShareOutcome::CopiedToClipboard)
}
