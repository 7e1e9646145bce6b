//! Share today's completion.
//!
//! A terminal has neither a share sheet nor a clipboard API, so the
//! clipboard fallback writes the composed text to stdout for copy-paste.

use dailyhold_core::{
    share_completion, Clipboard, Config, Database, NoopCelebrator, ScreenKeepAlive,
    SessionController, SessionStatus, ShareError, ShareOutcome, ShareTarget,
};

struct NoNativeShare;

impl ShareTarget for NoNativeShare {
    fn is_available(&self) -> bool {
        false
    }

    fn share(&mut self, _title: &str, _text: &str, _url: &str) -> Result<(), ShareError> {
        Err(ShareError::Unavailable)
    }
}

struct TerminalOutput;

impl Clipboard for TerminalOutput {
    fn copy(&mut self, text: &str) -> Result<(), ShareError> {
        println!("{text}");
        Ok(())
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut controller =
        SessionController::new(db, ScreenKeepAlive::unsupported(), Box::new(NoopCelebrator));
    controller.initialize();

    if controller.status() != SessionStatus::AlreadyCompleted {
        println!("No hold completed today yet.");
        return Ok(());
    }
    let completed_at = controller
        .completed_at()
        .ok_or("completion record missing")?;

    let outcome = share_completion(
        completed_at,
        &config.share.url,
        &mut NoNativeShare,
        &mut TerminalOutput,
    )?;
    if outcome == ShareOutcome::CopiedToClipboard {
        eprintln!("(copy the text above to share)");
    }
    Ok(())
}
