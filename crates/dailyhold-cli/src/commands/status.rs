//! Print the current session state as JSON.

use dailyhold_core::{Database, NoopCelebrator, ScreenKeepAlive, SessionController};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut controller =
        SessionController::new(db, ScreenKeepAlive::unsupported(), Box::new(NoopCelebrator));
    let snapshot = controller.initialize();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
