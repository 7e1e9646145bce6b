//! Interactive hold: start, tick once per second, celebrate.

use std::io::Write;

use tokio::time::{interval, Duration};

use dailyhold_core::{
    CelebrationParams, Celebrator, Config, DailyResetClock, Database, Event, NoopCelebrator,
    ScreenKeepAlive, SessionController, SessionStatus,
};

/// Terminal stand-in for the confetti burst.
struct TerminalCelebrator;

impl Celebrator for TerminalCelebrator {
    fn fire(&mut self, params: &CelebrationParams) {
        let confetti: String = "\u{1f389} ".repeat((params.particle_count / 50) as usize);
        println!("{confetti}");
    }
}

pub fn run(seconds: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let celebrator: Box<dyn Celebrator + Send> = if config.celebration.enabled {
        Box::new(TerminalCelebrator)
    } else {
        Box::new(NoopCelebrator)
    };
    // No wake-lock capability in a terminal; the session degrades cleanly.
    let mut controller = SessionController::new(db, ScreenKeepAlive::unsupported(), celebrator)
        .with_duration(seconds.unwrap_or(config.hold.duration_secs));

    controller.initialize();
    if controller.status() == SessionStatus::AlreadyCompleted {
        println!("Already completed today.");
        println!("Next hold available in {}", DailyResetClock::new().countdown());
        return Ok(());
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run_hold(&mut controller))
}

async fn run_hold(
    controller: &mut SessionController<Database>,
) -> Result<(), Box<dyn std::error::Error>> {
    controller.start().ok_or("hold already in progress")?;
    println!(
        "Hold started. Keep holding for {} seconds (Ctrl-C to give up)...",
        controller.duration_secs()
    );

    let mut ticker = interval(Duration::from_secs(1));
    ticker.tick().await; // The first tick fires immediately.
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match controller.tick() {
                    Some(Event::HoldCompleted { .. }) => {
                        // Paint first, then run the deferred effects.
                        println!("\rDone. Hold complete.        ");
                        controller.drain_deferred();
                        controller.dismiss();
                        println!(
                            "Next hold available in {}",
                            DailyResetClock::new().countdown()
                        );
                        return Ok(());
                    }
                    Some(Event::HoldTick { remaining_secs, .. }) => {
                        print!("\r{remaining_secs:>3}s remaining ");
                        std::io::stdout().flush()?;
                    }
                    _ => {}
                }
            }
            _ = &mut ctrl_c => {
                controller.give_up();
                controller.drain_deferred();
                println!("\nHold abandoned. Nothing was recorded.");
                return Ok(());
            }
        }
    }
}
