use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dailyhold", version, about = "DailyHold CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run today's hold in the terminal
    Hold {
        /// Override the hold duration in seconds (development)
        #[arg(long)]
        seconds: Option<u32>,
    },
    /// Print the current session state as JSON
    Status,
    /// Compose the share text for today's completion
    Share,
    /// Serve the minimal status endpoint
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Hold { seconds } => commands::hold::run(seconds),
        Commands::Status => commands::status::run(),
        Commands::Share => commands::share::run(),
        Commands::Serve { addr } => commands::serve::run(&addr),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
