mod commands;

use clap::{Parser, Subcommand};
use coinflip_game::open_table;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "coinflip")]
#[command(about = "Heads-or-tails betting with virtual points")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// User identifier to play as
    #[arg(short, long, global = true, default_value_t = 1)]
    user: i64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive flip-and-bet session
    Play,
    /// Show the current balance
    Balance,
    /// Play many flips unattended and report the tally
    Simulate {
        /// Number of flips to play
        #[arg(short, long, default_value_t = 100)]
        flips: usize,
        /// Fixed stake per flip (defaults to the largest affordable menu stake)
        #[arg(short, long)]
        bet: Option<i64>,
        /// Side to back on every flip (heads or tails)
        #[arg(short, long, default_value = "heads")]
        side: String,
        /// Emit the tally as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "coinflip={},coinflip_game={},coinflip_core={}",
            log_level, log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The ledger lives for this process only; every run starts fresh.
    let game = open_table();
    let user = coinflip_core::UserId(cli.user);

    let result = match cli.command {
        Commands::Play => commands::play(&game, user),
        Commands::Balance => commands::show_balance(&game, user),
        Commands::Simulate {
            flips,
            bet,
            side,
            json,
        } => commands::simulate(&game, user, flips, bet, &side, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
