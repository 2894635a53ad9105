#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use interject::{
    init_logging, run, CancellationSignal, Console, GuessingGame, ListenerConfig, DEFAULT_HOST,
    DEFAULT_PORT, SECRET_MAX, SECRET_MIN, SHUTDOWN_GRACE,
};

#[cfg(feature = "std")]
use clap::{ArgAction, Parser};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::time::Duration;

/// Number guessing game that shows messages sent to it over TCP.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Address or host name the hacker message server binds to.
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    /// Port the hacker message server listens on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    #[arg(long, help = "Fix RNG seed for a reproducible secret (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Largest number the secret can be.
    #[arg(long, default_value_t = SECRET_MAX)]
    max: u32,
    /// Play without accepting remote messages.
    #[arg(long)]
    no_listener: bool,
    /// Milliseconds the message server gets to stop after the game ends.
    #[arg(long, default_value_t = SHUTDOWN_GRACE.as_millis() as u64)]
    grace_ms: u64,
    /// Log more to stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut rng = if let Some(s) = cli.seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };
    let game = GuessingGame::with_range(&mut rng, SECRET_MIN, cli.max)?;

    let listener = if cli.no_listener {
        None
    } else {
        Some(ListenerConfig::new(cli.host, cli.port))
    };

    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let end = run(
        std::io::BufReader::new(std::io::stdin()),
        game,
        Console::stdout(),
        CancellationSignal::new(),
        listener,
        Duration::from_millis(cli.grace_ms),
        interrupted,
    )
    .await?;
    log::info!("game over: {:?}", end);
    Ok(())
}
