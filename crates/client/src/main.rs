//! Duel simulator binary.
//!
//! Loads configuration from the environment (and `.env`), logs to stderr and
//! prints the notification stream of one scripted duel to stdout.
//!
//! # Examples
//!
//! ```bash
//! DUEL_SEED=7 DUEL_EVENT_FORMAT=json cargo run -p duel-sim
//! RUST_LOG=duel::combat=debug cargo run -p duel-sim
//! ```

use anyhow::Result;
use duel_sim::{EventPrinter, SimConfig, Simulation};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!(
        seed = config.seed,
        max_turns = config.max_turns,
        format = %config.event_format,
        "starting duel"
    );

    let printer = EventPrinter::new(config.event_format);
    let outcome = Simulation::new(&config, printer)?.run()?;

    match outcome.winner {
        Some(side) => println!("{side} wins after {} turn(s)", outcome.turns),
        None => println!("no winner after {} turn(s)", outcome.turns),
    }
    Ok(())
}
