//! Binary entrypoint for the Coffer CLI.
//!
//! Commands:
//! - `init` - write a starter `coffer.toml`
//! - `check` - validate the configuration and summarise the denomination table
//! - `decode <magnitude> [--json]` - break a base magnitude into denominations
//! - `encode <counts...>` - sum per-denomination counts into a base magnitude
//! - `price <amount> [--unit <id>]` - convert a tagged price into base units
//! - `animate --ticks <n>` - print the portrait redraws a message would produce
//!
//! See the library crate docs for module-level details: `coffer::`.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use coffer::config::Config;
use coffer::ledger::{format_plain, DecomposedAmount};
use coffer::portrait::TickSignals;
use coffer::session::GameSession;

#[derive(Parser)]
#[command(name = "coffer")]
#[command(about = "Multi-currency ledger and animated portrait tools for RPG hosts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "coffer.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Validate the configuration and print the denomination table
    Check,
    /// Break a base magnitude into per-denomination counts
    Decode {
        #[arg(allow_negative_numbers = true)]
        magnitude: i64,
        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sum per-denomination counts (highest first) into a base magnitude
    Encode {
        #[arg(required = true, allow_negative_numbers = true)]
        counts: Vec<i64>,
    },
    /// Convert a price in one denomination into base units
    Price {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        /// Denomination reference (defaults to the configured default unit)
        #[arg(short, long)]
        unit: Option<u32>,
    },
    /// Simulate a message with an animated portrait
    Animate {
        /// Number of host ticks to simulate
        #[arg(short, long, default_value_t = 120)]
        ticks: u64,
        /// First tick at which text is being revealed
        #[arg(long)]
        speak_from: Option<u64>,
        /// Tick at which text reveal ends
        #[arg(long)]
        speak_until: Option<u64>,
        /// Ticks at which an authored wait is active (repeatable)
        #[arg(long)]
        wait_at: Vec<u64>,
        /// Seed for pause sampling
        #[arg(long)]
        seed: Option<u64>,
        /// Script commands applied before the message starts (repeatable)
        #[arg(long = "command")]
        commands: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        info!("Writing default configuration to {}", cli.config);
        Config::create_default(&cli.config).await?;
        println!("Configuration file created at {}", cli.config);
        return Ok(());
    }

    let config = Config::load(&cli.config).await?;
    init_logging(&Some(config.clone()), cli.verbose);

    if let Err(e) = config.validate() {
        error!("Invalid configuration in {}: {}", cli.config, e);
        return Err(e);
    }

    match cli.command {
        // Written before any config was loaded
        Commands::Init => {}
        Commands::Check => {
            let session = GameSession::new(&config)?;
            let ledger = session.ledger();
            println!(
                "{} denominations, default unit {}",
                ledger.len(),
                ledger.default_unit()
            );
            for (i, d) in ledger.denominations().iter().enumerate() {
                println!(
                    "  [{}] reference {:>4}  rate {:>8}  {}",
                    i, d.reference_id, d.rate, d.name
                );
            }
            if let Some(index) = ledger.index_of(ledger.default_unit()) {
                let row = &ledger.denominations()[index];
                println!(
                    "  untagged prices use row [{}] ({}, rate {})",
                    index, row.name, row.rate
                );
            }
            if ledger.denominations().last().map(|d| d.rate) != Some(1) {
                println!("  note: smallest rate is not 1; sub-unit remainders are dropped on decode");
            }
        }
        Commands::Decode { magnitude, json } => {
            let session = GameSession::new(&config)?;
            let units = session.ledger().decode_from_base(magnitude);
            if json {
                let payload = serde_json::json!({
                    "magnitude": magnitude,
                    "counts": units.counts(),
                    "reconstructed": session.ledger().encode_to_base(&units)?,
                });
                println!("{}", payload);
            } else {
                println!("{}", format_plain(&units, session.ledger()));
            }
        }
        Commands::Encode { counts } => {
            let session = GameSession::new(&config)?;
            let total = session
                .ledger()
                .encode_to_base(&DecomposedAmount::new(counts))
                .context("counts must list one value per denomination")?;
            println!("{}", total);
        }
        Commands::Price { amount, unit } => {
            let session = GameSession::new(&config)?;
            let ledger = session.ledger();
            let unit = ledger.resolve_unit(unit);
            let base = ledger.convert_price(amount, unit)?;
            println!(
                "{} base units ({})",
                base,
                format_plain(&ledger.decode_from_base(base), ledger)
            );
        }
        Commands::Animate {
            ticks,
            speak_from,
            speak_until,
            wait_at,
            seed,
            commands,
        } => {
            let mut session = match seed {
                Some(seed) => GameSession::with_seed(&config, seed)?,
                None => GameSession::new(&config)?,
            };
            for line in &commands {
                session.on_plugin_command(line)?;
            }
            let face = format!("{}Preview", config.portrait.face_prefix);
            if let Some(frame) = session.on_message_start(&face) {
                println!("start: frame {} row {:?}", frame.index, frame.row);
            }
            for tick in 0..ticks {
                let speaking = speak_from.is_some_and(|from| tick >= from)
                    && speak_until.map_or(true, |until| tick < until);
                let signals = TickSignals {
                    speaking,
                    waiting: wait_at.contains(&tick),
                };
                if let Some(frame) = session.on_tick(signals) {
                    println!("tick {:>5}: frame {} row {:?}", tick, frame.index, frame.row);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let configured = config
        .as_ref()
        .and_then(|c| c.logging.level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);
    let base_level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let file = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
