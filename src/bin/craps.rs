//! Command line front end: play one session or simulate a batch.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use craps_sim::batch::{histogram, readable_duration, BatchConfig, BatchRunner, BatchSummary, TableSpeed};
use craps_sim::core::{Configuration, DiceRng, LimitReached};
use craps_sim::engine::{BetOutcome, RollResult};
use craps_sim::session::Session;
use craps_sim::{Result, SimError};

#[derive(Parser, Debug)]
#[command(author, version, about = "Craps betting strategy simulator")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a single session and print every roll
    Play(CommonArgs),
    /// Simulate many sessions and print summary statistics
    Batch {
        #[command(flatten)]
        common: CommonArgs,

        /// Sessions to simulate (defaults to the configuration's simulation count)
        #[arg(short = 'n', long)]
        sessions: Option<u32>,

        /// Worker threads (defaults to available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Sessions between progress reports from each worker
        #[arg(long, default_value = "1000")]
        progress_interval: u32,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON configuration file; the defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the dice (random when absent)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Starting bankroll, overriding the configuration
    #[arg(long)]
    bankroll: Option<f64>,

    /// Walk away at or below this bankroll
    #[arg(long)]
    min_bankroll: Option<f64>,

    /// Walk away at or above this bankroll
    #[arg(long)]
    max_bankroll: Option<f64>,

    /// Stop placing new bets after this many rolls
    #[arg(long)]
    max_rolls: Option<u32>,
}

impl CommonArgs {
    /// Apply the command line overrides on top of `configuration`.
    fn apply_overrides(&self, mut configuration: Configuration) -> Configuration {
        if let Some(bankroll) = self.bankroll {
            configuration = configuration.with_initial_bankroll(Some(bankroll));
        }
        if let Some(min) = self.min_bankroll {
            configuration = configuration.with_bankroll_minimum(Some(min));
        }
        if let Some(max) = self.max_bankroll {
            configuration = configuration.with_bankroll_maximum(Some(max));
        }
        if let Some(rolls) = self.max_rolls {
            configuration = configuration.with_maximum_rolls(Some(rolls));
        }
        configuration
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Command::Play(common) => play(&common),
        Command::Batch {
            common,
            sessions,
            workers,
            progress_interval,
        } => batch(&common, sessions, workers, progress_interval),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(SimError::InvalidConfiguration { fields }) => {
            eprintln!("Invalid configuration:");
            for field in fields {
                eprintln!("  - {field}");
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(%err, "simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn load_configuration(args: &CommonArgs) -> Result<Configuration> {
    let configuration = match args.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
            serde_json::from_str::<Configuration>(&text)
                .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?
                .normalized()
        }
        None => Configuration::default(),
    };
    let configuration = args.apply_overrides(configuration);

    let invalid = configuration.invalid_fields();
    if invalid.is_empty() {
        Ok(configuration)
    } else {
        Err(SimError::InvalidConfiguration { fields: invalid })
    }
}

fn play(args: &CommonArgs) -> Result<()> {
    let configuration = load_configuration(args)?;
    let dice = args.seed.map_or_else(DiceRng::from_entropy, DiceRng::new);
    info!(seed = dice.seed(), "playing one session");

    let history = Session::new(configuration, dice)?.play_out();
    for result in &history {
        print_roll(result);
    }

    if let Some(last) = history.last() {
        let state = &last.resulting_state;
        println!();
        println!("Final bankroll: ${:.2} (net {:+.2})", state.bankroll, state.net());
        if let Some(limit) = state.limit_reached() {
            println!("Stopped on: {limit}");
        }
        println!("Rolls: {}", state.roll_num);
        for speed in TableSpeed::ALL {
            println!(
                "  {speed} table: approx. {}",
                readable_duration(speed.estimated_duration(state.roll_num))
            );
        }
    }
    Ok(())
}

fn print_roll(result: &RollResult) {
    let Some(roll) = result.roll else { return };
    println!(
        "Roll {:>4}: {} + {} = {:>2}",
        result.resulting_state.roll_num,
        roll.die1,
        roll.die2,
        roll.total()
    );
    for bet in &result.new_bets {
        println!("    placed   {:<24} ${:.2}", bet.kind.to_string(), bet.amount);
    }
    for resolved in &result.resolved_bets {
        let verb = match resolved.outcome {
            BetOutcome::Win => "won",
            BetOutcome::Loss => "lost",
            BetOutcome::Push => "push",
        };
        println!(
            "    {verb:<8} {:<24} ${:.2} (paid ${:.2})",
            resolved.bet.kind.to_string(),
            resolved.bet.amount,
            resolved.payout
        );
    }
    let point = result
        .resulting_state
        .point
        .map_or_else(|| "off".to_string(), |p| p.to_string());
    println!(
        "    bankroll ${:.2} ({:+.2}), on the table ${:.2}, point {point}",
        result.resulting_state.bankroll,
        result.bankroll_delta(),
        result.resulting_state.current_bets.total_exposure()
    );
}

fn batch(args: &CommonArgs, sessions: Option<u32>, workers: Option<usize>, progress_interval: u32) -> Result<()> {
    let configuration = load_configuration(args)?;
    let total = sessions.or(configuration.simulation_count).unwrap_or(10_000);

    let mut config = BatchConfig::new().with_progress_interval(progress_interval);
    if let Some(workers) = workers {
        config = config.with_workers(workers);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let states = BatchRunner::new(config).run(&configuration, total, |done| {
        eprint!("\r{done}/{total} sessions");
    })?;
    eprintln!();

    let summary = BatchSummary::from_states(&states);
    print_summary(&summary);

    let bankrolls: Vec<f64> = states.iter().map(|s| s.bankroll).collect();
    println!();
    println!("Final bankroll distribution:");
    for bin in histogram(&bankrolls, 10) {
        println!("  {:>15}: {}", bin.label, bin.count);
    }
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    println!("Sessions: {}", summary.sessions);
    println!(
        "Winning: {} ({:.1}%), losing: {}, even: {}",
        summary.winning_sessions,
        summary.win_percentage(),
        summary.losing_sessions,
        summary.even_sessions
    );
    for kind in LimitReached::ALL {
        println!(
            "  {kind:<22} {:>7} ({:.1}%)",
            summary.limits.get(kind),
            summary.limit_percentage(kind)
        );
    }

    let b = &summary.bankroll;
    println!(
        "Bankroll: mean ${:.2}, median ${:.2}, min ${:.2}, max ${:.2}, sd ${:.2}",
        b.mean, b.median, b.min, b.max, b.standard_deviation
    );
    let r = &summary.rolls;
    println!(
        "Rolls: mean {:.1}, median {:.1}, min {}, max {}",
        r.mean, r.median, r.min, r.max
    );
    let median_rolls = r.median.round() as u32;
    for speed in TableSpeed::ALL {
        println!(
            "  {speed} table: approx. {}",
            readable_duration(speed.estimated_duration(median_rolls))
        );
    }
}
