use std::{thread, time::Duration};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use chromabrew::{MixtureState, Session};

#[derive(Parser, Debug)]
#[command(name = "chromabrew", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a round and print it as JSON.
    Round(RoundArgs),
    /// Run the greedy auto-solve loop over a fresh round.
    Solve(SolveArgs),
}

#[derive(Parser, Debug)]
struct RoundArgs {
    /// Seed for a reproducible round; omit for an OS-seeded one.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct SolveArgs {
    /// Seed for a reproducible round; omit for an OS-seeded one.
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between solve steps, in milliseconds. The solver itself is
    /// synchronous; pacing lives here.
    #[arg(long, default_value_t = 0)]
    step_ms: u64,

    /// Emit the step states and final score as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Round(args) => cmd_round(args),
        Command::Solve(args) => cmd_solve(args),
    }
}

fn make_session(seed: Option<u64>) -> Session {
    match seed {
        Some(seed) => Session::with_seed(seed),
        None => Session::new(),
    }
}

fn cmd_round(args: RoundArgs) -> anyhow::Result<()> {
    let session = make_session(args.seed);
    let json = serde_json::to_string_pretty(session.round()).context("serialize round")?;
    println!("{json}");
    Ok(())
}

fn cmd_solve(args: SolveArgs) -> anyhow::Result<()> {
    let mut session = make_session(args.seed);
    let target = session.round().target;

    if !args.json {
        eprintln!("target  {}  {}", target.to_hex(), target);
    }

    let mut states: Vec<MixtureState> = Vec::new();
    {
        let solve = session
            .auto_solve()
            .context("auto-solve already in progress")?;
        for state in solve {
            if !args.json {
                let dist = chromabrew::color::distance(state.mixture, target);
                println!(
                    "drop {:>2}  {}  {}  distance {:.2}",
                    state.drops,
                    state.mixture.to_hex(),
                    state.mixture,
                    dist
                );
            }
            states.push(state);
            if args.step_ms > 0 {
                thread::sleep(Duration::from_millis(args.step_ms));
            }
        }
    }

    let score = session.current_score();
    if args.json {
        let out = serde_json::json!({
            "target": target,
            "steps": states,
            "score": score,
        });
        println!("{}", serde_json::to_string_pretty(&out).context("serialize solve")?);
    } else {
        println!(
            "finished in {} steps — distance {:.2}, match {:.1}%, {}",
            states.len(),
            score.distance,
            score.match_percent,
            score.stars
        );
    }
    Ok(())
}
