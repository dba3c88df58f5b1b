use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use klondike_advisor::card::COLUMN_COUNT;
use klondike_advisor::{
    Advisor, DealRecord, Directive, DrawMode, SessionStats, Snapshot, Suit, Table, Transcript,
    Turn, describe_directive, render_knowledge, render_snapshot,
};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0x5EED_C1DE_50F7_0001;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Draw {
    One,
    Three,
}

impl From<Draw> for DrawMode {
    fn from(draw: Draw) -> Self {
        match draw {
            Draw::One => DrawMode::Single,
            Draw::Three => DrawMode::Triple,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Play Klondike deals with the advisor, interactively or on autopilot."
)]
struct Args {
    /// Number of deals to finish before stopping
    #[arg(short = 'g', long = "games", default_value_t = 1)]
    games: usize,

    /// Seed for shuffling every deal of the session
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Cards turned per reserve cycle
    #[arg(short = 'd', long = "draw", value_enum, default_value_t = Draw::One)]
    draw: Draw,

    /// Accept every recommendation without prompting
    #[arg(long = "auto", action = ArgAction::SetTrue)]
    auto: bool,

    /// Deals running longer than this are abandoned and counted as losses
    #[arg(long = "max-moves", default_value_t = 2000)]
    max_moves: usize,

    /// Write a binary transcript of every advised turn to this file
    #[arg(long = "transcript")]
    transcript: Option<PathBuf>,

    /// Enable debug logging from the advisor
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,
}

/// What the operator asked for at the prompt.
enum Input {
    Play(Directive),
    /// `ftb <suit> <column>`: take a card back off a foundation.
    Withdraw { suit: Suit, column: usize },
    Quit,
}

/// How an interactive turn ended.
enum Step {
    Played,
    Reset(Directive),
    Quit,
}

fn main() {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mode = DrawMode::from(args.draw);
    let mut table = Table::builder()
        .with_seed(args.seed)
        .with_draw_mode(mode)
        .build()?;
    let mut advisor = Advisor::new();
    advisor.bind_to(&table);

    let mut stats = SessionStats::new();
    let mut transcript = args.transcript.as_ref().map(|_| Transcript::new(args.seed));
    let mut deal = DealRecord::new(mode);
    let mut auto = args.auto;
    let mut lines = io::stdin().lock().lines();

    info!(games = args.games, ?mode, seed = args.seed, "starting session");
    while stats.games() < args.games {
        let snapshot = Snapshot::observe(&table, mode);
        let mut recommendation = advisor.advise_snapshot(&snapshot)?;
        if stats.current_moves >= args.max_moves && !recommendation.is_reset() {
            warn!(moves = stats.current_moves, "move limit reached, abandoning deal");
            recommendation = Directive::reset_with("move limit reached");
        }
        if transcript.is_some() {
            deal.turns.push(Turn {
                snapshot: snapshot.clone(),
                directive: recommendation.clone(),
            });
        }

        let directive = if auto {
            recommendation
        } else {
            println!("\n{}", render_snapshot(&snapshot));
            println!("Moves: {}", stats.current_moves);
            println!("Solver recommends: {recommendation}");
            let step = play_turn(
                &mut lines,
                &mut table,
                &mut stats,
                &snapshot,
                &recommendation,
                &advisor,
                &mut auto,
            )?;
            match step {
                Step::Played => continue,
                Step::Reset(directive) => directive,
                Step::Quit => break,
            }
        };

        if directive.is_reset() {
            let won = table.is_won();
            stats.finish_deal(won);
            info!(won, moves = stats.total_moves, "deal finished");
            if let Some(transcript) = transcript.as_mut() {
                deal.won = won;
                transcript
                    .deals
                    .push(std::mem::replace(&mut deal, DealRecord::new(mode)));
            }
            if !auto {
                println!("{}", if won { "You win!" } else { "Deal abandoned." });
                println!("{stats}");
            }
            table.apply(&directive)?;
            advisor.bind_to(&table);
            continue;
        }

        table.apply(&directive)?;
        stats.record_move();
    }

    println!("{stats}");
    if let (Some(path), Some(transcript)) = (args.transcript.as_ref(), transcript.as_ref()) {
        transcript.save(path)?;
        info!(path = %path.display(), deals = transcript.deals.len(), "transcript written");
    }
    Ok(())
}

/// Prompts until one command executes, a reset is chosen or the operator
/// quits. Rejected moves re-prompt against the same recommendation.
fn play_turn(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    table: &mut Table,
    stats: &mut SessionStats,
    snapshot: &Snapshot,
    recommendation: &Directive,
    advisor: &Advisor,
    auto: &mut bool,
) -> Result<Step, Box<dyn Error>> {
    loop {
        match prompt(lines, recommendation, snapshot, advisor, auto)? {
            Input::Quit => return Ok(Step::Quit),
            Input::Play(directive) => {
                if directive.without_note() != recommendation.without_note() {
                    info!(%recommendation, %directive, "recommendation overridden");
                }
                if directive.is_reset() {
                    return Ok(Step::Reset(directive));
                }
                match table.apply(&directive) {
                    Ok(revealed) => {
                        stats.record_move();
                        if let Some(card) = revealed.filter(|_| !directive.is_cycle() && !*auto) {
                            println!("The card {card} was revealed.");
                        }
                        return Ok(Step::Played);
                    }
                    Err(err) => println!("Invalid move: {err}"),
                }
            }
            Input::Withdraw { suit, column } => match table.foundation_to_board(suit, column) {
                Ok(()) => {
                    info!(?suit, column, "card withdrawn from foundation");
                    stats.record_move();
                    return Ok(Step::Played);
                }
                Err(err) => println!("Invalid move: {err}"),
            },
        }
    }
}

/// Reads commands until one resolves to an input or the operator quits.
///
/// An empty line accepts the recommendation.
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    recommendation: &Directive,
    snapshot: &Snapshot,
    advisor: &Advisor,
    auto: &mut bool,
) -> Result<Input, Box<dyn Error>> {
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(Input::Quit);
        };
        let line = line?;
        match line.trim() {
            "" => {
                println!("[ {recommendation} ]");
                return Ok(Input::Play(recommendation.clone()));
            }
            "auto" => {
                println!("Autopilot engaged.");
                *auto = true;
                return Ok(Input::Play(recommendation.clone()));
            }
            "board" => {
                println!("{}", render_snapshot(snapshot));
                if let Some(tracker) = advisor.tracker() {
                    println!("{}", render_knowledge(tracker));
                }
            }
            "why" => println!("{}", describe_directive(snapshot, recommendation)),
            "exit" | "quit" => return Ok(Input::Quit),
            text if text.split_whitespace().next() == Some("ftb") => match parse_withdraw(text) {
                Some(input) => return Ok(input),
                None => println!("Usage: ftb <suit 0-3> <column 0-6>"),
            },
            text => match text.parse::<Directive>() {
                Ok(directive) => return Ok(Input::Play(directive)),
                Err(err) => println!("{err}"),
            },
        }
    }
}

/// Parses `ftb <suit> <column>`, suits numbered in foundation order.
fn parse_withdraw(text: &str) -> Option<Input> {
    let mut args = text.split_whitespace().skip(1);
    let suit = args
        .next()?
        .parse::<usize>()
        .ok()
        .and_then(|idx| Suit::ALL.get(idx).copied())?;
    let column = args
        .next()?
        .parse::<usize>()
        .ok()
        .filter(|&column| column < COLUMN_COUNT)?;
    args.next()
        .is_none()
        .then_some(Input::Withdraw { suit, column })
}
