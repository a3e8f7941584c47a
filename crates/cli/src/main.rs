// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuces Wild video poker analyzer.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::{fs, path::PathBuf};

use deuces_eval::{Config, Deck, Hand, Hold, Paytable, Variant, draw_outcome};

mod report;

#[derive(Debug, Parser)]
#[clap(name = "deuces", version, about)]
struct Cli {
    /// The variant name, detected from the paytable if not given.
    #[clap(long, global = true)]
    variant: Option<Variant>,
    /// A JSON file mapping category keys to coins.
    #[clap(long, short, global = true)]
    paytable: Option<PathBuf>,
    /// Number of parallel tasks for the EV engine.
    #[clap(long, short, global = true, value_parser = clap::value_parser!(u16).range(1..=256))]
    tasks: Option<u16>,
    /// Print JSON output.
    #[clap(long, global = true)]
    json: bool,
    /// Enable debug logs.
    #[clap(long, short, global = true)]
    verbose: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a pat hand.
    Eval {
        /// The hand cards, as in "8h 9h 2d Qh 6h".
        #[clap(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Compute the EV of a hold.
    Ev {
        /// The hand cards.
        #[clap(required = true, num_args = 1..)]
        cards: Vec<String>,
        /// The held positions, from 0 to 4.
        #[clap(long, value_delimiter = ',')]
        hold: Vec<usize>,
    },
    /// Solve a hand with the variant strategy.
    Solve {
        /// The hand cards.
        #[clap(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Compute the EV of all the holds.
    Analyze {
        /// The hand cards.
        #[clap(required = true, num_args = 1..)]
        cards: Vec<String>,
        /// Number of holds to print.
        #[clap(long, default_value_t = 8)]
        top: usize,
    },
    /// Deal a random hand and solve it.
    Deal,
    /// Print the built-in paytables.
    Paytables,
    /// Print the variant strategy rules.
    Playlist,
}

/// The paytable and strategy selected by the command line.
struct Table {
    paytable: Paytable,
    variant: Variant,
}

impl Table {
    fn new(cli: &Cli) -> Result<Self> {
        let Some(path) = &cli.paytable else {
            let variant = cli.variant.unwrap_or(Variant::Nsud);
            return Ok(Self {
                paytable: *variant.paytable(),
                variant,
            });
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read paytable {}", path.display()))?;
        let paytable = serde_json::from_str::<Paytable>(&text)
            .with_context(|| format!("Invalid paytable {}", path.display()))?;
        if paytable.iter().all(|(_, coins)| coins == 0) {
            bail!("Paytable {} pays nothing", path.display());
        }

        let variant = cli.variant.unwrap_or_else(|| Variant::detect(&paytable));
        info!("Loaded paytable {} for {variant}", path.display());

        Ok(Self { paytable, variant })
    }
}

fn parse_hand(cards: &[String]) -> Result<Hand> {
    let text = cards.join(" ");
    text.parse::<Hand>()
        .with_context(|| format!("Invalid hand '{text}'"))
}

fn run(cli: Cli) -> Result<()> {
    let table = Table::new(&cli)?;
    let mut config = Config::default();
    if let Some(tasks) = cli.tasks {
        config.tasks = tasks as usize;
    }

    let out = report::Report::new(cli.json);

    match &cli.command {
        Command::Eval { cards } => {
            let hand = parse_hand(cards)?;
            out.eval(&hand, &table.paytable)
        }
        Command::Ev { cards, hold } => {
            let hand = parse_hand(cards)?;
            let hold = Hold::from_indices(hold)?;
            let outcome = draw_outcome(&hand, hold, &table.paytable, &config)?;
            out.outcome(&hand, hold, &outcome)
        }
        Command::Solve { cards } => {
            let hand = parse_hand(cards)?;
            let plays = deuces_strategy::solve_with_config(
                &hand,
                &table.paytable,
                Some(table.variant),
                &config,
            )?;
            out.plays(&hand, table.variant, &plays)
        }
        Command::Analyze { cards, top } => {
            let hand = parse_hand(cards)?;
            let holds = deuces_strategy::analyze(&hand, &table.paytable, &config)?;
            out.holds(&hand, &holds[..(*top).min(holds.len())])
        }
        Command::Deal => {
            let mut deck = Deck::new_and_shuffled(&mut rand::rng());
            let cards = (0..Hand::SIZE)
                .filter_map(|_| deck.deal())
                .collect::<Vec<_>>();
            let hand = Hand::new(&cards)?;
            let plays = deuces_strategy::solve_with_config(
                &hand,
                &table.paytable,
                Some(table.variant),
                &config,
            )?;
            out.plays(&hand, table.variant, &plays)
        }
        Command::Paytables => out.paytables(),
        Command::Playlist => out.playlist(deuces_strategy::playlist(table.variant)),
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
