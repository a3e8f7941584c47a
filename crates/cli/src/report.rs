// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Text and JSON output.
use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use deuces_eval::{
    Card, Category, DrawOutcome, Hand, Hold, Paytable, Variant, evaluate, paytables,
};
use deuces_strategy::{HoldEv, Play, Playlist};

/// Prints the commands results.
pub struct Report {
    json: bool,
}

#[derive(Serialize)]
struct OutcomeReport<'a> {
    hand: &'a Hand,
    held: Vec<Card>,
    hold: Hold,
    ev: f64,
    outcome: &'a DrawOutcome,
}

#[derive(Serialize)]
struct PlaysReport<'a> {
    hand: &'a Hand,
    variant: Variant,
    plays: &'a [Play],
}

impl Report {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn eval(&self, hand: &Hand, paytable: &Paytable) -> Result<()> {
        let (category, coins) = evaluate(hand.cards(), paytable);
        if self.json {
            return print_json(&json!({
                "hand": hand,
                "category": category,
                "coins": coins,
            }));
        }

        println!("{hand}  {}  pays {coins}", category.name());
        Ok(())
    }

    pub fn outcome(&self, hand: &Hand, hold: Hold, outcome: &DrawOutcome) -> Result<()> {
        if self.json {
            return print_json(&OutcomeReport {
                hand,
                held: hold.cards(hand),
                hold,
                ev: outcome.ev(),
                outcome,
            });
        }

        println!("{hand}  hold {}  EV {:.6}", cards_text(&hold.cards(hand)), outcome.ev());
        println!("{} draws, {} coins", outcome.draws(), outcome.total());
        for (category, count) in outcome.iter() {
            println!(
                "  {:<30} {count:>8}  {:>9.6}",
                category.name(),
                outcome.frequency(category)
            );
        }

        Ok(())
    }

    pub fn plays(&self, hand: &Hand, variant: Variant, plays: &[Play]) -> Result<()> {
        if self.json {
            return print_json(&PlaysReport {
                hand,
                variant,
                plays,
            });
        }

        println!("{hand}  {}", variant.title());
        for (idx, play) in plays.iter().enumerate() {
            let meta = &play.meta;
            println!(
                "{}. {:<16} EV {:>11.6}  {} [{}/{}]",
                idx + 1,
                cards_text(&play.held),
                play.ev,
                meta.rule_name,
                meta.rule_index + 1,
                meta.total_rules,
            );
        }

        Ok(())
    }

    pub fn holds(&self, hand: &Hand, holds: &[HoldEv]) -> Result<()> {
        if self.json {
            return print_json(&json!({
                "hand": hand,
                "holds": holds,
            }));
        }

        println!("{hand}");
        for (idx, hold) in holds.iter().enumerate() {
            println!(
                "{:>2}. {:<16} EV {:>11.6}",
                idx + 1,
                cards_text(&hold.held),
                hold.ev
            );
        }

        Ok(())
    }

    pub fn paytables(&self) -> Result<()> {
        if self.json {
            let tables = paytables()
                .map(|(variant, paytable)| {
                    let stats = variant.stats();
                    json!({
                        "variant": variant,
                        "title": variant.title(),
                        "paytable": paytable,
                        "hit_frequency": stats.hit_frequency(paytable),
                        "pat_return": stats.pat_return(paytable),
                    })
                })
                .collect::<Vec<_>>();
            return print_json(&tables);
        }

        for (variant, paytable) in paytables() {
            let stats = variant.stats();
            println!("{} ({variant})", variant.title());
            for (category, coins) in paytable.iter().filter(|(c, _)| *c != Category::Nothing) {
                println!(
                    "  {:<30} {coins:>4}  {:>9.6}",
                    category.name(),
                    stats.frequency(category)
                );
            }
            println!(
                "  Hit frequency {:.6}, pat return {:.6}\n",
                stats.hit_frequency(paytable),
                stats.pat_return(paytable)
            );
        }

        Ok(())
    }

    pub fn playlist(&self, playlist: &Playlist) -> Result<()> {
        if self.json {
            return print_json(playlist);
        }

        println!("{}", playlist.variant().title());
        for (deuces, rules) in playlist.buckets() {
            println!("{deuces} deuces");
            for (idx, rule) in rules.iter().enumerate() {
                println!("  {:>2}. {rule}", idx + 1);
            }
        }

        Ok(())
    }
}

fn cards_text(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "discard all".to_string();
    }

    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
