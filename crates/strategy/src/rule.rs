// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Strategy rules.
use serde::{Deserialize, Serialize};
use std::fmt;

use deuces_eval::{Card, Category, Hand, Hold, Rank, RankSet};

/// A candidate hold in a strategy playlist.
///
/// A rule looks at the dealt cards and either selects the cards to hold or
/// does not apply. The `cards` fields count the held cards deuces included,
/// a rule applies only if it can fill them with all the hand deuces plus at
/// least one natural card. Draw ranges use straight values, 1 or 14 for an
/// ace, as in [RankSet::spans].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// Hold all the cards if the dealt hand is in this category.
    Pat(Category),
    /// Hold the deuces with `n` naturals of the same rank.
    Kind {
        /// Number of naturals with the same rank.
        n: usize,
    },
    /// Hold two natural pairs.
    TwoPair,
    /// Hold the deuces with suited naturals from ten to ace.
    RoyalDraw {
        /// Number of held cards.
        cards: usize,
    },
    /// Hold the deuces with suited naturals of distinct ranks.
    StraightFlushDraw {
        /// Number of held cards.
        cards: usize,
        /// The widest gap between the lowest and highest natural.
        span: u8,
        /// The lowest allowed natural value.
        lo: u8,
        /// The highest allowed natural value.
        hi: u8,
    },
    /// Hold the deuces with suited naturals.
    FlushDraw {
        /// Number of held cards.
        cards: usize,
    },
    /// Hold the deuces with naturals of distinct ranks.
    StraightDraw {
        /// Number of held cards.
        cards: usize,
        /// The widest gap between the lowest and highest natural.
        span: u8,
        /// The lowest allowed natural value.
        lo: u8,
        /// The highest allowed natural value.
        hi: u8,
    },
    /// Hold the deuces only.
    Deuces,
    /// Hold the deuces with aces.
    DeucesWithAces {
        /// Number of held cards.
        cards: usize,
    },
    /// Discard all the cards.
    DiscardAll,
}

impl Rule {
    /// A human readable name for this rule.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Selects the cards to hold from `hand` whose pat category is `pat`.
    ///
    /// Returns `None` if this rule does not apply.
    pub fn select(&self, hand: &Hand, pat: Category) -> Option<Hold> {
        let deuces = deuces_mask(hand);

        let hold = match *self {
            Rule::Pat(category) => (pat == category).then_some(Hold::ALL.mask())?,
            Rule::Kind { n } => deuces | kind_mask(hand, n)?,
            Rule::TwoPair => two_pair_mask(hand)?,
            Rule::RoyalDraw { cards } => deuces | draw(hand, cards, |c| suited(c) && royal(c))?,
            Rule::StraightFlushDraw {
                cards,
                span,
                lo,
                hi,
            } => deuces | draw(hand, cards, |c| suited(c) && straight(c, span, lo, hi))?,
            Rule::FlushDraw { cards } => deuces | draw(hand, cards, suited)?,
            Rule::StraightDraw {
                cards,
                span,
                lo,
                hi,
            } => deuces | draw(hand, cards, |c| straight(c, span, lo, hi))?,
            Rule::Deuces => (deuces != 0).then_some(deuces)?,
            Rule::DeucesWithAces { cards } => {
                let aces = |c: &[Card]| c.iter().all(|c| c.rank() == Rank::Ace);
                deuces | draw(hand, cards, aces)?
            }
            Rule::DiscardAll => Hold::NONE.mask(),
        };

        Some(Hold::from_mask(hold))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Rule::Pat(category) => write!(f, "pat {}", category.name().to_lowercase()),
            Rule::Kind { n: 2 } => write!(f, "natural pair"),
            Rule::Kind { n } => write!(f, "natural {} of a kind", number(n)),
            Rule::TwoPair => write!(f, "two pair"),
            Rule::RoyalDraw { cards } => write!(f, "{} to a royal", number(cards)),
            Rule::StraightFlushDraw {
                cards,
                span,
                lo,
                hi,
            } => {
                write!(f, "{} to a straight flush", number(cards))?;
                write_range(f, span, lo, hi)
            }
            Rule::FlushDraw { cards } => write!(f, "{} to a flush", number(cards)),
            Rule::StraightDraw {
                cards,
                span,
                lo,
                hi,
            } => {
                write!(f, "{} to a straight", number(cards))?;
                write_range(f, span, lo, hi)
            }
            Rule::Deuces => write!(f, "deuces alone"),
            Rule::DeucesWithAces { cards } => {
                write!(f, "{} of deuces and aces", number(cards))
            }
            Rule::DiscardAll => write!(f, "discard all"),
        }
    }
}

fn write_range(f: &mut fmt::Formatter<'_>, span: u8, lo: u8, hi: u8) -> fmt::Result {
    write!(f, " (span {span}")?;
    if lo > 1 || hi < 14 {
        write!(f, ", {}-{}", value_label(lo), value_label(hi))?;
    }
    write!(f, ")")
}

fn number(n: usize) -> &'static str {
    match n {
        1 => "one",
        2 => "two",
        3 => "three",
        4 => "four",
        5 => "five",
        _ => "many",
    }
}

fn value_label(value: u8) -> String {
    if value <= 1 {
        return "A".to_string();
    }

    Rank::ranks()
        .find(|r| r.value() == value)
        .map_or_else(|| value.to_string(), |r| r.to_string())
}

/// The deuces positions mask.
fn deuces_mask(hand: &Hand) -> u8 {
    positions(hand, |c| c.is_deuce())
}

fn positions(hand: &Hand, f: impl Fn(&Card) -> bool) -> u8 {
    hand.cards()
        .iter()
        .enumerate()
        .filter(|(_, c)| f(c))
        .fold(0, |mask, (idx, _)| mask | 1 << idx)
}

/// The positions of the highest rank with exactly `n` naturals.
fn kind_mask(hand: &Hand, n: usize) -> Option<u8> {
    Rank::ranks()
        .rev()
        .filter(|&r| r != Rank::Deuce)
        .map(|r| positions(hand, |c| c.rank() == r))
        .find(|mask| mask.count_ones() as usize == n)
}

/// The positions of two natural pairs, if the hand has no deuces.
fn two_pair_mask(hand: &Hand) -> Option<u8> {
    if hand.deuces() > 0 {
        return None;
    }

    let pairs = Rank::ranks()
        .map(|r| positions(hand, |c| c.rank() == r))
        .filter(|mask| mask.count_ones() == 2)
        .collect::<Vec<_>>();

    (pairs.len() == 2).then(|| pairs[0] | pairs[1])
}

/// Picks the naturals to hold with the deuces to make `cards` held cards.
///
/// The naturals must pass the `accept` test, on multiple choices picks the
/// highest ranks and then the lowest positions.
fn draw(hand: &Hand, cards: usize, accept: impl Fn(&[Card]) -> bool) -> Option<u8> {
    let size = cards.checked_sub(hand.deuces()).filter(|&n| n > 0)?;
    let naturals = !deuces_mask(hand) & Hold::ALL.mask();

    let mut best = None;
    for mask in 1..=Hold::ALL.mask() {
        if mask & !naturals != 0 || mask.count_ones() as usize != size {
            continue;
        }

        let held = Hold::from_mask(mask).cards(hand);
        if !accept(&held) {
            continue;
        }

        let score = held.iter().map(|c| c.rank().value() as u32).sum::<u32>();
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, mask));
        }
    }

    best.map(|(_, mask)| mask)
}

fn suited(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| w[0].suit() == w[1].suit())
}

fn royal(cards: &[Card]) -> bool {
    distinct(cards).is_some_and(|ranks| ranks.spans(4, Rank::Ten.value(), 14))
}

fn straight(cards: &[Card], span: u8, lo: u8, hi: u8) -> bool {
    distinct(cards).is_some_and(|ranks| ranks.spans(span, lo, hi))
}

fn distinct(cards: &[Card]) -> Option<RankSet> {
    let mut ranks = RankSet::default();
    cards.iter().all(|c| ranks.insert(c.rank())).then_some(ranks)
}
