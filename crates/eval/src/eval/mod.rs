// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuces Wild hand evaluator.
//!
//! The evaluator walks a fixed ladder of categories from the highest to the
//! lowest paying and returns the first match. Deuces are wild for both rank
//! and suit, so flushes and straights only look at the natural (non deuce)
//! cards, and the variant specific categories (four deuces with an ace, the
//! five of a kind tiers) are reported only when the paytable carries their
//! key.
//!
//! The evaluator is a pure function of the cards multiset and the paytable,
//! it keeps no state and is safe to call from any number of threads.
use deuces_cards::{Card, Hand, Rank, RankSet};

use crate::Paytable;

mod category;
pub use category::Category;

/// The natural ranks of a royal flush.
const ROYAL: [Rank; 5] = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace];

/// Evaluates a five cards hand returning its category and the coins it pays
/// per coin wagered.
///
/// Returns [Category::Error] and zero coins if `cards` is not a five cards
/// hand, and zero coins for a category missing from the paytable.
pub fn evaluate(cards: &[Card], paytable: &Paytable) -> (Category, u32) {
    let category = if cards.len() == Hand::SIZE {
        classify(cards, paytable)
    } else {
        Category::Error
    };

    (category, paytable.pay(category))
}

/// Classifies a five cards hand.
fn classify(cards: &[Card], paytable: &Paytable) -> Category {
    let shape = Shape::new(cards);
    let deuces = shape.deuces;
    let kind = deuces + shape.max_match;

    if deuces == 0 && shape.suited && shape.ranks == ROYAL.into_iter().collect() {
        return Category::NaturalRoyal;
    }

    if deuces == 4 {
        return if paytable.contains(Category::FourDeucesAce) && shape.ranks.contains(Rank::Ace) {
            Category::FourDeucesAce
        } else {
            Category::FourDeuces
        };
    }

    if deuces > 0 && shape.suited && shape.distinct && shape.ranks.spans(4, Rank::Ten.value(), 14)
    {
        return Category::WildRoyal;
    }

    if kind >= 5 {
        return five_of_a_kind(shape.max_rank, deuces, paytable);
    }

    let straight = shape.distinct && shape.ranks.spans(4, 1, 14);
    if shape.suited && straight {
        return Category::StraightFlush;
    }

    if kind >= 4 {
        return Category::FourOak;
    }

    // Two ranks with a triple, or a deuce with two natural pairs.
    let full_house = match deuces {
        0 => shape.ranks.len() == 2 && shape.max_match == 3,
        1 => shape.ranks.len() == 2 && shape.max_match == 2,
        _ => false,
    };

    if full_house {
        Category::FullHouse
    } else if shape.suited {
        Category::Flush
    } else if straight {
        Category::Straight
    } else if kind >= 3 {
        Category::ThreeOak
    } else {
        Category::Nothing
    }
}

/// Picks the five of a kind tier for the given natural rank.
fn five_of_a_kind(rank: Rank, deuces: usize, paytable: &Paytable) -> Category {
    let tier = match rank {
        Rank::Ace => Category::FiveAces,
        Rank::Trey | Rank::Four | Rank::Five => Category::Five345,
        _ => Category::Five6ToK,
    };

    if paytable.contains(tier) {
        tier
    } else if deuces == 1 && paytable.contains(Category::FiveOak1Deuce) {
        Category::FiveOak1Deuce
    } else {
        Category::FiveOak
    }
}

/// The rank and suit summary of the natural cards in a hand.
struct Shape {
    /// Number of deuces.
    deuces: usize,
    /// The natural ranks.
    ranks: RankSet,
    /// Checks if no two naturals have the same rank.
    distinct: bool,
    /// Checks if all naturals have the same suit.
    suited: bool,
    /// The largest number of naturals with the same rank.
    max_match: usize,
    /// The rank for max_match, the highest on ties.
    max_rank: Rank,
}

impl Shape {
    fn new(cards: &[Card]) -> Self {
        let mut deuces = 0;
        let mut counts = [0usize; 13];
        let mut ranks = RankSet::default();
        let mut suits = 0u8;

        for card in cards {
            if card.is_deuce() {
                deuces += 1;
            } else {
                counts[card.rank() as usize] += 1;
                ranks.insert(card.rank());
                suits |= 1 << card.suit() as u8;
            }
        }

        let (max_rank, max_match) = Rank::ranks()
            .zip(counts)
            .fold((Rank::Deuce, 0), |best, (rank, count)| {
                if count > 0 && count >= best.1 {
                    (rank, count)
                } else {
                    best
                }
            });

        Self {
            deuces,
            ranks,
            distinct: ranks.len() == cards.len() - deuces,
            suited: suits.count_ones() <= 1,
            max_match,
            max_rank,
        }
    }
}
