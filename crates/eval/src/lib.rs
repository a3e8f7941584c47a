// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuces Wild video poker evaluator and exact EV engine.
//!
//! The [evaluate] function classifies a five cards hand under a [Paytable]
//! with deuces wild, the [ev] and [draw_outcome] functions enumerate every
//! draw from the 47 cards stub to compute the exact expected value of a
//! hold. Paytables for the built-in variants are in the [Variant] registry.
//!
//! ```
//! # use deuces_eval::*;
//! let hand = "Jh Jd 5c 9s 4h".parse::<Hand>().unwrap();
//! let paytable = Variant::BonusDeuces10_4.paytable();
//!
//! assert_eq!(evaluate(hand.cards(), paytable), (Category::Nothing, 0));
//!
//! let ev = ev(&hand, &[0, 1], paytable).unwrap();
//! assert!((ev - 8569.0 / 16215.0).abs() < 1e-9);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{Category, evaluate};

mod error;
pub use error::{Error, Result};

mod ev;
pub use ev::{Config, DrawOutcome, Hold, draw_outcome, ev};

mod paytable;
pub use paytable::{
    AIRPORT, BONUS_DEUCES_10_4, DBW, LOOSE_DEUCES, NSUD, Paytable, SUPER_DEUCES, Variant,
    VariantStats, paytables, variant_stats,
};

// Reexport cards types.
pub use deuces_cards::{Card, CardError, Deck, Hand, Rank, RankSet, Suit};
