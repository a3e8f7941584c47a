// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuces Wild video poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use deuces_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let th = "10H".parse::<Card>().unwrap();
//! assert_eq!(th.to_string(), "Th");
//! ```
//!
//! a [Hand] type for a dealt hand of five distinct cards, and a [Deck] type for
//! shuffling and iterating cards in the deck.
//!
//! For example to iterate through all the 3 cards draws from the stub left
//! after dealing a hand:
//!
//! ```
//! # use deuces_cards::{Deck, Hand};
//! let hand = "Jh Jd 5c 9s 4h".parse::<Hand>().unwrap();
//! let mut counter = 0;
//! hand.stub().for_each(3, |draw| {
//!     assert_eq!(draw.len(), 3);
//!     counter += 1;
//! });
//! assert_eq!(counter, 16_215);
//! ```
//!
//! The **`parallel`** feature enables parallel iteration with a given number of
//! tasks, the following example uses 4 tasks to iterate all 5 cards draws from a
//! stub, the closure `task_id` can be used to store per task data to reduce
//! contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_for_each() {
//! # use std::sync::atomic;
//! # use deuces_cards::Hand;
//! let hand = "Jh Jd 5c 9s 4h".parse::<Hand>().unwrap();
//! let counter = atomic::AtomicU64::new(0);
//! hand.stub().par_for_each(4, 5, |task_id, draw| {
//!     assert_eq!(draw.len(), 5);
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//! });
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 1_533_939);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, MAX_K, Rank, Suit, binomial};

mod error;
pub use error::CardError;

mod hand;
pub use hand::{Hand, RankSet, normalize};
