// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuces Wild strategy solver.
//!
//! A strategy is a [Playlist] of [Rule]s for each number of deuces in the
//! dealt hand. The [solve] function walks the playlist for a variant and
//! returns the first matching holds with their exact EV, [analyze] computes
//! the EV of every hold to check a strategy against the optimum.
//!
//! ```
//! # use deuces_eval::*;
//! # use deuces_strategy::*;
//! let hand = "As Ks Qs Js 9c".parse::<Hand>().unwrap();
//! let plays = solve(&hand, Variant::Nsud.paytable(), None).unwrap();
//!
//! assert_eq!(plays[0].meta.rule_name, "four to a royal");
//! assert_eq!(plays[0].held, hand.cards()[..4]);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod playlist;
pub use playlist::{Playlist, playlist};

mod rule;
pub use rule::Rule;

mod solver;
pub use solver::{HoldEv, Play, PlayMeta, analyze, solve, solve_with_config};
