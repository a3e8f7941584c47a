// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards input errors.
use thiserror::Error;

use crate::Card;

/// Errors from parsing cards or building a hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The text is not a card.
    #[error("invalid card {0:?}")]
    InvalidCard(String),
    /// A hand needs exactly five cards.
    #[error("a hand has 5 cards, got {0}")]
    WrongCount(usize),
    /// The same card appears twice in a hand.
    #[error("duplicate card {0}")]
    Duplicate(Card),
}
