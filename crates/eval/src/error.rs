// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluator and EV engine errors.
use deuces_cards::CardError;
use thiserror::Error;

/// A result with an [enum@Error].
pub type Result<T> = std::result::Result<T, Error>;

/// Evaluation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed cards or hand.
    #[error(transparent)]
    Card(#[from] CardError),
    /// A held index is not a hand position.
    #[error("held index {0} out of range 0..5")]
    HeldIndex(usize),
    /// An unknown paytable category key.
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    /// An unknown variant name.
    #[error("unknown variant {0:?}")]
    UnknownVariant(String),
    /// A broken engine invariant, this is a bug.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Checks if this error comes from the caller input.
    pub fn is_input(&self) -> bool {
        !matches!(self, Error::Internal(_))
    }
}
