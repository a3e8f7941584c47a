// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Dealt hands and rank sets.
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Index, str::FromStr};

use crate::{Card, CardError, Deck, Rank};

/// Parses a list of cards separated by whitespace or commas.
///
/// ```
/// # use deuces_cards::*;
/// let cards = normalize("10H, jd 2s").unwrap();
/// assert_eq!(cards[0].to_string(), "Th");
/// assert_eq!(cards[1].to_string(), "Jd");
/// assert_eq!(cards[2].to_string(), "2s");
/// ```
pub fn normalize(text: &str) -> Result<Vec<Card>, CardError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// A dealt hand of five distinct cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Hand([Card; Hand::SIZE]);

impl Hand {
    /// The number of cards in a hand.
    pub const SIZE: usize = 5;

    /// The number of cards left in the deck after the deal.
    pub const STUB_SIZE: usize = Deck::SIZE - Hand::SIZE;

    /// Creates a hand checking there are five distinct cards.
    pub fn new(cards: &[Card]) -> Result<Self, CardError> {
        let cards: [Card; Hand::SIZE] = cards
            .try_into()
            .map_err(|_| CardError::WrongCount(cards.len()))?;

        for (idx, card) in cards.iter().enumerate() {
            if cards[idx + 1..].contains(card) {
                return Err(CardError::Duplicate(*card));
            }
        }

        Ok(Self(cards))
    }

    /// The hand cards in dealt order.
    pub fn cards(&self) -> &[Card; Hand::SIZE] {
        &self.0
    }

    /// Number of deuces in this hand.
    pub fn deuces(&self) -> usize {
        self.0.iter().filter(|c| c.is_deuce()).count()
    }

    /// The cards left in a fresh deck after dealing this hand.
    pub fn stub(&self) -> Deck {
        Deck::default().stub(&self.0)
    }
}

impl FromStr for Hand {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hand::new(&normalize(s)?)
    }
}

impl Index<usize> for Hand {
    type Output = Card;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, card) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = CardError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Hand::new(&cards)
    }
}

impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.0.to_vec()
    }
}

/// A set of card ranks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankSet(u16);

impl RankSet {
    /// Adds a rank to the set, returns false if the rank was already there.
    #[inline]
    pub fn insert(&mut self, rank: Rank) -> bool {
        let bit = 1 << rank as u16;
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    /// Checks if the set contains a rank.
    #[inline]
    pub fn contains(&self, rank: Rank) -> bool {
        self.0 & (1 << rank as u16) != 0
    }

    /// Number of ranks in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the ranks fit in a window of straight values no wider than
    /// `span` with all values in `lo..=hi`.
    ///
    /// Values go from 2 for a deuce to 14 for an ace, an ace is also tried
    /// as 1 so that `lo == 1` allows wheel draws. An empty set always fits.
    ///
    /// ```
    /// # use deuces_cards::*;
    /// let ranks = [Rank::Ace, Rank::Trey, Rank::Five].into_iter().collect::<RankSet>();
    /// assert!(ranks.spans(4, 1, 14));
    /// assert!(!ranks.spans(4, 2, 14));
    /// ```
    pub fn spans(&self, span: u8, lo: u8, hi: u8) -> bool {
        if self.is_empty() {
            return true;
        }

        // Bit b of the shifted mask is the straight value b + 1.
        let fits = |bits: u16| {
            let min = bits.trailing_zeros() as u8 + 1;
            let max = 16 - bits.leading_zeros() as u8;
            max - min <= span && min >= lo && max <= hi
        };

        let high = self.0 << 1;
        if fits(high) {
            return true;
        }

        self.contains(Rank::Ace) && fits((high & !(1 << (Rank::Ace.value() - 1))) | 1)
    }
}

impl FromIterator<Rank> for RankSet {
    fn from_iter<T: IntoIterator<Item = Rank>>(iter: T) -> Self {
        let mut set = RankSet::default();
        for rank in iter {
            set.insert(rank);
        }
        set
    }
}
