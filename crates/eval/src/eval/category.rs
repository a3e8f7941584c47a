// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuces Wild hand categories.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::Error;

/// A poker outcome class under deuces wild rules.
///
/// Categories are declared from the highest to the lowest paying, the
/// evaluator returns the first category a hand matches in this order. A
/// category serializes to its paytable key, `"FLUSH"`, `"FIVE_OAK"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Category {
    /// Royal flush without deuces.
    NaturalRoyal,
    /// Four deuces with an ace kicker, bonus variants only.
    FourDeucesAce,
    /// Four deuces.
    FourDeuces,
    /// Royal flush with at least one deuce.
    WildRoyal,
    /// Five aces, bonus variants only.
    FiveAces,
    /// Five threes, fours or fives, bonus variants only.
    Five345,
    /// Five sixes through kings, bonus variants only.
    Five6ToK,
    /// Four naturals of a kind with one deuce, Super Deuces only.
    FiveOak1Deuce,
    /// Five of a kind.
    FiveOak,
    /// Straight flush.
    StraightFlush,
    /// Four of a kind.
    FourOak,
    /// Full house.
    FullHouse,
    /// Flush.
    Flush,
    /// Straight.
    Straight,
    /// Three of a kind.
    ThreeOak,
    /// No paying hand.
    Nothing,
    /// The input was not a five cards hand.
    Error,
}

impl Category {
    /// The number of categories.
    pub const COUNT: usize = 17;

    /// All categories from the highest to the lowest.
    pub const ALL: [Category; Category::COUNT] = {
        use Category::*;
        [
            NaturalRoyal,
            FourDeucesAce,
            FourDeuces,
            WildRoyal,
            FiveAces,
            Five345,
            Five6ToK,
            FiveOak1Deuce,
            FiveOak,
            StraightFlush,
            FourOak,
            FullHouse,
            Flush,
            Straight,
            ThreeOak,
            Nothing,
            Error,
        ]
    };

    /// Returns all categories.
    pub fn categories() -> impl DoubleEndedIterator<Item = Category> {
        Self::ALL.into_iter()
    }

    /// The paytable key for this category.
    pub const fn key(self) -> &'static str {
        match self {
            Category::NaturalRoyal => "NATURAL_ROYAL",
            Category::FourDeucesAce => "FOUR_DEUCES_ACE",
            Category::FourDeuces => "FOUR_DEUCES",
            Category::WildRoyal => "WILD_ROYAL",
            Category::FiveAces => "FIVE_ACES",
            Category::Five345 => "FIVE_3_4_5",
            Category::Five6ToK => "FIVE_6_TO_K",
            Category::FiveOak1Deuce => "FIVE_OAK_1_DEUCE",
            Category::FiveOak => "FIVE_OAK",
            Category::StraightFlush => "STRAIGHT_FLUSH",
            Category::FourOak => "FOUR_OAK",
            Category::FullHouse => "FULL_HOUSE",
            Category::Flush => "FLUSH",
            Category::Straight => "STRAIGHT",
            Category::ThreeOak => "THREE_OAK",
            Category::Nothing => "NOTHING",
            Category::Error => "ERROR",
        }
    }

    /// A human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Category::NaturalRoyal => "Natural Royal Flush",
            Category::FourDeucesAce => "Four Deuces with Ace",
            Category::FourDeuces => "Four Deuces",
            Category::WildRoyal => "Wild Royal Flush",
            Category::FiveAces => "Five Aces",
            Category::Five345 => "Five 3s, 4s or 5s",
            Category::Five6ToK => "Five 6s through Ks",
            Category::FiveOak1Deuce => "Five of a Kind with One Deuce",
            Category::FiveOak => "Five of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::FourOak => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::Flush => "Flush",
            Category::Straight => "Straight",
            Category::ThreeOak => "Three of a Kind",
            Category::Nothing => "Nothing",
            Category::Error => "Error",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::categories()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.key()
    }
}

impl TryFrom<String> for Category {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys() {
        for (idx, category) in Category::categories().enumerate() {
            assert_eq!(category as usize, idx);
            assert_eq!(category.key().parse::<Category>().unwrap(), category);
            assert_eq!(category.to_string(), category.key());
        }

        assert_eq!("five_3_4_5".parse::<Category>().unwrap(), Category::Five345);
        assert!(matches!(
            "PAIR".parse::<Category>(),
            Err(Error::UnknownCategory(key)) if key == "PAIR"
        ));
    }

    #[test]
    fn category_serde() {
        let json = serde_json::to_string(&Category::FiveOak1Deuce).unwrap();
        assert_eq!(json, "\"FIVE_OAK_1_DEUCE\"");
        assert_eq!(
            serde_json::from_str::<Category>(&json).unwrap(),
            Category::FiveOak1Deuce
        );
    }

    #[test]
    fn category_from_string() {
        let category = Category::try_from("WILD_ROYAL".to_string()).unwrap();
        assert_eq!(category, Category::WildRoyal);

        let err = Category::try_from("ERROR_KEY".to_string()).unwrap_err();
        assert!(err.is_input());
        assert!(matches!(err, Error::UnknownCategory(key) if key == "ERROR_KEY"));
    }
}
