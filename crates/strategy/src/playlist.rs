// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Per variant strategy playlists.
use serde::Serialize;

use deuces_eval::{Category, Variant};

use crate::Rule::{self, *};

/// The ordered rules for each number of deuces in the dealt hand.
///
/// The first rule that applies is the strategy hold, every bucket ends with
/// [Rule::DiscardAll] so that some rule always applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Playlist {
    variant: Variant,
    buckets: [&'static [Rule]; Playlist::BUCKETS],
}

impl Playlist {
    /// Number of buckets, one for zero to four deuces.
    pub const BUCKETS: usize = 5;

    /// The variant for this playlist.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The rules for a hand with `deuces` deuces.
    pub fn bucket(&self, deuces: usize) -> &'static [Rule] {
        self.buckets[deuces.min(Self::BUCKETS - 1)]
    }

    /// Iterates the buckets from zero deuces.
    pub fn buckets(&self) -> impl Iterator<Item = (usize, &'static [Rule])> + '_ {
        self.buckets.iter().copied().enumerate()
    }
}

/// Returns the playlist for a variant.
pub fn playlist(variant: Variant) -> &'static Playlist {
    match variant {
        Variant::Nsud => &NSUD,
        Variant::Airport => &AIRPORT,
        Variant::Dbw => &DBW,
        Variant::LooseDeuces => &LOOSE_DEUCES,
        Variant::BonusDeuces10_4 => &BONUS_DEUCES_10_4,
        Variant::SuperDeuces => &SUPER_DEUCES,
    }
}

static NSUD: Playlist = Playlist {
    variant: Variant::Nsud,
    buckets: [NSUD_ZERO, ONE, TWO, THREE, FOUR],
};

static AIRPORT: Playlist = Playlist {
    variant: Variant::Airport,
    buckets: [ZERO, ONE, TWO, THREE, FOUR],
};

static DBW: Playlist = Playlist {
    variant: Variant::Dbw,
    buckets: [DBW_ZERO, DBW_ONE, TWO, THREE, FOUR],
};

static LOOSE_DEUCES: Playlist = Playlist {
    variant: Variant::LooseDeuces,
    buckets: [ZERO, ONE, TWO, THREE, FOUR],
};

static BONUS_DEUCES_10_4: Playlist = Playlist {
    variant: Variant::BonusDeuces10_4,
    buckets: [
        BONUS_ZERO,
        BONUS_ONE,
        BONUS_TWO,
        BONUS_THREE,
        BONUS_FOUR,
    ],
};

static SUPER_DEUCES: Playlist = Playlist {
    variant: Variant::SuperDeuces,
    buckets: [ZERO, SUPER_ONE, TWO, THREE, FOUR],
};

const FOUR_TO_SF: Rule = StraightFlushDraw {
    cards: 4,
    span: 4,
    lo: 1,
    hi: 14,
};

const THREE_TO_SF: Rule = StraightFlushDraw {
    cards: 3,
    span: 2,
    lo: 4,
    hi: 13,
};

// Three connected naturals from 5-6-7 up.
const CONNECTED_SF: Rule = StraightFlushDraw {
    cards: 4,
    span: 2,
    lo: 5,
    hi: 13,
};

const OPEN_STRAIGHT: Rule = StraightDraw {
    cards: 4,
    span: 3,
    lo: 3,
    hi: 13,
};

const ZERO: &[Rule] = &[
    Pat(Category::NaturalRoyal),
    RoyalDraw { cards: 4 },
    Pat(Category::StraightFlush),
    Kind { n: 4 },
    Pat(Category::FullHouse),
    Kind { n: 3 },
    Pat(Category::Flush),
    Pat(Category::Straight),
    FOUR_TO_SF,
    RoyalDraw { cards: 3 },
    Kind { n: 2 },
    FlushDraw { cards: 4 },
    OPEN_STRAIGHT,
    THREE_TO_SF,
    RoyalDraw { cards: 2 },
    DiscardAll,
];

// Full house pays 4, two pair draws to it.
const NSUD_ZERO: &[Rule] = &[
    Pat(Category::NaturalRoyal),
    RoyalDraw { cards: 4 },
    Pat(Category::StraightFlush),
    Kind { n: 4 },
    Pat(Category::FullHouse),
    Kind { n: 3 },
    Pat(Category::Flush),
    Pat(Category::Straight),
    FOUR_TO_SF,
    RoyalDraw { cards: 3 },
    TwoPair,
    FlushDraw { cards: 4 },
    Kind { n: 2 },
    OPEN_STRAIGHT,
    THREE_TO_SF,
    RoyalDraw { cards: 2 },
    DiscardAll,
];

// Flush pays 3, four to a flush beats a pair.
const BONUS_ZERO: &[Rule] = &[
    Pat(Category::NaturalRoyal),
    RoyalDraw { cards: 4 },
    Pat(Category::StraightFlush),
    Kind { n: 4 },
    Pat(Category::FullHouse),
    Kind { n: 3 },
    Pat(Category::Flush),
    FOUR_TO_SF,
    Pat(Category::Straight),
    RoyalDraw { cards: 3 },
    FlushDraw { cards: 4 },
    Kind { n: 2 },
    OPEN_STRAIGHT,
    THREE_TO_SF,
    RoyalDraw { cards: 2 },
    DiscardAll,
];

// Straight flush pays 13.
const DBW_ZERO: &[Rule] = &[
    Pat(Category::NaturalRoyal),
    RoyalDraw { cards: 4 },
    Pat(Category::StraightFlush),
    Kind { n: 4 },
    Pat(Category::FullHouse),
    Kind { n: 3 },
    FOUR_TO_SF,
    Pat(Category::Flush),
    Pat(Category::Straight),
    RoyalDraw { cards: 3 },
    Kind { n: 2 },
    FlushDraw { cards: 4 },
    OPEN_STRAIGHT,
    THREE_TO_SF,
    RoyalDraw { cards: 2 },
    DiscardAll,
];

const ONE: &[Rule] = &[
    Pat(Category::WildRoyal),
    Pat(Category::FiveOak),
    Pat(Category::StraightFlush),
    Kind { n: 3 },
    RoyalDraw { cards: 4 },
    Pat(Category::FullHouse),
    Pat(Category::Flush),
    CONNECTED_SF,
    Pat(Category::Straight),
    FOUR_TO_SF,
    Kind { n: 2 },
    RoyalDraw { cards: 3 },
    THREE_TO_SF,
    Deuces,
    DiscardAll,
];

// Straight flush pays 13, suited draws with the deuce beat a pat flush.
const DBW_ONE: &[Rule] = &[
    Pat(Category::WildRoyal),
    Pat(Category::FiveOak),
    Pat(Category::StraightFlush),
    Kind { n: 3 },
    RoyalDraw { cards: 4 },
    Pat(Category::FullHouse),
    StraightFlushDraw {
        cards: 4,
        span: 2,
        lo: 3,
        hi: 13,
    },
    StraightFlushDraw {
        cards: 4,
        span: 4,
        lo: 3,
        hi: 13,
    },
    Pat(Category::Flush),
    Pat(Category::Straight),
    FOUR_TO_SF,
    Kind { n: 2 },
    RoyalDraw { cards: 3 },
    THREE_TO_SF,
    Deuces,
    DiscardAll,
];

const SUPER_ONE: &[Rule] = &[
    Pat(Category::FiveOak1Deuce),
    Pat(Category::WildRoyal),
    Pat(Category::StraightFlush),
    Kind { n: 3 },
    RoyalDraw { cards: 4 },
    Pat(Category::FullHouse),
    Pat(Category::Flush),
    CONNECTED_SF,
    Pat(Category::Straight),
    FOUR_TO_SF,
    Kind { n: 2 },
    RoyalDraw { cards: 3 },
    THREE_TO_SF,
    Deuces,
    DiscardAll,
];

const BONUS_ONE: &[Rule] = &[
    Pat(Category::WildRoyal),
    Pat(Category::FiveAces),
    Pat(Category::Five345),
    Pat(Category::Five6ToK),
    Pat(Category::StraightFlush),
    Kind { n: 3 },
    RoyalDraw { cards: 4 },
    Pat(Category::FullHouse),
    Pat(Category::Flush),
    FOUR_TO_SF,
    Pat(Category::Straight),
    Kind { n: 2 },
    RoyalDraw { cards: 3 },
    THREE_TO_SF,
    Deuces,
    DiscardAll,
];

// Two suited connected naturals beat the bare deuces.
const TWO_SUITED_CONNECTORS: Rule = StraightFlushDraw {
    cards: 4,
    span: 2,
    lo: 6,
    hi: 11,
};

const TWO: &[Rule] = &[
    Pat(Category::WildRoyal),
    Pat(Category::FiveOak),
    Pat(Category::StraightFlush),
    Kind { n: 2 },
    RoyalDraw { cards: 4 },
    TWO_SUITED_CONNECTORS,
    Deuces,
    DiscardAll,
];

const BONUS_TWO: &[Rule] = &[
    Pat(Category::WildRoyal),
    Pat(Category::FiveAces),
    Pat(Category::Five345),
    Pat(Category::Five6ToK),
    Pat(Category::StraightFlush),
    Kind { n: 2 },
    RoyalDraw { cards: 4 },
    TWO_SUITED_CONNECTORS,
    Deuces,
    DiscardAll,
];

const THREE: &[Rule] = &[
    Pat(Category::WildRoyal),
    Pat(Category::FiveOak),
    Deuces,
    DiscardAll,
];

const BONUS_THREE: &[Rule] = &[
    Pat(Category::WildRoyal),
    Pat(Category::FiveAces),
    Pat(Category::Five345),
    Pat(Category::Five6ToK),
    DeucesWithAces { cards: 4 },
    Deuces,
    DiscardAll,
];

const FOUR: &[Rule] = &[Pat(Category::FourDeuces), Deuces, DiscardAll];

// Four deuces draw to the ace kicker.
const BONUS_FOUR: &[Rule] = &[Pat(Category::FourDeucesAce), Deuces, DiscardAll];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_end_with_discard_all() {
        for variant in Variant::ALL {
            let playlist = playlist(variant);
            assert_eq!(playlist.variant(), variant);
            assert_eq!(playlist.buckets().count(), Playlist::BUCKETS);

            for (deuces, rules) in playlist.buckets() {
                assert_eq!(rules.last(), Some(&DiscardAll), "{variant} {deuces}");
                let discards = rules.iter().filter(|r| **r == DiscardAll).count();
                assert_eq!(discards, 1, "{variant} {deuces}");
            }
        }
    }

    #[test]
    fn pat_rules_pay() {
        // Every pat rule names a category the variant pays.
        for variant in Variant::ALL {
            let paytable = variant.paytable();
            for (_, rules) in playlist(variant).buckets() {
                for rule in rules {
                    if let Pat(category) = rule {
                        assert!(paytable.pay(*category) > 0, "{variant} {category}");
                    }
                }
            }
        }
    }

    #[test]
    fn variant_tweaks() {
        let nsud = playlist(Variant::Nsud).bucket(0);
        let airport = playlist(Variant::Airport).bucket(0);
        assert!(nsud.contains(&TwoPair));
        assert!(!airport.contains(&TwoPair));

        let position = |rules: &[Rule], rule| rules.iter().position(|r| *r == rule);
        let dbw = playlist(Variant::Dbw).bucket(0);
        assert!(position(dbw, FOUR_TO_SF) < position(dbw, Pat(Category::Flush)));
        assert!(position(nsud, FOUR_TO_SF) > position(nsud, Pat(Category::Flush)));
        assert!(position(nsud, FlushDraw { cards: 4 }) < position(nsud, Kind { n: 2 }));

        // A made flush with one deuce is never broken outside of DBW.
        for variant in Variant::ALL.into_iter().filter(|v| *v != Variant::Dbw) {
            let one = playlist(variant).bucket(1);
            let flush = position(one, Pat(Category::Flush));
            assert!(flush.is_some(), "{variant}");
            assert!(
                one[..flush.unwrap_or_default()]
                    .iter()
                    .all(|r| !matches!(r, StraightFlushDraw { .. } | FlushDraw { .. })),
                "{variant}"
            );
        }

        let super_deuces = playlist(Variant::SuperDeuces).bucket(1);
        assert_eq!(super_deuces[0], Pat(Category::FiveOak1Deuce));

        let bonus = playlist(Variant::BonusDeuces10_4);
        assert_eq!(bonus.bucket(4)[0], Pat(Category::FourDeucesAce));
        assert!(bonus.bucket(3).contains(&DeucesWithAces { cards: 4 }));

        // Out of range buckets clamp to four deuces.
        assert_eq!(bonus.bucket(7), bonus.bucket(4));
    }

    #[test]
    fn playlist_serde() {
        let json = serde_json::to_value(playlist(Variant::Nsud)).unwrap();
        assert_eq!(json["variant"], "NSUD");
        assert_eq!(json["buckets"][4][0], serde_json::json!({"Pat": "FOUR_DEUCES"}));
        assert_eq!(json["buckets"][0].as_array().unwrap().len(), NSUD_ZERO.len());
    }
}
