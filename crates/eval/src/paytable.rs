// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Paytables and the named variants registry.
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{Category, Error};

/// Coins returned per coin wagered for each category.
///
/// A category missing from the paytable pays zero, and the evaluator reports
/// the variant specific categories only for paytables that carry them. A
/// paytable (de)serializes as a map from category keys to coins, unknown keys
/// are ignored when loading.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, u32>")]
pub struct Paytable {
    pays: [Option<u32>; Category::COUNT],
}

impl Paytable {
    /// A paytable with no categories.
    pub const EMPTY: Paytable = Paytable {
        pays: [None; Category::COUNT],
    };

    /// Returns this paytable with `category` paying `coins`.
    ///
    /// [Category::Error] always pays zero and is not stored.
    pub const fn with(mut self, category: Category, coins: u32) -> Self {
        if !matches!(category, Category::Error) {
            self.pays[category as usize] = Some(coins);
        }
        self
    }

    /// Sets the payout for a category.
    pub fn set(&mut self, category: Category, coins: u32) {
        *self = self.with(category, coins);
    }

    /// The coins paid for a category, zero if the category is missing.
    #[inline]
    pub fn pay(&self, category: Category) -> u32 {
        self.pays[category as usize].unwrap_or(0)
    }

    /// The coins paid for a category if present.
    #[inline]
    pub fn get(&self, category: Category) -> Option<u32> {
        self.pays[category as usize]
    }

    /// Checks if the paytable carries a category.
    #[inline]
    pub fn contains(&self, category: Category) -> bool {
        self.pays[category as usize].is_some()
    }

    /// Iterates the categories in this paytable from the highest.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::categories().filter_map(|c| self.get(c).map(|coins| (c, coins)))
    }
}

impl FromIterator<(Category, u32)> for Paytable {
    fn from_iter<T: IntoIterator<Item = (Category, u32)>>(iter: T) -> Self {
        let mut paytable = Paytable::EMPTY;
        for (category, coins) in iter {
            paytable.set(category, coins);
        }
        paytable
    }
}

impl From<BTreeMap<String, u32>> for Paytable {
    fn from(map: BTreeMap<String, u32>) -> Self {
        map.into_iter()
            .filter_map(|(key, coins)| key.parse::<Category>().ok().map(|c| (c, coins)))
            .collect()
    }
}

impl Serialize for Paytable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.iter().count()))?;
        for (category, coins) in self.iter() {
            map.serialize_entry(category.key(), &coins)?;
        }
        map.end()
    }
}

/// Not So Ugly Deuces.
pub const NSUD: Paytable = Paytable::EMPTY
    .with(Category::NaturalRoyal, 800)
    .with(Category::FourDeuces, 200)
    .with(Category::WildRoyal, 25)
    .with(Category::FiveOak, 16)
    .with(Category::StraightFlush, 10)
    .with(Category::FourOak, 4)
    .with(Category::FullHouse, 4)
    .with(Category::Flush, 3)
    .with(Category::Straight, 2)
    .with(Category::ThreeOak, 1)
    .with(Category::Nothing, 0);

/// Airport Deuces.
pub const AIRPORT: Paytable = Paytable::EMPTY
    .with(Category::NaturalRoyal, 800)
    .with(Category::FourDeuces, 200)
    .with(Category::WildRoyal, 25)
    .with(Category::FiveOak, 12)
    .with(Category::StraightFlush, 9)
    .with(Category::FourOak, 4)
    .with(Category::FullHouse, 3)
    .with(Category::Flush, 2)
    .with(Category::Straight, 2)
    .with(Category::ThreeOak, 1)
    .with(Category::Nothing, 0);

/// Double Bonus Wild.
pub const DBW: Paytable = Paytable::EMPTY
    .with(Category::NaturalRoyal, 800)
    .with(Category::FourDeuces, 400)
    .with(Category::WildRoyal, 25)
    .with(Category::FiveOak, 16)
    .with(Category::StraightFlush, 13)
    .with(Category::FourOak, 4)
    .with(Category::FullHouse, 3)
    .with(Category::Flush, 2)
    .with(Category::Straight, 2)
    .with(Category::ThreeOak, 1)
    .with(Category::Nothing, 0);

/// Loose Deuces.
pub const LOOSE_DEUCES: Paytable = Paytable::EMPTY
    .with(Category::NaturalRoyal, 800)
    .with(Category::FourDeuces, 500)
    .with(Category::WildRoyal, 25)
    .with(Category::FiveOak, 15)
    .with(Category::StraightFlush, 8)
    .with(Category::FourOak, 4)
    .with(Category::FullHouse, 3)
    .with(Category::Flush, 2)
    .with(Category::Straight, 2)
    .with(Category::ThreeOak, 1)
    .with(Category::Nothing, 0);

/// Bonus Deuces 10/4.
pub const BONUS_DEUCES_10_4: Paytable = Paytable::EMPTY
    .with(Category::NaturalRoyal, 800)
    .with(Category::FourDeucesAce, 400)
    .with(Category::FourDeuces, 200)
    .with(Category::WildRoyal, 25)
    .with(Category::FiveAces, 80)
    .with(Category::Five345, 40)
    .with(Category::Five6ToK, 20)
    .with(Category::StraightFlush, 10)
    .with(Category::FourOak, 4)
    .with(Category::FullHouse, 3)
    .with(Category::Flush, 3)
    .with(Category::Straight, 1)
    .with(Category::ThreeOak, 1)
    .with(Category::Nothing, 0);

/// Super Deuces.
pub const SUPER_DEUCES: Paytable = Paytable::EMPTY
    .with(Category::NaturalRoyal, 800)
    .with(Category::FourDeuces, 200)
    .with(Category::WildRoyal, 25)
    .with(Category::FiveOak1Deuce, 50)
    .with(Category::FiveOak, 15)
    .with(Category::StraightFlush, 9)
    .with(Category::FourOak, 4)
    .with(Category::FullHouse, 3)
    .with(Category::Flush, 2)
    .with(Category::Straight, 2)
    .with(Category::ThreeOak, 1)
    .with(Category::Nothing, 0);

/// A named Deuces Wild variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Variant {
    /// Not So Ugly Deuces.
    Nsud,
    /// Airport Deuces.
    Airport,
    /// Double Bonus Wild.
    Dbw,
    /// Loose Deuces.
    LooseDeuces,
    /// Bonus Deuces 10/4.
    BonusDeuces10_4,
    /// Super Deuces.
    SuperDeuces,
}

impl Variant {
    /// All the named variants.
    pub const ALL: [Variant; 6] = [
        Variant::Nsud,
        Variant::Airport,
        Variant::Dbw,
        Variant::LooseDeuces,
        Variant::BonusDeuces10_4,
        Variant::SuperDeuces,
    ];

    /// The variant name, `"NSUD"`, `"BONUS_DEUCES_10_4"`.
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Nsud => "NSUD",
            Variant::Airport => "AIRPORT",
            Variant::Dbw => "DBW",
            Variant::LooseDeuces => "LOOSE_DEUCES",
            Variant::BonusDeuces10_4 => "BONUS_DEUCES_10_4",
            Variant::SuperDeuces => "SUPER_DEUCES",
        }
    }

    /// A human readable title.
    pub const fn title(self) -> &'static str {
        match self {
            Variant::Nsud => "Not So Ugly Deuces",
            Variant::Airport => "Airport Deuces",
            Variant::Dbw => "Double Bonus Wild",
            Variant::LooseDeuces => "Loose Deuces",
            Variant::BonusDeuces10_4 => "Bonus Deuces 10/4",
            Variant::SuperDeuces => "Super Deuces",
        }
    }

    /// The paytable for this variant.
    pub const fn paytable(self) -> &'static Paytable {
        match self {
            Variant::Nsud => &NSUD,
            Variant::Airport => &AIRPORT,
            Variant::Dbw => &DBW,
            Variant::LooseDeuces => &LOOSE_DEUCES,
            Variant::BonusDeuces10_4 => &BONUS_DEUCES_10_4,
            Variant::SuperDeuces => &SUPER_DEUCES,
        }
    }

    /// Detects a variant from its distinctive payouts.
    ///
    /// Checks in order `FIVE_ACES == 80`, `FIVE_OAK == 12`,
    /// `FOUR_DEUCES == 500`, a `FIVE_OAK_1_DEUCE` key, `FOUR_DEUCES == 400` and
    /// falls back to [Variant::Nsud].
    pub fn detect(paytable: &Paytable) -> Variant {
        if paytable.get(Category::FiveAces) == Some(80) {
            Variant::BonusDeuces10_4
        } else if paytable.get(Category::FiveOak) == Some(12) {
            Variant::Airport
        } else if paytable.get(Category::FourDeuces) == Some(500) {
            Variant::LooseDeuces
        } else if paytable.contains(Category::FiveOak1Deuce) {
            Variant::SuperDeuces
        } else if paytable.get(Category::FourDeuces) == Some(400) {
            Variant::Dbw
        } else {
            Variant::Nsud
        }
    }

    /// The dealt hand statistics for this variant.
    pub fn stats(self) -> &'static VariantStats {
        match self {
            Variant::BonusDeuces10_4 => &BONUS_DEAL_STATS,
            Variant::SuperDeuces => &SUPER_DEAL_STATS,
            Variant::Nsud | Variant::Airport | Variant::Dbw | Variant::LooseDeuces => {
                &DEAL_STATS
            }
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Variant {
    type Err = Error;

    /// Parses a variant name ignoring case, `-` can be used for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().replace('-', "_");
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(&name))
            .ok_or_else(|| Error::UnknownVariant(s.to_string()))
    }
}

impl From<Variant> for &'static str {
    fn from(variant: Variant) -> Self {
        variant.name()
    }
}

impl TryFrom<String> for Variant {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Returns the named variants paytables.
pub fn paytables() -> impl Iterator<Item = (Variant, &'static Paytable)> {
    Variant::ALL.into_iter().map(|v| (v, v.paytable()))
}

/// Returns the dealt hand statistics for each named variant.
pub fn variant_stats() -> impl Iterator<Item = (Variant, &'static VariantStats)> {
    Variant::ALL.into_iter().map(|v| (v, v.stats()))
}

/// Theoretical category frequencies of the five cards dealt from a full deck,
/// before the draw.
///
/// Counts are over all the C(52, 5) deals, variants without bonus categories
/// share the same counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantStats {
    counts: &'static [(Category, u64)],
}

impl VariantStats {
    /// The number of five cards deals.
    pub const DEALS: u64 = 2_598_960;

    /// Number of deals in a category.
    pub fn count(&self, category: Category) -> u64 {
        self.counts
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// The probability of a dealt hand being in a category.
    pub fn frequency(&self, category: Category) -> f64 {
        self.count(category) as f64 / Self::DEALS as f64
    }

    /// The probability that a dealt hand pays something under `paytable`.
    pub fn hit_frequency(&self, paytable: &Paytable) -> f64 {
        let hits = self
            .counts
            .iter()
            .filter(|(c, _)| paytable.pay(*c) > 0)
            .map(|(_, count)| count)
            .sum::<u64>();
        hits as f64 / Self::DEALS as f64
    }

    /// The return of standing on every dealt hand under `paytable`.
    pub fn pat_return(&self, paytable: &Paytable) -> f64 {
        let coins = self
            .counts
            .iter()
            .map(|(c, count)| count * paytable.pay(*c) as u64)
            .sum::<u64>();
        coins as f64 / Self::DEALS as f64
    }

    /// Iterates the categories counts from the highest.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        self.counts.iter().copied()
    }
}

const DEAL_STATS: VariantStats = VariantStats {
    counts: &[
        (Category::NaturalRoyal, 4),
        (Category::FourDeuces, 48),
        (Category::WildRoyal, 480),
        (Category::FiveOak, 624),
        (Category::StraightFlush, 2_068),
        (Category::FourOak, 31_552),
        (Category::FullHouse, 12_672),
        (Category::Flush, 14_472),
        (Category::Straight, 62_232),
        (Category::ThreeOak, 355_080),
        (Category::Nothing, 2_119_728),
    ],
};

const BONUS_DEAL_STATS: VariantStats = VariantStats {
    counts: &[
        (Category::NaturalRoyal, 4),
        (Category::FourDeucesAce, 4),
        (Category::FourDeuces, 44),
        (Category::WildRoyal, 480),
        (Category::FiveAces, 52),
        (Category::Five345, 156),
        (Category::Five6ToK, 416),
        (Category::StraightFlush, 2_068),
        (Category::FourOak, 31_552),
        (Category::FullHouse, 12_672),
        (Category::Flush, 14_472),
        (Category::Straight, 62_232),
        (Category::ThreeOak, 355_080),
        (Category::Nothing, 2_119_728),
    ],
};

const SUPER_DEAL_STATS: VariantStats = VariantStats {
    counts: &[
        (Category::NaturalRoyal, 4),
        (Category::FourDeuces, 48),
        (Category::WildRoyal, 480),
        (Category::FiveOak1Deuce, 48),
        (Category::FiveOak, 576),
        (Category::StraightFlush, 2_068),
        (Category::FourOak, 31_552),
        (Category::FullHouse, 12_672),
        (Category::Flush, 14_472),
        (Category::Straight, 62_232),
        (Category::ThreeOak, 355_080),
        (Category::Nothing, 2_119_728),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate;
    use deuces_cards::Deck;

    #[test]
    fn paytable_lookup() {
        let paytable = Paytable::default()
            .with(Category::Flush, 3)
            .with(Category::Error, 10);
        assert_eq!(paytable.pay(Category::Flush), 3);
        assert_eq!(paytable.pay(Category::Straight), 0);
        assert_eq!(paytable.get(Category::Straight), None);
        assert!(!paytable.contains(Category::Error));
        assert_eq!(paytable.pay(Category::Error), 0);
        assert_eq!(paytable.iter().collect::<Vec<_>>(), [(Category::Flush, 3)]);
    }

    #[test]
    fn paytable_serde() {
        let json = r#"{"FLUSH": 3, "STRAIGHT": 2, "PAIR": 1, "NATURAL_ROYAL": 800}"#;
        let paytable = serde_json::from_str::<Paytable>(json).unwrap();
        assert_eq!(paytable.pay(Category::NaturalRoyal), 800);
        assert_eq!(paytable.pay(Category::Flush), 3);
        assert_eq!(paytable.pay(Category::Straight), 2);
        assert_eq!(paytable.iter().count(), 3);

        // Serialized from the highest category.
        let json = serde_json::to_string(&paytable).unwrap();
        assert_eq!(json, r#"{"NATURAL_ROYAL":800,"FLUSH":3,"STRAIGHT":2}"#);

        for (_, paytable) in paytables() {
            let json = serde_json::to_string(paytable).unwrap();
            assert_eq!(&serde_json::from_str::<Paytable>(&json).unwrap(), paytable);
        }
    }

    #[test]
    fn variant_names() {
        for variant in Variant::ALL {
            assert_eq!(variant.name().parse::<Variant>().unwrap(), variant);
            assert_eq!(variant.to_string(), variant.name());
        }

        assert_eq!(
            "bonus-deuces-10-4".parse::<Variant>().unwrap(),
            Variant::BonusDeuces10_4
        );
        assert!(matches!(
            "JACKS".parse::<Variant>(),
            Err(Error::UnknownVariant(name)) if name == "JACKS"
        ));
    }

    #[test]
    fn detect_variants() {
        for (variant, paytable) in paytables() {
            assert_eq!(Variant::detect(paytable), variant);
        }

        assert_eq!(Variant::detect(&Paytable::EMPTY), Variant::Nsud);

        // Bonus signature wins over the others.
        let paytable = AIRPORT.with(Category::FiveAces, 80);
        assert_eq!(Variant::detect(&paytable), Variant::BonusDeuces10_4);
        let paytable = NSUD.with(Category::FourDeuces, 500);
        assert_eq!(Variant::detect(&paytable), Variant::LooseDeuces);
    }

    #[test]
    fn stats_totals() {
        for (variant, stats) in variant_stats() {
            let total = stats.iter().map(|(_, count)| count).sum::<u64>();
            assert_eq!(total, VariantStats::DEALS, "{variant}");

            // Every counted category is reachable with this variant paytable.
            let paytable = variant.paytable();
            assert!(stats.iter().all(|(c, _)| paytable.contains(c)));

            let hit = stats.hit_frequency(paytable);
            assert!(hit > 0.18 && hit < 0.19, "{variant} {hit}");
            assert!(stats.pat_return(paytable) > 0.0);
        }

        let stats = Variant::Nsud.stats();
        assert_eq!(stats.count(Category::FourDeuces), 48);
        assert_eq!(stats.count(Category::FiveAces), 0);
        assert!((stats.frequency(Category::NaturalRoyal) - 4.0 / 2_598_960.0).abs() < 1e-15);
    }

    #[test]
    fn stats_match_enumeration() {
        let variant = Variant::BonusDeuces10_4;
        let mut counts = [0u64; Category::COUNT];
        Deck::default().for_each(5, |hand| {
            let (category, _) = evaluate(hand, variant.paytable());
            counts[category as usize] += 1;
        });

        for category in Category::categories() {
            assert_eq!(
                counts[category as usize],
                variant.stats().count(category),
                "{category}"
            );
        }
    }

    // Goes through 2.6M deals for each variant.
    #[test]
    #[ignore]
    fn all_stats_match_enumeration() {
        for (variant, stats) in variant_stats() {
            let mut counts = [0u64; Category::COUNT];
            Deck::default().for_each(5, |hand| {
                let (category, _) = evaluate(hand, variant.paytable());
                counts[category as usize] += 1;
            });

            for category in Category::categories() {
                assert_eq!(counts[category as usize], stats.count(category));
            }
        }
    }
}
