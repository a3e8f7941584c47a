// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Exact expected value of a draw.
//!
//! The engine enumerates every replacement for the discarded cards from the
//! 47 cards stub, evaluates each final hand and counts the categories. The
//! coins total is an exact integer so the EV is the same for any enumeration
//! order and any number of tasks.
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroUsize, thread};

use deuces_cards::{Card, Deck, Hand, binomial};

use crate::{Category, Error, Paytable, Result, evaluate};

/// The cards a player keeps before the draw, as a mask of hand positions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hold(u8);

impl Hold {
    /// Discard all the cards.
    pub const NONE: Hold = Hold(0);

    /// Keep all the cards.
    pub const ALL: Hold = Hold(0b1_1111);

    /// Creates a hold from hand positions, repeated positions count once.
    pub fn from_indices(indices: &[usize]) -> Result<Self> {
        indices.iter().try_fold(Hold::NONE, |hold, &idx| {
            if idx < Hand::SIZE {
                Ok(Hold(hold.0 | 1 << idx))
            } else {
                Err(Error::HeldIndex(idx))
            }
        })
    }

    /// Creates a hold from a positions mask, bit i for position i.
    pub const fn from_mask(mask: u8) -> Self {
        Hold(mask & Hold::ALL.0)
    }

    /// The positions mask.
    pub fn mask(&self) -> u8 {
        self.0
    }

    /// Checks if a position is held.
    pub fn contains(&self, idx: usize) -> bool {
        idx < Hand::SIZE && self.0 & (1 << idx) != 0
    }

    /// Number of held cards.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks if no card is held.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the held positions in increasing order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + use<> {
        let mask = self.0;
        (0..Hand::SIZE).filter(move |idx| mask & (1 << idx) != 0)
    }

    /// The held cards in hand order.
    pub fn cards(&self, hand: &Hand) -> Vec<Card> {
        self.indices().map(|idx| hand[idx]).collect()
    }

    /// Iterates all the 32 holds.
    pub fn holds() -> impl Iterator<Item = Hold> {
        (0..=Hold::ALL.0).map(Hold)
    }
}

impl fmt::Display for Hold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }

        for (n, idx) in self.indices().enumerate() {
            if n > 0 {
                write!(f, ",")?;
            }
            write!(f, "{idx}")?;
        }
        Ok(())
    }
}

/// EV engine config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of parallel tasks, 1 runs on the calling thread.
    pub tasks: usize,
    /// The smallest number of drawn cards that is split across tasks.
    pub min_parallel_draw: usize,
}

impl Config {
    /// A config that runs on the calling thread.
    pub const SINGLE_THREAD: Config = Config {
        tasks: 1,
        min_parallel_draw: Hand::SIZE,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            min_parallel_draw: 4,
        }
    }
}

/// The categories counts for all the draws from a hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawOutcome {
    draws: u64,
    total: u64,
    counts: [u64; Category::COUNT],
}

impl DrawOutcome {
    fn new(counts: [u64; Category::COUNT], paytable: &Paytable) -> Self {
        let draws = counts.iter().sum();
        let total = Category::categories()
            .map(|c| counts[c as usize] * paytable.pay(c) as u64)
            .sum();

        Self {
            draws,
            total,
            counts,
        }
    }

    /// Number of evaluated draws.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Total coins paid over all the draws.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of draws ending in a category.
    pub fn count(&self, category: Category) -> u64 {
        self.counts[category as usize]
    }

    /// The expected coins per coin wagered.
    pub fn ev(&self) -> f64 {
        if self.draws == 0 {
            0.0
        } else {
            self.total as f64 / self.draws as f64
        }
    }

    /// The probability of ending in a category.
    pub fn frequency(&self, category: Category) -> f64 {
        if self.draws == 0 {
            0.0
        } else {
            self.count(category) as f64 / self.draws as f64
        }
    }

    /// Iterates the categories with at least one draw, from the highest.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::categories()
            .map(|c| (c, self.count(c)))
            .filter(|(_, count)| *count > 0)
    }
}

/// Computes the expected coins per coin wagered of holding the cards at
/// `held` positions and drawing the rest.
///
/// ```
/// # use deuces_eval::*;
/// let hand = "As Ks Qs Js 9c".parse::<Hand>().unwrap();
/// let ev = ev(&hand, &[0, 1, 2, 3], Variant::Nsud.paytable()).unwrap();
/// assert!((ev - 927.0 / 47.0).abs() < 1e-9);
/// ```
pub fn ev(hand: &Hand, held: &[usize], paytable: &Paytable) -> Result<f64> {
    let hold = Hold::from_indices(held)?;
    Ok(draw_outcome(hand, hold, paytable, &Config::default())?.ev())
}

/// Enumerates all the draws for a hold counting the final categories.
pub fn draw_outcome(
    hand: &Hand,
    hold: Hold,
    paytable: &Paytable,
    config: &Config,
) -> Result<DrawOutcome> {
    let stub = hand.stub();
    if stub.count() != Hand::STUB_SIZE {
        return Err(Error::Internal(format!(
            "stub has {} cards, expected {}",
            stub.count(),
            Hand::STUB_SIZE
        )));
    }

    // The held cards go first, the drawn cards fill the rest.
    let mut base = *hand.cards();
    for (slot, idx) in hold.indices().enumerate() {
        base[slot] = hand[idx];
    }

    let held = hold.len();
    let draw = Hand::SIZE - held;
    let tasks = if draw >= config.min_parallel_draw {
        config.tasks.max(1)
    } else {
        1
    };

    debug!(
        "Hold {hold} of {hand}: {} draws with {tasks} tasks",
        binomial(stub.count(), draw)
    );

    let counts = if tasks > 1 {
        par_tally(&stub, base, held, paytable, tasks)
    } else {
        tally(&stub, base, held, paytable)
    };

    let outcome = DrawOutcome::new(counts, paytable);
    let expected = binomial(Hand::STUB_SIZE, draw) as u64;
    if outcome.draws() != expected {
        return Err(Error::Internal(format!(
            "evaluated {} draws, expected {expected}",
            outcome.draws()
        )));
    }

    Ok(outcome)
}

/// Counts draw categories on the calling thread.
fn tally(
    stub: &Deck,
    base: [Card; Hand::SIZE],
    held: usize,
    paytable: &Paytable,
) -> [u64; Category::COUNT] {
    let mut counts = [0u64; Category::COUNT];
    let mut hand = base;

    stub.for_each(Hand::SIZE - held, |draw| {
        hand[held..].copy_from_slice(draw);
        let (category, _) = evaluate(&hand, paytable);
        counts[category as usize] += 1;
    });

    counts
}

/// Counts draw categories splitting the draws across tasks.
#[cfg(feature = "parallel")]
fn par_tally(
    stub: &Deck,
    base: [Card; Hand::SIZE],
    held: usize,
    paytable: &Paytable,
    tasks: usize,
) -> [u64; Category::COUNT] {
    use std::sync::atomic::{AtomicU64, Ordering};

    // Create per task counters to avoid contention.
    let task_counters = (0..tasks)
        .map(|_| Category::ALL.map(|_| AtomicU64::new(0)))
        .collect::<Vec<_>>();

    stub.par_for_each(tasks, Hand::SIZE - held, |task_id, draw| {
        let mut hand = base;
        hand[held..].copy_from_slice(draw);
        let (category, _) = evaluate(&hand, paytable);
        task_counters[task_id][category as usize].fetch_add(1, Ordering::Relaxed);
    });

    // Aggregate counters.
    let mut counts = [0u64; Category::COUNT];
    for counters in &task_counters {
        for (count, counter) in counts.iter_mut().zip(counters) {
            *count += counter.load(Ordering::Relaxed);
        }
    }

    counts
}

#[cfg(not(feature = "parallel"))]
fn par_tally(
    stub: &Deck,
    base: [Card; Hand::SIZE],
    held: usize,
    paytable: &Paytable,
    _tasks: usize,
) -> [u64; Category::COUNT] {
    tally(stub, base, held, paytable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Variant;

    fn hand(cards: &str) -> Hand {
        cards.parse().unwrap()
    }

    fn assert_close(l: f64, r: f64) {
        assert!((l - r).abs() < 1e-9, "{l} != {r}");
    }

    /// A paytable that pays one coin for every category.
    fn counting_paytable() -> Paytable {
        Category::categories().map(|c| (c, 1)).collect()
    }

    #[test]
    fn hold_indices() {
        let hold = Hold::from_indices(&[3, 0, 3]).unwrap();
        assert_eq!(hold.mask(), 0b1001);
        assert_eq!(hold.len(), 2);
        assert_eq!(hold.indices().collect::<Vec<_>>(), [0, 3]);
        assert!(hold.contains(3));
        assert!(!hold.contains(1));
        assert!(!hold.contains(7));
        assert_eq!(hold.to_string(), "0,3");
        assert_eq!(Hold::NONE.to_string(), "-");

        let h = hand("Jh Jd 5c 9s 4h");
        assert_eq!(hold.cards(&h), [h[0], h[3]]);

        assert_eq!(Hold::from_indices(&[0, 5]), Err(Error::HeldIndex(5)));
        assert_eq!(Hold::from_mask(0xff), Hold::ALL);
        assert_eq!(Hold::holds().count(), 32);
    }

    #[test]
    fn four_to_a_royal() {
        let ev = ev(&hand("As Ks Qs Js 9c"), &[0, 1, 2, 3], Variant::Nsud.paytable()).unwrap();
        assert_close(ev, 927.0 / 47.0);
        assert_eq!(format!("{ev:.6}"), "19.723404");

        let outcome = draw_outcome(
            &hand("As Ks Qs Js 9c"),
            Hold::from_mask(0b1111),
            Variant::Nsud.paytable(),
            &Config::SINGLE_THREAD,
        )
        .unwrap();
        assert_eq!(outcome.draws(), 47);
        assert_eq!(outcome.total(), 927);
        assert_eq!(outcome.count(Category::NaturalRoyal), 1);
        assert_eq!(outcome.count(Category::WildRoyal), 4);
        assert_eq!(outcome.count(Category::Flush), 7);
        assert_eq!(outcome.count(Category::Straight), 3);
        assert_eq!(outcome.count(Category::Nothing), 32);
    }

    #[test]
    fn pair_of_jacks_bonus() {
        let paytable = Variant::BonusDeuces10_4.paytable();
        let ev = ev(&hand("Jh Jd 5c 9s 4h"), &[0, 1], paytable).unwrap();
        assert_close(ev, 8569.0 / 16215.0);
        assert_eq!(format!("{ev:.6}"), "0.528461");

        let outcome = draw_outcome(
            &hand("Jh Jd 5c 9s 4h"),
            Hold::from_mask(0b11),
            paytable,
            &Config::SINGLE_THREAD,
        )
        .unwrap();
        assert_eq!(outcome.count(Category::Five6ToK), 20);
        assert_eq!(outcome.count(Category::FullHouse), 377);
        assert_eq!(outcome.count(Category::FourOak), 615);
        assert_eq!(outcome.count(Category::ThreeOak), 4578);
        assert_eq!(outcome.count(Category::Nothing), 10625);
    }

    #[test]
    fn four_deuces_draw_for_ace() {
        let paytable = Variant::BonusDeuces10_4.paytable();
        let ev = ev(&hand("2s 2h 2d 2c Ah"), &[0, 1, 2, 3], paytable).unwrap();
        assert_close(ev, 10_000.0 / 47.0);
    }

    #[test]
    fn discard_all() {
        let paytable = Variant::BonusDeuces10_4.paytable();
        let outcome =
            draw_outcome(&hand("Jh Jd 5c 9s 4h"), Hold::NONE, paytable, &Config::default())
                .unwrap();
        assert_eq!(outcome.draws(), 1_533_939);
        assert_eq!(outcome.total(), 454_024);
        assert_eq!(outcome.count(Category::NaturalRoyal), 2);
        assert_eq!(outcome.count(Category::FiveAces), 52);
        assert_eq!(outcome.count(Category::FourDeucesAce), 4);
        assert_close(outcome.ev(), 454_024.0 / 1_533_939.0);
    }

    #[test]
    fn pat_hands() {
        for variant in Variant::ALL {
            let paytable = variant.paytable();
            for cards in ["8h 9h 2d Qh 6h", "Th Jh Qh Kh Ah", "2s 2h 2d 2c Ah", "7s 3h Kd 9c 5s"] {
                let h = hand(cards);
                let (_, coins) = evaluate(h.cards(), paytable);
                let ev = ev(&h, &[0, 1, 2, 3, 4], paytable).unwrap();
                assert_eq!(ev, coins as f64, "{cards} {variant}");
            }
        }
    }

    #[test]
    fn draw_counts() {
        let h = hand("Jh Jd 5c 9s 4h");
        let paytable = counting_paytable();

        for mask in [0b1_1111, 0b1_1110, 0b1_1100, 0b1_1000, 0b1_0000] {
            let hold = Hold::from_mask(mask);
            let outcome = draw_outcome(&h, hold, &paytable, &Config::SINGLE_THREAD).unwrap();
            let expected = binomial(47, 5 - hold.len()) as u64;
            assert_eq!(outcome.draws(), expected);
            assert_eq!(outcome.total(), expected);
            assert_eq!(outcome.iter().map(|(_, n)| n).sum::<u64>(), expected);
        }
    }

    #[test]
    fn parallel_matches_single_thread() {
        let h = hand("9c Ac 2h Tc 2s");
        let paytable = Variant::Nsud.paytable();
        let hold = Hold::from_indices(&[2]).unwrap();

        let single = draw_outcome(&h, hold, paytable, &Config::SINGLE_THREAD).unwrap();
        for tasks in [2, 3, 7] {
            let config = Config {
                tasks,
                min_parallel_draw: 1,
            };
            let par = draw_outcome(&h, hold, paytable, &config).unwrap();
            assert_eq!(par, single, "tasks={tasks}");
        }
    }

    #[test]
    fn deterministic_and_non_negative() {
        let h = hand("Ac 2c 3c 4c 5c");
        for (variant, paytable) in crate::paytables() {
            for held in [&[0usize, 1][..], &[1][..], &[0, 2, 4][..], &[0, 1, 2, 3][..]] {
                let first = ev(&h, held, paytable).unwrap();
                let second = ev(&h, held, paytable).unwrap();
                assert_eq!(first.to_bits(), second.to_bits(), "{variant}");
                assert!(first >= 0.0);
            }
        }
    }

    #[test]
    fn errors() {
        let h = hand("Jh Jd 5c 9s 4h");
        let paytable = Variant::Nsud.paytable();
        let err = ev(&h, &[0, 9], paytable).unwrap_err();
        assert_eq!(err, Error::HeldIndex(9));
        assert!(err.is_input());

        let err = Error::from("Jh Jd".parse::<Hand>().unwrap_err());
        assert!(err.is_input());
        assert!(!Error::Internal("stub".to_string()).is_input());

        // Missing categories pay zero rather than failing.
        let ev = ev(&h, &[0, 1], &Paytable::EMPTY).unwrap();
        assert_eq!(ev, 0.0);
    }

    #[test]
    fn stub_composition() {
        // Discarding all depends on the dealt cards only through the stub.
        let paytable = Variant::Nsud.paytable();
        let l = draw_outcome(&hand("Jh Jd 5c 9s 4h"), Hold::NONE, paytable, &Config::default());
        let r = draw_outcome(&hand("4h 9s Jd 5c Jh"), Hold::NONE, paytable, &Config::default());
        assert_eq!(l.unwrap(), r.unwrap());
    }
}
