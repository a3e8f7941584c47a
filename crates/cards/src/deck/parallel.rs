// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel subsets iteration.
use std::thread;

use super::{
    Card, Deck, Rank, Suit,
    ksubset::{MAX_K, binomial, for_each_ksubset},
};

impl Deck {
    /// Parallel for each, calls the `f` closure for each k-cards subset.
    ///
    /// The subsets are split in `num_tasks` contiguous ranges, each range is
    /// visited by a scoped thread. The closure takes an usize that is the task
    /// identifier (0..num_task) and a slice of cards of length k.
    ///
    /// Panics if k > [MAX_K] or `num_tasks` is zero.
    pub fn par_for_each<F>(&self, num_tasks: usize, k: usize, f: F)
    where
        F: Fn(usize, &[Card]) + Send + Sync,
    {
        assert!(k <= MAX_K, "k={k} must be k <= {MAX_K}");
        assert!(num_tasks > 0);

        let n = self.cards.len();
        let num_subsets = binomial(n, k);
        if num_subsets == 0 {
            return;
        }

        let subsets_per_task = num_subsets.div_ceil(num_tasks);

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let start = task_id * subsets_per_task;
                if start >= num_subsets {
                    break;
                }

                let count = subsets_per_task.min(num_subsets - start);
                let f = &f;
                s.spawn(move || {
                    let mut h = [Card::new(Rank::Ace, Suit::Diamonds); MAX_K];
                    for_each_ksubset(n, k, start, count, |p| {
                        for (idx, &pos) in p.iter().enumerate() {
                            h[idx] = self.cards[pos];
                        }

                        f(task_id, &h[..k]);
                    });
                });
            }
        });
    }
}
