// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Combinations of k cards in colex order.
use super::Deck;

/// The largest subset size supported by the deck iterators.
pub const MAX_K: usize = 7;

/// Creates table for nck(n, k) for n <= 52 and k <= 7.
const fn make_binomials() -> [[u32; MAX_K + 1]; Deck::SIZE + 1] {
    let mut t = [[0u32; MAX_K + 1]; Deck::SIZE + 1];
    let mut n = 0;

    while n <= Deck::SIZE {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K && k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const BINOMIALS: [[u32; MAX_K + 1]; Deck::SIZE + 1] = make_binomials();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn binomial(n: usize, k: usize) -> usize {
    assert!(n <= Deck::SIZE, "n={n} must be 0 <= n <= 52");
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= 7");

    BINOMIALS[n][k] as usize
}

/// Uses the combinatorial number system to convert n to a
/// k-combination (see Theorem L pg. 260 Knuth 4a).
pub(crate) fn nth_ksubset(mut n: usize, k: usize) -> [usize; MAX_K] {
    assert!(k <= MAX_K);

    let mut out = [0; MAX_K];
    for k in (0..k).rev() {
        let mut c = k;
        while binomial(c, k + 1) <= n {
            c += 1;
        }

        c = c.saturating_sub(1);
        out[k] = c;

        n = n.saturating_sub(binomial(c, k + 1));
    }

    out
}

/// Calls the given closure for `count` k-subsets of `0..n` starting from the
/// `nth` k-subset.
pub(crate) fn for_each_ksubset<F>(n: usize, k: usize, nth: usize, count: usize, mut f: F)
where
    F: FnMut(&[usize]),
{
    if count == 0 || k > n || nth >= binomial(n, k) {
        return;
    }

    if k == 0 {
        f(&[]);
        return;
    }

    // Algorithm L from TAOCP 4a, c[k + 1] = n and c[k + 2] = 0 are sentinels.
    let mut c = [0usize; MAX_K + 3];

    let ks = nth_ksubset(nth, k);
    c[1..=k].copy_from_slice(&ks[..k]);
    c[k + 1] = n;

    let mut visited = 1;
    loop {
        f(&c[1..=k]);

        if visited == count {
            break;
        }
        visited += 1;

        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > k {
            break;
        }

        c[j] += 1;
    }
}
