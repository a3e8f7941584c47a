// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example par_deal_all5 -- super-deuces
// ```

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use deuces_eval::*;

fn main() {
    // Evaluate all 2.6M deals with 4 parallel tasks.
    const NUM_TASKS: usize = 4;

    let variant = match std::env::args().nth(1).map(|name| name.parse::<Variant>()) {
        Some(Ok(variant)) => variant,
        Some(Err(e)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        None => Variant::Nsud,
    };

    let paytable = variant.paytable();

    // Create per task counters to avoid contention and boost performance.
    let task_counters = (0..NUM_TASKS)
        .map(|_| Category::ALL.map(|_| AtomicU64::new(0)))
        .collect::<Vec<_>>();

    let now = Instant::now();

    Deck::default().par_for_each(NUM_TASKS, Hand::SIZE, |task_id, hand| {
        let (category, _) = evaluate(hand, paytable);
        task_counters[task_id][category as usize].fetch_add(1, Ordering::Relaxed);
    });

    let elapsed = now.elapsed().as_secs_f64();

    // Aggregate counters.
    let agg = Category::ALL.map(|c| {
        task_counters
            .iter()
            .map(|counts| counts[c as usize].load(Ordering::Relaxed))
            .sum::<u64>()
    });

    let total = agg.iter().sum::<u64>();
    println!("{}", variant.title());
    println!("Total deals      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Deals/sec:       {:.0}\n", total as f64 / elapsed);

    let stats = variant.stats();
    for category in Category::categories().filter(|&c| paytable.contains(c)) {
        let count = agg[category as usize];
        let mark = if count == stats.count(category) { "" } else { " *" };
        println!("{:<30} {count:>8}{mark}", category.name());
    }
}
