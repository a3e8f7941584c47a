// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Strategy solver and holds analysis.
use ahash::AHashSet;
use log::{debug, trace};
use serde::Serialize;
use std::cmp::Ordering;

use deuces_eval::{
    Card, Config, DrawOutcome, Hand, Hold, Paytable, Result, Variant, draw_outcome, evaluate,
};

use crate::{Rule, playlist};

/// Where a play comes from in the playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayMeta {
    /// The bucket, the number of deuces in the hand.
    pub bucket: usize,
    /// The index of the rule in the bucket.
    pub rule_index: usize,
    /// The rule name.
    pub rule_name: String,
    /// Number of rules in the bucket.
    #[serde(rename = "total_rules_in_bucket")]
    pub total_rules: usize,
}

/// A hold selected by the strategy with its expected value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Play {
    /// The held cards in hand order.
    pub held: Vec<Card>,
    /// The held positions.
    pub hold: Hold,
    /// Expected coins per coin wagered.
    pub ev: f64,
    /// The rule that selected this play.
    pub meta: PlayMeta,
}

/// The outcome of a hold in an exhaustive analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldEv {
    /// The held cards in hand order.
    pub held: Vec<Card>,
    /// The held positions.
    pub hold: Hold,
    /// Expected coins per coin wagered.
    pub ev: f64,
    /// The categories counts for all the draws.
    pub outcome: DrawOutcome,
}

/// Solves a hand with the strategy for `variant`, or for the variant detected
/// from the paytable if `variant` is none.
///
/// Returns the first two distinct holds in the playlist order followed by
/// discard all if it was not one of them.
pub fn solve(hand: &Hand, paytable: &Paytable, variant: Option<Variant>) -> Result<Vec<Play>> {
    solve_with_config(hand, paytable, variant, &Config::default())
}

/// Same as [solve] with a config for the EV engine.
pub fn solve_with_config(
    hand: &Hand,
    paytable: &Paytable,
    variant: Option<Variant>,
    config: &Config,
) -> Result<Vec<Play>> {
    const MAX_MATCHES: usize = 2;

    let variant = variant.unwrap_or_else(|| Variant::detect(paytable));
    let bucket = hand.deuces();
    let rules = playlist(variant).bucket(bucket);
    let (pat, _) = evaluate(hand.cards(), paytable);

    let meta = |rule_index: usize, rule: &Rule| PlayMeta {
        bucket,
        rule_index,
        rule_name: rule.name(),
        total_rules: rules.len(),
    };

    let mut seen = AHashSet::new();
    let mut matches = Vec::with_capacity(MAX_MATCHES + 1);

    for (rule_index, rule) in rules.iter().enumerate() {
        let Some(hold) = rule.select(hand, pat) else {
            trace!("{variant} {hand}: {rule} does not apply");
            continue;
        };

        if seen.insert(hold) {
            debug!("{variant} {hand}: {rule} holds {hold}");
            matches.push((hold, meta(rule_index, rule)));
            if matches.len() == MAX_MATCHES {
                break;
            }
        }
    }

    // Discard all is the last rule of every bucket.
    if !seen.contains(&Hold::NONE) {
        let rule_index = rules
            .iter()
            .rposition(|r| *r == Rule::DiscardAll)
            .unwrap_or(rules.len());
        matches.push((Hold::NONE, meta(rule_index, &Rule::DiscardAll)));
    }

    matches
        .into_iter()
        .map(|(hold, meta)| {
            let outcome = draw_outcome(hand, hold, paytable, config)?;
            Ok(Play {
                held: hold.cards(hand),
                hold,
                ev: outcome.ev(),
                meta,
            })
        })
        .collect()
}

/// Computes the EV of all the 32 holds.
///
/// The holds are sorted by descending EV, equal EVs by fewer held cards and
/// then by positions mask.
pub fn analyze(hand: &Hand, paytable: &Paytable, config: &Config) -> Result<Vec<HoldEv>> {
    let mut holds = Hold::holds()
        .map(|hold| {
            let outcome = draw_outcome(hand, hold, paytable, config)?;
            Ok(HoldEv {
                held: hold.cards(hand),
                hold,
                ev: outcome.ev(),
                outcome,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    holds.sort_by(|l, r| {
        cmp_ev(&r.outcome, &l.outcome)
            .then(l.hold.len().cmp(&r.hold.len()))
            .then(l.hold.cmp(&r.hold))
    });

    Ok(holds)
}

/// Compares the exact ratios total / draws.
fn cmp_ev(l: &DrawOutcome, r: &DrawOutcome) -> Ordering {
    let l_scaled = l.total() as u128 * r.draws() as u128;
    let r_scaled = r.total() as u128 * l.draws() as u128;
    l_scaled.cmp(&r_scaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deuces_eval::Category;

    fn hand(cards: &str) -> Hand {
        cards.parse().unwrap()
    }

    fn assert_close(l: f64, r: f64) {
        assert!((l - r).abs() < 1e-9, "{l} != {r}");
    }

    fn masks(plays: &[Play]) -> Vec<u8> {
        plays.iter().map(|p| p.hold.mask()).collect()
    }

    #[test]
    fn four_deuces_with_ace() {
        let paytable = Variant::BonusDeuces10_4.paytable();
        let plays = solve(&hand("2s 2h 2d 2c Ah"), paytable, None).unwrap();

        assert_eq!(masks(&plays), [0b1_1111, 0b1111, 0]);
        assert_close(plays[0].ev, 400.0);
        assert_close(plays[1].ev, 10_000.0 / 47.0);
        assert_eq!(format!("{:.6}", plays[1].ev), "212.765957");

        assert_eq!(plays[0].meta.bucket, 4);
        assert_eq!(plays[0].meta.rule_index, 0);
        assert_eq!(plays[0].meta.rule_name, "pat four deuces with ace");
        assert_eq!(plays[1].meta.rule_name, "deuces alone");
        assert_eq!(plays[2].meta.rule_name, "discard all");
        assert_eq!(plays[2].meta.rule_index, plays[2].meta.total_rules - 1);
        assert!(plays[2].held.is_empty());

        let json = serde_json::to_value(&plays[0].meta).unwrap();
        assert_eq!(json["bucket"], 4);
        assert_eq!(json["rule_index"], 0);
        assert_eq!(json["rule_name"], "pat four deuces with ace");
        assert_eq!(json["total_rules_in_bucket"], plays[0].meta.total_rules);
    }

    #[test]
    fn natural_royal() {
        let plays = solve(&hand("Th Jh Qh Kh Ah"), Variant::Nsud.paytable(), None).unwrap();
        assert_eq!(plays[0].hold, Hold::ALL);
        assert_eq!(plays[0].ev, 800.0);
        assert_eq!(
            plays[0].meta,
            PlayMeta {
                bucket: 0,
                rule_index: 0,
                rule_name: "pat natural royal flush".to_string(),
                total_rules: playlist(Variant::Nsud).bucket(0).len(),
            }
        );

        // Four to a royal is the runner up.
        assert_eq!(plays[1].hold.len(), 4);
        assert_eq!(plays[1].meta.rule_name, "four to a royal");
    }

    #[test]
    fn four_to_a_royal() {
        let h = hand("As Ks Qs Js 9c");
        let plays = solve(&h, Variant::Nsud.paytable(), None).unwrap();
        assert_eq!(masks(&plays), [0b1111, 0b0111, 0]);
        assert_eq!(plays[0].held, Hold::from_mask(0b1111).cards(&h));
        assert_close(plays[0].ev, 927.0 / 47.0);
        assert_eq!(plays[1].meta.rule_name, "three to a royal");
    }

    #[test]
    fn high_pair_bonus() {
        let plays = solve(
            &hand("Jh Jd 5c 9s 4h"),
            Variant::BonusDeuces10_4.paytable(),
            None,
        )
        .unwrap();

        // The walk reaches discard all on its own.
        assert_eq!(masks(&plays), [0b11, 0]);
        assert_close(plays[0].ev, 8569.0 / 16215.0);
        assert_close(plays[1].ev, 454_024.0 / 1_533_939.0);
        assert_eq!(plays[0].meta.rule_name, "natural pair");
    }

    #[test]
    fn variant_playlists() {
        let h = hand("Kh Kd 7c 7s 4h");

        let plays = solve(&h, Variant::Nsud.paytable(), None).unwrap();
        assert_eq!(plays[0].hold.mask(), 0b1111);
        assert_eq!(plays[0].meta.rule_name, "two pair");

        let plays = solve(&h, Variant::Airport.paytable(), None).unwrap();
        assert_eq!(plays[0].hold.mask(), 0b11);

        // An explicit variant overrides detection.
        let plays = solve(&h, Variant::Nsud.paytable(), Some(Variant::Airport)).unwrap();
        assert_eq!(plays[0].hold.mask(), 0b11);
    }

    #[test]
    fn two_deuces_with_suited_connectors() {
        let plays = solve(&hand("2s 2h 6d 7d Kc"), Variant::Nsud.paytable(), None).unwrap();
        assert_eq!(masks(&plays), [0b1111, 0b11, 0]);
        assert_eq!(plays[0].meta.bucket, 2);
        assert_eq!(plays[1].meta.rule_name, "deuces alone");
    }

    #[test]
    fn canonical_hands_play_the_best_hold() {
        use Variant::*;

        let config = Config::default();
        let bonus = BonusDeuces10_4;
        let not_dbw = [Nsud, Airport, LooseDeuces, bonus, SuperDeuces];
        for (variants, cards, mask) in [
            // Made hands with one deuce.
            (&not_dbw[..], "9c 4c 6c 5c 2d", 0b1_1111),
            (&[Dbw][..], "9c 4c 6c 5c 2d", 0b1_1110),
            (&Variant::ALL[..], "2d 5h 6c 7s 9h", 0b1_1111),
            (&Variant::ALL[..], "2d 7h 7c Ks Kh", 0b1_1111),
            (&not_dbw[..], "2d 5c 6c 8c Kc", 0b1_1111),
            (&[Dbw][..], "2d 5c 6c 8c Kc", 0b0_1111),
            (&Variant::ALL[..], "2d 6h 7h 8h 9c", 0b0_1111),
            // Four to a flush against a pair.
            (&[Nsud, bonus][..], "5h Kd 4d 5d 9d", 0b1_1110),
            (&[Airport][..], "5h Kd 4d 5d 9d", 0b0_1001),
            (&[Nsud, bonus][..], "9h Kd 4d 9d Ad", 0b1_1110),
            (&[Airport, SuperDeuces][..], "9h Kd 4d 9d Ad", 0b0_1001),
        ] {
            for &variant in variants {
                let h = hand(cards);
                let paytable = variant.paytable();
                let plays = solve_with_config(&h, paytable, Some(variant), &config).unwrap();
                let holds = analyze(&h, paytable, &config).unwrap();

                assert_eq!(plays[0].hold.mask(), mask, "{cards} {variant}");
                assert_eq!(plays[0].hold, holds[0].hold, "{cards} {variant}");
                assert_eq!(plays[0].ev, holds[0].ev, "{cards} {variant}");
            }
        }
    }

    #[test]
    fn discard_all_once() {
        let config = Config::default();
        for cards in [
            "2s 2h 2d 2c Ah",
            "Th Jh Qh Kh Ah",
            "Jh Jd 5c 9s 4h",
            "8h 9h 2d Qh 6h",
            "9c Ac 2h Tc 2s",
            "7s 3h Kd 9c 5s",
        ] {
            for (variant, paytable) in deuces_eval::paytables() {
                let plays = solve_with_config(&hand(cards), paytable, None, &config).unwrap();
                let discards = plays.iter().filter(|p| p.hold.is_empty()).count();
                assert!((1..=3).contains(&plays.len()), "{cards} {variant}");
                assert_eq!(discards, 1, "{cards} {variant}");
                assert!(plays.last().unwrap().hold.is_empty());

                let distinct = plays.iter().map(|p| p.hold).collect::<AHashSet<_>>();
                assert_eq!(distinct.len(), plays.len());
            }
        }
    }

    #[test]
    fn super_deuces_five_of_a_kind() {
        let paytable = Variant::SuperDeuces.paytable();
        let h = hand("9h 9d 9c 9s 2h");
        assert_eq!(evaluate(h.cards(), paytable), (Category::FiveOak1Deuce, 50));

        let plays = solve(&h, paytable, None).unwrap();
        assert_eq!(plays[0].hold, Hold::ALL);
        assert_eq!(plays[0].ev, 50.0);
        assert_eq!(plays[0].meta.rule_index, 0);
    }

    #[test]
    fn analyze_holds() {
        let h = hand("As Ks Qs Js 9c");
        let holds = analyze(&h, Variant::Nsud.paytable(), &Config::default()).unwrap();
        assert_eq!(holds.len(), 32);
        assert_eq!(holds[0].hold.mask(), 0b1111);
        assert_close(holds[0].ev, 927.0 / 47.0);
        assert!(holds.windows(2).all(|w| w[0].ev >= w[1].ev));

        let pat = holds.iter().find(|h| h.hold == Hold::ALL).unwrap();
        assert_eq!(pat.ev, 0.0);
        assert_eq!(pat.outcome.draws(), 1);

        let distinct = holds.iter().map(|h| h.hold).collect::<AHashSet<_>>();
        assert_eq!(distinct.len(), 32);
    }

    #[test]
    fn analyze_ties() {
        // Holding the fifth card next to four deuces does not change the EV.
        let h = hand("2s 2h 2d 2c 7h");
        let holds = analyze(&h, Variant::Nsud.paytable(), &Config::default()).unwrap();
        assert_eq!(holds[0].hold.mask(), 0b1111);
        assert_eq!(holds[1].hold, Hold::ALL);
        assert_eq!(holds[0].ev, 200.0);
        assert_eq!(holds[1].ev, 200.0);
    }
}
