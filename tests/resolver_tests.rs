//! Resolver integration tests.
//!
//! These tests drive `decide_outcome` and `Outcome::apply` directly, without
//! a session, to pin down the round-by-round rules.

use proptest::prelude::*;

use raffle_wheel::core::{CandidateId, GameMode, SpinRng};
use raffle_wheel::resolver::{decide_outcome, RigMutation, RigStatus};
use raffle_wheel::rig::RigTable;
use raffle_wheel::round::RoundCounter;
use raffle_wheel::wheel::CandidateSet;

fn wheel(count: usize) -> (CandidateSet, Vec<CandidateId>) {
    let mut set = CandidateSet::new();
    let ids = (0..count).map(|i| set.add_labeled(format!("C{i}"))).collect();
    (set, ids)
}

/// Resolve and apply one round.
fn play(
    set: &mut CandidateSet,
    rig: &mut RigTable,
    counter: &mut RoundCounter,
    mode: GameMode,
    remove_once_chosen: bool,
    rng: &mut SpinRng,
) -> (CandidateId, bool) {
    let resolution = decide_outcome(set, rig, *counter, mode, remove_once_chosen, rng).unwrap();
    resolution.outcome.apply(set, rig, counter);
    (resolution.decision.selected, resolution.decision.is_winner)
}

// =============================================================================
// Scenarios
// =============================================================================

/// [A,B,C], win after 2, B rigged for round 2.
#[test]
fn test_rigged_second_round_scenario() {
    for seed in 0..50 {
        let (mut set, ids) = wheel(3);
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        let mut rig = RigTable::new();
        rig.set(2, b).unwrap();
        let mut counter = RoundCounter::new();
        let mut rng = SpinRng::new(seed);
        let mode = GameMode::EliminateAfterN(2);

        // Round 1: B is protected
        let res = decide_outcome(&set, &rig, counter, mode, false, &mut rng).unwrap();
        assert!(res.decision.selected == a || res.decision.selected == c);
        assert!(!res.decision.is_winner);
        assert_eq!(res.outcome.rig, RigMutation::Consume(1));
        res.outcome.apply(&mut set, &mut rig, &mut counter);
        assert_eq!(set.len(), 2);
        assert_eq!(counter.completed(), 1);

        // Round 2: B is forced and wins the cycle
        let res = decide_outcome(&set, &rig, counter, mode, false, &mut rng).unwrap();
        assert_eq!(res.decision.selected, b);
        assert!(res.decision.is_winner);
        assert_eq!(res.decision.rig_status, RigStatus::Forced);
        res.outcome.apply(&mut set, &mut rig, &mut counter);

        assert_eq!(counter, RoundCounter::new());
        assert!(rig.is_empty());
        assert!(!set.contains(b));
    }
}

/// A single candidate is always selected, in either mode, rigged or not.
#[test]
fn test_single_candidate_scenario() {
    let modes = [GameMode::Immediate, GameMode::EliminateAfterN(2), GameMode::EliminateAfterN(5)];
    for mode in modes {
        for seed in 0..10 {
            let (set, ids) = wheel(1);
            let mut rig = RigTable::new();
            rig.set(3, ids[0]).unwrap();
            let mut rng = SpinRng::new(seed);

            let res = decide_outcome(&set, &rig, RoundCounter::new(), mode, false, &mut rng).unwrap();
            assert_eq!(res.decision.selected, ids[0]);
            // Protected but nobody else is left
            assert!(res.decision.all_protected);
        }
    }
}

/// Rig entry for round 1 names a candidate that is gone.
#[test]
fn test_stale_rig_scenario() {
    let (set, _) = wheel(3);
    let mut rig = RigTable::new();
    rig.set(1, CandidateId(500)).unwrap();
    let mut rng = SpinRng::new(11);

    let res = decide_outcome(&set, &rig, RoundCounter::new(), GameMode::Immediate, false, &mut rng).unwrap();

    assert!(set.contains(res.decision.selected));
    assert_eq!(res.decision.rig_status, RigStatus::Stale(CandidateId(500)));
    assert!(res.decision.is_winner);
}

/// Elimination keeps other future reservations when an elimination round
/// is consumed.
#[test]
fn test_elimination_keeps_future_entries() {
    let (mut set, ids) = wheel(5);
    let mut rig = RigTable::new();
    rig.set(1, ids[0]).unwrap();
    rig.set(3, ids[4]).unwrap();
    let mut counter = RoundCounter::new();
    let mut rng = SpinRng::new(2);

    let (selected, winner) = play(&mut set, &mut rig, &mut counter, GameMode::EliminateAfterN(4), false, &mut rng);

    assert_eq!(selected, ids[0]);
    assert!(!winner);
    assert_eq!(rig.get(1), None);
    assert_eq!(rig.get(3), Some(ids[4]));
}

/// Immediate mode consumes only the entry for the resolved round.
#[test]
fn test_immediate_consumes_round_entry() {
    let (mut set, ids) = wheel(3);
    let mut rig = RigTable::new();
    rig.set(1, ids[1]).unwrap();
    rig.set(2, ids[2]).unwrap();
    let mut counter = RoundCounter::new();
    let mut rng = SpinRng::new(2);

    let (selected, _) = play(&mut set, &mut rig, &mut counter, GameMode::Immediate, false, &mut rng);
    assert_eq!(selected, ids[1]);
    assert_eq!(rig.get(1), None);
    assert_eq!(rig.get(2), Some(ids[2]));
    assert_eq!(set.len(), 3);

    let (selected, _) = play(&mut set, &mut rig, &mut counter, GameMode::Immediate, false, &mut rng);
    assert_eq!(selected, ids[2]);
    assert!(rig.is_empty());
}

/// Removing a winner in immediate mode purges its later reservations.
#[test]
fn test_removal_purges_later_reservation() {
    let (mut set, ids) = wheel(3);
    let mut rig = RigTable::new();
    rig.set(1, ids[0]).unwrap();
    rig.set(4, ids[0]).unwrap();
    let mut counter = RoundCounter::new();
    let mut rng = SpinRng::new(2);

    let (selected, _) = play(&mut set, &mut rig, &mut counter, GameMode::Immediate, true, &mut rng);
    assert_eq!(selected, ids[0]);
    assert!(!rig.references(ids[0]));
}

/// The random fallback is not stuck on one candidate.
#[test]
fn test_random_fallback_varies() {
    let (set, _) = wheel(4);
    let rig = RigTable::new();
    let mut rng = SpinRng::new(99);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        let res = decide_outcome(&set, &rig, RoundCounter::new(), GameMode::Immediate, false, &mut rng).unwrap();
        seen.insert(res.decision.selected);
    }
    assert_eq!(seen.len(), 4);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_immediate_always_wins(count in 1usize..12, completed in 0u32..50, seed in any::<u64>()) {
        let (set, _) = wheel(count);
        let mut rng = SpinRng::new(seed);
        let res = decide_outcome(
            &set, &RigTable::new(), RoundCounter::from_completed(completed),
            GameMode::Immediate, false, &mut rng,
        ).unwrap();

        prop_assert!(res.decision.is_winner);
        prop_assert_eq!(res.outcome.next_counter.completed(), completed + 1);
    }

    #[test]
    fn prop_one_winner_per_cycle(n in 2u32..7, extra in 0usize..4, seed in any::<u64>()) {
        let (mut set, _) = wheel(n as usize + extra);
        let mut rig = RigTable::new();
        let mut counter = RoundCounter::new();
        let mut rng = SpinRng::new(seed);
        let mode = GameMode::EliminateAfterN(n);

        let results: Vec<bool> = (0..n)
            .map(|_| play(&mut set, &mut rig, &mut counter, mode, false, &mut rng).1)
            .collect();

        prop_assert_eq!(results.iter().filter(|&&w| w).count(), 1);
        prop_assert!(results[n as usize - 1]);
        prop_assert_eq!(counter, RoundCounter::new());
    }

    #[test]
    fn prop_valid_rig_is_deterministic(
        count in 1usize..10,
        target in 0usize..10,
        completed in 0u32..20,
        seed in any::<u64>(),
    ) {
        let (set, ids) = wheel(count);
        let target = ids[target % count];
        let mut rig = RigTable::new();
        rig.set(completed + 1, target).unwrap();
        let mut rng = SpinRng::new(seed);

        let res = decide_outcome(
            &set, &rig, RoundCounter::from_completed(completed),
            GameMode::Immediate, false, &mut rng,
        ).unwrap();

        prop_assert_eq!(res.decision.selected, target);
        prop_assert_eq!(res.decision.rig_status, RigStatus::Forced);
    }

    #[test]
    fn prop_removal_drops_reservations(
        count in 2usize..10,
        reservations in proptest::collection::vec((1u32..20, 0usize..10), 1..8),
        victim in 0usize..10,
        seed in any::<u64>(),
    ) {
        let (mut set, ids) = wheel(count);
        let mut rig = RigTable::new();
        for (round, idx) in reservations {
            rig.set(round, ids[idx % count]).unwrap();
        }
        let mut counter = RoundCounter::new();
        let mut rng = SpinRng::new(seed);

        // Elimination always removes the selection
        let (selected, _) = play(&mut set, &mut rig, &mut counter, GameMode::EliminateAfterN(50), false, &mut rng);
        prop_assert!(!rig.references(selected));

        // Manual removal of any remaining candidate
        let victim = ids[victim % count];
        if set.remove(victim).is_some() {
            rig.purge_candidate(victim);
        }
        prop_assert!(!rig.references(victim));
        for (_, target) in rig.entries() {
            prop_assert!(set.contains(target));
        }
    }

    #[test]
    fn prop_protected_never_taken_early(
        count in 2usize..8,
        reserved in 0usize..8,
        round in 2u32..8,
        seed in any::<u64>(),
    ) {
        let (mut set, ids) = wheel(count);
        let reserved = ids[reserved % count];
        let mut rig = RigTable::new();
        rig.set(round, reserved).unwrap();
        let mut counter = RoundCounter::new();
        let mut rng = SpinRng::new(seed);

        for _ in 1..round {
            let (selected, _) = play(&mut set, &mut rig, &mut counter, GameMode::Immediate, false, &mut rng);
            prop_assert_ne!(selected, reserved);
        }

        let (selected, _) = play(&mut set, &mut rig, &mut counter, GameMode::Immediate, false, &mut rng);
        prop_assert_eq!(selected, reserved);
    }
}
