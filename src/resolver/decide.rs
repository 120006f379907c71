//! Decision procedure for a single spin.

use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::core::candidate::CandidateId;
use crate::core::config::GameMode;
use crate::core::error::ResolveError;
use crate::core::rng::SpinRng;
use crate::rig::RigTable;
use crate::round::RoundCounter;
use crate::wheel::CandidateSet;

use super::{Decision, Outcome, Resolution, RigMutation, RigStatus};

/// Decide the outcome of the next spin.
///
/// Pure with respect to its inputs; only `rng` advances. The returned
/// [`Outcome`] must be applied for the spin to take effect.
///
/// `remove_once_chosen` only matters in immediate mode; elimination mode
/// always removes the selected candidate.
///
/// Returns [`ResolveError::EmptyCandidateSet`] if there is nothing to pick.
pub fn decide_outcome(
    candidates: &CandidateSet,
    rig: &RigTable,
    counter: RoundCounter,
    mode: GameMode,
    remove_once_chosen: bool,
    rng: &mut SpinRng,
) -> Result<Resolution, ResolveError> {
    if candidates.is_empty() {
        return Err(ResolveError::EmptyCandidateSet);
    }

    let round = counter.next_round();
    debug!(round, candidates = candidates.len(), %mode, "resolving round");

    let (selected, rig_status, all_protected) = match rig.get(round) {
        Some(target) if candidates.contains(target) => {
            info!(round, %target, "rig entry forces this round");
            (target, RigStatus::Forced, false)
        }
        Some(stale) => {
            warn!(round, %stale, "rig entry targets a candidate no longer on the wheel");
            let (pick, all_protected) = pick_unreserved(candidates, rig, round, rng)?;
            (pick, RigStatus::Stale(stale), all_protected)
        }
        None => {
            let (pick, all_protected) = pick_unreserved(candidates, rig, round, rng)?;
            (pick, RigStatus::Unrigged, all_protected)
        }
    };

    let mut next_counter = counter;
    let (is_winner, rig_mutation, subtext, remove) = match mode {
        GameMode::Immediate => {
            next_counter.increment();
            let remove = remove_once_chosen.then_some(selected);
            (true, RigMutation::Consume(round), None, remove)
        }
        GameMode::EliminateAfterN(n) => {
            let cycle_done = next_counter.advance_or_wrap(n);
            if cycle_done {
                info!(round, %selected, "cycle winner");
                (
                    true,
                    RigMutation::ClearAll,
                    Some(format!("Winner of draw #{round}")),
                    Some(selected),
                )
            } else {
                info!(round, n, %selected, "eliminated");
                (
                    false,
                    RigMutation::Consume(round),
                    Some(format!("Draw {round}/{n}: Eliminated")),
                    Some(selected),
                )
            }
        }
    };

    Ok(Resolution {
        decision: Decision {
            round,
            selected,
            is_winner,
            subtext,
            rig_status,
            all_protected,
        },
        outcome: Outcome {
            next_counter,
            rig: rig_mutation,
            remove,
        },
    })
}

/// Uniform pick that avoids candidates reserved for a later round.
///
/// Falls back to the whole set when every candidate is reserved. The
/// second value reports whether that fallback happened.
fn pick_unreserved(
    candidates: &CandidateSet,
    rig: &RigTable,
    round: u32,
    rng: &mut SpinRng,
) -> Result<(CandidateId, bool), ResolveError> {
    let protected = rig.protected_after(round);

    let available: SmallVec<[CandidateId; 8]> = candidates
        .ids()
        .filter(|id| !protected.contains(id))
        .collect();

    let skipped = candidates.len() - available.len();
    if skipped > 0 {
        debug!(round, skipped, "protecting candidates reserved for later rounds");
    }

    if available.is_empty() {
        warn!(round, "every candidate is reserved for a later round, picking from all");
        let all: SmallVec<[CandidateId; 8]> = candidates.ids().collect();
        let pick = rng.choose(&all).copied().ok_or(ResolveError::EmptyCandidateSet)?;
        return Ok((pick, true));
    }

    let pick = rng.choose(&available).copied().ok_or(ResolveError::EmptyCandidateSet)?;
    Ok((pick, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(labels: &[&str]) -> (CandidateSet, Vec<CandidateId>) {
        let mut set = CandidateSet::new();
        let ids = labels.iter().map(|l| set.add_labeled(*l)).collect();
        (set, ids)
    }

    #[test]
    fn test_empty_set_rejected() {
        let set = CandidateSet::new();
        let mut rng = SpinRng::new(1);
        let result = decide_outcome(&set, &RigTable::new(), RoundCounter::new(), GameMode::Immediate, false, &mut rng);
        assert_eq!(result, Err(ResolveError::EmptyCandidateSet));
    }

    #[test]
    fn test_immediate_outcome() {
        let (set, _) = wheel(&["A", "B", "C"]);
        let mut rng = SpinRng::new(1);
        let res = decide_outcome(&set, &RigTable::new(), RoundCounter::from_completed(4), GameMode::Immediate, false, &mut rng)
            .unwrap();

        assert!(res.decision.is_winner);
        assert_eq!(res.decision.round, 5);
        assert_eq!(res.decision.subtext, None);
        assert_eq!(res.decision.rig_status, RigStatus::Unrigged);
        assert_eq!(res.outcome.next_counter.completed(), 5);
        assert_eq!(res.outcome.rig, RigMutation::Consume(5));
        assert_eq!(res.outcome.remove, None);
    }

    #[test]
    fn test_immediate_remove_once_chosen() {
        let (set, _) = wheel(&["A", "B"]);
        let mut rng = SpinRng::new(1);
        let res = decide_outcome(&set, &RigTable::new(), RoundCounter::new(), GameMode::Immediate, true, &mut rng)
            .unwrap();
        assert_eq!(res.outcome.remove, Some(res.decision.selected));
    }

    #[test]
    fn test_forced_entry() {
        let (set, ids) = wheel(&["A", "B", "C"]);
        let mut rig = RigTable::new();
        rig.set(1, ids[2]).unwrap();

        for seed in 0..20 {
            let mut rng = SpinRng::new(seed);
            let res = decide_outcome(&set, &rig, RoundCounter::new(), GameMode::Immediate, false, &mut rng).unwrap();
            assert_eq!(res.decision.selected, ids[2]);
            assert_eq!(res.decision.rig_status, RigStatus::Forced);
        }
    }

    #[test]
    fn test_stale_entry_falls_back() {
        let (set, _) = wheel(&["A", "B"]);
        let mut rig = RigTable::new();
        rig.set(1, CandidateId(99)).unwrap();

        let mut rng = SpinRng::new(3);
        let res = decide_outcome(&set, &rig, RoundCounter::new(), GameMode::Immediate, false, &mut rng).unwrap();

        assert!(set.contains(res.decision.selected));
        assert_eq!(res.decision.rig_status, RigStatus::Stale(CandidateId(99)));
    }

    #[test]
    fn test_all_protected_still_picks() {
        let (set, ids) = wheel(&["A", "B"]);
        let mut rig = RigTable::new();
        rig.set(2, ids[0]).unwrap();
        rig.set(3, ids[1]).unwrap();

        let mut rng = SpinRng::new(5);
        let res = decide_outcome(&set, &rig, RoundCounter::new(), GameMode::Immediate, false, &mut rng).unwrap();

        assert!(res.decision.all_protected);
        assert!(ids.contains(&res.decision.selected));
    }

    #[test]
    fn test_elimination_subtexts() {
        let (set, _) = wheel(&["A", "B", "C"]);
        let mode = GameMode::EliminateAfterN(3);
        let mut rng = SpinRng::new(9);

        let res = decide_outcome(&set, &RigTable::new(), RoundCounter::from_completed(1), mode, false, &mut rng).unwrap();
        assert!(!res.decision.is_winner);
        assert_eq!(res.decision.subtext.as_deref(), Some("Draw 2/3: Eliminated"));
        assert_eq!(res.outcome.rig, RigMutation::Consume(2));
        assert_eq!(res.outcome.remove, Some(res.decision.selected));

        let res = decide_outcome(&set, &RigTable::new(), RoundCounter::from_completed(2), mode, false, &mut rng).unwrap();
        assert!(res.decision.is_winner);
        assert_eq!(res.decision.subtext.as_deref(), Some("Winner of draw #3"));
        assert_eq!(res.outcome.rig, RigMutation::ClearAll);
        assert_eq!(res.outcome.next_counter, RoundCounter::new());
    }

    #[test]
    fn test_decide_does_not_mutate() {
        let (set, ids) = wheel(&["A", "B"]);
        let mut rig = RigTable::new();
        rig.set(1, ids[0]).unwrap();
        let before = (set.clone(), rig.clone());

        let mut rng = SpinRng::new(1);
        let _ = decide_outcome(&set, &rig, RoundCounter::new(), GameMode::EliminateAfterN(2), false, &mut rng).unwrap();

        assert_eq!((set, rig), before);
    }
}
