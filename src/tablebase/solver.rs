//! Retrograde backward-induction solver (§4.F): computes the exact
//! distance-to-mate value, and a best move, for every legal KRK position.
//!
//! Terminal positions (no legal moves) are labeled directly: checkmate is
//! `Mate(0)`, stalemate is `Draw`. Every other position is labeled once its
//! relevant successors are known: White needs one successor labeled
//! `Mate(d)` (and plays the smallest such `d`, ascending destination square
//! breaking ties); Black is only forced into mate once *every* successor
//! — including a rook capture, which is a permanent draw — is labeled
//! `Mate`, and then plays the largest `d` among them (longest resistance).
//! Passes repeat until a full sweep makes no progress; whatever is still
//! unlabeled at that point is an unconditional draw.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::chess::core::Color;
use crate::chess::movegen::{apply, in_check, legal_moves, Outcome};
use crate::chess::position::{Move, Position};
use crate::tablebase::enumerator::enumerate;
use crate::tablebase::store::{Entry, Store, Value};

/// Default cap on backward-induction passes (design note, open question 2).
/// KRK's true maximum distance to mate is 32 plies, so this should never be
/// reached; it exists as a safety net against a regression that loops
/// forever instead of converging.
pub const DEFAULT_MAX_PASSES: u32 = 50;

/// Solver knobs.
#[derive(Clone, Copy, Debug)]
pub struct SolverOptions {
    /// Stop after this many passes even if positions remain unlabeled.
    pub max_passes: u32,
    /// Use a `rayon` data-parallel pass instead of a sequential one (§5).
    /// Each pass only reads the labels produced by *previous* passes and
    /// writes into a separate buffer merged in afterwards, so no position
    /// is ever read and written within the same pass.
    pub parallel: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { max_passes: DEFAULT_MAX_PASSES, parallel: false }
    }
}

/// Solves the full KRK tablebase by backward induction, returning a
/// [`Store`] with every legal position labeled.
#[must_use]
pub fn solve() -> Store {
    solve_with_options(SolverOptions::default())
}

/// As [`solve`], with explicit [`SolverOptions`].
#[must_use]
pub fn solve_with_options(options: SolverOptions) -> Store {
    let positions: Vec<Position> = enumerate().collect();
    let mut mate: HashMap<Position, Entry> = HashMap::with_capacity(positions.len() / 4);
    let mut unresolved: Vec<Position> = Vec::with_capacity(positions.len());

    for position in &positions {
        let moves = legal_moves(position);
        if moves.is_empty() {
            let entry = if in_check(position) { Entry::mate_in_zero() } else { Entry::draw() };
            let _ = mate.insert(*position, entry);
        } else {
            unresolved.push(*position);
        }
    }
    tracing::info!(
        total = positions.len(),
        terminal = mate.len(),
        pending = unresolved.len(),
        "terminal positions labeled"
    );

    for pass in 1..=options.max_passes {
        let newly_labeled: Vec<(Position, Entry)> = if options.parallel {
            unresolved
                .par_iter()
                .filter_map(|position| label(position, &mate).map(|e| (*position, e)))
                .collect()
        } else {
            unresolved.iter().filter_map(|position| label(position, &mate).map(|e| (*position, e))).collect()
        };

        if newly_labeled.is_empty() {
            tracing::debug!(pass, "fixpoint reached, no new labels");
            break;
        }

        let labeled_this_pass = newly_labeled.len();
        for (position, entry) in newly_labeled {
            let _ = mate.insert(position, entry);
        }
        unresolved.retain(|position| !mate.contains_key(position));
        tracing::debug!(pass, labeled_this_pass, remaining = unresolved.len(), "induction pass complete");
    }

    if !unresolved.is_empty() {
        tracing::warn!(
            count = unresolved.len(),
            max_passes = options.max_passes,
            "positions left unresolved after the pass cap; labeling as draws"
        );
    }
    for position in unresolved {
        let _ = mate.insert(position, Entry::draw());
    }

    mate.into_iter().collect()
}

fn label(position: &Position, mate: &HashMap<Position, Entry>) -> Option<Entry> {
    let (distance, best_move) = match position.side_to_move() {
        Color::White => label_white(position, mate)?,
        Color::Black => label_black(position, mate)?,
    };
    Some(Entry::mate(distance, best_move))
}

/// White to move: mates in `1 + d`, where `d` is the smallest distance to
/// mate among moves whose successor is already labeled `Mate(d)`.
fn label_white(position: &Position, mate: &HashMap<Position, Entry>) -> Option<(u16, Move)> {
    let mut best: Option<(u16, Move)> = None;
    for mv in legal_moves(position) {
        let Outcome::Position(next) = apply(position, mv) else {
            unreachable!("white never moves onto the square it would need to capture a king");
        };
        let Some(Entry { value: Value::Mate(d), .. }) = mate.get(&next) else { continue };
        let better = match best {
            None => true,
            Some((best_d, best_mv)) => *d < best_d || (*d == best_d && mv.to < best_mv.to),
        };
        if better {
            best = Some((*d, mv));
        }
    }
    best.map(|(d, mv)| (d + 1, mv))
}

/// Black to move: forced into mate only once every legal reply — including
/// a rook capture, a permanent draw — is already labeled `Mate`; the
/// distance is `1 +` the worst (largest) of those, since Black resists as
/// long as possible.
fn label_black(position: &Position, mate: &HashMap<Position, Entry>) -> Option<(u16, Move)> {
    let mut worst: Option<(u16, Move)> = None;
    for mv in legal_moves(position) {
        match apply(position, mv) {
            Outcome::DrawByCapture => return None,
            Outcome::Position(next) => match mate.get(&next) {
                Some(Entry { value: Value::Mate(d), .. }) => {
                    let better = match worst {
                        None => true,
                        Some((worst_d, worst_mv)) => *d > worst_d || (*d == worst_d && mv.to < worst_mv.to),
                    };
                    if better {
                        worst = Some((*d, mv));
                    }
                },
                _ => return None,
            },
        }
    }
    worst.map(|(d, mv)| (d + 1, mv))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tablebase::enumerator::POSITION_COUNT;

    fn solved() -> Store {
        solve_with_options(SolverOptions { max_passes: DEFAULT_MAX_PASSES, parallel: false })
    }

    #[test]
    fn every_enumerated_position_gets_solved() {
        let store = solved();
        assert_eq!(store.len(), POSITION_COUNT);
    }

    #[test]
    fn sequential_and_parallel_passes_agree() {
        let sequential = solve_with_options(SolverOptions { max_passes: DEFAULT_MAX_PASSES, parallel: false });
        let parallel = solve_with_options(SolverOptions { max_passes: DEFAULT_MAX_PASSES, parallel: true });
        for (position, entry) in sequential.iter() {
            assert_eq!(parallel.get(position), Some(entry));
        }
    }

    #[test]
    fn checkmate_position_is_mate_zero_with_no_move() {
        let position = Position::from_fen("R6k/8/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let store = solved();
        let entry = store.get(&position).unwrap();
        assert_eq!(entry.value, Value::Mate(0));
        assert_eq!(entry.best_move, None);
    }

    #[test]
    fn stalemate_position_is_a_draw() {
        let position = Position::from_fen("7k/6R1/7K/8/8/8/8/8 b - - 0 1").unwrap();
        let store = solved();
        assert_eq!(store.get(&position).unwrap().value, Value::Draw);
    }

    #[test]
    fn mate_in_one_is_labeled_correctly() {
        let position = Position::from_fen("7k/8/6K1/8/8/8/8/R7 w - - 0 1").unwrap();
        let store = solved();
        let entry = store.get(&position).unwrap();
        assert_eq!(entry.value, Value::Mate(1));
        assert_eq!(entry.best_move, Some("a1a8".parse().unwrap()));
    }

    #[test]
    fn no_mate_distance_exceeds_the_known_maximum() {
        // The true maximum distance to mate in KRK is 32 plies (16 full
        // moves); this is a coarse sanity bound on the solver's output
        // rather than a re-derivation of that constant.
        let store = solved();
        for (_, entry) in store.iter() {
            if let Value::Mate(d) = entry.value {
                assert!(d <= 32, "distance to mate {d} exceeds the known KRK maximum");
            }
        }
    }

    #[test]
    fn every_mate_with_nonzero_distance_has_a_legal_best_move() {
        let store = solved();
        for (position, entry) in store.iter() {
            if let Value::Mate(d) = entry.value {
                if d == 0 {
                    assert_eq!(entry.best_move, None);
                    continue;
                }
                let best_move = entry.best_move.expect("nonzero mate distance carries a move");
                assert!(legal_moves(position).contains(&best_move));
            }
        }
    }

    #[test]
    fn best_move_successor_strictly_decreases_toward_mate() {
        let store = solved();
        for (position, entry) in store.iter() {
            let Value::Mate(d) = entry.value else { continue };
            if d == 0 {
                continue;
            }
            let best_move = entry.best_move.unwrap();
            let Outcome::Position(next) = apply(position, best_move) else {
                // Black's "best defense" may be the rook capture, which is
                // only reachable from a labeled position when every reply
                // is Mate -- a capture would make that position a draw, so
                // this branch is unreachable for a true Mate(d) entry.
                panic!("best move from a Mate(d>0) entry must not be a capture");
            };
            let next_entry = store.get(&next).unwrap();
            match (position.side_to_move(), next_entry.value) {
                (Color::White, Value::Mate(next_d)) => assert_eq!(next_d + 1, d),
                (Color::Black, Value::Mate(next_d)) => assert_eq!(next_d + 1, d),
                other => panic!("unexpected successor value {other:?} for a Mate({d}) entry"),
            }
        }
    }

    #[test]
    fn black_cannot_escape_check_by_stepping_back_along_the_checking_file() {
        // Regression for a ray-blocker bug: `a6` used to look like a legal
        // king move here because the black king, still on `a5`, shielded it
        // from the rook's own ray. It doesn't, and the solved entry must
        // never route through it.
        use crate::chess::core::square;
        let position = Position::new(square(7, 7), square(0, 0), square(0, 4), Color::Black).unwrap();
        let escape = Move::new(position.black_king(), square(0, 5));
        assert!(!legal_moves(&position).contains(&escape));

        let store = solved();
        let entry = store.get(&position).unwrap();
        assert!(matches!(entry.value, Value::Mate(_)));
        if let Some(best_move) = entry.best_move {
            assert_ne!(best_move, escape);
        }
    }

    #[test]
    fn mate_and_draw_counts_sum_to_the_total() {
        let store = solved();
        let mates = store.iter().filter(|(_, e)| matches!(e.value, Value::Mate(_))).count();
        let draws = store.iter().filter(|(_, e)| matches!(e.value, Value::Draw)).count();
        assert_eq!(mates + draws, POSITION_COUNT);
    }
}
