//! Random-state scrambles.
//!
//! A random sequence of moves does not reach every state with equal
//! probability. Instead a state is drawn uniformly and solved, and the
//! inverse of its solution is the scramble.

use log::trace;

use crate::{
    cubie::CubieState,
    error::ExhaustionError,
    moves::MoveSequence,
    solver::{SolveOptions, TwoPhaseSolver},
};

/// Generate a scramble leading to a uniformly random state drawn from `rng`.
///
/// # Errors
///
/// Fails if the search for the drawn state exhausts `options`.
pub fn scramble_with_rng(
    rng: &mut fastrand::Rng,
    options: &SolveOptions,
) -> Result<MoveSequence, ExhaustionError> {
    let state = CubieState::random(rng);
    let solution = TwoPhaseSolver::shared().solve(&state, options)?;
    let scramble = solution.moves().inverse();
    trace!("Scramble {scramble}");
    Ok(scramble)
}
