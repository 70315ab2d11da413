#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

//! Kociemba's two-phase algorithm for the 3x3x3 cube.
//!
//! A cube state is reduced into the subgroup `G1 = <U, D, R2, F2, L2, B2>`
//! by the first phase and solved inside that subgroup by the second. Both
//! phases are IDA* searches over small coordinates whose transitions and
//! admissible distance bounds are precomputed once per process.

pub mod coords;
pub mod cubie;
pub mod error;
pub mod facelet;
pub mod moves;
pub mod pruning;
pub mod queue;
pub mod scramble;
pub mod solver;
pub mod tables;

use std::time::{Duration, Instant};

pub use cubie::CubieState;
pub use error::{ExhaustionError, NotationError, SolveError, ValidationError};
pub use moves::{Face, Move, MoveSequence, Power};
pub use queue::ScrambleQueue;
pub use solver::{Solution, SolveOptions, TwoPhaseSolver};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

/// Solve a cube given as a 54 character facelet string in U, R, F, D, L, B
/// face order.
///
/// The elapsed wall clock time is returned alongside the result whether or
/// not a solution was found. It covers validation and search but not the
/// one-off construction of the shared tables.
pub fn solve(
    facelets: &str,
    options: &SolveOptions,
) -> (Result<Solution, SolveError>, Duration) {
    let start = Instant::now();
    let state = match facelet::from_facelets(facelets) {
        Ok(state) => state,
        Err(e) => return (Err(e.into()), start.elapsed()),
    };
    if state.is_solved() {
        return (Ok(Solution::default()), start.elapsed());
    }
    let validated = start.elapsed();

    let solver = TwoPhaseSolver::shared();
    let search_start = Instant::now();
    let result = solver.solve(&state, options).map_err(SolveError::from);
    (result, validated + search_start.elapsed())
}

/// Generate a random-state scramble with a thread local random generator.
///
/// # Errors
///
/// Only fails if the underlying search exhausts `options`, which does not
/// happen with the defaults.
pub fn scramble(options: &SolveOptions) -> Result<MoveSequence, ExhaustionError> {
    scramble::scramble_with_rng(&mut fastrand::Rng::new(), options)
}
