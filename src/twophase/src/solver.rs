//! The two-phase search.
//!
//! Phase 1 searches with all 18 moves until `flip`, `twist` and the slice
//! coordinate are all zero, which places the cube in G1. For every phase 1
//! path of the current length that ends in G1, phase 2 searches with the ten
//! G1 moves for a path to solved. Both searches are iterative deepening depth
//! first searches driven by explicit per-depth arrays rather than recursion.

use log::{debug, info, warn};
use std::{
    fmt::{self, Display},
    sync::LazyLock,
    time::{Duration, Instant},
};

use crate::{
    coords::{N_PARITY, N_SLICE1, N_SLICE2},
    cubie::CubieState,
    error::ExhaustionError,
    moves::{Move, MoveSequence},
    start, success,
    tables::{CoordinateTables, NO_COORD},
    working,
};

/// Capacity of the per-depth search arrays. Larger depth limits are clamped.
pub const MAX_SEARCH_DEPTH: usize = 30;

/// Phase 2 never needs more than this many moves.
const MAX_PHASE2_DEPTH: usize = 10;

/// Value stored as the phase 1 heuristic of a G1 node close to the depth
/// limit so the search does not descend below it.
const NO_DESCEND: u8 = 10;

static SHARED: LazyLock<TwoPhaseSolver> = LazyLock::new(|| TwoPhaseSolver {
    tables: CoordinateTables::generate(),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOptions {
    /// Maximum total number of moves in a solution.
    pub max_depth: usize,
    /// Wall clock budget of a single search. Zero disables the limit.
    pub time_out: Duration,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_depth: 24,
            time_out: Duration::from_secs(1000),
        }
    }
}

impl SolveOptions {
    fn search_depth(&self) -> usize {
        if self.max_depth > MAX_SEARCH_DEPTH {
            warn!(
                "Maximum depth {} is above {MAX_SEARCH_DEPTH}, searching to {MAX_SEARCH_DEPTH}",
                self.max_depth
            );
            MAX_SEARCH_DEPTH
        } else {
            self.max_depth
        }
    }
}

/// A move sequence that solves a cube, remembering where phase 1 ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    moves: MoveSequence,
    phase1_len: usize,
}

impl Solution {
    #[must_use]
    pub fn moves(&self) -> &MoveSequence {
        &self.moves
    }

    #[must_use]
    pub fn phase1_len(&self) -> usize {
        self.phase1_len
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The moves with a `.` marking the end of phase 1, as in `R U' . D2 F2`.
    #[must_use]
    pub fn with_separator(&self) -> String {
        let (phase1, phase2) = self.moves.split_at(self.phase1_len);
        let phase1 = MoveSequence::from(phase1.to_vec());
        let phase2 = MoveSequence::from(phase2.to_vec());
        match (phase1.is_empty(), phase2.is_empty()) {
            (true, true) => String::new(),
            (false, true) => format!("{phase1} ."),
            (true, false) => format!(". {phase2}"),
            (false, false) => format!("{phase1} . {phase2}"),
        }
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.moves, f)
    }
}

/// Solves cube states using a set of precomputed tables.
#[derive(Debug)]
pub struct TwoPhaseSolver {
    tables: CoordinateTables,
}

impl TwoPhaseSolver {
    /// The process-wide solver. The tables are generated on first use.
    pub fn shared() -> &'static Self {
        &SHARED
    }

    #[must_use]
    pub fn tables(&self) -> &CoordinateTables {
        &self.tables
    }

    /// Find a solution of at most `options.max_depth` moves for `state`,
    /// which must be a legal cube state.
    ///
    /// # Errors
    ///
    /// Fails when no solution of the allowed length exists or the time limit
    /// passes first.
    pub fn solve(
        &self,
        state: &CubieState,
        options: &SolveOptions,
    ) -> Result<Solution, ExhaustionError> {
        if state.is_solved() {
            debug!("Cube is already solved");
            return Ok(Solution::default());
        }

        info!(start!("Searching for a two-phase solution"));
        let start = Instant::now();
        let mut search = Search::new(&self.tables, state);
        let result = search.run(options.search_depth(), options.time_out, start);
        match &result {
            Ok(solution) => info!(
                success!("Found a {} move solution in {:.3}s after {} nodes"),
                solution.len(),
                start.elapsed().as_secs_f64(),
                search.nodes
            ),
            Err(e) => info!(
                "Search failed after {:.3}s and {} nodes: {e}",
                start.elapsed().as_secs_f64(),
                search.nodes
            ),
        }
        result
    }
}

const STACK: usize = MAX_SEARCH_DEPTH + 1;

/// Search state. Index `n` of `axis` and `power` is the `n`th move of the
/// current path; index `n` of a coordinate array is its value before that
/// move.
struct Search<'t> {
    tables: &'t CoordinateTables,
    axis: [usize; STACK],
    power: [usize; STACK],

    flip: [u16; STACK],
    twist: [u16; STACK],
    slice: [u16; STACK],
    min_dist_phase1: [u8; STACK],

    parity: [u8; STACK],
    urf_to_dlf: [u16; STACK],
    fr_to_br: [u16; STACK],
    ur_to_ul: [u16; STACK],
    ub_to_df: [u16; STACK],
    ur_to_df: [u16; STACK],
    min_dist_phase2: [u8; STACK],

    nodes: u64,
}

fn is_ud(axis: usize) -> bool {
    axis == 0 || axis == 3
}

impl<'t> Search<'t> {
    fn new(tables: &'t CoordinateTables, state: &CubieState) -> Self {
        let mut search = Self {
            tables,
            axis: [0; STACK],
            power: [0; STACK],
            flip: [0; STACK],
            twist: [0; STACK],
            slice: [0; STACK],
            min_dist_phase1: [0; STACK],
            parity: [0; STACK],
            urf_to_dlf: [0; STACK],
            fr_to_br: [0; STACK],
            ur_to_ul: [0; STACK],
            ub_to_df: [0; STACK],
            ur_to_df: [0; STACK],
            min_dist_phase2: [0; STACK],
            nodes: 0,
        };
        search.flip[0] = state.flip();
        search.twist[0] = state.twist();
        search.slice[0] = state.fr_to_br() / N_SLICE2 as u16;
        search.parity[0] = state.corner_parity();
        search.urf_to_dlf[0] = state.urf_to_dlf();
        search.fr_to_br[0] = state.fr_to_br();
        search.ur_to_ul[0] = state.ur_to_ul();
        search.ub_to_df[0] = state.ub_to_df();
        search
    }

    fn move_index(&self, n: usize) -> usize {
        3 * self.axis[n] + self.power[n] - 1
    }

    /// Whether move `n` turns the same face as move `n - 1`, or the opposite
    /// face after it. Either way the pair has a shorter or reordered
    /// equivalent that is searched elsewhere.
    fn repeats_axis(&self, n: usize) -> bool {
        self.axis[n - 1] == self.axis[n] || self.axis[n - 1] == self.axis[n] + 3
    }

    fn phase1_distance(&self, n: usize) -> u8 {
        let slice = usize::from(self.slice[n]);
        let flip = self
            .tables
            .slice_flip_prune
            .get(N_SLICE1 * usize::from(self.flip[n]) + slice);
        let twist = self
            .tables
            .slice_twist_prune
            .get(N_SLICE1 * usize::from(self.twist[n]) + slice);
        flip.max(twist)
    }

    fn phase2_distance(&self, n: usize) -> u8 {
        let fr_to_br = usize::from(self.fr_to_br[n]);
        let parity = usize::from(self.parity[n]);
        let corners = self.tables.slice_urf_to_dlf_parity_prune.get(
            (N_SLICE2 * usize::from(self.urf_to_dlf[n]) + fr_to_br) * N_PARITY + parity,
        );
        let edges = self.tables.slice_ur_to_df_parity_prune.get(
            (N_SLICE2 * usize::from(self.ur_to_df[n]) + fr_to_br) * N_PARITY + parity,
        );
        corners.max(edges)
    }

    fn run(
        &mut self,
        max_depth: usize,
        time_out: Duration,
        start: Instant,
    ) -> Result<Solution, ExhaustionError> {
        let mut n = 0;
        let mut busy = false;
        let mut depth_phase1 = 1;
        self.min_dist_phase1[1] = 1;
        debug!(working!("Searching phase 1 depth {}..."), depth_phase1);

        loop {
            // Advance to the next node of the current depth
            loop {
                if depth_phase1 - n > usize::from(self.min_dist_phase1[n + 1]) && !busy {
                    let axis = usize::from(is_ud(self.axis[n]));
                    n += 1;
                    self.axis[n] = axis;
                    self.power[n] = 1;
                } else {
                    self.power[n] += 1;
                    if self.power[n] > 3 {
                        loop {
                            self.axis[n] += 1;
                            if self.axis[n] > 5 {
                                if !time_out.is_zero() && start.elapsed() > time_out {
                                    return Err(ExhaustionError::Timeout);
                                }
                                if n == 0 {
                                    if depth_phase1 >= max_depth {
                                        return Err(ExhaustionError::DepthExhausted);
                                    }
                                    depth_phase1 += 1;
                                    debug!(
                                        working!("Searching phase 1 depth {}... ({} nodes so far)"),
                                        depth_phase1,
                                        self.nodes
                                    );
                                    self.axis[n] = 0;
                                    self.power[n] = 1;
                                    busy = false;
                                } else {
                                    n -= 1;
                                    busy = true;
                                }
                                break;
                            }
                            self.power[n] = 1;
                            busy = false;
                            if n == 0 || !self.repeats_axis(n) {
                                break;
                            }
                        }
                    } else {
                        busy = false;
                    }
                }
                if !busy {
                    break;
                }
            }

            let m = self.move_index(n);
            self.flip[n + 1] = self.tables.flip[usize::from(self.flip[n])][m];
            self.twist[n + 1] = self.tables.twist[usize::from(self.twist[n])][m];
            self.slice[n + 1] = self.tables.fr_to_br[usize::from(self.slice[n]) * N_SLICE2][m]
                / N_SLICE2 as u16;
            let h = self.phase1_distance(n + 1);
            self.min_dist_phase1[n + 1] = h;
            self.nodes += 1;

            if h == 0 && n + 5 >= depth_phase1 {
                self.min_dist_phase1[n + 1] = NO_DESCEND;
                if n == depth_phase1 - 1
                    && let Some(total) = self.total_depth(depth_phase1, max_depth)
                    && (total == depth_phase1 || !self.repeats_axis(depth_phase1))
                {
                    return Ok(self.solution(total, depth_phase1));
                }
            }
        }
    }

    /// Search phase 2 from the end of the current phase 1 path of length
    /// `depth_phase1`. Returns the total length of the combined solution.
    fn total_depth(&mut self, depth_phase1: usize, max_depth: usize) -> Option<usize> {
        let max_phase2 = MAX_PHASE2_DEPTH.min(max_depth.checked_sub(depth_phase1)?);
        let tables = self.tables;

        for i in 0..depth_phase1 {
            let m = self.move_index(i);
            self.urf_to_dlf[i + 1] = tables.urf_to_dlf[usize::from(self.urf_to_dlf[i])][m];
            self.fr_to_br[i + 1] = tables.fr_to_br[usize::from(self.fr_to_br[i])][m];
            self.parity[i + 1] = tables.parity[usize::from(self.parity[i])][m];
        }
        let corners = tables.slice_urf_to_dlf_parity_prune.get(
            (N_SLICE2 * usize::from(self.urf_to_dlf[depth_phase1])
                + usize::from(self.fr_to_br[depth_phase1]))
                * N_PARITY
                + usize::from(self.parity[depth_phase1]),
        );
        if usize::from(corners) > max_phase2 {
            return None;
        }

        for i in 0..depth_phase1 {
            let m = self.move_index(i);
            self.ur_to_ul[i + 1] = tables.ur_to_ul[usize::from(self.ur_to_ul[i])][m];
            self.ub_to_df[i + 1] = tables.ub_to_df[usize::from(self.ub_to_df[i])][m];
        }
        self.ur_to_df[depth_phase1] = tables.merge
            [usize::from(self.ur_to_ul[depth_phase1])]
            [usize::from(self.ub_to_df[depth_phase1])];
        debug_assert_ne!(self.ur_to_df[depth_phase1], NO_COORD);

        let h = self.phase2_distance(depth_phase1);
        if usize::from(h) > max_phase2 {
            return None;
        }
        self.min_dist_phase2[depth_phase1] = h;
        if h == 0 {
            return Some(depth_phase1);
        }

        let mut depth_phase2 = 1;
        let mut n = depth_phase1;
        let mut busy = false;
        self.axis[n] = 0;
        self.power[n] = 0;
        self.min_dist_phase2[n + 1] = 1;

        loop {
            loop {
                if depth_phase1 + depth_phase2 - n > usize::from(self.min_dist_phase2[n + 1])
                    && !busy
                {
                    // U and D turn freely, the other faces only by half turns
                    let (axis, power) = if is_ud(self.axis[n]) { (1, 2) } else { (0, 1) };
                    n += 1;
                    self.axis[n] = axis;
                    self.power[n] = power;
                } else {
                    self.power[n] += if is_ud(self.axis[n]) { 1 } else { 2 };
                    if self.power[n] > 3 {
                        loop {
                            self.axis[n] += 1;
                            if self.axis[n] > 5 {
                                if n == depth_phase1 {
                                    if depth_phase2 >= max_phase2 {
                                        return None;
                                    }
                                    depth_phase2 += 1;
                                    self.axis[n] = 0;
                                    self.power[n] = 1;
                                    busy = false;
                                } else {
                                    n -= 1;
                                    busy = true;
                                }
                                break;
                            }
                            self.power[n] = if is_ud(self.axis[n]) { 1 } else { 2 };
                            busy = false;
                            if n == depth_phase1 || !self.repeats_axis(n) {
                                break;
                            }
                        }
                    } else {
                        busy = false;
                    }
                }
                if !busy {
                    break;
                }
            }

            let m = self.move_index(n);
            self.urf_to_dlf[n + 1] = tables.urf_to_dlf[usize::from(self.urf_to_dlf[n])][m];
            self.fr_to_br[n + 1] = tables.fr_to_br[usize::from(self.fr_to_br[n])][m];
            self.parity[n + 1] = tables.parity[usize::from(self.parity[n])][m];
            self.ur_to_df[n + 1] = tables.ur_to_df[usize::from(self.ur_to_df[n])][m];
            let h = self.phase2_distance(n + 1);
            self.min_dist_phase2[n + 1] = h;
            self.nodes += 1;
            if h == 0 {
                return Some(n + 1);
            }
        }
    }

    fn solution(&self, len: usize, phase1_len: usize) -> Solution {
        let moves = (0..len).map(|i| Move::ALL[self.move_index(i)]).collect();
        Solution { moves, phase1_len }
    }
}
