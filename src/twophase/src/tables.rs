//! Move and pruning tables for every coordinate the search uses.

use log::info;
use std::time::Instant;

use crate::{
    coords::{
        N_FLIP, N_FR_TO_BR, N_MERGE, N_PARITY, N_SLICE1, N_SLICE2, N_TWIST, N_UB_TO_DF,
        N_UR_TO_DF, N_UR_TO_UL, N_URF_TO_DLF, merge_ur_to_ul_and_ub_to_df,
    },
    cubie::CubieState,
    moves::{Face, Move, Power},
    pruning::PruningTable,
    start, success, working,
};

/// Entry for a transition or merge that leaves the domain of a coordinate.
pub const NO_COORD: u16 = u16::MAX;

/// `table[coordinate][move index]` is the coordinate after the move.
pub type MoveTable = Box<[[u16; Move::COUNT]]>;

/// Everything precomputed for a search. Building this takes a noticeable
/// fraction of a second in release mode, so it is done once and shared.
#[derive(Debug)]
pub struct CoordinateTables {
    pub twist: MoveTable,
    pub flip: MoveTable,
    pub fr_to_br: MoveTable,
    pub urf_to_dlf: MoveTable,
    /// Only G1 moves have entries; the others hold `NO_COORD`.
    pub ur_to_df: MoveTable,
    pub ur_to_ul: MoveTable,
    pub ub_to_df: MoveTable,
    pub parity: [[u8; Move::COUNT]; N_PARITY],
    /// `merge[ur_to_ul][ub_to_df]`, both below `N_MERGE`.
    pub merge: Box<[[u16; N_MERGE]]>,

    /// Phase 1: indexed by `N_SLICE1 * twist + slice`.
    pub slice_twist_prune: PruningTable,
    /// Phase 1: indexed by `N_SLICE1 * flip + slice`.
    pub slice_flip_prune: PruningTable,
    /// Phase 2: indexed by `(N_SLICE2 * urf_to_dlf + fr_to_br) * 2 + parity`.
    pub slice_urf_to_dlf_parity_prune: PruningTable,
    /// Phase 2: indexed by `(N_SLICE2 * ur_to_df + fr_to_br) * 2 + parity`.
    pub slice_ur_to_df_parity_prune: PruningTable,
}

/// Build a move table by applying every face turn to a representative of
/// each coordinate value. `apply` performs one clockwise quarter turn.
fn move_table(
    len: usize,
    set: impl Fn(&mut CubieState, usize),
    get: impl Fn(&CubieState) -> usize,
    apply: impl Fn(&mut CubieState, &CubieState),
) -> MoveTable {
    let mut table = vec![[0; Move::COUNT]; len].into_boxed_slice();
    let mut state = CubieState::SOLVED;
    for (i, row) in table.iter_mut().enumerate() {
        set(&mut state, i);
        for face in Face::ALL {
            let turn = CubieState::face_turn(face);
            for power in 0..3 {
                apply(&mut state, turn);
                row[3 * face as usize + power] = get(&state) as u16;
            }
            // The fourth turn restores the representative
            apply(&mut state, turn);
        }
    }
    table
}

impl CoordinateTables {
    #[must_use]
    pub fn generate() -> Self {
        info!(start!("Generating move and pruning tables"));
        let start = Instant::now();

        let twist = move_table(
            N_TWIST,
            |s, i| s.set_twist(i as u16),
            |s| usize::from(s.twist()),
            CubieState::corner_multiply,
        );
        let flip = move_table(
            N_FLIP,
            |s, i| s.set_flip(i as u16),
            |s| usize::from(s.flip()),
            CubieState::edge_multiply,
        );
        let fr_to_br = move_table(
            N_FR_TO_BR,
            |s, i| s.set_fr_to_br(i as u16),
            |s| usize::from(s.fr_to_br()),
            CubieState::edge_multiply,
        );
        let urf_to_dlf = move_table(
            N_URF_TO_DLF,
            |s, i| s.set_urf_to_dlf(i as u16),
            |s| usize::from(s.urf_to_dlf()),
            CubieState::corner_multiply,
        );
        let mut ur_to_df = move_table(
            N_UR_TO_DF,
            |s, i| s.set_ur_to_df(i as u32),
            |s| s.ur_to_df() as usize,
            CubieState::edge_multiply,
        );
        // Outside G1 the coordinate does not fit in its range
        for row in ur_to_df.iter_mut() {
            for move_ in Move::ALL.into_iter().filter(|m| !m.preserves_g1()) {
                row[move_.index()] = NO_COORD;
            }
        }
        let ur_to_ul = move_table(
            N_UR_TO_UL,
            |s, i| s.set_ur_to_ul(i as u16),
            |s| usize::from(s.ur_to_ul()),
            CubieState::edge_multiply,
        );
        let ub_to_df = move_table(
            N_UB_TO_DF,
            |s, i| s.set_ub_to_df(i as u16),
            |s| usize::from(s.ub_to_df()),
            CubieState::edge_multiply,
        );
        info!(working!("Generated move tables"));

        // A quarter turn is a 4-cycle of corners, which is odd
        let parity = [0u8, 1].map(|p| Move::ALL.map(|m| p ^ u8::from(m.power != Power::Half)));

        let mut merge = vec![[NO_COORD; N_MERGE]; N_MERGE].into_boxed_slice();
        for (a, row) in merge.iter_mut().enumerate() {
            for (b, entry) in row.iter_mut().enumerate() {
                if let Some(idx) = merge_ur_to_ul_and_ub_to_df(a as u16, b as u16) {
                    *entry = idx as u16;
                }
            }
        }

        let slice_twist_prune = PruningTable::generate(N_SLICE1 * N_TWIST, Move::COUNT, |i, m| {
            let (twist_idx, slice) = (i / N_SLICE1, i % N_SLICE1);
            let next_slice = usize::from(fr_to_br[slice * N_SLICE2][m]) / N_SLICE2;
            Some(N_SLICE1 * usize::from(twist[twist_idx][m]) + next_slice)
        });
        info!(working!("Generated slice and twist pruning table"));
        let slice_flip_prune = PruningTable::generate(N_SLICE1 * N_FLIP, Move::COUNT, |i, m| {
            let (flip_idx, slice) = (i / N_SLICE1, i % N_SLICE1);
            let next_slice = usize::from(fr_to_br[slice * N_SLICE2][m]) / N_SLICE2;
            Some(N_SLICE1 * usize::from(flip[flip_idx][m]) + next_slice)
        });
        info!(working!("Generated slice and flip pruning table"));

        let phase2_transition = |corner_or_edge: &MoveTable, i: usize, m: usize| {
            if !Move::ALL[m].preserves_g1() {
                return None;
            }
            let p = i % N_PARITY;
            let slice = (i / N_PARITY) % N_SLICE2;
            let coord = i / N_PARITY / N_SLICE2;
            let next_coord = usize::from(corner_or_edge[coord][m]);
            let next_slice = usize::from(fr_to_br[slice][m]);
            let next_parity = usize::from(parity[p][m]);
            Some((N_SLICE2 * next_coord + next_slice) * N_PARITY + next_parity)
        };
        let slice_urf_to_dlf_parity_prune = PruningTable::generate(
            N_SLICE2 * N_URF_TO_DLF * N_PARITY,
            Move::COUNT,
            |i, m| phase2_transition(&urf_to_dlf, i, m),
        );
        info!(working!("Generated corner permutation pruning table"));
        let slice_ur_to_df_parity_prune = PruningTable::generate(
            N_SLICE2 * N_UR_TO_DF * N_PARITY,
            Move::COUNT,
            |i, m| phase2_transition(&ur_to_df, i, m),
        );
        info!(working!("Generated edge permutation pruning table"));

        info!(
            success!("Generated tables in {:.3}s"),
            start.elapsed().as_secs_f64()
        );

        Self {
            twist,
            flip,
            fr_to_br,
            urf_to_dlf,
            ur_to_df,
            ur_to_ul,
            ub_to_df,
            parity,
            merge,
            slice_twist_prune,
            slice_flip_prune,
            slice_urf_to_dlf_parity_prune,
            slice_ur_to_df_parity_prune,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::TwoPhaseSolver;

    fn tables() -> &'static CoordinateTables {
        TwoPhaseSolver::shared().tables()
    }

    #[test_log::test]
    fn test_move_tables_track_cubie_moves() {
        let tables = tables();
        let mut rng = fastrand::Rng::with_seed(3);
        let mut state = CubieState::SOLVED;
        for _ in 0..200 {
            let move_ = Move::ALL[rng.usize(..Move::COUNT)];
            let m = move_.index();
            let next = state.apply(move_);
            assert_eq!(tables.twist[usize::from(state.twist())][m], next.twist());
            assert_eq!(tables.flip[usize::from(state.flip())][m], next.flip());
            assert_eq!(
                tables.fr_to_br[usize::from(state.fr_to_br())][m],
                next.fr_to_br()
            );
            assert_eq!(
                tables.urf_to_dlf[usize::from(state.urf_to_dlf())][m],
                next.urf_to_dlf()
            );
            assert_eq!(
                tables.ur_to_ul[usize::from(state.ur_to_ul())][m],
                next.ur_to_ul()
            );
            assert_eq!(
                tables.ub_to_df[usize::from(state.ub_to_df())][m],
                next.ub_to_df()
            );
            assert_eq!(
                tables.parity[usize::from(state.corner_parity())][m],
                next.corner_parity()
            );
            state = next;
        }
    }

    #[test]
    fn test_ur_to_df_table_in_g1() {
        let tables = tables();
        let g1: Vec<Move> = Move::ALL.into_iter().filter(|m| m.preserves_g1()).collect();
        let mut rng = fastrand::Rng::with_seed(11);
        let mut state = CubieState::SOLVED;
        for _ in 0..200 {
            let move_ = g1[rng.usize(..g1.len())];
            let next = state.apply(move_);
            assert_eq!(
                u32::from(tables.ur_to_df[state.ur_to_df() as usize][move_.index()]),
                next.ur_to_df()
            );
            assert_eq!(
                u32::from(
                    tables.merge[usize::from(next.ur_to_ul())][usize::from(next.ub_to_df())]
                ),
                next.ur_to_df()
            );
            state = next;
        }
        let r = Move::new(Face::R, Power::Clockwise);
        assert_eq!(tables.ur_to_df[0][r.index()], NO_COORD);
    }

    #[test]
    fn test_pruning_tables_are_solved_at_zero() {
        let tables = tables();
        assert_eq!(tables.slice_twist_prune.get(0), 0);
        assert_eq!(tables.slice_flip_prune.get(0), 0);
        assert_eq!(tables.slice_urf_to_dlf_parity_prune.get(0), 0);
        assert_eq!(tables.slice_ur_to_df_parity_prune.get(0), 0);
        // Phase 1 never needs more than 12 moves
        assert!(tables.slice_twist_prune.max_distance() <= 12);
        assert!(tables.slice_flip_prune.max_distance() <= 12);
    }

    #[test]
    fn test_single_move_distances() {
        let tables = tables();
        for move_ in Move::ALL {
            let state = CubieState::SOLVED.apply(move_);
            let slice = usize::from(state.fr_to_br()) / N_SLICE2;
            let twist_dist = tables
                .slice_twist_prune
                .get(N_SLICE1 * usize::from(state.twist()) + slice);
            let flip_dist = tables
                .slice_flip_prune
                .get(N_SLICE1 * usize::from(state.flip()) + slice);
            let expected = u8::from(!move_.preserves_g1());
            assert_eq!(twist_dist.max(flip_dist), expected, "{move_}");
        }
    }
}
