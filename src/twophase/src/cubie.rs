//! The cubie level model: where each corner and edge sits and how it is
//! oriented. This is the system of record; coordinates are projections of it.

use crate::moves::{Face, Move};

pub const N_CORNERS: usize = 8;
pub const N_EDGES: usize = 12;

// Corner positions and pieces.
pub const URF: u8 = 0;
pub const UFL: u8 = 1;
pub const ULB: u8 = 2;
pub const UBR: u8 = 3;
pub const DFR: u8 = 4;
pub const DLF: u8 = 5;
pub const DBL: u8 = 6;
pub const DRB: u8 = 7;

// Edge positions and pieces.
pub const UR: u8 = 0;
pub const UF: u8 = 1;
pub const UL: u8 = 2;
pub const UB: u8 = 3;
pub const DR: u8 = 4;
pub const DF: u8 = 5;
pub const DL: u8 = 6;
pub const DB: u8 = 7;
pub const FR: u8 = 8;
pub const FL: u8 = 9;
pub const BL: u8 = 10;
pub const BR: u8 = 11;

/// A cube in the "replaced by" representation: `cp[i]` is the corner piece
/// sitting in position `i` and `co[i]` its twist, likewise for edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubieState {
    pub cp: [u8; N_CORNERS],
    pub co: [u8; N_CORNERS],
    pub ep: [u8; N_EDGES],
    pub eo: [u8; N_EDGES],
}

impl Default for CubieState {
    fn default() -> Self {
        Self::SOLVED
    }
}

/// The clockwise quarter turn of each face, in `Face` order.
const BASIC_MOVES: [CubieState; 6] = [
    // U
    CubieState {
        cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
        eo: [0; N_EDGES],
    },
    // R
    CubieState {
        cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR],
        co: [2, 0, 0, 1, 1, 0, 0, 2],
        ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR],
        eo: [0; N_EDGES],
    },
    // F
    CubieState {
        cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
        co: [1, 2, 0, 0, 2, 1, 0, 0],
        ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
        eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
    },
    // D
    CubieState {
        cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
        eo: [0; N_EDGES],
    },
    // L
    CubieState {
        cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
        co: [0, 1, 2, 0, 0, 2, 1, 0],
        ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
        eo: [0; N_EDGES],
    },
    // B
    CubieState {
        cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
        co: [0, 0, 1, 2, 0, 0, 2, 1],
        ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
        eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
    },
];

impl CubieState {
    pub const SOLVED: Self = Self {
        cp: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
        co: [0; N_CORNERS],
        ep: [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR],
        eo: [0; N_EDGES],
    };

    /// The clockwise quarter turn of `face` as a cube state.
    #[must_use]
    pub fn face_turn(face: Face) -> &'static Self {
        &BASIC_MOVES[face as usize]
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Multiply the corners of `self` by those of `b` in place.
    pub fn corner_multiply(&mut self, b: &Self) {
        let mut cp = [0; N_CORNERS];
        let mut co = [0; N_CORNERS];
        for i in 0..N_CORNERS {
            let from = b.cp[i] as usize;
            cp[i] = self.cp[from];
            co[i] = (self.co[from] + b.co[i]) % 3;
        }
        self.cp = cp;
        self.co = co;
    }

    /// Multiply the edges of `self` by those of `b` in place.
    pub fn edge_multiply(&mut self, b: &Self) {
        let mut ep = [0; N_EDGES];
        let mut eo = [0; N_EDGES];
        for i in 0..N_EDGES {
            let from = b.ep[i] as usize;
            ep[i] = self.ep[from];
            eo[i] = (self.eo[from] + b.eo[i]) % 2;
        }
        self.ep = ep;
        self.eo = eo;
    }

    /// Group multiplication: the state reached by performing `self` and then
    /// `b`.
    pub fn multiply(&mut self, b: &Self) {
        self.corner_multiply(b);
        self.edge_multiply(b);
    }

    /// The state reached by applying `move_` to this one.
    #[must_use]
    pub fn apply(&self, move_: Move) -> Self {
        let mut next = *self;
        let turn = Self::face_turn(move_.face);
        for _ in 0..move_.power.quarter_turns() {
            next.multiply(turn);
        }
        next
    }

    /// The state reached by applying every move of `moves` in order.
    #[must_use]
    pub fn apply_all<'a>(&self, moves: impl IntoIterator<Item = &'a Move>) -> Self {
        moves
            .into_iter()
            .fold(*self, |state, &move_| state.apply(move_))
    }

    /// The state that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut inverse = Self::SOLVED;
        for i in 0..N_CORNERS {
            let piece = self.cp[i] as usize;
            inverse.cp[piece] = i as u8;
            inverse.co[piece] = (3 - self.co[i]) % 3;
        }
        for i in 0..N_EDGES {
            let piece = self.ep[i] as usize;
            inverse.ep[piece] = i as u8;
            inverse.eo[piece] = self.eo[i];
        }
        inverse
    }

    /// A state drawn uniformly from all legal cube states.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let mut state = Self::SOLVED;
        rng.shuffle(&mut state.cp);
        rng.shuffle(&mut state.ep);

        for o in &mut state.co[..N_CORNERS - 1] {
            *o = rng.u8(..3);
        }
        let twist: u8 = state.co[..N_CORNERS - 1].iter().sum();
        state.co[N_CORNERS - 1] = (3 - twist % 3) % 3;

        for o in &mut state.eo[..N_EDGES - 1] {
            *o = rng.u8(..2);
        }
        let flip: u8 = state.eo[..N_EDGES - 1].iter().sum();
        state.eo[N_EDGES - 1] = flip % 2;

        if state.corner_parity() != state.edge_parity() {
            state.ep.swap(N_EDGES - 2, N_EDGES - 1);
        }
        state
    }

    #[must_use]
    pub fn corner_parity(&self) -> u8 {
        permutation_parity(&self.cp)
    }

    #[must_use]
    pub fn edge_parity(&self) -> u8 {
        permutation_parity(&self.ep)
    }
}

/// Parity of the number of inversions of `perm`.
fn permutation_parity(perm: &[u8]) -> u8 {
    let mut inversions = 0u32;
    for i in (1..perm.len()).rev() {
        for j in (0..i).rev() {
            if perm[j] > perm[i] {
                inversions += 1;
            }
        }
    }
    (inversions % 2) as u8
}
