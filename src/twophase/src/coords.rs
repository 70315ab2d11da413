//! Integer coordinates of cubie states.
//!
//! Each coordinate encodes part of a cube (orientations, or where a fixed set
//! of pieces sits and in which order) as a dense integer so that move and
//! pruning tables can be indexed by it. Every getter has a matching setter
//! producing some representative state with that coordinate; the move tables
//! are built by round-tripping through those representatives.

use crate::cubie::{
    BL, BR, CubieState, DB, DBL, DF, DL, DLF, DR, DRB, FL, FR, N_CORNERS, N_EDGES, UB, UF, UL,
    UR, URF,
};

/// Corner orientation, `3^7`.
pub const N_TWIST: usize = 2187;
/// Edge orientation, `2^11`.
pub const N_FLIP: usize = 2048;
/// Positions of the four E-slice edges ignoring their order, `12 choose 4`.
pub const N_SLICE1: usize = 495;
/// Order of the E-slice edges once they are in the slice, `4!`.
pub const N_SLICE2: usize = 24;
pub const N_PARITY: usize = 2;
/// Positions and order of the six corners URF..DLF, `8!/2!`.
pub const N_URF_TO_DLF: usize = 20160;
/// Positions and order of the four E-slice edges, `12!/8!`.
pub const N_FR_TO_BR: usize = 11880;
/// Positions and order of edges UR, UF, UL, `12!/9!`.
pub const N_UR_TO_UL: usize = 1320;
/// Positions and order of edges UB, DR, DF, `12!/9!`.
pub const N_UB_TO_DF: usize = 1320;
/// Positions and order of the six edges UR..DF while in G1, `8!/2!`.
pub const N_UR_TO_DF: usize = 20160;
/// `ur_to_ul` and `ub_to_df` values below this keep their edges in the U and
/// D layers, `8!/5!`.
pub const N_MERGE: usize = 336;

/// Binomial coefficient, zero when `k > n`.
#[must_use]
pub const fn cnk(n: usize, k: usize) -> usize {
    if n < k {
        return 0;
    }
    let k = if k > n / 2 { n - k } else { k };
    let mut s = 1;
    let mut i = n;
    let mut j = 1;
    while i != n - k {
        s *= i;
        s /= j;
        i -= 1;
        j += 1;
    }
    s
}

fn rotate_left(arr: &mut [u8], l: usize, r: usize) {
    arr[l..=r].rotate_left(1);
}

fn rotate_right(arr: &mut [u8], l: usize, r: usize) {
    arr[l..=r].rotate_right(1);
}

/// Index of the order of `pieces`, whose values are `offset..offset + len`,
/// in a mixed radix over `len!`.
fn permutation_rank(pieces: &mut [u8], offset: u8) -> usize {
    let mut b = 0;
    for j in (1..pieces.len()).rev() {
        let mut k = 0;
        while pieces[j] != j as u8 + offset {
            rotate_left(pieces, 0, j);
            k += 1;
        }
        b = (j + 1) * b + k;
    }
    b
}

/// Inverse of `permutation_rank`, applied to sorted `pieces`.
fn permutation_unrank(pieces: &mut [u8], mut b: usize) {
    for j in 1..pieces.len() {
        let mut k = b % (j + 1);
        b /= j + 1;
        while k > 0 {
            rotate_right(pieces, 0, j);
            k -= 1;
        }
    }
}

/// Rank a set of `K` pieces among `slots`: which positions they occupy and in
/// what order. `is_member` selects the pieces, `first` is the smallest of
/// them. Positions are scanned from the front.
fn edge_or_corner_rank<const K: usize>(
    slots: &[u8],
    first: u8,
    is_member: impl Fn(u8) -> bool,
) -> usize {
    let mut a = 0;
    let mut x = 0;
    let mut pieces = [0u8; K];
    for (j, &piece) in slots.iter().enumerate() {
        if is_member(piece) {
            a += cnk(j, x + 1);
            pieces[x] = piece;
            x += 1;
        }
    }
    let factorial: usize = (1..=K).product();
    factorial * a + permutation_rank(&mut pieces, first)
}

/// Inverse of `edge_or_corner_rank`. Slots not holding one of the ranked
/// pieces are set to `filler`.
fn edge_or_corner_unrank<const K: usize>(slots: &mut [u8], first: u8, filler: u8, idx: usize) {
    let factorial: usize = (1..=K).product();
    let mut a = idx / factorial;
    let mut pieces: [u8; K] = std::array::from_fn(|i| first + i as u8);
    permutation_unrank(&mut pieces, idx % factorial);

    slots.fill(filler);
    let mut x = K as isize - 1;
    for j in (0..slots.len()).rev() {
        if x < 0 {
            break;
        }
        let c = cnk(j, x as usize + 1);
        if a >= c {
            slots[j] = pieces[x as usize];
            a -= c;
            x -= 1;
        }
    }
}

impl CubieState {
    #[must_use]
    pub fn twist(&self) -> u16 {
        self.co[..N_CORNERS - 1]
            .iter()
            .fold(0, |acc, &o| 3 * acc + u16::from(o))
    }

    pub fn set_twist(&mut self, mut twist: u16) {
        let mut parity = 0;
        for i in (0..N_CORNERS - 1).rev() {
            self.co[i] = (twist % 3) as u8;
            parity += self.co[i];
            twist /= 3;
        }
        self.co[N_CORNERS - 1] = (3 - parity % 3) % 3;
    }

    #[must_use]
    pub fn flip(&self) -> u16 {
        self.eo[..N_EDGES - 1]
            .iter()
            .fold(0, |acc, &o| 2 * acc + u16::from(o))
    }

    pub fn set_flip(&mut self, mut flip: u16) {
        let mut parity = 0;
        for i in (0..N_EDGES - 1).rev() {
            self.eo[i] = (flip % 2) as u8;
            parity += self.eo[i];
            flip /= 2;
        }
        self.eo[N_EDGES - 1] = (2 - parity % 2) % 2;
    }

    /// Positions and order of the E-slice edges FR, FL, BL, BR. Divided by
    /// `N_SLICE2` this is the phase 1 slice coordinate; in G1 it is below
    /// `N_SLICE2`.
    #[must_use]
    pub fn fr_to_br(&self) -> u16 {
        // Scanned from the back so that the solved slice ranks as zero
        let mut a = 0;
        let mut x = 0;
        let mut pieces = [0u8; 4];
        for j in (0..N_EDGES).rev() {
            if (FR..=BR).contains(&self.ep[j]) {
                a += cnk(11 - j, x + 1);
                pieces[3 - x] = self.ep[j];
                x += 1;
            }
        }
        (24 * a + permutation_rank(&mut pieces, FR)) as u16
    }

    pub fn set_fr_to_br(&mut self, idx: u16) {
        let idx = usize::from(idx);
        let mut slice_edges = [FR, FL, BL, BR];
        let other_edges = [UR, UF, UL, UB, DR, DF, DL, DB];
        permutation_unrank(&mut slice_edges, idx % 24);
        let mut a = idx / 24;

        self.ep = [DB; N_EDGES];
        let mut x = 3isize;
        for j in 0..N_EDGES {
            if x < 0 {
                break;
            }
            let c = cnk(11 - j, x as usize + 1);
            if a >= c {
                self.ep[j] = slice_edges[3 - x as usize];
                a -= c;
                x -= 1;
            }
        }

        let mut others = other_edges.into_iter();
        for slot in &mut self.ep {
            if *slot == DB {
                *slot = others.next().unwrap_or(DB);
            }
        }
    }

    #[must_use]
    pub fn urf_to_dlf(&self) -> u16 {
        edge_or_corner_rank::<6>(&self.cp, URF, |c| c <= DLF) as u16
    }

    pub fn set_urf_to_dlf(&mut self, idx: u16) {
        edge_or_corner_unrank::<6>(&mut self.cp, URF, DRB, usize::from(idx));
        let mut others = [DBL, DRB].into_iter();
        for slot in &mut self.cp {
            if *slot == DRB {
                *slot = others.next().unwrap_or(DRB);
            }
        }
    }

    /// Positions and order of the six edges UR..DF. Only meaningful in G1,
    /// where it is below `N_UR_TO_DF`.
    #[must_use]
    pub fn ur_to_df(&self) -> u32 {
        edge_or_corner_rank::<6>(&self.ep, UR, |e| e <= DF) as u32
    }

    pub fn set_ur_to_df(&mut self, idx: u32) {
        edge_or_corner_unrank::<6>(&mut self.ep, UR, BR, idx as usize);
        let mut others = [DL, DB, FR, FL, BL, BR].into_iter();
        for slot in &mut self.ep {
            if *slot == BR {
                *slot = others.next().unwrap_or(BR);
            }
        }
    }

    #[must_use]
    pub fn ur_to_ul(&self) -> u16 {
        edge_or_corner_rank::<3>(&self.ep, UR, |e| e <= UL) as u16
    }

    /// Only UR, UF and UL are placed; every other slot holds `BR`.
    pub fn set_ur_to_ul(&mut self, idx: u16) {
        edge_or_corner_unrank::<3>(&mut self.ep, UR, BR, usize::from(idx));
    }

    #[must_use]
    pub fn ub_to_df(&self) -> u16 {
        edge_or_corner_rank::<3>(&self.ep, UB, |e| (UB..=DF).contains(&e)) as u16
    }

    /// Only UB, DR and DF are placed; every other slot holds `BR`.
    pub fn set_ub_to_df(&mut self, idx: u16) {
        edge_or_corner_unrank::<3>(&mut self.ep, UB, BR, usize::from(idx));
    }
}

/// Combine a `ur_to_ul` and a `ub_to_df` coordinate of a G1 state into its
/// `ur_to_df` coordinate, or `None` if the two place edges on the same slot
/// or either one has edges outside the U and D layers.
#[must_use]
pub fn merge_ur_to_ul_and_ub_to_df(ur_to_ul: u16, ub_to_df: u16) -> Option<u32> {
    if usize::from(ur_to_ul) >= N_MERGE || usize::from(ub_to_df) >= N_MERGE {
        return None;
    }
    let mut a = CubieState::SOLVED;
    let mut b = CubieState::SOLVED;
    a.set_ur_to_ul(ur_to_ul);
    b.set_ub_to_df(ub_to_df);
    for i in 0..8 {
        if a.ep[i] != BR {
            if b.ep[i] != BR {
                return None;
            }
            b.ep[i] = a.ep[i];
        }
    }
    Some(b.ur_to_df())
}
