//! Conversion between sticker strings and cubie states.
//!
//! A facelet string has 54 characters, nine per face, with the faces in
//! U, R, F, D, L, B order and each face read row by row as seen when looking
//! straight at it. Stickers are named by the face whose center they match.
//!
//! ```text
//!              |************|
//!              |*U1**U2**U3*|
//!              |*U4**U5**U6*|
//!              |*U7**U8**U9*|
//! |************|************|************|************|
//! |*L1**L2**L3*|*F1**F2**F3*|*R1**R2**R3*|*B1**B2**B3*|
//! |*L4**L5**L6*|*F4**F5**F6*|*R4**R5**R6*|*B4**B5**B6*|
//! |*L7**L8**L9*|*F7**F8**F9*|*R7**R8**R9*|*B7**B8**B9*|
//! |************|************|************|************|
//!              |*D1**D2**D3*|
//!              |*D4**D5**D6*|
//!              |*D7**D8**D9*|
//! ```

use crate::{
    cubie::{CubieState, N_CORNERS, N_EDGES},
    error::ValidationError,
    moves::Face,
};

pub const N_FACELETS: usize = 54;

const fn facelet(face: Face, n: usize) -> usize {
    face as usize * 9 + n - 1
}

use Face::{B, D, F, L, R, U};

/// The stickers of each corner position, starting with the U or D sticker
/// and going clockwise.
const CORNER_FACELETS: [[usize; 3]; N_CORNERS] = [
    [facelet(U, 9), facelet(R, 1), facelet(F, 3)],
    [facelet(U, 7), facelet(F, 1), facelet(L, 3)],
    [facelet(U, 1), facelet(L, 1), facelet(B, 3)],
    [facelet(U, 3), facelet(B, 1), facelet(R, 3)],
    [facelet(D, 3), facelet(F, 9), facelet(R, 7)],
    [facelet(D, 1), facelet(L, 9), facelet(F, 7)],
    [facelet(D, 7), facelet(B, 9), facelet(L, 7)],
    [facelet(D, 9), facelet(R, 9), facelet(B, 7)],
];

const EDGE_FACELETS: [[usize; 2]; N_EDGES] = [
    [facelet(U, 6), facelet(R, 2)],
    [facelet(U, 8), facelet(F, 2)],
    [facelet(U, 4), facelet(L, 2)],
    [facelet(U, 2), facelet(B, 2)],
    [facelet(D, 6), facelet(R, 8)],
    [facelet(D, 2), facelet(F, 8)],
    [facelet(D, 4), facelet(L, 8)],
    [facelet(D, 8), facelet(B, 8)],
    [facelet(F, 6), facelet(R, 4)],
    [facelet(F, 4), facelet(L, 6)],
    [facelet(B, 6), facelet(L, 4)],
    [facelet(B, 4), facelet(R, 6)],
];

const CORNER_COLORS: [[Face; 3]; N_CORNERS] = [
    [U, R, F],
    [U, F, L],
    [U, L, B],
    [U, B, R],
    [D, F, R],
    [D, L, F],
    [D, B, L],
    [D, R, B],
];

const EDGE_COLORS: [[Face; 2]; N_EDGES] = [
    [U, R],
    [U, F],
    [U, L],
    [U, B],
    [D, R],
    [D, F],
    [D, L],
    [D, B],
    [F, R],
    [F, L],
    [B, L],
    [B, R],
];

/// Marks a position whose stickers match no piece.
const NO_PIECE: u8 = u8::MAX;

/// Parse a facelet string into a cubie state and check that the state is
/// reachable from solved.
///
/// # Errors
///
/// Returns the first of the six `ValidationError` kinds that applies, in
/// the order color counts, edges, flip, corners, twist, parity.
pub fn from_facelets(facelets: &str) -> Result<CubieState, ValidationError> {
    let stickers = parse_stickers(facelets)?;
    let state = cubies_from_stickers(&stickers);
    verify(&state)?;
    Ok(state)
}

fn parse_stickers(facelets: &str) -> Result<[Face; N_FACELETS], ValidationError> {
    let mut stickers = [U; N_FACELETS];
    let mut counts = [0usize; 6];
    let mut len = 0;

    for (i, letter) in facelets.chars().enumerate() {
        if i >= N_FACELETS {
            return Err(ValidationError::FaceletCount);
        }
        let face = Face::from_letter(letter).ok_or(ValidationError::FaceletCount)?;
        stickers[i] = face;
        counts[face as usize] += 1;
        len += 1;
    }

    if len != N_FACELETS || counts.iter().any(|&count| count != 9) {
        return Err(ValidationError::FaceletCount);
    }
    Ok(stickers)
}

fn cubies_from_stickers(stickers: &[Face; N_FACELETS]) -> CubieState {
    let mut state = CubieState {
        cp: [NO_PIECE; N_CORNERS],
        co: [0; N_CORNERS],
        ep: [NO_PIECE; N_EDGES],
        eo: [0; N_EDGES],
    };

    for (i, corner_facelets) in CORNER_FACELETS.iter().enumerate() {
        // The twist is how far the U/D sticker sits from the reference slot
        let Some(ori) = (0..3).find(|&ori| matches!(stickers[corner_facelets[ori]], U | D))
        else {
            continue;
        };
        let col0 = stickers[corner_facelets[ori]];
        let col1 = stickers[corner_facelets[(ori + 1) % 3]];
        let col2 = stickers[corner_facelets[(ori + 2) % 3]];
        // All three stickers must match, so a U/D swap leaves the corner missing
        if let Some(j) = CORNER_COLORS
            .iter()
            .position(|colors| *colors == [col0, col1, col2])
        {
            state.cp[i] = j as u8;
            state.co[i] = ori as u8;
        }
    }

    for (i, [a, b]) in EDGE_FACELETS.iter().copied().enumerate() {
        for (j, [c0, c1]) in EDGE_COLORS.iter().copied().enumerate() {
            if stickers[a] == c0 && stickers[b] == c1 {
                state.ep[i] = j as u8;
                state.eo[i] = 0;
                break;
            }
            if stickers[a] == c1 && stickers[b] == c0 {
                state.ep[i] = j as u8;
                state.eo[i] = 1;
                break;
            }
        }
    }

    state
}

/// Check the invariants of a legal cube: every piece exactly once, edge flips
/// summing to zero mod 2, corner twists summing to zero mod 3 and equal
/// permutation parities.
///
/// # Errors
///
/// The first violated invariant.
pub fn verify(state: &CubieState) -> Result<(), ValidationError> {
    let mut edge_count = [0u8; N_EDGES];
    for &piece in &state.ep {
        if let Some(count) = edge_count.get_mut(piece as usize) {
            *count += 1;
        }
    }
    if edge_count.iter().any(|&count| count != 1) {
        return Err(ValidationError::MissingEdge);
    }
    if state.eo.iter().map(|&o| u32::from(o)).sum::<u32>() % 2 != 0 {
        return Err(ValidationError::EdgeFlip);
    }

    let mut corner_count = [0u8; N_CORNERS];
    for &piece in &state.cp {
        if let Some(count) = corner_count.get_mut(piece as usize) {
            *count += 1;
        }
    }
    if corner_count.iter().any(|&count| count != 1) {
        return Err(ValidationError::MissingCorner);
    }
    if state.co.iter().map(|&o| u32::from(o)).sum::<u32>() % 3 != 0 {
        return Err(ValidationError::CornerTwist);
    }

    if state.edge_parity() != state.corner_parity() {
        return Err(ValidationError::Parity);
    }
    Ok(())
}

/// Render a cubie state as a facelet string.
#[must_use]
pub fn to_facelets(state: &CubieState) -> String {
    let mut stickers = [U; N_FACELETS];
    for face in Face::ALL {
        stickers[facelet(face, 5)] = face;
    }

    for (i, corner_facelets) in CORNER_FACELETS.iter().enumerate() {
        let piece = state.cp[i] as usize;
        let ori = state.co[i] as usize;
        for n in 0..3 {
            stickers[corner_facelets[(n + ori) % 3]] = CORNER_COLORS[piece][n];
        }
    }

    for (i, edge_facelets) in EDGE_FACELETS.iter().enumerate() {
        let piece = state.ep[i] as usize;
        let ori = state.eo[i] as usize;
        for n in 0..2 {
            stickers[edge_facelets[(n + ori) % 2]] = EDGE_COLORS[piece][n];
        }
    }

    stickers.iter().map(|face| face.letter()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveSequence;

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    #[test]
    fn test_solved_round_trip() {
        assert_eq!(to_facelets(&CubieState::SOLVED), SOLVED);
        assert!(from_facelets(SOLVED).unwrap().is_solved());
    }

    #[test]
    fn test_single_u_turn() {
        let state = CubieState::SOLVED.apply("U".parse().unwrap());
        assert_eq!(
            to_facelets(&state),
            "UUUUUUUUUBBBRRRRRRRRRFFFFFFDDDDDDDDDFFFLLLLLLLLLBBBBBB"
        );
    }

    #[test]
    fn test_wrong_length_and_counts() {
        assert_eq!(from_facelets(""), Err(ValidationError::FaceletCount));
        assert_eq!(
            from_facelets(&SOLVED[..53]),
            Err(ValidationError::FaceletCount)
        );
        assert_eq!(
            from_facelets(&format!("{SOLVED}U")),
            Err(ValidationError::FaceletCount)
        );
        let mut lopsided = SOLVED.to_owned();
        lopsided.replace_range(0..1, "R");
        assert_eq!(from_facelets(&lopsided), Err(ValidationError::FaceletCount));
        let mut foreign = SOLVED.to_owned();
        foreign.replace_range(0..1, "x");
        assert_eq!(from_facelets(&foreign), Err(ValidationError::FaceletCount));
    }

    fn swap_stickers(facelets: &str, a: usize, b: usize) -> String {
        let mut chars: Vec<char> = facelets.chars().collect();
        chars.swap(a, b);
        chars.into_iter().collect()
    }

    #[test]
    fn test_flipped_edge() {
        let [a, b] = EDGE_FACELETS[0];
        let flipped = swap_stickers(SOLVED, a, b);
        assert_eq!(from_facelets(&flipped), Err(ValidationError::EdgeFlip));
    }

    #[test]
    fn test_twisted_corner() {
        let [a, b, c] = CORNER_FACELETS[0];
        let mut chars: Vec<char> = SOLVED.chars().collect();
        let (x, y, z) = (chars[a], chars[b], chars[c]);
        chars[a] = z;
        chars[b] = x;
        chars[c] = y;
        let twisted: String = chars.into_iter().collect();
        assert_eq!(from_facelets(&twisted), Err(ValidationError::CornerTwist));
    }

    #[test]
    fn test_swapped_edges_is_parity_error() {
        // Exchange the UR and UF edges sticker for sticker
        let [ur_u, ur_r] = EDGE_FACELETS[0];
        let [uf_u, uf_f] = EDGE_FACELETS[1];
        let swapped = swap_stickers(&swap_stickers(SOLVED, ur_u, uf_u), ur_r, uf_f);
        assert_eq!(from_facelets(&swapped), Err(ValidationError::Parity));

        let scrambled = to_facelets(
            &CubieState::SOLVED.apply_all(&"R U F' D2 L B'".parse::<MoveSequence>().unwrap()),
        );
        let [a, b] = EDGE_FACELETS[4];
        let [c, d] = EDGE_FACELETS[7];
        let mut chars: Vec<char> = scrambled.chars().collect();
        chars.swap(a, c);
        chars.swap(b, d);
        let swapped: String = chars.into_iter().collect();
        assert_eq!(from_facelets(&swapped), Err(ValidationError::Parity));
    }

    #[test]
    fn test_duplicated_edge() {
        // Overwrite the UF edge with a second copy of UR, then turn the DR
        // edge into a second DF so that every color still appears nine times
        let [ur_u, ur_r] = EDGE_FACELETS[0];
        let [uf_u, uf_f] = EDGE_FACELETS[1];
        let [_, dr_r] = EDGE_FACELETS[4];
        let mut chars: Vec<char> = SOLVED.chars().collect();
        chars[uf_u] = chars[ur_u];
        chars[uf_f] = chars[ur_r];
        chars[dr_r] = 'F';
        let duplicated: String = chars.into_iter().collect();
        assert_eq!(from_facelets(&duplicated), Err(ValidationError::MissingEdge));
    }

    #[test]
    fn test_duplicated_corner() {
        let [urf_u, urf_r, urf_f] = CORNER_FACELETS[0];
        let [ufl_u, ufl_f, ufl_l] = CORNER_FACELETS[1];
        let mut chars: Vec<char> = SOLVED.chars().collect();
        // UFL becomes a second URF (U, F, R clockwise from its U sticker)
        chars[ufl_u] = chars[urf_u];
        chars[ufl_f] = chars[urf_r];
        chars[ufl_l] = chars[urf_f];
        // Keep nine of each color by turning the UBR corner into a second DBL
        let [_, _, ubr_r] = CORNER_FACELETS[3];
        chars[ubr_r] = 'L';
        let duplicated: String = chars.into_iter().collect();
        assert_eq!(
            from_facelets(&duplicated),
            Err(ValidationError::MissingCorner)
        );
    }

    #[test]
    fn test_corner_with_u_and_d_swapped_is_rejected() {
        let swapped = swap_stickers(SOLVED, facelet(U, 1), facelet(D, 1));
        assert_eq!(
            from_facelets(&swapped),
            Err(ValidationError::MissingCorner)
        );
    }
}
