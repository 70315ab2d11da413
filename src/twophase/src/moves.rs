//! The 18 face turns and sequences of them. Notation is only parsed and
//! printed here; everything else works on `Move` values.

use crate::error::NotationError;
use itertools::Itertools;
use std::{
    fmt::{self, Display},
    ops::Deref,
    str::FromStr,
};

/// The six faces, ordered so that `face as usize + 3` is the opposite face
/// for the first three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Power {
    Clockwise,
    Half,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub face: Face,
    pub power: Power,
}

/// An ordered list of moves. Composition is concatenation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MoveSequence(Vec<Move>);

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, R, F, D, L, B];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub fn opposite(self) -> Self {
        Self::ALL[(self as usize + 3) % 6]
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|face| face.letter() == letter)
    }
}

impl Power {
    pub const ALL: [Self; 3] = [Power::Clockwise, Power::Half, Power::CounterClockwise];

    #[must_use]
    pub fn quarter_turns(self) -> usize {
        self as usize + 1
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Power::Clockwise => Power::CounterClockwise,
            Power::Half => Power::Half,
            Power::CounterClockwise => Power::Clockwise,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Power::Clockwise => "",
            Power::Half => "2",
            Power::CounterClockwise => "'",
        }
    }
}

impl Move {
    pub const COUNT: usize = 18;

    /// Every move, indexed by `3 * face + power`.
    pub const ALL: [Self; Self::COUNT] = {
        let mut moves = [Move {
            face: Face::U,
            power: Power::Clockwise,
        }; Self::COUNT];
        let mut i = 0;
        while i < Self::COUNT {
            moves[i] = Move {
                face: Face::ALL[i / 3],
                power: Power::ALL[i % 3],
            };
            i += 1;
        }
        moves
    };

    #[must_use]
    pub fn new(face: Face, power: Power) -> Self {
        Self { face, power }
    }

    #[must_use]
    pub fn index(self) -> usize {
        3 * self.face as usize + self.power as usize
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            face: self.face,
            power: self.power.inverse(),
        }
    }

    /// Whether the move keeps a cube inside `<U, D, R2, F2, L2, B2>`.
    #[must_use]
    pub fn preserves_g1(self) -> bool {
        matches!(self.face, Face::U | Face::D) || self.power == Power::Half
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.power.suffix())
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(NotationError::Empty)?;
        let face = Face::from_letter(letter).ok_or(NotationError::UnknownFace(letter))?;
        let power = match chars.as_str() {
            "" => Power::Clockwise,
            "2" | "2'" | "'2" => Power::Half,
            "'" => Power::CounterClockwise,
            suffix => {
                return Err(NotationError::UnknownSuffix {
                    token: s.to_owned(),
                    suffix: suffix.to_owned(),
                });
            }
        };
        Ok(Self { face, power })
    }
}

impl MoveSequence {
    /// The sequence that undoes this one: reversed, each move inverted.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self(self.0.iter().rev().map(|move_| move_.inverse()).collect())
    }

    /// A sequence of `len` uniformly chosen moves in which no move turns the
    /// same face as the one before it or that face's opposite. This is not
    /// uniform over cube states; see `scramble::scramble_with_rng` for that.
    pub fn random_moves(rng: &mut fastrand::Rng, len: usize) -> Self {
        let mut moves = Vec::with_capacity(len);
        let mut last: Option<Face> = None;
        while moves.len() < len {
            let move_ = Move::ALL[rng.usize(..Move::COUNT)];
            if last.is_some_and(|face| face == move_.face || face.opposite() == move_.face) {
                continue;
            }
            last = Some(move_.face);
            moves.push(move_);
        }
        Self(moves)
    }
}

impl Deref for MoveSequence {
    type Target = [Move];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveSequence {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromStr for MoveSequence {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().map(str::parse).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_indices_are_dense() {
        for (i, move_) in Move::ALL.into_iter().enumerate() {
            assert_eq!(move_.index(), i);
        }
    }

    #[test]
    fn test_parse_and_print() {
        let seq: MoveSequence = "R U2  F' D2' L'2 B".parse().unwrap();
        assert_eq!(seq.to_string(), "R U2 F' D2 L2 B");
        assert_eq!(seq.len(), 6);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            "R X".parse::<MoveSequence>(),
            Err(NotationError::UnknownFace('X'))
        );
        assert!(matches!(
            "R3".parse::<MoveSequence>(),
            Err(NotationError::UnknownSuffix { .. })
        ));
        assert_eq!("".parse::<MoveSequence>(), Ok(MoveSequence::default()));
    }

    #[test]
    fn test_inverse_reverses_and_inverts() {
        let seq: MoveSequence = "R U2 F'".parse().unwrap();
        assert_eq!(seq.inverse().to_string(), "F U2 R'");
    }

    #[test]
    fn test_double_inverse_is_identity() {
        let mut rng = fastrand::Rng::with_seed(42);
        for len in 0..30 {
            let seq = MoveSequence::random_moves(&mut rng, len);
            assert_eq!(seq.inverse().inverse(), seq);
        }
    }

    #[test]
    fn test_random_moves_never_repeat_an_axis() {
        let mut rng = fastrand::Rng::with_seed(1);
        let seq = MoveSequence::random_moves(&mut rng, 500);
        assert_eq!(seq.len(), 500);
        for (a, b) in seq.iter().tuple_windows() {
            assert_ne!(a.face, b.face);
            assert_ne!(a.face.opposite(), b.face);
        }
    }

    #[test]
    fn test_g1_moves() {
        let g1 = Move::ALL
            .into_iter()
            .filter(|move_| move_.preserves_g1())
            .join(" ");
        assert_eq!(g1, "U U2 U' R2 F2 D D2 D' L2 B2");
    }
}
