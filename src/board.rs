//! Board model: colors, pieces, squares, and the 4x4 grid.
//!
//! A square is a stack of pieces listed bottom-to-top. The last piece is the
//! top of the stack and decides who controls the square and whether it is a
//! wall.

use std::fmt;

use crate::constants::BOARD_SIZE;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Whether a piece lies flat or stands as a wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Flat,
    Standing,
}

/// One of the four concrete pieces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    BlackFlat,
    BlackStanding,
    WhiteFlat,
    WhiteStanding,
}

impl Piece {
    pub fn new(kind: Kind, color: Color) -> Self {
        match (kind, color) {
            (Kind::Flat, Color::Black) => Piece::BlackFlat,
            (Kind::Standing, Color::Black) => Piece::BlackStanding,
            (Kind::Flat, Color::White) => Piece::WhiteFlat,
            (Kind::Standing, Color::White) => Piece::WhiteStanding,
        }
    }

    #[inline]
    pub fn kind(self) -> Kind {
        match self {
            Piece::BlackFlat | Piece::WhiteFlat => Kind::Flat,
            Piece::BlackStanding | Piece::WhiteStanding => Kind::Standing,
        }
    }

    #[inline]
    pub fn color(self) -> Color {
        match self {
            Piece::BlackFlat | Piece::BlackStanding => Color::Black,
            Piece::WhiteFlat | Piece::WhiteStanding => Color::White,
        }
    }

    #[inline]
    pub fn is_standing(self) -> bool {
        self.kind() == Kind::Standing
    }

    /// Two-letter code used when printing a board: `bf`, `bs`, `wf`, `ws`.
    pub fn code(self) -> &'static str {
        match self {
            Piece::BlackFlat => "bf",
            Piece::BlackStanding => "bs",
            Piece::WhiteFlat => "wf",
            Piece::WhiteStanding => "ws",
        }
    }
}

/// A board coordinate.
///
/// Components are signed so that candidate moves running off the board can be
/// represented and then rejected by validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        let n = BOARD_SIZE as i8;
        (0..n).contains(&self.row) && (0..n).contains(&self.col)
    }

    /// The coordinate `steps` squares away in direction `(drow, dcol)`.
    #[inline]
    pub fn offset(self, (drow, dcol): (i8, i8), steps: i8) -> Self {
        Self::new(self.row + drow * steps, self.col + dcol * steps)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A stack of pieces, bottom first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Square {
    pieces: Vec<Piece>,
}

impl Square {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pieces(pieces: &[Piece]) -> Self {
        Self {
            pieces: pieces.to_vec(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pieces.len()
    }

    /// The piece on top of the stack, if any.
    #[inline]
    pub fn top(&self) -> Option<Piece> {
        self.pieces.last().copied()
    }

    /// True if the top piece belongs to `color`.
    #[inline]
    pub fn is_controlled_by(&self, color: Color) -> bool {
        self.top().is_some_and(|p| p.color() == color)
    }

    /// True if the top piece is a wall of either color.
    #[inline]
    pub fn is_wall(&self) -> bool {
        self.top().is_some_and(Piece::is_standing)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn push(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    /// Append `pieces` on top, preserving their order.
    pub fn extend_from_slice(&mut self, pieces: &[Piece]) {
        self.pieces.extend_from_slice(pieces);
    }

    /// Remove the top `count` pieces and return them bottom first.
    ///
    /// Callers must ensure `count <= self.height()`.
    pub fn take_top(&mut self, count: usize) -> Vec<Piece> {
        let split = self.pieces.len() - count;
        self.pieces.split_off(split)
    }
}

/// The 4x4 grid of squares, indexed `[row][col]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// The square at `coord`, or `None` if it is off the board.
    pub fn get(&self, coord: Coord) -> Option<&Square> {
        if !coord.in_bounds() {
            return None;
        }
        Some(&self.squares[coord.row as usize][coord.col as usize])
    }

    /// Mutable access to the square at `coord`, or `None` if it is off the board.
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Square> {
        if !coord.in_bounds() {
            return None;
        }
        Some(&mut self.squares[coord.row as usize][coord.col as usize])
    }

    /// Iterate over all squares together with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Square)> + '_ {
        self.squares.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, sq)| (Coord::new(r as i8, c as i8), sq))
        })
    }

    pub fn has_empty_square(&self) -> bool {
        self.iter().any(|(_, sq)| sq.is_empty())
    }

    /// Number of squares topped by a flat of `color`.
    pub fn count_flats(&self, color: Color) -> usize {
        let flat = Piece::new(Kind::Flat, color);
        self.iter().filter(|(_, sq)| sq.top() == Some(flat)).count()
    }

    /// Number of pieces of `color` anywhere on the board, buried or not.
    pub fn count_pieces(&self, color: Color) -> usize {
        self.iter()
            .flat_map(|(_, sq)| sq.pieces().iter())
            .filter(|p| p.color() == color)
            .count()
    }

    /// Total number of pieces on the board.
    pub fn total_pieces(&self) -> usize {
        self.iter().map(|(_, sq)| sq.height()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_accessors() {
        assert_eq!(Piece::WhiteStanding.kind(), Kind::Standing);
        assert_eq!(Piece::WhiteStanding.color(), Color::White);
        assert_eq!(Piece::new(Kind::Flat, Color::Black), Piece::BlackFlat);
        assert!(!Piece::BlackFlat.is_standing());
    }

    #[test]
    fn test_take_top_preserves_order() {
        let mut sq = Square::from_pieces(&[
            Piece::BlackFlat,
            Piece::WhiteFlat,
            Piece::WhiteFlat,
            Piece::WhiteStanding,
        ]);
        let taken = sq.take_top(3);
        assert_eq!(
            taken,
            vec![Piece::WhiteFlat, Piece::WhiteFlat, Piece::WhiteStanding]
        );
        assert_eq!(sq.pieces(), &[Piece::BlackFlat]);
        assert!(sq.is_controlled_by(Color::Black));
    }

    #[test]
    fn test_board_bounds() {
        let board = Board::new();
        assert!(board.get(Coord::new(3, 3)).is_some());
        assert!(board.get(Coord::new(4, 0)).is_none());
        assert!(board.get(Coord::new(0, -1)).is_none());
        assert_eq!(board.iter().count(), BOARD_SIZE * BOARD_SIZE);
        assert!(board.has_empty_square());
    }

    #[test]
    fn test_count_flats_uses_top_piece() {
        let mut board = Board::new();
        let sq = board.get_mut(Coord::new(0, 0)).unwrap();
        sq.push(Piece::WhiteFlat);
        sq.push(Piece::BlackFlat);
        board.get_mut(Coord::new(1, 1)).unwrap().push(Piece::WhiteStanding);
        assert_eq!(board.count_flats(Color::Black), 1);
        assert_eq!(board.count_flats(Color::White), 0);
        assert_eq!(board.count_pieces(Color::White), 2);
        assert_eq!(board.total_pieces(), 3);
    }
}
