//! Actions a player can take: place a new piece or move a stack.

use std::fmt;

use crate::board::{Coord, Piece};

/// A single player action.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Put a new piece from the player's reserve on an empty square.
    Place { coord: Coord, piece: Piece },
    /// Pick up `carry_size` pieces from `start` and drop them along a straight
    /// line ending at `end`. `drop_list[i]` pieces are left on the `i+1`th
    /// square after `start`.
    Move {
        start: Coord,
        end: Coord,
        carry_size: usize,
        drop_list: Vec<usize>,
    },
}

impl Action {
    pub fn place(coord: Coord, piece: Piece) -> Self {
        Action::Place { coord, piece }
    }

    pub fn movement(start: Coord, end: Coord, carry_size: usize, drop_list: Vec<usize>) -> Self {
        Action::Move {
            start,
            end,
            carry_size,
            drop_list,
        }
    }

    #[inline]
    pub fn is_place(&self) -> bool {
        matches!(self, Action::Place { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place { coord, piece } => write!(f, "place {} {}", piece.code(), coord),
            Action::Move {
                start,
                end,
                carry_size,
                drop_list,
            } => {
                write!(f, "move {carry_size} {start}->{end} drops")?;
                for d in drop_list {
                    write!(f, " {d}")?;
                }
                Ok(())
            }
        }
    }
}
