//! Road detection (edge-to-edge connectivity).
//!
//! A road for a color is a chain of orthogonally adjacent squares, each topped
//! by a flat of that color, joining the north edge to the south edge or the
//! east edge to the west edge. Walls break roads, including the owner's own.

use crate::board::{Board, Color, Coord, Kind};
use crate::constants::BOARD_SIZE;
use crate::state::State;

/// Which side of the board a search starts from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Edge {
    North,
    East,
}

impl Edge {
    fn start_squares(self) -> [Coord; BOARD_SIZE] {
        let last = BOARD_SIZE as i8 - 1;
        std::array::from_fn(|i| match self {
            Edge::North => Coord::new(0, i as i8),
            Edge::East => Coord::new(i as i8, last),
        })
    }

    /// True if `coord` lies on the edge opposite to `self`.
    fn is_goal(self, coord: Coord) -> bool {
        match self {
            Edge::North => coord.row == BOARD_SIZE as i8 - 1,
            Edge::East => coord.col == 0,
        }
    }
}

/// True if `coord` can carry a road for `color`.
#[inline]
pub fn is_road_square(board: &Board, coord: Coord, color: Color) -> bool {
    board
        .get(coord)
        .and_then(|sq| sq.top())
        .is_some_and(|p| p.color() == color && p.kind() == Kind::Flat)
}

/// Get the 4 orthogonal neighbors (S, N, E, W) of a coordinate, possibly off-board.
#[inline]
fn neighbors(c: Coord) -> [Coord; 4] {
    [
        Coord::new(c.row + 1, c.col),
        Coord::new(c.row - 1, c.col),
        Coord::new(c.row, c.col + 1),
        Coord::new(c.row, c.col - 1),
    ]
}

/// Breadth-first search from `start` toward the edge opposite `edge`.
fn has_road_from(board: &Board, start: Coord, edge: Edge, color: Color) -> bool {
    if !is_road_square(board, start, color) {
        return false;
    }

    let mut visited = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut queue = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
    visited[start.row as usize][start.col as usize] = true;
    queue.push(start);
    let mut head = 0;

    while head < queue.len() {
        let c = queue[head];
        head += 1;

        if edge.is_goal(c) {
            return true;
        }

        for n in neighbors(c) {
            if !is_road_square(board, n, color) {
                continue;
            }
            let seen = &mut visited[n.row as usize][n.col as usize];
            if !*seen {
                *seen = true;
                queue.push(n);
            }
        }
    }

    false
}

fn has_road(board: &Board, color: Color) -> bool {
    [Edge::North, Edge::East].into_iter().any(|edge| {
        edge.start_squares()
            .into_iter()
            .any(|start| has_road_from(board, start, edge, color))
    })
}

/// Report whether each color has completed a road: `(black, white)`.
pub fn get_path(state: &State) -> (bool, bool) {
    (
        has_road(&state.board, Color::Black),
        has_road(&state.board, Color::White),
    )
}
