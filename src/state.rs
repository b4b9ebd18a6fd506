//! Game state: whose turn it is, stone reserves, and the board.

use std::fmt;

use crate::board::{Board, Color, Square};
use crate::constants::DEFAULT_STONES;

/// A snapshot of the game.
///
/// States are values: the rules engine never mutates a state it is given and
/// returns a fresh one for every transition. For each color, pieces on the
/// board plus stones in reserve equals the starting allotment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State {
    /// Player who acts next
    pub to_move: Color,
    /// Stones left in Black's reserve
    pub black_stones: u32,
    /// Stones left in White's reserve
    pub white_stones: u32,
    pub board: Board,
}

impl Default for State {
    fn default() -> Self {
        default_initial_state(Color::Black, DEFAULT_STONES)
    }
}

impl State {
    /// Stones left in `color`'s reserve.
    #[inline]
    pub fn stones(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black_stones,
            Color::White => self.white_stones,
        }
    }

    pub(crate) fn stones_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::Black => &mut self.black_stones,
            Color::White => &mut self.white_stones,
        }
    }
}

/// An empty board with `stones_per_player` stones for each side.
pub fn default_initial_state(starting_color: Color, stones_per_player: u32) -> State {
    State {
        to_move: starting_color,
        black_stones: stones_per_player,
        white_stones: stones_per_player,
        board: Board::new(),
    }
}

/// Fixed-width rendering of one square. Stacks taller than three show the
/// number of hidden pieces followed by the top two.
fn square_str(sq: &Square) -> String {
    let codes: Vec<&str> = sq.pieces().iter().map(|p| p.code()).collect();
    match codes.as_slice() {
        [] => "[          ]".to_string(),
        [a] => format!("[        {a}]"),
        [a, b] => format!("[    {a}, {b}]"),
        [a, b, c] => format!("[{a}, {b}, {c}]"),
        [rest @ .., a, b] => format!("[({:02}){a}, {b}]", rest.len()),
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "To Move:\t{}", self.to_move)?;
        writeln!(f, "White Stones:\t{}", self.white_stones)?;
        writeln!(f, "Black Stones:\t{}", self.black_stones)?;
        writeln!(f, "Board:")?;
        let squares: Vec<String> = self.board.iter().map(|(_, sq)| square_str(sq)).collect();
        for row in squares.chunks(crate::constants::BOARD_SIZE) {
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
