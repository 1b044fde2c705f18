//! Board state representation and pure transitions

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use super::{game::GameOutcome, lines::LineAnalyzer};
use crate::{Error, Result};

/// Number of cells on the 3x3 board
pub const BOARD_SIZE: usize = 9;

/// Readable names of the board positions, indexed by action
pub const CELL_NAMES: [&str; BOARD_SIZE] = [
    "top-left",
    "top-center",
    "top-right",
    "middle-left",
    "center",
    "middle-right",
    "bottom-left",
    "bottom-center",
    "bottom-right",
];

/// A cell on the Tic-Tac-Toe board
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Both players in turn order
    pub const ALL: [Player; 2] = [Player::X, Player::O];

    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Dense index (X = 0, O = 1) for per-player arrays
    pub fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// Value-table key: the board contents only.
///
/// The player to move is implied by piece parity and is not part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey([Cell; BOARD_SIZE]);

impl StateKey {
    pub fn new(cells: [Cell; BOARD_SIZE]) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.0
    }
}

impl From<&GameState> for StateKey {
    fn from(state: &GameState) -> Self {
        StateKey(state.cells)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.0 {
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

/// A single position: board contents, player to move and a move counter.
///
/// The move counter is diagnostic only. Equality and hashing consider the
/// board and the player to move.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameState {
    cells: [Cell; BOARD_SIZE],
    to_move: Player,
    move_count: u32,
}

impl GameState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        GameState {
            cells: [Cell::Empty; BOARD_SIZE],
            to_move: Player::X,
            move_count: 0,
        }
    }

    /// Create a board from a string of 9 cells (`.`/`-` empty, `X`, `O`).
    ///
    /// Whitespace is ignored. The player to move and the move counter are
    /// inferred from the piece counts, assuming X opened.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoard`] if the string does not hold exactly 9
    /// cells, contains an unknown character, or has impossible piece counts.
    pub fn from_string(s: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidBoard {
            input: s.to_string(),
            reason,
        };

        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != BOARD_SIZE {
            return Err(invalid(format!(
                "expected {BOARD_SIZE} cells, got {}",
                chars.len()
            )));
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c)
                .ok_or_else(|| invalid(format!("invalid character '{c}' at position {i}")))?;
        }

        let x = cells.iter().filter(|&&c| c == Cell::X).count();
        let o = cells.iter().filter(|&&c| c == Cell::O).count();
        let to_move = if x == o {
            Player::X
        } else if x == o + 1 {
            Player::O
        } else {
            return Err(invalid(format!(
                "piece counts X={x}, O={o} (must be equal or X ahead by 1)"
            )));
        };

        Ok(GameState {
            cells,
            to_move,
            move_count: (x + o) as u32,
        })
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Get cell at position (0-8)
    pub fn cell(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Player whose mark the next transition places
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Number of transitions applied since the empty board
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Value-table key for this position
    pub fn key(&self) -> StateKey {
        StateKey::from(self)
    }

    /// All empty positions in ascending order.
    ///
    /// A won board with empty cells still reports them; use
    /// [`GameState::is_terminal`] to decide whether play may continue.
    pub fn legal_actions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check whether `pos` is on the board and empty
    pub fn is_legal(&self, pos: usize) -> bool {
        pos < BOARD_SIZE && self.cells[pos] == Cell::Empty
    }

    /// Check if a player has three in a row
    pub fn is_winner(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        Player::ALL.into_iter().find(|&p| self.is_winner(p))
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || !self.cells.contains(&Cell::Empty)
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty) && self.winner().is_none()
    }

    /// Outcome of a terminal position, `None` while the game is running
    pub fn outcome(&self) -> Option<GameOutcome> {
        if let Some(winner) = self.winner() {
            Some(GameOutcome::Win(winner))
        } else if self.is_draw() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Place the mover's mark at `pos` and return the successor state.
    ///
    /// # Errors
    ///
    /// - [`Error::IllegalAction`] if `pos` is outside 0-8 or occupied
    /// - [`Error::GameOver`] if this position is already terminal
    #[must_use = "transition returns a new state; the original is unchanged"]
    pub fn transition(&self, pos: usize) -> Result<GameState> {
        if pos >= BOARD_SIZE {
            return Err(Error::out_of_bounds(pos));
        }
        if self.cells[pos] != Cell::Empty {
            return Err(Error::occupied(pos));
        }
        if self.is_terminal() {
            return Err(Error::GameOver);
        }

        let mut next = *self;
        next.cells[pos] = self.to_move.to_cell();
        next.to_move = self.to_move.opponent();
        next.move_count = self.move_count + 1;
        Ok(next)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells && self.to_move == other.to_move
    }
}

impl Eq for GameState {}

impl Hash for GameState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
        self.to_move.hash(state);
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[usize]) -> GameState {
        moves
            .iter()
            .fold(GameState::new(), |state, &pos| state.transition(pos).unwrap())
    }

    #[test]
    fn test_new_board() {
        let board = GameState::new();
        assert_eq!(board.to_move(), Player::X);
        assert_eq!(board.move_count(), 0);
        assert!(board.cells().iter().all(|&c| c == Cell::Empty));
        assert_eq!(board.legal_actions(), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_transition_changes_exactly_one_cell() {
        let board = play(&[4, 0]);
        let next = board.transition(8).unwrap();

        let changed: Vec<usize> = (0..9).filter(|&i| board.cell(i) != next.cell(i)).collect();
        assert_eq!(changed, vec![8]);
        assert_eq!(next.cell(8), Cell::X);
        assert_eq!(next.to_move(), Player::O);
        assert_eq!(next.move_count(), board.move_count() + 1);
    }

    #[test]
    fn test_transition_is_pure() {
        let board = play(&[0, 4]);
        let before = board;
        let a = board.transition(2).unwrap();
        let b = board.transition(2).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.move_count(), b.move_count());
        assert_eq!(board, before);
        assert_eq!(board.move_count(), 2);
    }

    #[test]
    fn test_transition_rejects_occupied_cell() {
        let board = play(&[4]);
        let err = board.transition(4).unwrap_err();
        assert!(matches!(err, Error::IllegalAction { position: 4, .. }));
        assert!(err.to_string().contains("occupied"));
        assert_eq!(board.cell(4), Cell::X);
        assert_eq!(board.to_move(), Player::O);
    }

    #[test]
    fn test_transition_rejects_out_of_bounds() {
        let err = GameState::new().transition(9).unwrap_err();
        assert!(matches!(err, Error::IllegalAction { position: 9, .. }));
    }

    #[test]
    fn test_transition_rejects_finished_game() {
        // X wins on the top row with cells left
        let board = play(&[0, 3, 1, 4, 2]);
        assert!(board.is_terminal());
        assert!(matches!(board.transition(8), Err(Error::GameOver)));
    }

    #[test]
    fn test_win_detection_every_line() {
        for line in crate::tictactoe::WINNING_LINES {
            for player in Player::ALL {
                let mut cells = [Cell::Empty; BOARD_SIZE];
                for idx in line {
                    cells[idx] = player.to_cell();
                }
                let board = GameState {
                    cells,
                    to_move: player.opponent(),
                    move_count: 3,
                };
                assert!(board.is_winner(player), "{line:?} for {player}");
                assert!(!board.is_winner(player.opponent()));
                assert!(board.is_terminal());
            }
        }
    }

    #[test]
    fn test_no_winner_without_full_line() {
        let board = GameState::from_string("XX.OO....").unwrap();
        assert!(!board.is_winner(Player::X));
        assert!(!board.is_winner(Player::O));
        assert!(!board.is_terminal());
        assert_eq!(board.outcome(), None);
    }

    #[test]
    fn test_draw_detection() {
        let board = play(&[0, 1, 2, 4, 3, 6, 5, 8, 7]);
        assert!(board.is_terminal());
        assert!(board.is_draw());
        assert!(board.legal_actions().is_empty());
        assert_eq!(board.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_early_win_is_terminal() {
        let board = play(&[0, 1, 2, 4, 5, 7]);
        assert_eq!(board.winner(), Some(Player::O));
        assert!(!board.legal_actions().is_empty());
        assert!(board.is_terminal());
        assert_eq!(board.outcome(), Some(GameOutcome::Win(Player::O)));
    }

    #[test]
    fn test_equality_ignores_move_counter() {
        let a = GameState::from_string("X........").unwrap();
        let b = GameState::new().transition(0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_from_string_rejects_bad_input() {
        assert!(GameState::from_string("XO").is_err());
        assert!(GameState::from_string("XOZ......").is_err());
        assert!(GameState::from_string("XXX......").is_err());
    }

    #[test]
    fn test_key_display() {
        let board = play(&[4, 0]);
        assert_eq!(board.key().to_string(), "O...X....");
        assert_eq!(format!("{board}"), "O..\n.X.\n...");
    }
}
