use once_cell::sync::Lazy;

use crate::types::{BOARD_SIZE, Move, MoveKind, Outcome, Player, Position};

const SIZE: usize = BOARD_SIZE as usize;
pub const NUM_CELLS: usize = SIZE * SIZE;
const FULL_MASK: u64 = (1u64 << NUM_CELLS) - 1;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Geometry of a single cell, independent of what is on the board.
struct CellGeometry {
    /// Copy and jump destinations in direction order, copy before jump.
    targets: Vec<(usize, MoveKind)>,
    /// The up-to-8 adjacent cells.
    neighbors: u64,
    /// Every destination in `targets`.
    reach: u64,
}

static GEOMETRY: Lazy<Vec<CellGeometry>> =
    Lazy::new(|| (0..NUM_CELLS).map(cell_geometry).collect());

fn cell_geometry(pos: usize) -> CellGeometry {
    let (row, col) = pos_to_row_col(pos);
    let mut targets = Vec::with_capacity(16);
    let mut neighbors = 0u64;

    for (dr, dc) in DIRECTIONS {
        if in_bounds(row + dr, col + dc) {
            let near = row_col_to_pos(row + dr, col + dc);
            targets.push((near, MoveKind::Copy));
            neighbors |= bit(near);
        }
        if in_bounds(row + 2 * dr, col + 2 * dc) {
            targets.push((row_col_to_pos(row + 2 * dr, col + 2 * dc), MoveKind::Jump));
        }
    }

    let reach = targets.iter().fold(0u64, |acc, &(to, _)| acc | bit(to));
    CellGeometry {
        targets,
        neighbors,
        reach,
    }
}

/// Bacteria board state represented by two bitboards over 49 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    one: u64,
    two: u64,
}

impl Board {
    /// Creates the seed board: player one in (0,0) and (6,6),
    /// player two in (0,6) and (6,0).
    pub fn new() -> Self {
        Self {
            one: bit(row_col_to_pos(0, 0)) | bit(row_col_to_pos(6, 6)),
            two: bit(row_col_to_pos(0, 6)) | bit(row_col_to_pos(6, 0)),
        }
    }

    pub fn empty() -> Self {
        Self { one: 0, two: 0 }
    }

    /// Builds a board from raw masks. Bits above the grid are dropped and
    /// cells claimed by both masks go to player one.
    pub fn from_bitboards(one: u64, two: u64) -> Self {
        let one = one & FULL_MASK;
        Self {
            one,
            two: two & FULL_MASK & !one,
        }
    }

    pub fn get(&self, pos: Position) -> Option<Player> {
        if !pos.is_on_board() {
            return None;
        }
        let square = bit(pos.index());
        if (self.one & square) != 0 {
            Some(Player::One)
        } else if (self.two & square) != 0 {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// Off-board positions are ignored.
    pub fn set(&mut self, pos: Position, cell: Option<Player>) {
        if !pos.is_on_board() {
            return;
        }
        let square = bit(pos.index());
        self.one &= !square;
        self.two &= !square;
        match cell {
            Some(Player::One) => self.one |= square,
            Some(Player::Two) => self.two |= square,
            None => {}
        }
    }

    /// Returns `(player_one_count, player_two_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.one.count_ones() as u8, self.two.count_ones() as u8)
    }

    pub fn count_for(&self, player: Player) -> u8 {
        self.mask(player).count_ones() as u8
    }

    /// Converts board to `[u8; 49]` where 0=empty, 1=player one, 2=player two.
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        let mut cells = [0u8; NUM_CELLS];
        for (pos, cell) in cells.iter_mut().enumerate() {
            *cell = self.get(Position::from_index(pos)).map_or(0, Player::tag);
        }
        cells
    }

    /// Legal destinations for the piece at `from`, in direction order with
    /// the copy candidate ahead of the jump candidate. Only the destination
    /// has to be empty; ownership of `from` is the caller's concern.
    pub fn valid_moves(&self, from: Position) -> Vec<Move> {
        if !from.is_on_board() {
            return Vec::new();
        }

        let empty = self.empty_mask();
        GEOMETRY[from.index()]
            .targets
            .iter()
            .filter(|&&(to, _)| (empty & bit(to)) != 0)
            .map(|&(to, kind)| Move {
                from,
                to: Position::from_index(to),
                kind,
            })
            .collect()
    }

    /// Every move available to `player`, origins in row-major order.
    pub fn all_moves(&self, player: Player) -> Vec<Move> {
        bitmask_to_indices(self.mask(player))
            .into_iter()
            .flat_map(|pos| self.valid_moves(Position::from_index(pos)))
            .collect()
    }

    pub fn has_moves(&self, player: Player) -> bool {
        let empty = self.empty_mask();
        bitmask_to_indices(self.mask(player))
            .into_iter()
            .any(|pos| (GEOMETRY[pos].reach & empty) != 0)
    }

    /// Enemy cells that a move by `player` landing on `to` would convert.
    pub fn conversions(&self, to: Position, player: Player) -> Vec<Position> {
        if !to.is_on_board() {
            return Vec::new();
        }
        let (_, opp) = self.sides(player);
        bitmask_to_indices(GEOMETRY[to.index()].neighbors & opp)
            .into_iter()
            .map(Position::from_index)
            .collect()
    }

    /// Returns the board after `player` plays `mv`. A move two cells away
    /// vacates the origin; a move to an adjacent cell keeps it. The distance
    /// decides, not `mv.kind`. Every enemy cell adjacent to the destination,
    /// diagonals included, changes owner.
    ///
    /// Caller contract: `mv` came from `valid_moves`.
    pub fn apply_move(&self, mv: Move, player: Player) -> Board {
        let (mut me, mut opp) = self.sides(player);
        let from = bit(mv.from.index());
        let to = bit(mv.to.index());

        if mv.from.distance(mv.to) == 2 {
            me &= !from;
        } else {
            me |= from;
        }
        opp &= !from;

        me |= to;
        opp &= !to;

        let converted = GEOMETRY[mv.to.index()].neighbors & opp;
        me |= converted;
        opp &= !converted;

        Self::from_sides(player, me, opp)
    }

    /// The game ends when either side has no cells left, or when no owned
    /// cell anywhere on the board has a legal move.
    pub fn is_game_over(&self) -> bool {
        let (one_count, two_count) = self.count();
        if one_count == 0 || two_count == 0 {
            return true;
        }

        !self.has_moves(Player::One) && !self.has_moves(Player::Two)
    }

    /// Winner or tie by cell count. `None` while the game is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_game_over() {
            return None;
        }

        let (one_count, two_count) = self.count();
        Some(if one_count > two_count {
            Outcome::Winner(Player::One)
        } else if two_count > one_count {
            Outcome::Winner(Player::Two)
        } else {
            Outcome::Tie
        })
    }

    fn mask(&self, player: Player) -> u64 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::One => (self.one, self.two),
            Player::Two => (self.two, self.one),
        }
    }

    fn from_sides(player: Player, me: u64, opp: u64) -> Self {
        match player {
            Player::One => Self { one: me, two: opp },
            Player::Two => Self { one: opp, two: me },
        }
    }

    fn empty_mask(&self) -> u64 {
        !(self.one | self.two) & FULL_MASK
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_CELLS { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / SIZE) as i32, (pos % SIZE) as i32)
}

fn row_col_to_pos(row: i32, col: i32) -> usize {
    row as usize * SIZE + col as usize
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..SIZE as i32).contains(&row) && (0..SIZE as i32).contains(&col)
}

fn bitmask_to_indices(mask: u64) -> Vec<usize> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        out.push(bits.trailing_zeros() as usize);
        bits &= bits - 1;
    }

    out
}
