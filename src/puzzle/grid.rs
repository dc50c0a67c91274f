//! The Binairo grid state: board values, per-cell domain bitmasks, and
//! running row/column parity counters.
//!
//! A [`Grid`] is the unit of ownership in the search: every trial assignment
//! works on a fresh deep copy (a plain `clone`), so a failed branch is
//! discarded wholesale and no undo log is needed. The cost is an O(n²) copy
//! per search node.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Domain bit for the value `0`.
pub const MASK_ZERO: u8 = 0b01;
/// Domain bit for the value `1`.
pub const MASK_ONE: u8 = 0b10;
/// Both values still possible.
pub const MASK_BOTH: u8 = 0b11;

/// One of the two cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Both values, in ascending order. Domain enumeration relies on this
    /// ordering.
    pub const VALUES: [Bit; 2] = [Bit::Zero, Bit::One];

    /// The domain-mask bit for this value.
    pub fn mask(self) -> u8 {
        match self {
            Bit::Zero => MASK_ZERO,
            Bit::One => MASK_ONE,
        }
    }

    pub fn digit(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

/// A cell coordinate; the "variable" of the CSP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A candidate assignment: place `value` at `(row, col)`.
///
/// Ephemeral — produced by variable/value selection, consumed immediately by
/// validation and application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub value: Bit,
}

impl Move {
    pub fn new(row: usize, col: usize, value: Bit) -> Self {
        Self { row, col, value }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) -> {}", self.row, self.col, self.value.digit())
    }
}

/// The full search-node state for an n×n Binairo board.
///
/// Invariants:
/// - an assigned cell's mask is the singleton matching its value;
/// - an empty cell's mask holds every value not yet proven impossible;
/// - the parity counters equal the number of assigned zeros/ones per
///   row/column;
/// - a mask of zero bits marks an unsatisfiable branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    n: usize,
    cells: Vec<Option<Bit>>,
    masks: Vec<u8>,
    row_zeros: Vec<u16>,
    row_ones: Vec<u16>,
    col_zeros: Vec<u16>,
    col_ones: Vec<u16>,
}

impl Grid {
    /// Creates an empty grid. The side length must be positive and even;
    /// anything else is rejected before any state is built.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 || n % 2 != 0 {
            return Err(Error::InvalidSize(n));
        }
        Ok(Self {
            n,
            cells: vec![None; n * n],
            masks: vec![MASK_BOTH; n * n],
            row_zeros: vec![0; n],
            row_ones: vec![0; n],
            col_zeros: vec![0; n],
            col_ones: vec![0; n],
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Half the side length: the per-row/column cap on each value.
    pub fn half(&self) -> u16 {
        (self.n / 2) as u16
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.n && col < self.n);
        row * self.n + col
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Bit> {
        self.cells[self.idx(row, col)]
    }

    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        self.cells[self.idx(row, col)].is_none()
    }

    /// Raw board write used for temporary trial placements by the rules.
    /// Leaves counters and masks untouched; callers restore the old value.
    pub(crate) fn set_cell(&mut self, row: usize, col: usize, value: Option<Bit>) {
        let idx = self.idx(row, col);
        self.cells[idx] = value;
    }

    /// Applies an assignment: writes the cell, bumps the parity counters,
    /// and collapses the domain to the chosen value.
    pub fn place(&mut self, mv: Move) {
        debug_assert!(self.is_empty_cell(mv.row, mv.col));
        let idx = self.idx(mv.row, mv.col);
        self.cells[idx] = Some(mv.value);
        match mv.value {
            Bit::Zero => {
                self.row_zeros[mv.row] += 1;
                self.col_zeros[mv.col] += 1;
            }
            Bit::One => {
                self.row_ones[mv.row] += 1;
                self.col_ones[mv.col] += 1;
            }
        }
        self.collapse_domain(mv.row, mv.col, mv.value);
    }

    /// Un-assigns a cell: decrements the matching counters, empties the
    /// cell, and resets its domain to both values. Used by hole punching
    /// and manual play; a no-op on an already empty cell.
    pub fn clear(&mut self, row: usize, col: usize) {
        let idx = self.idx(row, col);
        match self.cells[idx] {
            Some(Bit::Zero) => {
                self.row_zeros[row] -= 1;
                self.col_zeros[col] -= 1;
            }
            Some(Bit::One) => {
                self.row_ones[row] -= 1;
                self.col_ones[col] -= 1;
            }
            None => return,
        }
        self.cells[idx] = None;
        self.reset_domain(row, col);
    }

    /// Number of values still possible for a cell: 0, 1 or 2.
    pub fn domain_size(&self, row: usize, col: usize) -> usize {
        self.masks[self.idx(row, col)].count_ones() as usize
    }

    pub fn domain_allows(&self, row: usize, col: usize, value: Bit) -> bool {
        self.masks[self.idx(row, col)] & value.mask() != 0
    }

    /// Sets the mask to the singleton for `value`.
    pub fn collapse_domain(&mut self, row: usize, col: usize, value: Bit) {
        let idx = self.idx(row, col);
        self.masks[idx] = value.mask();
    }

    /// Restores the full `{0, 1}` domain.
    pub fn reset_domain(&mut self, row: usize, col: usize) {
        let idx = self.idx(row, col);
        self.masks[idx] = MASK_BOTH;
    }

    pub(crate) fn remove_from_domain(&mut self, row: usize, col: usize, value: Bit) {
        let idx = self.idx(row, col);
        self.masks[idx] &= !value.mask();
    }

    /// Count of `value` assigned in a row.
    pub fn row_count(&self, row: usize, value: Bit) -> u16 {
        match value {
            Bit::Zero => self.row_zeros[row],
            Bit::One => self.row_ones[row],
        }
    }

    /// Count of `value` assigned in a column.
    pub fn col_count(&self, col: usize, value: Bit) -> u16 {
        match value {
            Bit::Zero => self.col_zeros[col],
            Bit::One => self.col_ones[col],
        }
    }

    pub fn assigned_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// The cells of one row, in column order.
    pub fn row_slice(&self, row: usize) -> &[Option<Bit>] {
        &self.cells[row * self.n..(row + 1) * self.n]
    }

    /// True iff no two fully-assigned rows are identical, and likewise for
    /// columns. Rows/columns containing an empty cell are skipped.
    pub fn rows_and_cols_unique(&self) -> bool {
        let mut rows: HashSet<&[Option<Bit>]> = HashSet::with_capacity(self.n);
        for r in 0..self.n {
            let row = self.row_slice(r);
            if row.iter().all(|c| c.is_some()) && !rows.insert(row) {
                return false;
            }
        }
        let mut cols: HashSet<Vec<Option<Bit>>> = HashSet::with_capacity(self.n);
        for c in 0..self.n {
            let col: Vec<Option<Bit>> = (0..self.n).map(|r| self.cell(r, c)).collect();
            if col.iter().all(|v| v.is_some()) && !cols.insert(col) {
                return false;
            }
        }
        true
    }
}

/// Renders the board in the fixed textual format consumed by manual-play
/// and generation-preview tooling: a column-index header, then one line per
/// row prefixed by its index, each cell as its digit or `.`, every token
/// followed by a single space.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.n {
            write!(f, "{} ", col)?;
        }
        writeln!(f)?;
        for row in 0..self.n {
            write!(f, "{} ", row)?;
            for col in 0..self.n {
                match self.cell(row, col) {
                    Some(bit) => write!(f, "{} ", bit.digit())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the compact fixture form: one line per row, each cell `0`, `1` or
/// `.`, whitespace between cells ignored.
impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect())
            .filter(|row: &Vec<char>| !row.is_empty())
            .collect();
        let n = rows.len();
        let mut grid = Grid::new(n)?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::MalformedGrid(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    n
                )));
            }
            for (c, ch) in row.iter().enumerate() {
                match ch {
                    '.' => {}
                    '0' => grid.place(Move::new(r, c, Bit::Zero)),
                    '1' => grid.place(Move::new(r, c, Bit::One)),
                    other => {
                        return Err(Error::MalformedGrid(format!(
                            "unexpected character {:?} at row {}, column {}",
                            other, r, c
                        )))
                    }
                }
            }
        }
        Ok(grid)
    }
}
