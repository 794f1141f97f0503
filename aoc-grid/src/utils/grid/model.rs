//! Rectangular character grid with bounds-checked cardinal movement.

use std::fmt;

use itertools::iproduct;

use super::error::GridError;

/// A cell coordinate, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four cardinal directions.
///
/// Declaration order is N, E, S, W; every iteration over directions in this
/// crate follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub const fn turn_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    pub const fn turn_right(self) -> Self {
        self.turn_left().reverse()
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// Row and column offset of one step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Single-bit mask, used for per-cell "seen heading" sets.
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Immutable-shape 2D array of ASCII cell symbols.
///
/// All rows have the same length. Cell contents may be rewritten in place
/// (tilt simulations do), but the dimensions never change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Parse newline-delimited text. Surrounding blank lines are ignored.
    ///
    /// Fails on empty input or when rows differ in length.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut lines = text.trim().lines();
        let first = lines.next().filter(|l| !l.is_empty()).ok_or(GridError::EmptyGrid)?;
        let cols = first.len();

        let mut cells = Vec::with_capacity(cols * cols);
        cells.extend_from_slice(first.as_bytes());
        let mut rows = 1;
        for line in lines {
            if line.len() != cols {
                return Err(GridError::RaggedRow {
                    row: rows,
                    expected: cols,
                    found: line.len(),
                });
            }
            cells.extend_from_slice(line.as_bytes());
            rows += 1;
        }

        Ok(Self { rows, cols, cells })
    }

    /// A grid of `rows × cols` cells all holding `symbol`.
    pub fn filled(rows: usize, cols: usize, symbol: u8) -> Self {
        Self {
            rows,
            cols,
            cells: vec![symbol; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Row-major index of an in-bounds position.
    pub(crate) fn index(&self, pos: Pos) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Symbol at `pos`, or `None` when out of bounds.
    pub fn at(&self, pos: Pos) -> Option<u8> {
        self.contains(pos).then(|| self.cells[self.index(pos)])
    }

    /// Symbol at a signed position on the grid repeated infinitely in both axes.
    pub fn at_wrapped(&self, row: i64, col: i64) -> u8 {
        let r = row.rem_euclid(self.rows as i64) as usize;
        let c = col.rem_euclid(self.cols as i64) as usize;
        self.cells[r * self.cols + c]
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut u8> {
        if self.contains(pos) {
            let i = self.index(pos);
            Some(&mut self.cells[i])
        } else {
            None
        }
    }

    /// One step from `pos`, or `None` when it would leave the grid.
    pub fn step(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let next = Pos::new(
            pos.row.checked_add_signed(dr)?,
            pos.col.checked_add_signed(dc)?,
        );
        self.contains(next).then_some(next)
    }

    /// In-bounds cardinal neighbours in N, E, S, W order.
    pub fn neighbors4(&self, pos: Pos) -> impl Iterator<Item = (Direction, Pos)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(pos, dir).map(|next| (dir, next)))
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        iproduct!(0..self.rows, 0..self.cols).map(|(row, col)| Pos::new(row, col))
    }

    /// First position (row-major) holding `symbol`.
    pub fn find(&self, symbol: u8) -> Option<Pos> {
        self.cells
            .iter()
            .position(|&c| c == symbol)
            .map(|i| Pos::new(i / self.cols, i % self.cols))
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Reject any symbol outside `allowed`.
    pub fn validate(&self, allowed: &[u8]) -> Result<(), GridError> {
        match self.cells.iter().position(|c| !allowed.contains(c)) {
            Some(i) => Err(GridError::UnexpectedSymbol {
                symbol: self.cells[i] as char,
                pos: Pos::new(i / self.cols, i % self.cols),
            }),
            None => Ok(()),
        }
    }

    /// Interpret every cell as a decimal digit.
    pub fn digits(&self) -> Result<Vec<u8>, GridError> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if c.is_ascii_digit() {
                    Ok(c - b'0')
                } else {
                    Err(GridError::UnexpectedSymbol {
                        symbol: c as char,
                        pos: Pos::new(i / self.cols, i % self.cols),
                    })
                }
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            f.write_str(&String::from_utf8_lossy(self.row(row)))?;
        }
        Ok(())
    }
}
