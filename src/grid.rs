// Grid store: cell ownership for a width x height board
//
// Cells live in one flat row-major array; a cell is addressed by
// `y * width + x`. Ownership is the only per-cell state.

use crate::error::SetupError;
use crate::types::{Coord, Direction, PlayerId};

const UNCLAIMED: PlayerId = 0;

/// Allocates `len` copies of `value`, reporting allocation failure instead of aborting
fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, SetupError> {
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|_| SetupError::Unavailable)?;
    cells.resize(len, value);
    Ok(cells)
}

fn cell_count(width: u32, height: u32) -> Result<usize, SetupError> {
    usize::try_from(u64::from(width) * u64::from(height))
        .map_err(|_| SetupError::TooLarge { width, height })
}

/// Ownership map of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    owners: Vec<PlayerId>,
}

impl Grid {
    /// Creates an unclaimed board. Both dimensions must be positive.
    pub fn new(width: u32, height: u32) -> Result<Self, SetupError> {
        if width == 0 {
            return Err(SetupError::ZeroParameter("width"));
        }
        if height == 0 {
            return Err(SetupError::ZeroParameter("height"));
        }

        let owners = try_filled(cell_count(width, height)?, UNCLAIMED)?;
        Ok(Grid {
            width,
            height,
            owners,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Flat index of an on-board coordinate
    pub fn index(&self, coord: Coord) -> Option<usize> {
        if !self.in_bounds(coord.x, coord.y) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    /// Owner of the cell, `None` when unclaimed or off the board
    pub fn get_owner(&self, coord: Coord) -> Option<PlayerId> {
        let idx = self.index(coord)?;
        match self.owners[idx] {
            UNCLAIMED => None,
            owner => Some(owner),
        }
    }

    /// Sets or clears the owner of an on-board cell. Off-board writes are ignored.
    pub fn set_owner(&mut self, coord: Coord, owner: Option<PlayerId>) {
        if let Some(idx) = self.index(coord) {
            self.owners[idx] = owner.unwrap_or(UNCLAIMED);
        }
    }

    /// On-board orthogonal neighbours in `Direction::all()` order
    pub fn neighbours(&self, coord: Coord) -> impl Iterator<Item = Coord> {
        let (width, height) = (self.width, self.height);
        Direction::all()
            .into_iter()
            .filter_map(move |dir| dir.apply(coord, width, height))
    }

    /// True when some orthogonal neighbour of `coord` belongs to `player`
    pub fn adjacent_owned_by(&self, coord: Coord, player: PlayerId) -> bool {
        self.neighbours(coord)
            .any(|n| self.get_owner(n) == Some(player))
    }

    /// Owners of row `y`, left to right
    pub fn row(&self, y: u32) -> impl Iterator<Item = Option<PlayerId>> + '_ {
        let start = y as usize * self.width as usize;
        let end = if y < self.height { start + self.width as usize } else { start };
        self.owners[start.min(self.owners.len())..end.min(self.owners.len())]
            .iter()
            .map(|&owner| (owner != UNCLAIMED).then_some(owner))
    }

    /// Every cell with its owner, row by row from `y = 0`
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Option<PlayerId>)> + '_ {
        let width = self.width as usize;
        self.owners.iter().enumerate().map(move |(idx, &owner)| {
            let coord = Coord::new((idx % width) as u32, (idx / width) as u32);
            (coord, (owner != UNCLAIMED).then_some(owner))
        })
    }
}

/// Scratch "visited" marks for one search over a grid.
///
/// Only the cells marked since the last `clear` are reset, so clearing costs
/// as much as the search that dirtied the marks rather than the whole board.
#[derive(Debug, Clone)]
pub struct VisitedMarks {
    marks: Vec<bool>,
    touched: Vec<usize>,
}

impl VisitedMarks {
    pub fn for_grid(grid: &Grid) -> Result<Self, SetupError> {
        Ok(VisitedMarks {
            marks: try_filled(grid.len(), false)?,
            touched: Vec::new(),
        })
    }

    /// Marks the cell; returns false if it was already marked
    pub fn mark(&mut self, idx: usize) -> bool {
        if self.marks[idx] {
            return false;
        }
        self.marks[idx] = true;
        self.touched.push(idx);
        true
    }

    pub fn is_marked(&self, idx: usize) -> bool {
        self.marks[idx]
    }

    pub fn is_clear(&self) -> bool {
        self.touched.is_empty()
    }

    pub fn clear(&mut self) {
        for idx in self.touched.drain(..) {
            self.marks[idx] = false;
        }
    }
}
