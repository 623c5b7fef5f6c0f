// Core value types shared by the grid, the oracle and the engine

use serde::{Deserialize, Serialize};

/// Player number. Valid ids are `1..=players`; `0` is never a player.
pub type PlayerId = u32;

/// 2D coordinate on the board, zero-based. `x` is the column, `y` the row.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub fn new(x: u32, y: u32) -> Self {
        Coord { x, y }
    }
}

/// The four orthogonal neighbour directions. `Up` increases `y`, matching the
/// rendered board where the highest row is printed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Down,
    Right,
    Up,
}

impl Direction {
    /// Returns all directions in the fixed order used for neighbour scans.
    /// Area deduplication depends on this order staying stable.
    pub fn all() -> [Direction; 4] {
        [Direction::Left, Direction::Down, Direction::Right, Direction::Up]
    }

    /// Calculates the neighbouring coordinate in this direction.
    /// Returns `None` when the step would leave a `width` x `height` board.
    pub fn apply(&self, coord: Coord, width: u32, height: u32) -> Option<Coord> {
        match self {
            Direction::Left => coord.x.checked_sub(1).map(|x| Coord { x, y: coord.y }),
            Direction::Down => coord.y.checked_sub(1).map(|y| Coord { x: coord.x, y }),
            Direction::Right => {
                let x = coord.x.checked_add(1)?;
                (x < width).then_some(Coord { x, y: coord.y })
            }
            Direction::Up => {
                let y = coord.y.checked_add(1)?;
                (y < height).then_some(Coord { x: coord.x, y })
            }
        }
    }
}

/// Number of decimal digits needed to print `n`
pub fn decimal_length(mut n: u32) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}
