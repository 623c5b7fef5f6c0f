// Connectivity oracle
//
// Answers reachability questions over the cells of one player with a
// breadth-first search. The search buffers are owned here and reused, so
// repeated queries never reallocate; they are reset on every exit path.

use std::collections::VecDeque;

use log::trace;

use crate::error::SetupError;
use crate::grid::{Grid, VisitedMarks};
use crate::types::{Coord, PlayerId};

/// Reusable breadth-first search state for one board
#[derive(Debug, Clone)]
pub struct Connectivity {
    marks: VisitedMarks,
    queue: VecDeque<usize>,
}

impl Connectivity {
    /// Creates an oracle sized for `grid`
    pub fn new(grid: &Grid) -> Result<Self, SetupError> {
        Ok(Connectivity {
            marks: VisitedMarks::for_grid(grid)?,
            queue: VecDeque::new(),
        })
    }

    /// True when no search state is left over from a previous query
    pub fn is_idle(&self) -> bool {
        self.marks.is_clear() && self.queue.is_empty()
    }

    /// Checks whether `target` can be reached from `start` by orthogonal steps
    /// through cells owned by `player`. Both endpoints must belong to `player`.
    pub fn reachable(&mut self, grid: &Grid, player: PlayerId, start: Coord, target: Coord) -> bool {
        if grid.get_owner(start) != Some(player) || grid.get_owner(target) != Some(player) {
            return false;
        }
        match (grid.index(start), grid.index(target)) {
            (Some(from), Some(to)) => self.search(grid, player, from, to, None),
            _ => false,
        }
    }

    /// Counts the distinct areas of `player` that touch `at`, treating `at`
    /// itself as unclaimed whatever its current owner.
    ///
    /// Neighbours are visited in `Direction::all()` order. A neighbour owned by
    /// `player` is accepted only if none of the already accepted neighbours can
    /// reach it; two neighbours in the same area are therefore counted once even
    /// when the path joining them runs far across the board.
    pub fn adjacent_area_count(&mut self, grid: &Grid, player: PlayerId, at: Coord) -> usize {
        let Some(hole) = grid.index(at) else {
            return 0;
        };

        let mut accepted: Vec<usize> = Vec::with_capacity(4);
        for neighbour in grid.neighbours(at) {
            if grid.get_owner(neighbour) != Some(player) {
                continue;
            }
            let Some(idx) = grid.index(neighbour) else {
                continue;
            };
            let joined = accepted
                .iter()
                .any(|&other| self.search(grid, player, idx, other, Some(hole)));
            if !joined {
                accepted.push(idx);
            }
        }

        trace!(
            "Player {} has {} distinct areas around ({}, {})",
            player,
            accepted.len(),
            at.x,
            at.y
        );
        accepted.len()
    }

    /// Breadth-first search from `from` to `to` through `player`'s cells,
    /// never entering `hole`
    fn search(
        &mut self,
        grid: &Grid,
        player: PlayerId,
        from: usize,
        to: usize,
        hole: Option<usize>,
    ) -> bool {
        self.reset();

        if let Some(hole) = hole {
            self.marks.mark(hole);
        }
        if self.marks.mark(from) {
            self.queue.push_back(from);
        }

        let width = grid.width() as usize;
        let mut found = false;
        while let Some(idx) = self.queue.pop_front() {
            if idx == to {
                found = true;
                break;
            }
            let here = Coord::new((idx % width) as u32, (idx / width) as u32);
            for next in grid.neighbours(here) {
                if grid.get_owner(next) != Some(player) {
                    continue;
                }
                if let Some(next_idx) = grid.index(next) {
                    if self.marks.mark(next_idx) {
                        self.queue.push_back(next_idx);
                    }
                }
            }
        }

        self.reset();
        found
    }

    fn reset(&mut self) {
        self.marks.clear();
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a grid from rows written top row first, `.` for unclaimed
    fn grid_from(rows: &[&str]) -> Grid {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut grid = Grid::new(width, height).unwrap();
        for (i, row) in rows.iter().enumerate() {
            let y = height - 1 - i as u32;
            for (x, ch) in row.chars().enumerate() {
                if let Some(d) = ch.to_digit(10) {
                    grid.set_owner(Coord::new(x as u32, y), Some(d));
                }
            }
        }
        grid
    }

    #[test]
    fn test_reachable_along_path() {
        let grid = grid_from(&["111", "..1", "111"]);
        let mut oracle = Connectivity::new(&grid).unwrap();
        assert!(oracle.reachable(&grid, 1, Coord::new(0, 0), Coord::new(0, 2)));
        assert!(oracle.is_idle());
    }

    #[test]
    fn test_unreachable_across_gap() {
        let grid = grid_from(&["11.", "...", "..1"]);
        let mut oracle = Connectivity::new(&grid).unwrap();
        assert!(!oracle.reachable(&grid, 1, Coord::new(0, 2), Coord::new(2, 0)));
        assert!(oracle.is_idle());
    }

    #[test]
    fn test_reachable_requires_owned_endpoints() {
        let grid = grid_from(&["12"]);
        let mut oracle = Connectivity::new(&grid).unwrap();
        assert!(!oracle.reachable(&grid, 1, Coord::new(0, 0), Coord::new(1, 0)));
        assert!(oracle.reachable(&grid, 2, Coord::new(1, 0), Coord::new(1, 0)));
    }

    #[test]
    fn test_adjacent_count_dedups_ring() {
        // The four neighbours of the centre are joined around the outside
        let grid = grid_from(&["111", "1.1", "111"]);
        let mut oracle = Connectivity::new(&grid).unwrap();
        assert_eq!(oracle.adjacent_area_count(&grid, 1, Coord::new(1, 1)), 1);
        assert!(oracle.is_idle());
    }

    #[test]
    fn test_adjacent_count_separate_arms() {
        let grid = grid_from(&[".1.", "1.1", ".1."]);
        let mut oracle = Connectivity::new(&grid).unwrap();
        assert_eq!(oracle.adjacent_area_count(&grid, 1, Coord::new(1, 1)), 4);
        assert_eq!(oracle.adjacent_area_count(&grid, 2, Coord::new(1, 1)), 0);
    }

    #[test]
    fn test_adjacent_count_treats_centre_as_hole() {
        // Centre is owned; without it the cross falls apart into four pieces
        let grid = grid_from(&[".1.", "111", ".1."]);
        let mut oracle = Connectivity::new(&grid).unwrap();
        assert_eq!(oracle.adjacent_area_count(&grid, 1, Coord::new(1, 1)), 4);
    }
}
