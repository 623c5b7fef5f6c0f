// Game engine: move validation, area accounting and player queries
//
// Area counts are maintained incrementally. Every move asks the
// connectivity oracle how many distinct areas touch the affected cell and
// adjusts the counters from that alone; connectivity is never recomputed
// for the whole board.

use log::{debug, trace};
use serde::Serialize;

use crate::error::{MoveError, RenderError, SetupError};
use crate::grid::Grid;
use crate::oracle::Connectivity;
use crate::render;
use crate::types::{Coord, PlayerId};

/// Per-player bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub occupied_fields: u64,
    pub occupied_areas: u32,
    pub special_move_used: bool,
}

/// Outcome of validating a special move on one field
#[derive(Debug, Clone, Copy)]
struct Seizure {
    prev_owner: PlayerId,
    prev_owner_areas: usize,
    new_owner_areas: usize,
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    oracle: Connectivity,
    players: Vec<PlayerRecord>,
    max_areas: u32,
    free_fields: u64,
}

impl Game {
    /// Creates an empty board for `players` players, each allowed at most
    /// `max_areas` areas. All parameters must be positive.
    pub fn new(width: u32, height: u32, players: u32, max_areas: u32) -> Result<Self, SetupError> {
        if players == 0 {
            return Err(SetupError::ZeroParameter("players"));
        }
        if max_areas == 0 {
            return Err(SetupError::ZeroParameter("areas"));
        }

        let grid = Grid::new(width, height)?;
        let oracle = Connectivity::new(&grid)?;

        let mut records = Vec::new();
        records
            .try_reserve_exact(players as usize)
            .map_err(|_| SetupError::Unavailable)?;
        records.resize(players as usize, PlayerRecord::default());

        let free_fields = grid.len() as u64;
        Ok(Game {
            grid,
            oracle,
            players: records,
            max_areas,
            free_fields,
        })
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Number of players
    pub fn players(&self) -> u32 {
        self.players.len() as u32
    }

    pub fn max_areas(&self) -> u32 {
        self.max_areas
    }

    /// Number of unclaimed fields on the whole board
    pub fn free_field_count(&self) -> u64 {
        self.free_fields
    }

    fn record(&self, player: PlayerId) -> Option<&PlayerRecord> {
        let idx = player.checked_sub(1)?;
        self.players.get(idx as usize)
    }

    fn record_mut(&mut self, player: PlayerId) -> Option<&mut PlayerRecord> {
        let idx = player.checked_sub(1)?;
        self.players.get_mut(idx as usize)
    }

    fn checked_coord(&self, x: u32, y: u32) -> Result<Coord, MoveError> {
        if self.grid.in_bounds(x, y) {
            Ok(Coord::new(x, y))
        } else {
            Err(MoveError::OutOfBounds { x, y })
        }
    }

    /// Places a marker of `player` on the unclaimed field (`x`, `y`).
    ///
    /// A field touching none of the player's areas starts a new area and is
    /// refused once the player already holds `max_areas`. A field touching `k`
    /// areas joins them into one.
    pub fn place(&mut self, player: PlayerId, x: u32, y: u32) -> Result<(), MoveError> {
        let areas = self
            .record(player)
            .ok_or(MoveError::InvalidPlayer(player))?
            .occupied_areas;
        let at = self.checked_coord(x, y)?;
        if self.grid.get_owner(at).is_some() {
            debug!("Player {} cannot place on occupied ({}, {})", player, x, y);
            return Err(MoveError::Occupied { x, y });
        }

        let joined = self.oracle.adjacent_area_count(&self.grid, player, at);
        if joined == 0 && areas >= self.max_areas {
            debug!(
                "Player {} is at the limit of {} areas, refusing ({}, {})",
                player, self.max_areas, x, y
            );
            return Err(MoveError::AreaLimit(player));
        }

        self.grid.set_owner(at, Some(player));
        self.free_fields -= 1;
        if let Some(record) = self.record_mut(player) {
            record.occupied_fields += 1;
            record.occupied_areas = merged_areas(record.occupied_areas, joined);
            trace!(
                "Player {} placed at ({}, {}): {} fields, {} areas",
                player,
                x,
                y,
                record.occupied_fields,
                record.occupied_areas
            );
        }
        Ok(())
    }

    /// Performs the once-per-game special move: `player` takes the field
    /// (`x`, `y`) from the opponent holding it.
    ///
    /// Refused when it would leave either player above the area limit. The
    /// previous owner may be split into several areas by losing the field; the
    /// taker may need a brand new area.
    pub fn special_move(&mut self, player: PlayerId, x: u32, y: u32) -> Result<(), MoveError> {
        let used = self
            .record(player)
            .ok_or(MoveError::InvalidPlayer(player))?
            .special_move_used;
        let at = self.checked_coord(x, y)?;
        if used {
            debug!("Player {} has already used the special move", player);
            return Err(MoveError::SpecialMoveUsed(player));
        }

        let seizure = self.validate_seizure(player, at)?;

        self.grid.set_owner(at, Some(player));
        if let Some(taker) = self.record_mut(player) {
            taker.occupied_fields += 1;
            taker.occupied_areas = merged_areas(taker.occupied_areas, seizure.new_owner_areas);
            taker.special_move_used = true;
        }
        if let Some(victim) = self.record_mut(seizure.prev_owner) {
            victim.occupied_fields -= 1;
            victim.occupied_areas = split_areas(victim.occupied_areas, seizure.prev_owner_areas);
        }

        debug!(
            "Player {} took ({}, {}) from player {}",
            player, x, y, seizure.prev_owner
        );
        Ok(())
    }

    /// Checks both sides of a special move on `at` without changing anything.
    /// The field is treated as unclaimed while its neighbourhood is examined.
    fn validate_seizure(&mut self, player: PlayerId, at: Coord) -> Result<Seizure, MoveError> {
        let prev_owner = match self.grid.get_owner(at) {
            Some(owner) if owner != player => owner,
            _ => return Err(MoveError::NotOpponentField { x: at.x, y: at.y }),
        };
        let prev_areas = self
            .record(prev_owner)
            .map(|r| r.occupied_areas)
            .unwrap_or_default();
        let taker_areas = self
            .record(player)
            .map(|r| r.occupied_areas)
            .unwrap_or_default();

        let prev_owner_areas = self.oracle.adjacent_area_count(&self.grid, prev_owner, at);
        let headroom = self.max_areas.saturating_sub(prev_areas) as usize;
        if prev_owner_areas > 0 && prev_owner_areas - 1 > headroom {
            debug!(
                "Taking ({}, {}) would split player {} into {} pieces",
                at.x, at.y, prev_owner, prev_owner_areas
            );
            return Err(MoveError::Disintegration(prev_owner));
        }

        let new_owner_areas = self.oracle.adjacent_area_count(&self.grid, player, at);
        if new_owner_areas == 0 && taker_areas >= self.max_areas {
            return Err(MoveError::AreaLimit(player));
        }

        Ok(Seizure {
            prev_owner,
            prev_owner_areas,
            new_owner_areas,
        })
    }

    /// Number of fields held by `player`; `0` for an unknown player
    pub fn busy_fields(&self, player: PlayerId) -> u64 {
        self.record(player).map(|r| r.occupied_fields).unwrap_or(0)
    }

    /// Number of fields `player` could place on next.
    ///
    /// A player below the area limit may use any free field. A player at the
    /// limit can only extend existing areas, so only free fields next to one
    /// of their fields count. `0` for an unknown player.
    pub fn free_fields(&self, player: PlayerId) -> u64 {
        let Some(record) = self.record(player) else {
            return 0;
        };
        if record.occupied_areas < self.max_areas {
            return self.free_fields;
        }
        self.grid
            .cells()
            .filter(|&(coord, owner)| {
                owner.is_none() && self.grid.adjacent_owned_by(coord, player)
            })
            .count() as u64
    }

    /// Whether `player` could make a special move on some field right now
    pub fn special_move_possible(&mut self, player: PlayerId) -> bool {
        let Some(record) = self.record(player) else {
            return false;
        };
        let held_by_others =
            self.grid.len() as u64 - self.free_fields - record.occupied_fields;
        if record.special_move_used || held_by_others == 0 {
            return false;
        }

        let width = self.grid.width() as usize;
        for idx in 0..self.grid.len() {
            let at = Coord::new((idx % width) as u32, (idx / width) as u32);
            match self.grid.get_owner(at) {
                Some(owner) if owner != player => {}
                _ => continue,
            }
            if self.validate_seizure(player, at).is_ok() {
                return true;
            }
        }
        false
    }

    /// Owner of field (`x`, `y`); `None` when unclaimed or off the board
    pub fn owner(&self, x: u32, y: u32) -> Option<PlayerId> {
        self.grid.get_owner(Coord::new(x, y))
    }

    /// Whether some field next to (`x`, `y`) belongs to `player`.
    /// Off-board coordinates and unknown players give `false`.
    pub fn adjacent_owned_by(&self, x: u32, y: u32, player: PlayerId) -> bool {
        if self.record(player).is_none() || !self.grid.in_bounds(x, y) {
            return false;
        }
        self.grid.adjacent_owned_by(Coord::new(x, y), player)
    }

    /// Number of areas `player` currently holds; `0` for an unknown player
    pub fn occupied_areas(&self, player: PlayerId) -> u32 {
        self.record(player).map(|r| r.occupied_areas).unwrap_or(0)
    }

    pub fn special_move_used(&self, player: PlayerId) -> bool {
        self.record(player).map(|r| r.special_move_used).unwrap_or(false)
    }

    /// Text image of the board, see [`render::render`]
    pub fn render(&self) -> Result<String, RenderError> {
        render::render(&self.grid, self.players())
    }
}

/// Area count after a field joining `joined` existing areas is added
fn merged_areas(areas: u32, joined: usize) -> u32 {
    if joined == 0 {
        areas + 1
    } else {
        areas - (joined as u32 - 1)
    }
}

/// Area count after losing a field whose removal leaves `pieces` fragments.
/// No fragments means the field was a whole single-field area and it is gone.
fn split_areas(areas: u32, pieces: usize) -> u32 {
    if pieces == 0 {
        areas - 1
    } else {
        areas + (pieces as u32 - 1)
    }
}
