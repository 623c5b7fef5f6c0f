// Board encoder
//
// Rows are printed from the highest `y` down to `y = 0`, columns left to
// right. With at most 9 players every field is one character and fields are
// written back to back. With more players every field is right-aligned to the
// width of the largest player number and fields are separated by one space.
// Unclaimed fields are shown as `.` in both layouts; every row ends in `\n`.

use std::fmt::Write;

use crate::error::RenderError;
use crate::grid::Grid;
use crate::types::{decimal_length, PlayerId};

pub const UNCLAIMED_SYMBOL: char = '.';

/// Exact byte length of the rendered board, `None` if it does not fit in memory
fn image_len(grid: &Grid, field_width: usize) -> Option<usize> {
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    if field_width == 1 {
        width.checked_add(1)?.checked_mul(height)
    } else {
        field_width
            .checked_add(1)?
            .checked_mul(width)?
            .checked_mul(height)
    }
}

/// Renders the ownership map of `grid` for a game with `players` players
pub fn render(grid: &Grid, players: u32) -> Result<String, RenderError> {
    let field_width = decimal_length(players);
    let len = image_len(grid, field_width).ok_or(RenderError::Unavailable(usize::MAX))?;

    let mut image = String::new();
    image
        .try_reserve_exact(len)
        .map_err(|_| RenderError::Unavailable(len))?;

    for y in (0..grid.height()).rev() {
        if field_width == 1 {
            for owner in grid.row(y) {
                image.push(single_digit(owner));
            }
        } else {
            for (x, owner) in grid.row(y).enumerate() {
                if x > 0 {
                    image.push(' ');
                }
                write_padded(&mut image, owner, field_width)
                    .map_err(|_| RenderError::Unavailable(len))?;
            }
        }
        image.push('\n');
    }

    Ok(image)
}

fn single_digit(owner: Option<PlayerId>) -> char {
    owner
        .and_then(|id| char::from_digit(id, 10))
        .unwrap_or(UNCLAIMED_SYMBOL)
}

fn write_padded(image: &mut String, owner: Option<PlayerId>, width: usize) -> std::fmt::Result {
    match owner {
        Some(id) => write!(image, "{:>width$}", id, width = width),
        None => write!(image, "{:>width$}", UNCLAIMED_SYMBOL, width = width),
    }
}
