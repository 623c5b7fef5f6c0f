use crate::types::PlayerId;

/// Reasons a placement or a special move is rejected.
/// A rejected move never changes the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("player {0} does not exist")]
    InvalidPlayer(PlayerId),

    #[error("field ({x}, {y}) is outside the board")]
    OutOfBounds { x: u32, y: u32 },

    #[error("field ({x}, {y}) is already occupied")]
    Occupied { x: u32, y: u32 },

    #[error("field ({x}, {y}) is not owned by an opponent")]
    NotOpponentField { x: u32, y: u32 },

    #[error("player {0} has already used the special move")]
    SpecialMoveUsed(PlayerId),

    #[error("player {0} cannot start another area")]
    AreaLimit(PlayerId),

    #[error("taking the field would split player {0} into too many areas")]
    Disintegration(PlayerId),
}

/// Errors that can occur when creating a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("{0} must be positive")]
    ZeroParameter(&'static str),

    #[error("a {width}x{height} board does not fit in memory")]
    TooLarge { width: u32, height: u32 },

    #[error("could not allocate the board")]
    Unavailable,
}

/// Errors that can occur when rendering the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("could not allocate {0} bytes for the board image")]
    Unavailable(usize),
}
