//! Engine Scenario Tests
//!
//! Placement, special moves and the player queries, checked against an
//! independent flood fill of the board after every step.

use gamma::{Game, MoveError};

/// Counts 4-connected groups of `player`'s fields from scratch
fn flood_fill_areas(game: &Game, player: u32) -> u32 {
    let (w, h) = (game.width(), game.height());
    let mut seen = vec![false; (w * h) as usize];
    let mut areas = 0;
    for y in 0..h {
        for x in 0..w {
            if seen[(y * w + x) as usize] || game.owner(x, y) != Some(player) {
                continue;
            }
            areas += 1;
            let mut stack = vec![(x, y)];
            seen[(y * w + x) as usize] = true;
            while let Some((cx, cy)) = stack.pop() {
                let mut next = Vec::new();
                if cx > 0 {
                    next.push((cx - 1, cy));
                }
                if cy > 0 {
                    next.push((cx, cy - 1));
                }
                if cx + 1 < w {
                    next.push((cx + 1, cy));
                }
                if cy + 1 < h {
                    next.push((cx, cy + 1));
                }
                for (nx, ny) in next {
                    let idx = (ny * w + nx) as usize;
                    if !seen[idx] && game.owner(nx, ny) == Some(player) {
                        seen[idx] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }
    areas
}

fn assert_consistent(game: &Game) {
    let cells = u64::from(game.width()) * u64::from(game.height());
    let busy: u64 = (1..=game.players()).map(|p| game.busy_fields(p)).sum();
    assert_eq!(game.free_field_count() + busy, cells, "field totals drifted");

    for player in 1..=game.players() {
        let areas = game.occupied_areas(player);
        assert_eq!(
            areas,
            flood_fill_areas(game, player),
            "area count of player {} drifted",
            player
        );
        assert!(areas <= game.max_areas());
    }
}

#[test]
fn test_first_moves_on_open_board() {
    let mut game = Game::new(10, 10, 2, 3).unwrap();

    assert_eq!(game.place(1, 0, 0), Ok(()));
    assert_eq!(game.busy_fields(1), 1);
    assert_eq!(game.free_fields(1), 99);

    assert_eq!(game.place(2, 3, 1), Ok(()));
    assert_eq!(game.place(1, 0, 2), Ok(()));
    assert_eq!(game.occupied_areas(1), 2);
    assert_consistent(&game);

    // (0, 1) joins the two fields of player 1
    assert_eq!(game.place(1, 0, 1), Ok(()));
    assert_eq!(game.occupied_areas(1), 1);
    assert_eq!(game.busy_fields(1), 3);
    assert_eq!(game.free_fields(2), 96);
    assert_consistent(&game);
}

#[test]
fn test_area_limit_blocks_new_area_but_not_extension() {
    let mut game = Game::new(5, 5, 2, 1).unwrap();
    game.place(1, 2, 2).unwrap();

    assert_eq!(game.place(1, 0, 0), Err(MoveError::AreaLimit(1)));
    assert_eq!(game.busy_fields(1), 1);
    assert_eq!(game.free_field_count(), 24);

    assert_eq!(game.place(1, 2, 3), Ok(()));
    assert_eq!(game.occupied_areas(1), 1);
    assert_consistent(&game);
}

#[test]
fn test_free_fields_at_limit_counts_only_adjacent() {
    let mut game = Game::new(5, 5, 2, 1).unwrap();
    game.place(1, 0, 0).unwrap();
    // (1, 0) and (0, 1)
    assert_eq!(game.free_fields(1), 2);

    game.place(2, 1, 0).unwrap();
    assert_eq!(game.free_fields(1), 1);

    game.place(1, 0, 1).unwrap();
    // (1, 1) and (0, 2)
    assert_eq!(game.free_fields(1), 2);

    // Player 2 is also at the limit
    assert_eq!(game.free_fields(2), 2);
}

#[test]
fn test_merge_of_four_areas() {
    let mut game = Game::new(3, 3, 1, 4).unwrap();
    game.place(1, 1, 0).unwrap();
    game.place(1, 0, 1).unwrap();
    game.place(1, 2, 1).unwrap();
    game.place(1, 1, 2).unwrap();
    assert_eq!(game.occupied_areas(1), 4);

    game.place(1, 1, 1).unwrap();
    assert_eq!(game.occupied_areas(1), 1);
    assert_consistent(&game);
}

#[test]
fn test_merge_counts_ring_once() {
    // Neighbours that are already joined around the board count as one area
    let mut game = Game::new(3, 3, 1, 1).unwrap();
    for (x, y) in [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)] {
        game.place(1, x, y).unwrap();
    }
    assert_eq!(game.occupied_areas(1), 1);

    game.place(1, 1, 1).unwrap();
    assert_eq!(game.occupied_areas(1), 1);
    assert_consistent(&game);
}

#[test]
fn test_rejected_placements_change_nothing() {
    let mut game = Game::new(4, 4, 2, 2).unwrap();
    game.place(1, 1, 1).unwrap();
    let before = game.render().unwrap();

    assert_eq!(game.place(2, 1, 1), Err(MoveError::Occupied { x: 1, y: 1 }));
    assert_eq!(game.place(1, 1, 1), Err(MoveError::Occupied { x: 1, y: 1 }));
    assert_eq!(game.place(1, 4, 0), Err(MoveError::OutOfBounds { x: 4, y: 0 }));
    assert_eq!(
        game.place(1, 0, u32::MAX),
        Err(MoveError::OutOfBounds { x: 0, y: u32::MAX })
    );
    assert_eq!(game.place(0, 0, 0), Err(MoveError::InvalidPlayer(0)));
    assert_eq!(game.place(3, 0, 0), Err(MoveError::InvalidPlayer(3)));

    assert_eq!(game.render().unwrap(), before);
    assert_eq!(game.busy_fields(1), 1);
    assert_eq!(game.busy_fields(2), 0);
    assert_eq!(game.free_field_count(), 15);
}

#[test]
fn test_invalid_player_queries_return_sentinels() {
    let mut game = Game::new(4, 4, 2, 2).unwrap();
    game.place(1, 0, 0).unwrap();

    assert_eq!(game.busy_fields(0), 0);
    assert_eq!(game.busy_fields(3), 0);
    assert_eq!(game.free_fields(0), 0);
    assert_eq!(game.free_fields(u32::MAX), 0);
    assert!(!game.special_move_possible(0));
    assert!(!game.special_move_possible(3));
    assert!(!game.adjacent_owned_by(1, 0, 0));
    assert!(!game.adjacent_owned_by(9, 9, 1));
    assert!(game.adjacent_owned_by(1, 0, 1));
}

#[test]
fn test_seizing_single_field_area_removes_it() {
    let mut game = Game::new(5, 5, 2, 2).unwrap();
    game.place(1, 0, 0).unwrap();
    game.place(2, 2, 2).unwrap();
    game.place(2, 4, 4).unwrap();
    assert_eq!(game.occupied_areas(2), 2);

    assert_eq!(game.special_move(1, 2, 2), Ok(()));
    assert_eq!(game.owner(2, 2), Some(1));
    assert_eq!(game.occupied_areas(2), 1);
    assert_eq!(game.busy_fields(2), 1);
    assert_eq!(game.occupied_areas(1), 2);
    assert_eq!(game.busy_fields(1), 2);
    assert!(game.special_move_used(1));
    assert_consistent(&game);
}

#[test]
fn test_seizing_last_field_leaves_player_empty() {
    let mut game = Game::new(3, 3, 2, 1).unwrap();
    game.place(2, 1, 1).unwrap();

    assert_eq!(game.special_move(1, 1, 1), Ok(()));
    assert_eq!(game.occupied_areas(2), 0);
    assert_eq!(game.busy_fields(2), 0);
    assert_eq!(game.occupied_areas(1), 1);
    assert_consistent(&game);

    // Player 2 can start again
    assert_eq!(game.place(2, 0, 0), Ok(()));
    assert_consistent(&game);
}

#[test]
fn test_disintegration_is_rejected() {
    let mut game = Game::new(5, 5, 2, 2).unwrap();
    // T shape of player 2 centred on (2, 2)
    for (x, y) in [(2, 2), (1, 2), (3, 2), (2, 3)] {
        game.place(2, x, y).unwrap();
    }
    game.place(1, 2, 1).unwrap();
    assert_eq!(game.occupied_areas(2), 1);
    let before = game.render().unwrap();

    // Removing the centre leaves three pieces, one more than the limit allows
    assert_eq!(game.special_move(1, 2, 2), Err(MoveError::Disintegration(2)));
    assert_eq!(game.render().unwrap(), before);
    assert_eq!(game.occupied_areas(2), 1);
    assert_eq!(game.busy_fields(2), 4);
    assert!(!game.special_move_used(1));
    assert_consistent(&game);
}

#[test]
fn test_split_within_limit_is_allowed() {
    let mut game = Game::new(5, 5, 2, 3).unwrap();
    for (x, y) in [(2, 2), (1, 2), (3, 2), (2, 3)] {
        game.place(2, x, y).unwrap();
    }
    game.place(1, 2, 1).unwrap();

    assert_eq!(game.special_move(1, 2, 2), Ok(()));
    assert_eq!(game.occupied_areas(2), 3);
    assert_eq!(game.busy_fields(2), 3);
    assert_eq!(game.occupied_areas(1), 1);
    assert_eq!(game.busy_fields(1), 2);
    assert_consistent(&game);
}

#[test]
fn test_special_move_only_once() {
    let mut game = Game::new(5, 5, 2, 5).unwrap();
    game.place(2, 0, 0).unwrap();
    game.place(2, 4, 4).unwrap();

    assert_eq!(game.special_move(1, 0, 0), Ok(()));
    assert!(!game.special_move_possible(1));
    assert_eq!(game.special_move(1, 4, 4), Err(MoveError::SpecialMoveUsed(1)));
    assert_eq!(game.owner(4, 4), Some(2));
    assert_consistent(&game);
}

#[test]
fn test_special_move_needs_opponent_field() {
    let mut game = Game::new(3, 3, 2, 2).unwrap();
    game.place(1, 0, 0).unwrap();

    assert_eq!(
        game.special_move(1, 0, 0),
        Err(MoveError::NotOpponentField { x: 0, y: 0 })
    );
    assert_eq!(
        game.special_move(1, 1, 1),
        Err(MoveError::NotOpponentField { x: 1, y: 1 })
    );
    assert_eq!(
        game.special_move(1, 3, 0),
        Err(MoveError::OutOfBounds { x: 3, y: 0 })
    );
    assert_eq!(game.special_move(4, 0, 0), Err(MoveError::InvalidPlayer(4)));
    assert!(!game.special_move_used(1));
    // Nobody else holds a field yet
    assert!(!game.special_move_possible(1));
    assert!(game.special_move_possible(2));
}

#[test]
fn test_special_move_respects_taker_limit() {
    let mut game = Game::new(5, 5, 2, 1).unwrap();
    game.place(1, 0, 0).unwrap();
    game.place(2, 4, 4).unwrap();
    game.place(2, 1, 1).unwrap_err();
    game.place(2, 4, 3).unwrap();
    game.place(2, 3, 3).unwrap();

    // Far from player 1's only area
    assert_eq!(game.special_move(1, 4, 4), Err(MoveError::AreaLimit(1)));
    assert!(!game.special_move_used(1));
    assert!(!game.special_move_possible(1));

    // Once player 1 reaches the opponent the move extends its area
    for (x, y) in [(1, 0), (2, 0), (3, 0), (3, 1), (3, 2)] {
        game.place(1, x, y).unwrap();
    }
    assert!(game.special_move_possible(1));
    assert_eq!(game.special_move(1, 3, 3), Ok(()));
    assert_eq!(game.occupied_areas(1), 1);
    assert_eq!(game.occupied_areas(2), 1);
    assert_consistent(&game);
}

#[test]
fn test_special_move_merges_taker_areas() {
    let mut game = Game::new(3, 1, 2, 2).unwrap();
    game.place(1, 0, 0).unwrap();
    game.place(2, 1, 0).unwrap();
    game.place(1, 2, 0).unwrap();
    assert_eq!(game.occupied_areas(1), 2);

    assert_eq!(game.special_move(1, 1, 0), Ok(()));
    assert_eq!(game.occupied_areas(1), 1);
    assert_eq!(game.occupied_areas(2), 0);
    assert_eq!(game.render().unwrap(), "111\n");
    assert_consistent(&game);
}

#[test]
fn test_single_field_board() {
    let mut game = Game::new(1, 1, 1, 1).unwrap();
    assert_eq!(game.free_fields(1), 1);
    assert_eq!(game.place(1, 0, 0), Ok(()));
    assert_eq!(game.free_fields(1), 0);
    assert!(!game.special_move_possible(1));
    assert_consistent(&game);
}
