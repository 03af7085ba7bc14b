//! Integration tests for the session state machine

use tui_mines::core::GameState;
use tui_mines::types::{GameConfig, GameStatus};

fn playing(width: u16, height: u16, bombs: usize, seed: u64) -> GameState {
    let config = GameConfig::new(width, height, bombs).unwrap();
    let mut game = GameState::from_seed(config, seed);
    game.new_game();
    game
}

/// Find any cell matching a predicate on (bomb, number).
fn find_cell(game: &GameState, pred: impl Fn(bool, u8) -> bool) -> Option<(u16, u16)> {
    let board = game.board();
    for y in 0..board.height() {
        for x in 0..board.width() {
            let index = board.index_of(x, y).unwrap();
            if pred(board.tile(index).bomb, board.number(index)) {
                return Some((x, y));
            }
        }
    }
    None
}

#[test]
fn test_one_cell_board_without_bombs_wins_on_first_reveal() {
    let mut game = playing(1, 1, 0, 1);
    game.reveal(0, 0);
    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.board().uncovered_count(), 1);
    assert!(game.elapsed().is_some());
}

#[test]
fn test_all_bomb_board_loses_on_any_reveal() {
    for (x, y) in [(0, 0), (1, 1), (2, 0)] {
        let mut game = playing(3, 3, 9, 3);
        game.reveal(x, y);
        assert_eq!(game.status(), GameStatus::Lost);
        // Losing uncovers the whole board.
        assert_eq!(game.board().uncovered_count(), 9);
    }
}

#[test]
fn test_revealing_every_safe_cell_wins() {
    let mut game = playing(4, 4, 2, 11);
    let board_len = game.board().len();

    for y in 0..4 {
        for x in 0..4 {
            let index = game.board().index_of(x, y).unwrap();
            if !game.board().tile(index).bomb {
                game.reveal(x, y);
            }
        }
    }

    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.board().uncovered_count(), board_len);
}

#[test]
fn test_reveal_is_idempotent_on_uncovered_cells() {
    let mut game = playing(5, 5, 3, 21);
    // A numbered safe cell reveals exactly itself and cannot win a 22-safe-cell
    // board, so the session stays in Playing for the second click.
    let (x, y) = find_cell(&game, |bomb, number| !bomb && number > 0).unwrap();

    game.reveal(x, y);
    let after_first = game.board().uncovered_count();
    assert_eq!(game.status(), GameStatus::Playing);

    game.reveal(x, y);
    assert_eq!(game.board().uncovered_count(), after_first);
    assert_eq!(game.status(), GameStatus::Playing);
}

#[test]
fn test_flag_mode_never_uncovers_or_ends_the_game() {
    let mut game = playing(5, 5, 3, 5);
    game.set_flag_mode(true);

    let (bx, by) = find_cell(&game, |bomb, _| bomb).unwrap();
    game.reveal(bx, by);

    let tile = game.board().tile_at(bx, by).unwrap();
    assert!(tile.flagged);
    assert!(tile.covered);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.board().uncovered_count(), 0);
}

#[test]
fn test_flagged_cells_are_protected_from_reveal() {
    let mut game = playing(5, 5, 3, 5);
    let (x, y) = find_cell(&game, |bomb, _| !bomb).unwrap();

    game.toggle_flag(x, y);
    game.reveal(x, y);
    assert!(game.board().tile_at(x, y).unwrap().covered);
    assert_eq!(game.status(), GameStatus::Playing);
}

#[test]
fn test_out_of_range_input_is_ignored() {
    let mut game = playing(5, 5, 3, 5);
    game.reveal(5, 0);
    game.reveal(0, 5);
    game.toggle_flag(9, 9);
    assert_eq!(game.board().uncovered_count(), 0);
    assert_eq!(game.board().flag_count(), 0);
    assert_eq!(game.status(), GameStatus::Playing);
}

#[test]
fn test_terminal_states_ignore_further_input() {
    let mut game = playing(3, 3, 9, 3);
    game.reveal(0, 0);
    assert_eq!(game.status(), GameStatus::Lost);

    game.reveal(1, 1);
    game.toggle_flag(1, 1);
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.board().flag_count(), 0);
}

#[test]
fn test_elapsed_time_freezes_at_game_over() {
    let mut game = playing(3, 3, 9, 3);
    game.reveal(0, 0);
    assert_eq!(game.status(), GameStatus::Lost);

    let first = game.elapsed();
    let second = game.elapsed();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_new_game_resets_from_any_state() {
    let mut game = playing(4, 4, 16, 8);
    game.reveal(0, 0);
    assert_eq!(game.status(), GameStatus::Lost);

    game.new_game();
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.board().uncovered_count(), 0);
    assert_eq!(game.board().flag_count(), 0);
    assert_eq!(game.board().bomb_count(), 16);
}

#[test]
fn test_flag_mode_survives_restart() {
    let mut game = playing(4, 4, 2, 8);
    game.set_flag_mode(true);
    game.new_game();
    assert!(game.flag_mode());
}
