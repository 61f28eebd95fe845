//! Board rules exercised through the facade crate.

use dice_o_metric::core::geometry::canonical_position;
use dice_o_metric::core::{BlockReason, Board, GridError, Layout, MoveResult};
use dice_o_metric::types::{Direction, GridPos, Move, BOARD_COLS, BOARD_ROWS};

const E: i8 = -1;

fn empty() -> Layout {
    [[E; 8]; 8]
}

fn mv(dir: Direction) -> Move {
    Move::from_direction(dir)
}

fn settle(board: &mut Board, active: Move) {
    for _ in 0..10_000 {
        board.tick(active);
        if !board.is_animating() {
            board.tick(active);
            return;
        }
    }
    panic!("board never settled");
}

#[test]
fn test_bounds_for_every_coordinate() {
    let board = Board::empty(1);
    for row in -2i8..10 {
        for col in -2i8..10 {
            let inside =
                (0..BOARD_ROWS as i8).contains(&row) && (0..BOARD_COLS as i8).contains(&col);
            assert_eq!(board.get_at(row, col).is_ok(), inside, "get_at({row}, {col})");
            let stepped = board.coords_in_direction(row, col, mv(Direction::SouthEast));
            if !inside {
                assert!(matches!(stepped, Err(GridError::OutOfBounds { .. })));
            }
        }
    }
}

#[test]
fn test_flood_fill_is_stable() {
    let mut layout = empty();
    for (r, c) in [(1, 1), (1, 2), (2, 2), (3, 2), (3, 3), (5, 5)] {
        layout[r][c] = 5;
    }
    layout[2][1] = 3;
    let board = Board::from_layout(&layout, 1);

    let mut first = board.find_matching_cluster(GridPos::new(1, 1), 5);
    let mut second = board.find_matching_cluster(GridPos::new(1, 1), 5);
    first.sort();
    second.sort();
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
    assert!(!first.contains(&GridPos::new(5, 5)));
}

#[test]
fn test_slide_stops_next_to_blocker() {
    // Row 0 holds [2, _, _, 5]; moving the 2 along +col lands it in column 2.
    let mut layout = empty();
    layout[0][0] = 2;
    layout[0][3] = 5;
    let mut board = Board::from_layout(&layout, 1);

    let result = board.attempt_move(GridPos::new(0, 0), mv(Direction::NorthEast));
    assert_eq!(
        result,
        MoveResult::Slid {
            from: GridPos::new(0, 0),
            to: GridPos::new(0, 2)
        }
    );

    settle(&mut board, mv(Direction::NorthEast));
    let die = board.die(GridPos::new(0, 2)).expect("slid die");
    assert_eq!(die.value(), 2);
    assert_eq!(die.position(), canonical_position(GridPos::new(0, 2)));
    assert!(board.die(GridPos::new(0, 3)).is_some());
}

#[test]
fn test_match_adjacency_ignores_move_direction() {
    // (4, 3) is not in the move direction but is a grid neighbour, so it joins.
    let mut layout = empty();
    layout[3][3] = 4;
    layout[4][3] = 4;
    layout[3][4] = 4;
    let mut board = Board::from_layout(&layout, 1);

    let result = board.attempt_move(GridPos::new(3, 3), mv(Direction::NorthEast));
    assert_eq!(result, MoveResult::Matched { count: 3 });
}

#[test]
fn test_bump_reports_reason_and_changes_nothing() {
    let mut layout = empty();
    layout[6][6] = 1;
    layout[5][6] = 2;
    let mut board = Board::from_layout(&layout, 1);

    assert_eq!(
        board.attempt_move(GridPos::new(6, 6), mv(Direction::NorthWest)),
        MoveResult::Blocked(BlockReason::Bump)
    );
    assert!(!board.is_animating());
    assert_eq!(board.value_tally().values().sum::<u32>(), 2);
}

#[test]
fn test_last_die_against_edge_has_no_legal_move() {
    let mut layout = empty();
    layout[0][3] = 6;
    let mut board = Board::from_layout(&layout, 1);
    assert!(!board.recompute_legal_move_flag(mv(Direction::NorthWest)));
    assert!(board.recompute_legal_move_flag(mv(Direction::SouthEast)));
}

#[test]
fn test_spawned_board_settles_with_no_dead_dice() {
    let mut board = Board::new(2024);
    let count = board.len();
    settle(&mut board, mv(Direction::SouthEast));
    assert_eq!(board.len(), count);
    assert!(board.dice().all(|d| !d.is_dead() && !d.is_animating()));
    for die in board.dice() {
        assert_eq!(die.position(), canonical_position(die.cell()));
    }
}
