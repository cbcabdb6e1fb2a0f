use broadside::{
    Board, BoardState, CellState, CellView, GameError, Orientation, PlacementPolicy, ShotOutcome,
    BOARD_SIZE,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_place_and_sink_length_three() {
    let mut board = Board::new();
    let mut fleet = vec![board.place(0, 0, 3, Orientation::Horizontal).unwrap()];

    assert_eq!(board.resolve_shot(0, 0, &mut fleet).unwrap(), ShotOutcome::Hit);
    assert_eq!(board.resolve_shot(0, 1, &mut fleet).unwrap(), ShotOutcome::Hit);
    assert_eq!(board.cell_view(0, 0), Some(CellView::Hit));
    // final hit should sink
    assert_eq!(board.resolve_shot(0, 2, &mut fleet).unwrap(), ShotOutcome::Sunk);
    for c in 0..3 {
        assert_eq!(board.cell_view(0, c), Some(CellView::Sunk));
    }
    assert!(board.all_sunk(&fleet));

    assert_eq!(board.resolve_shot(5, 5, &mut fleet).unwrap(), ShotOutcome::Miss);
    assert_eq!(board.cell_view(5, 5), Some(CellView::Miss));

    // repeated shot triggers error
    assert_eq!(
        board.resolve_shot(0, 2, &mut fleet).unwrap_err(),
        GameError::AlreadyShot { row: 0, col: 2 }
    );
    assert_eq!(
        board.resolve_shot(5, 5, &mut fleet).unwrap_err(),
        GameError::AlreadyShot { row: 5, col: 5 }
    );
}

#[test]
fn test_shot_out_of_bounds_leaves_board_untouched() {
    let mut board = Board::new();
    let mut fleet = vec![board.place(0, 0, 2, Orientation::Vertical).unwrap()];
    let before = BoardState::from(&board);
    assert_eq!(
        board.resolve_shot(BOARD_SIZE as usize, 0, &mut fleet).unwrap_err(),
        GameError::OutOfBounds { row: 10, col: 0 }
    );
    assert_eq!(BoardState::from(&board), before);
    assert_eq!(fleet[0].damage(), 0);
}

#[test]
fn test_place_rejects_overlap_and_overhang() {
    let mut board = Board::new();
    board.place(2, 2, 4, Orientation::Horizontal).unwrap();
    assert!(!board.can_place(0, 3, 3, Orientation::Vertical));
    assert!(matches!(
        board.place(0, 3, 3, Orientation::Vertical),
        Err(GameError::CellOccupied { row: 2, col: 3 })
    ));
    assert!(matches!(
        board.place(9, 8, 3, Orientation::Horizontal),
        Err(GameError::OutOfBounds { .. })
    ));
    // touching is fine under the overlap-only rule
    assert!(board.can_place(3, 2, 4, Orientation::Horizontal));
    assert_eq!(board.occupancy().count_ones(), 4);
}

#[test]
fn test_no_touch_policy() {
    let mut board = Board::new();
    board.place(4, 4, 3, Orientation::Horizontal).unwrap();
    let policy = PlacementPolicy::NoTouching;
    // diagonal neighbour of (4, 6)
    assert!(!board.can_place_with(policy, 5, 7, 2, Orientation::Vertical));
    // directly above
    assert!(!board.can_place_with(policy, 3, 4, 2, Orientation::Horizontal));
    assert!(board.can_place_with(policy, 6, 4, 2, Orientation::Horizontal));
    assert!(board.can_place_with(PlacementPolicy::AllowTouching, 5, 7, 2, Orientation::Vertical));
}

#[test]
fn test_random_placement_all_ships_no_overlap() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(42);
    let lengths = [5, 4, 3, 3, 2];
    for len in lengths {
        let (r, c, orient) = board
            .random_placement(&mut rng, len, PlacementPolicy::AllowTouching)
            .unwrap();
        board.place(r, c, len, orient).unwrap();
    }
    assert_eq!(
        board.occupancy().count_ones(),
        lengths.iter().sum::<usize>(),
        "all ships should be placed without overlap"
    );
}

#[test]
fn test_random_placement_falls_back_to_scan() {
    let mut board = Board::new();
    // fill all but the last row
    for r in 0..9 {
        board.place(r, 0, 5, Orientation::Horizontal).unwrap();
        board.place(r, 5, 5, Orientation::Horizontal).unwrap();
    }
    let mut rng = SmallRng::seed_from_u64(7);
    let (r, c, o) = board
        .random_placement(&mut rng, 5, PlacementPolicy::AllowTouching)
        .unwrap();
    assert_eq!(r, 9);
    assert_eq!(o, Orientation::Horizontal);
    assert!(c <= 5);

    board.place(9, 0, 5, Orientation::Horizontal).unwrap();
    board.place(9, 5, 5, Orientation::Horizontal).unwrap();
    assert!(board
        .random_placement(&mut rng, 2, PlacementPolicy::AllowTouching)
        .is_err());
}

#[test]
fn test_views() {
    let mut board = Board::new();
    let mut fleet = vec![board.place(1, 1, 2, Orientation::Vertical).unwrap()];
    board.resolve_shot(1, 1, &mut fleet).unwrap();
    board.resolve_shot(0, 0, &mut fleet).unwrap();

    let own = board.own_view();
    assert_eq!(own.get(1, 1), Some(CellState::Hit));
    assert_eq!(own.get(2, 1), Some(CellState::Ship));
    assert_eq!(own.get(0, 0), Some(CellState::Miss));
    assert_eq!(own.get(9, 9), Some(CellState::Empty));

    let view = board.opponent_view();
    assert_eq!(view.get(1, 1), Some(CellView::Hit));
    assert_eq!(view.get(2, 1), Some(CellView::Unknown));
    assert_eq!(view.count(CellView::Unknown), 98);
    assert_eq!(view.get(10, 0), None);
}

#[test]
fn test_board_state_roundtrip() {
    let mut board = Board::new();
    let mut fleet = vec![board.place(3, 3, 3, Orientation::Horizontal).unwrap()];
    board.resolve_shot(3, 4, &mut fleet).unwrap();
    board.resolve_shot(7, 7, &mut fleet).unwrap();
    let state = BoardState::from(&board);
    let restored = Board::from(state);
    assert_eq!(board, restored);

    board.reset();
    assert_eq!(board, Board::new());
}
