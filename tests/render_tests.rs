use broadside::render::{coord_to_string, parse_coord, render_opponent, render_own};
use broadside::{Board, Orientation};

#[test]
fn test_parse_coord() {
    assert_eq!(parse_coord("A1"), Ok((0, 0)));
    assert_eq!(parse_coord("b7"), Ok((6, 1)));
    assert_eq!(parse_coord(" J10 "), Ok((9, 9)));
    assert!(parse_coord("K1").is_err());
    assert!(parse_coord("A0").is_err());
    assert!(parse_coord("A11").is_err());
    assert!(parse_coord("5A").is_err());
    assert!(parse_coord("A").is_err());
}

#[test]
fn test_coord_labels_roundtrip() {
    for r in 0..10 {
        for c in 0..10 {
            assert_eq!(parse_coord(&coord_to_string(r, c)), Ok((r, c)));
        }
    }
}

#[test]
fn test_render_hides_ships_from_opponent() {
    let mut board = Board::new();
    let mut fleet = vec![board.place(0, 0, 3, Orientation::Horizontal).unwrap()];
    board.resolve_shot(0, 0, &mut fleet).unwrap();
    board.resolve_shot(5, 5, &mut fleet).unwrap();

    let own = render_own(&board.own_view());
    let theirs = render_opponent(&board.opponent_view());
    let first_row = |s: &str| s.lines().nth(1).unwrap_or_default().to_string();
    assert_eq!(first_row(&own), "   1 X S S . . . . . . .");
    assert_eq!(first_row(&theirs), "   1 X . . . . . . . . .");
    assert!(theirs.lines().nth(6).unwrap_or_default().contains('o'));
    for line in theirs.lines().skip(1).take(10) {
        assert!(!line.contains('S'));
    }
}
