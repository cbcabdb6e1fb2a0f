use broadside::{
    CellView, Controller, FleetLayout, Game, GameConfig, GameError, Orientation, Phase, PlayerId,
    PlayerKind, ShotOutcome, TurnOutcome,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn classic() -> GameConfig {
    GameConfig {
        fleet: FleetLayout::Classic,
        ..GameConfig::default()
    }
}

/// Ships of length 5, 4, 3, 2 laid horizontally on rows 0 to 3.
fn place_stacked(game: &mut Game, id: PlayerId) {
    for (row, len) in [5, 4, 3, 2].into_iter().enumerate() {
        game.place_ship(id, len, row, 0, Orientation::Horizontal).unwrap();
    }
}

fn two_humans() -> Game {
    let mut game = Game::new(
        PlayerKind::Human.into(),
        PlayerKind::Human.into(),
        classic(),
    );
    place_stacked(&mut game, PlayerId::One);
    place_stacked(&mut game, PlayerId::Two);
    game.start().unwrap();
    game
}

fn shoot(game: &mut Game, rng: &mut SmallRng, row: usize, col: usize) -> TurnOutcome {
    game.submit_shot(row, col).unwrap();
    game.take_turn(rng).unwrap()
}

#[test]
fn test_scripted_game_to_victory() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = two_humans();
    assert_eq!(game.phase(), Phase::AwaitingShot(PlayerId::One));

    let targets: Vec<(usize, usize)> = [5, 4, 3, 2]
        .into_iter()
        .enumerate()
        .flat_map(|(row, len)| (0..len).map(move |c| (row, c)))
        .collect();
    let misses: Vec<(usize, usize)> = (0..10).map(|c| (9, c)).chain((0..3).map(|c| (8, c))).collect();
    assert_eq!(targets.len(), 14);

    let mut final_outcome = None;
    for (i, &(r, c)) in targets.iter().enumerate() {
        let outcome = shoot(&mut game, &mut rng, r, c);
        if i + 1 == targets.len() {
            final_outcome = Some(outcome);
            break;
        }
        assert!(matches!(
            outcome,
            TurnOutcome::TurnComplete { shooter: PlayerId::One, .. }
        ));
        // hits do not earn another shot
        assert_eq!(game.active(), Some(PlayerId::Two));
        let (mr, mc) = misses[i];
        assert_eq!(
            shoot(&mut game, &mut rng, mr, mc),
            TurnOutcome::TurnComplete {
                shooter: PlayerId::Two,
                target: (mr, mc),
                outcome: ShotOutcome::Miss,
            }
        );
    }

    assert_eq!(
        final_outcome,
        Some(TurnOutcome::GameOver {
            winner: PlayerId::One,
            target: (3, 1),
            outcome: ShotOutcome::Sunk,
        })
    );
    assert_eq!(game.winner(), Some(PlayerId::One));
    assert!(game.is_over());
    assert_eq!(game.shots_fired(PlayerId::One), 14);
    assert_eq!(game.shots_fired(PlayerId::Two), 13);
    assert_eq!(game.ships_remaining(PlayerId::One), 4);
    assert_eq!(game.ships_remaining(PlayerId::Two), 0);
    assert_eq!(game.opponent_view(PlayerId::Two).count(CellView::Sunk), 14);

    // terminal: nothing more is accepted
    assert!(matches!(game.take_turn(&mut rng), Err(GameError::InvalidState(_))));
    assert!(matches!(game.submit_shot(5, 5), Err(GameError::InvalidState(_))));
    assert_eq!(game.winner(), Some(PlayerId::One));
}

#[test]
fn test_sink_reported_per_ship() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = two_humans();
    // destroyer on row 3
    assert!(matches!(
        shoot(&mut game, &mut rng, 3, 0),
        TurnOutcome::TurnComplete { outcome: ShotOutcome::Hit, .. }
    ));
    shoot(&mut game, &mut rng, 9, 9);
    assert!(matches!(
        shoot(&mut game, &mut rng, 3, 1),
        TurnOutcome::TurnComplete { outcome: ShotOutcome::Sunk, .. }
    ));
    assert_eq!(game.ships_remaining(PlayerId::Two), 3);
}

#[test]
fn test_human_without_shot_is_no_move() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut game = Game::human_vs_computer(GameConfig::default());
    game.auto_place(PlayerId::One, &mut rng).unwrap();
    game.auto_place(PlayerId::Two, &mut rng).unwrap();
    game.start().unwrap();

    let before = game.clone();
    assert_eq!(game.take_turn(&mut rng).unwrap(), TurnOutcome::NoMove);
    assert_eq!(game, before);

    game.submit_shot(4, 4).unwrap();
    assert!(matches!(
        game.take_turn(&mut rng).unwrap(),
        TurnOutcome::TurnComplete { shooter: PlayerId::One, target: (4, 4), .. }
    ));
    // computer answers on its own
    assert!(matches!(
        game.take_turn(&mut rng).unwrap(),
        TurnOutcome::TurnComplete { shooter: PlayerId::Two, .. }
    ));
    assert_eq!(game.shots_fired(PlayerId::Two), 1);

    assert_eq!(
        game.submit_shot(4, 4).unwrap_err(),
        GameError::AlreadyShot { row: 4, col: 4 }
    );
    assert_eq!(
        game.submit_shot(0, 10).unwrap_err(),
        GameError::OutOfBounds { row: 0, col: 10 }
    );
    // rejected input leaves nothing queued
    assert_eq!(game.take_turn(&mut rng).unwrap(), TurnOutcome::NoMove);
}

#[test]
fn test_submit_shot_rejected_for_computer_turn() {
    let mut rng = SmallRng::seed_from_u64(8);
    let mut game = Game::computer_vs_computer(GameConfig::default());
    game.auto_place(PlayerId::One, &mut rng).unwrap();
    game.auto_place(PlayerId::Two, &mut rng).unwrap();
    game.start().unwrap();
    assert!(matches!(game.submit_shot(0, 0), Err(GameError::InvalidState(_))));
}

#[test]
fn test_setup_rules() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut game = Game::new(
        Controller::from(PlayerKind::Human),
        Controller::from(PlayerKind::Automated),
        GameConfig::default(),
    );
    assert_eq!(game.phase(), Phase::Setup);
    assert!(matches!(game.take_turn(&mut rng), Err(GameError::InvalidState(_))));
    assert!(matches!(game.start(), Err(GameError::InvalidState(_))));

    game.place_ship(PlayerId::One, 3, 0, 0, Orientation::Horizontal).unwrap();
    game.place_ship(PlayerId::One, 3, 1, 0, Orientation::Horizontal).unwrap();
    // only two ships of length 3 in the standard fleet
    assert!(matches!(
        game.place_ship(PlayerId::One, 3, 2, 0, Orientation::Horizontal),
        Err(GameError::InvalidState(_))
    ));
    assert_eq!(
        game.place_ship(PlayerId::One, 5, 0, 2, Orientation::Vertical).unwrap_err(),
        GameError::CellOccupied { row: 0, col: 2 }
    );
    assert!(matches!(
        game.place_ship(PlayerId::One, 5, 0, 9, Orientation::Horizontal),
        Err(GameError::OutOfBounds { .. })
    ));
    assert_eq!(game.player(PlayerId::One).fleet().len(), 2);

    game.clear_fleet(PlayerId::One).unwrap();
    assert!(game.player(PlayerId::One).fleet().is_empty());

    game.auto_place(PlayerId::One, &mut rng).unwrap();
    game.auto_place(PlayerId::Two, &mut rng).unwrap();
    game.start().unwrap();

    // placement is locked once play begins
    assert!(matches!(
        game.place_ship(PlayerId::One, 2, 9, 0, Orientation::Horizontal),
        Err(GameError::InvalidState(_))
    ));
    assert!(matches!(game.auto_place(PlayerId::Two, &mut rng), Err(GameError::InvalidState(_))));
    assert!(matches!(game.start(), Err(GameError::InvalidState(_))));
}

#[test]
fn test_reset_returns_to_setup() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut game = two_humans();
    shoot(&mut game, &mut rng, 0, 0);
    game.reset();
    assert_eq!(game.phase(), Phase::Setup);
    assert!(game.player(PlayerId::One).fleet().is_empty());
    assert_eq!(game.shots_fired(PlayerId::One), 0);
    assert_eq!(game.player(PlayerId::One).kind(), PlayerKind::Human);
}
