use broadside::{
    FleetLayout, Game, GameConfig, PlacementPolicy, PlayerId, ShotOutcome, TurnOutcome,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn play_out(config: GameConfig, seed: u64) -> (Game, usize) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = Game::computer_vs_computer(config);
    game.auto_place(PlayerId::One, &mut rng).unwrap();
    game.auto_place(PlayerId::Two, &mut rng).unwrap();
    game.start().unwrap();

    let mut turns = 0;
    while !game.is_over() {
        turns += 1;
        let active = game.active().unwrap();
        match game.take_turn(&mut rng).unwrap() {
            TurnOutcome::NoMove => panic!("computer player produced no move"),
            TurnOutcome::TurnComplete { shooter, .. } => assert_eq!(shooter, active),
            TurnOutcome::GameOver { winner, outcome, .. } => {
                assert_eq!(winner, active);
                assert_eq!(outcome, ShotOutcome::Sunk);
            }
        }
        if turns > 200 {
            panic!("game took too many turns");
        }
    }
    (game, turns)
}

#[test]
fn test_ai_vs_ai_game() {
    let (game, turns) = play_out(GameConfig::default(), 123);
    let winner = game.winner().unwrap();
    let loser = winner.opponent();
    assert_eq!(game.ships_remaining(loser), 0);
    assert!(game.ships_remaining(winner) > 0);
    assert_eq!(
        game.shots_fired(PlayerId::One) + game.shots_fired(PlayerId::Two),
        turns
    );
    // player one shoots first, so it is never behind
    let diff = game.shots_fired(PlayerId::One) - game.shots_fired(PlayerId::Two);
    assert!(diff <= 1);
}

#[test]
fn test_ai_games_across_configs() {
    let configs = [
        GameConfig::default(),
        GameConfig {
            fleet: FleetLayout::Classic,
            auto_placement: PlacementPolicy::AllowTouching,
        },
        GameConfig {
            fleet: FleetLayout::Standard,
            auto_placement: PlacementPolicy::NoTouching,
        },
    ];
    for config in configs {
        for seed in 0..10 {
            let (game, _) = play_out(config, seed);
            let loser = game.winner().unwrap().opponent();
            assert!(game.player(loser).is_defeated());
            // the winning side fired at least one shot per enemy ship cell
            assert!(game.shots_fired(loser.opponent()) >= config.fleet.total_cells());
        }
    }
}

#[test]
fn test_seeded_games_are_reproducible() {
    let (a, turns_a) = play_out(GameConfig::default(), 77);
    let (b, turns_b) = play_out(GameConfig::default(), 77);
    assert_eq!(turns_a, turns_b);
    assert_eq!(a.state(), b.state());
}
