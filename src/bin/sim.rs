use broadside::{init_logging, Game, GameConfig, PlayerId};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

const MAX_SHOTS: usize = 200;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let mut game = Game::computer_vs_computer(GameConfig::default());
    game.auto_place(PlayerId::One, &mut rng1)?;
    game.auto_place(PlayerId::Two, &mut rng2)?;
    game.start()?;

    let mut turns = 0;
    while let Some(active) = game.active() {
        if turns >= MAX_SHOTS {
            anyhow::bail!("no winner after {} shots", MAX_SHOTS);
        }
        let rng = match active {
            PlayerId::One => &mut rng1,
            PlayerId::Two => &mut rng2,
        };
        game.take_turn(rng)?;
        turns += 1;
    }

    let winner = game.winner().map(|id| format!("player{}", id.number()));
    let result = json!({
        "player1": {
            "shots": game.shots_fired(PlayerId::One),
            "ships_remaining": game.ships_remaining(PlayerId::One),
        },
        "player2": {
            "shots": game.shots_fired(PlayerId::Two),
            "ships_remaining": game.ships_remaining(PlayerId::Two),
        },
        "turns": turns,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
