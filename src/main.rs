use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use broadside::{
    init_logging,
    render::{coord_to_string, parse_coord, render_opponent, render_own},
    save, FleetLayout, Game, GameConfig, Orientation, Phase, PlacementPolicy, PlayerId,
    PlayerKind, ShotOutcome, TurnOutcome,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{sleep, Duration};

/// Upper bound on shots in an unattended game; 200 covers every cell of both boards.
const MAX_SHOTS: usize = 200;

#[derive(Parser)]
#[command(author, version, about = "Two-player naval combat on a 10x10 grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct SetupArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Four-ship fleet (5, 4, 3, 2) instead of five")]
    classic: bool,
    #[arg(long, help = "Random placement keeps ships from touching, diagonals included")]
    no_touch: bool,
}

impl SetupArgs {
    fn config(&self) -> GameConfig {
        GameConfig {
            fleet: if self.classic {
                FleetLayout::Classic
            } else {
                FleetLayout::Standard
            },
            auto_placement: if self.no_touch {
                PlacementPolicy::NoTouching
            } else {
                PlacementPolicy::AllowTouching
            },
        }
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(s) => {
                println!("Using fixed seed: {} (game will be reproducible)", s);
                SmallRng::seed_from_u64(s)
            }
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Watch two computer players fight it out.
    Local {
        #[command(flatten)]
        setup: SetupArgs,
        #[arg(long, help = "Write the finished game to this file")]
        save: Option<PathBuf>,
    },
    /// Play against the computer in the terminal.
    Play {
        #[command(flatten)]
        setup: SetupArgs,
        #[arg(long, help = "Place your own ships instead of a random layout")]
        manual: bool,
        #[arg(long, help = "Resume a saved game")]
        load: Option<PathBuf>,
        #[arg(long, default_value_t = 600, help = "Computer thinking delay in milliseconds")]
        think_ms: u64,
    },
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { setup, save } => run_local(setup, save),
        Commands::Play {
            setup,
            manual,
            load,
            think_ms,
        } => {
            let mut rng = setup.rng();
            let mut input = BufReader::new(tokio::io::stdin()).lines();
            let mut game = match load {
                Some(path) => save::load_from_path(&path)?,
                None => {
                    let mut game = Game::human_vs_computer(setup.config());
                    if manual {
                        place_manually(&mut game, &mut rng, &mut input).await?;
                    } else {
                        game.auto_place(PlayerId::One, &mut rng)?;
                    }
                    game.auto_place(PlayerId::Two, &mut rng)?;
                    game.start()?;
                    game
                }
            };
            play(&mut game, &mut rng, &mut input, Duration::from_millis(think_ms)).await
        }
    }
}

fn run_local(setup: SetupArgs, save_path: Option<PathBuf>) -> Result<()> {
    println!("Starting local computer vs computer game...");
    let mut rng = setup.rng();
    let mut game = Game::computer_vs_computer(setup.config());
    game.auto_place(PlayerId::One, &mut rng)?;
    game.auto_place(PlayerId::Two, &mut rng)?;
    game.start()?;

    for _ in 0..MAX_SHOTS {
        let outcome = game.take_turn(&mut rng)?;
        report(&outcome);
        if game.is_over() {
            break;
        }
    }
    let winner = game
        .winner()
        .ok_or_else(|| anyhow!("no winner after {} shots", MAX_SHOTS))?;
    for id in [PlayerId::One, PlayerId::Two] {
        println!("\nPlayer {} board:", id.number());
        print!("{}", render_own(&game.own_view(id)));
    }
    println!(
        "\nPlayer {} wins after {} shots ({} ships left).",
        winner.number(),
        game.shots_fired(winner),
        game.ships_remaining(winner)
    );
    if let Some(path) = save_path {
        save::save_to_path(&game, &path)?;
    }
    Ok(())
}

fn report(outcome: &TurnOutcome) {
    let (who, target, shot) = match *outcome {
        TurnOutcome::NoMove => return,
        TurnOutcome::TurnComplete {
            shooter,
            target,
            outcome,
        } => (shooter, target, outcome),
        TurnOutcome::GameOver {
            winner,
            target,
            outcome,
        } => (winner, target, outcome),
    };
    let word = match shot {
        ShotOutcome::Miss => "Miss.",
        ShotOutcome::Hit => "Hit!",
        ShotOutcome::Sunk => "Ship sunk!",
    };
    println!(
        "Player {} fires at {}: {}",
        who.number(),
        coord_to_string(target.0, target.1),
        word
    );
}

fn parse_orientation(s: Option<&str>) -> Result<Orientation, String> {
    match s.map(|s| s.to_ascii_uppercase()) {
        None => Ok(Orientation::Horizontal),
        Some(s) if s == "H" => Ok(Orientation::Horizontal),
        Some(s) if s == "V" => Ok(Orientation::Vertical),
        Some(s) => Err(format!("Invalid orientation '{}' - use H or V", s)),
    }
}

async fn place_manually(game: &mut Game, rng: &mut SmallRng, input: &mut Input) -> Result<()> {
    println!("\nPlace your fleet: '<COLUMN><ROW> <H|V>' (e.g. A5 H), or ENTER for a random spot.");
    let ships = game.config().fleet.ships();
    for (i, def) in ships.iter().enumerate() {
        loop {
            print!("{}", render_own(&game.own_view(PlayerId::One)));
            println!(
                "Ship {}/{}: {} (length {})",
                i + 1,
                ships.len(),
                def.name(),
                def.length()
            );
            let Some(line) = input.next_line().await? else {
                bail!("input closed during placement");
            };
            let line = line.trim();
            let placement = if line.is_empty() {
                let board = game.player(PlayerId::One).board();
                board
                    .random_placement(rng, def.length(), PlacementPolicy::AllowTouching)
                    .map_err(|e| e.to_string())
            } else {
                let mut parts = line.split_whitespace();
                parse_coord(parts.next().unwrap_or_default()).and_then(|(r, c)| {
                    parse_orientation(parts.next()).map(|o| (r, c, o))
                })
            };
            let result = placement.and_then(|(r, c, o)| {
                game.place_ship(PlayerId::One, def.length(), r, c, o)
                    .map(|()| (r, c))
                    .map_err(|e| e.to_string())
            });
            match result {
                Ok((r, c)) => {
                    println!("{} placed at {}", def.name(), coord_to_string(r, c));
                    break;
                }
                Err(e) => println!("Error: {}", e),
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  <COLUMN><ROW>   fire at a cell, e.g. B7");
    println!("  show            redraw both boards");
    println!("  save <path>     save the game (.{} text format)", save::SAVE_EXTENSION);
    println!("  quit            leave the game");
}

fn show(game: &Game, me: PlayerId) {
    println!("\nOpponent board:");
    print!("{}", render_opponent(&game.opponent_view(me.opponent())));
    println!("\nYour board:");
    print!("{}", render_own(&game.own_view(me)));
    println!(
        "Your ships remaining: {} | Opponent ships remaining: {}",
        game.ships_remaining(me),
        game.ships_remaining(me.opponent())
    );
}

/// Event loop: the engine is polled with `take_turn`; human input is
/// awaited here, never inside the engine.
async fn play(game: &mut Game, rng: &mut SmallRng, input: &mut Input, think: Duration) -> Result<()> {
    let mut redraw = true;
    loop {
        let active = match game.phase() {
            Phase::AwaitingShot(id) => id,
            Phase::GameOver { winner } => {
                show(game, winner);
                println!("\nGame over - player {} wins!", winner.number());
                return Ok(());
            }
            Phase::Setup => bail!("game was not started"),
        };

        if game.player(active).kind() == PlayerKind::Automated {
            sleep(think).await;
            let outcome = game.take_turn(rng)?;
            report(&outcome);
            redraw = true;
            continue;
        }

        if redraw {
            show(game, active);
            redraw = false;
        }
        println!("Player {}, enter target (or 'help'):", active.number());
        let Some(line) = input.next_line().await? else {
            info!("input closed, abandoning game");
            return Ok(());
        };
        let line = line.trim();
        let mut words = line.split_whitespace();
        match words.next().map(str::to_ascii_lowercase).as_deref() {
            None => continue,
            Some("quit") | Some("exit") => return Ok(()),
            Some("help") => print_help(),
            Some("show") => redraw = true,
            Some("save") => match words.next() {
                Some(path) => {
                    if let Err(e) = save::save_to_path(game, &PathBuf::from(path)) {
                        println!("Error: {:#}", e);
                    } else {
                        println!("Game saved to {}", path);
                    }
                }
                None => println!("Usage: save <path>"),
            },
            Some(_) => match parse_coord(line) {
                Ok((r, c)) => match game.submit_shot(r, c) {
                    Ok(()) => {
                        let outcome = game.take_turn(rng)?;
                        report(&outcome);
                        redraw = true;
                    }
                    Err(e) => println!("Error: {}", e),
                },
                Err(e) => println!("Invalid coordinate: {}", e),
            },
        }
    }
}
