//! Marble Maze entry point
//!
//! Headless driver: generates a maze, prints it, then reads key presses from
//! stdin. Each line is one frame of released keys (`w`, `a`, `s`, `d`, or
//! names like `left`, separated by whitespace or run together as `ddss`),
//! followed by a burst of fixed simulation steps.
//!
//! Usage: `marble-maze [config.json]`

use std::io::BufRead;
use std::process::ExitCode;

use marble_maze::MazeConfig;
use marble_maze::sim::{BodyLabel, Game, GameEvent, Key, PhysicsWorld, TickInput};

/// Simulation steps run per input line (half a second at 60 Hz)
const STEPS_PER_FRAME: u32 = 30;

fn parse_keys(line: &str) -> Vec<Key> {
    let mut keys = Vec::new();
    for word in line.split_whitespace() {
        if let Some(key) = Key::from_name(word) {
            keys.push(key);
            continue;
        }
        for c in word.chars() {
            match Key::from_name(c.encode_utf8(&mut [0; 4])) {
                Some(key) => keys.push(key),
                None => log::warn!("Ignoring unknown key {:?}", c),
            }
        }
    }
    keys
}

/// One-line count of bodies per label, e.g. `12 wall, 4 boundary, 1 goal, 1 ball`
fn body_summary<W: PhysicsWorld>(world: &W) -> String {
    [
        BodyLabel::Wall,
        BodyLabel::Boundary,
        BodyLabel::Goal,
        BodyLabel::Ball,
    ]
    .iter()
    .map(|&label| format!("{} {}", world.bodies_labeled(label).len(), label.as_str()))
    .collect::<Vec<_>>()
    .join(", ")
}

fn run() -> Result<(), marble_maze::MazeError> {
    let config = match std::env::args().nth(1) {
        Some(path) => MazeConfig::load(path)?,
        None => MazeConfig::default(),
    };

    let mut game = Game::new(&config)?;
    println!("{}", game.grid.to_string_art());
    println!(
        "seed {} | {} | reach the bottom-right cell (w/a/s/d, Ctrl-D to quit)",
        game.seed,
        body_summary(&game.world)
    );

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut input = TickInput {
            released: parse_keys(&line),
        };

        for _ in 0..STEPS_PER_FRAME {
            game.tick(&input)?;
            input.released.clear();
        }

        let ball = game.controller.ball();
        let pos = game.world.position(ball)?;
        println!(
            "step {}: ball at ({:.1}, {:.1})",
            game.world.time_steps(),
            pos.x,
            pos.y
        );

        if game.controller.drain_events().contains(&GameEvent::Won) {
            println!("You won!");
            break;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Marble Maze (native) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
