//! Text command parsing for the interactive console.
//!
//! Commands mirror the console vocabulary of the simulator:
//!
//! - `quadtree|qtree <n>`, `grid|spatialhashing <n>`,
//!   `bvh|boundingvolumehierarchy <n>` — switch strategy and respawn `n`
//!   bodies
//! - `<strategy> velocity|speed <f>` — multiply every body's velocity
//! - `start` — run one timed step
//! - `test` — sweep a step over growing populations for every strategy
//! - `lines` — toggle debug geometry
//! - `help`, `exit|quit|bye`
//!
//! Parsing rejects malformed or negative numbers up front, so an invalid
//! count never reaches the respawn path.

use anyhow::{anyhow, bail, Result};

use crate::simulation::engine::IndexKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SwitchTo { kind: IndexKind, count: usize },
    ScaleVelocity { factor: f64 },
    Start,
    Test,
    ToggleLines,
    Help,
    Exit,
}

fn index_kind(token: &str) -> Option<IndexKind> {
    match token {
        "quadtree" | "qtree" => Some(IndexKind::QuadTree),
        "grid" | "spatialhashing" => Some(IndexKind::Grid),
        "bvh" | "boundingvolumehierarchy" => Some(IndexKind::Bvh),
        _ => None,
    }
}

pub fn parse(line: &str) -> Result<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&first) = tokens.first() else {
        bail!("empty command");
    };

    match first {
        "exit" | "quit" | "bye" => return Ok(Command::Exit),
        "help" => return Ok(Command::Help),
        "start" => return Ok(Command::Start),
        "test" => return Ok(Command::Test),
        "lines" => return Ok(Command::ToggleLines),
        _ => {}
    }

    let kind = index_kind(first).ok_or_else(|| anyhow!("unknown command `{first}`, try `help`"))?;

    match tokens.len() {
        2 => {
            let count: i64 = tokens[1]
                .parse()
                .map_err(|_| anyhow!("`{}` is not a particle count", tokens[1]))?;
            if count < 0 {
                bail!("particle count must not be negative");
            }
            Ok(Command::SwitchTo {
                kind,
                count: count as usize,
            })
        }
        3 if tokens[1] == "velocity" || tokens[1] == "speed" => {
            let factor: f64 = tokens[2]
                .parse()
                .map_err(|_| anyhow!("`{}` is not a velocity factor", tokens[2]))?;
            if !factor.is_finite() {
                bail!("velocity factor must be finite");
            }
            Ok(Command::ScaleVelocity { factor })
        }
        _ => bail!("usage: {first} <count> | {first} velocity <factor>"),
    }
}

pub const HELP_TEXT: &str = "\
help
quadtree/bvh/grid [number] - changes the number of particles
quadtree/bvh/grid velocity [number] - multiplies the velocity of particles
lines - toggles index debug geometry
start - runs one simulation step
test - runs a step for growing particle counts, all strategies
exit - closes the program";
