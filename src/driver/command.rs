//! Text command dispatcher
//!
//! Translates typed commands into engine edits and driver policy changes.
//! Edits are applied between ticks, never during one.

use crate::core::error::{LifeError, Result};
use crate::core::types::Cell;
use crate::driver::render::render_grid;
use crate::driver::{Driver, TickReport};
use crate::engine::SeedStrategy;
use crate::patterns::Pattern;

pub const HELP: &str = "\
Commands:
  toggle <row> <col>       - Bring a cell to life
  erase <row> <col>        - Kill a cell
  clear / c                - Kill every cell
  random [count]           - Reseed (counted draws if a count is given)
  randomp                  - Reseed with 1/9 per-cell probability
  place <name> <row> <col> - Stamp a named pattern
  pause / p                - Pause or resume scheduled ticks
  faster / slower          - Change the tick interval tenfold
  sound                    - Toggle column sonification
  tick / t                 - Run one scheduled tick (skipped while paused)
  step [n]                 - Advance n generations ignoring pause (default 1)
  run <n>                  - Run n scheduled ticks at the current speed
  show                     - Print the board
  status / s               - Show driver and board status
  help / h                 - Show this list
  quit / q                 - Exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Toggle(Cell),
    Erase(Cell),
    Clear,
    Random(Option<usize>),
    RandomProbability,
    Place { pattern: String, origin: Cell },
    Pause,
    Faster,
    Slower,
    Sound,
    Tick,
    Step(u64),
    /// Scheduled ticks; the interactive loop paces them by the tick interval
    Run(u64),
    Show,
    Status,
    Help,
    Quit,
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Done,
    Message(String),
    Ticks(Vec<TickReport>),
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Result<Self> {
        let mut words = input.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| LifeError::UnknownCommand(String::new()))?
            .to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (verb.as_str(), args.as_slice()) {
            ("toggle", [row, col]) => Command::Toggle(parse_cell(row, col)?),
            ("erase", [row, col]) => Command::Erase(parse_cell(row, col)?),
            ("clear" | "c", []) => Command::Clear,
            ("random", []) => Command::Random(None),
            ("random", [count]) => Command::Random(Some(parse_number(count)?)),
            ("randomp", []) => Command::RandomProbability,
            ("place", [name, row, col]) => Command::Place {
                pattern: name.to_string(),
                origin: parse_cell(row, col)?,
            },
            ("pause" | "p", []) => Command::Pause,
            ("faster", []) => Command::Faster,
            ("slower", []) => Command::Slower,
            ("sound", []) => Command::Sound,
            ("tick" | "t", []) => Command::Tick,
            ("step", []) => Command::Step(1),
            ("step", [n]) => Command::Step(parse_number(n)? as u64),
            ("run", [n]) => Command::Run(parse_number(n)? as u64),
            ("show", []) => Command::Show,
            ("status" | "s", []) => Command::Status,
            ("help" | "h", []) => Command::Help,
            ("quit" | "q", []) => Command::Quit,
            _ => return Err(LifeError::UnknownCommand(input.trim().to_string())),
        };
        Ok(command)
    }
}

fn parse_number(word: &str) -> Result<usize> {
    word.parse()
        .map_err(|_| LifeError::UnknownCommand(format!("'{}' is not a number", word)))
}

fn parse_cell(row: &str, col: &str) -> Result<Cell> {
    Ok(Cell::new(parse_number(row)?, parse_number(col)?))
}

impl Driver {
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        let response = match command {
            Command::Toggle(cell) => {
                self.engine_mut().toggle(cell)?;
                Response::Done
            }
            Command::Erase(cell) => {
                self.engine_mut().erase(cell)?;
                Response::Done
            }
            Command::Clear => {
                self.engine_mut().clear();
                Response::Done
            }
            Command::Random(count) => {
                if let Some(count) = count {
                    self.set_seed_strategy(SeedStrategy::Counted { count });
                }
                self.reseed();
                Response::Message(format!("{} live cells", self.engine().live_count()))
            }
            Command::RandomProbability => {
                self.set_seed_strategy(SeedStrategy::per_cell());
                self.reseed();
                Response::Message(format!("{} live cells", self.engine().live_count()))
            }
            Command::Place { pattern, origin } => {
                let pattern = Pattern::named(&pattern)?;
                self.engine_mut().place(&pattern, origin)?;
                Response::Done
            }
            Command::Pause => {
                let paused = self.toggle_pause();
                Response::Message(if paused { "Paused" } else { "Running" }.to_string())
            }
            Command::Faster => {
                let interval = self.state_mut().faster();
                Response::Message(format!("Tick interval {}ms", interval.as_millis()))
            }
            Command::Slower => {
                let interval = self.state_mut().slower();
                Response::Message(format!("Tick interval {}ms", interval.as_millis()))
            }
            Command::Sound => {
                let on = self.toggle_sonification();
                Response::Message(format!("Sonification {}", if on { "on" } else { "off" }))
            }
            Command::Tick => Response::Ticks(vec![self.tick()?]),
            Command::Step(n) => {
                let reports = (0..n).map(|_| self.step()).collect::<Result<Vec<_>>>()?;
                Response::Ticks(reports)
            }
            Command::Run(n) => {
                let reports = (0..n).map(|_| self.tick()).collect::<Result<Vec<_>>>()?;
                Response::Ticks(reports)
            }
            Command::Show => {
                let engine = self.engine();
                Response::Message(render_grid(engine.live_cells(), engine.dimensions()))
            }
            Command::Status => Response::Message(self.status_line()),
            Command::Help => Response::Message(HELP.to_string()),
            Command::Quit => Response::Quit,
        };
        Ok(response)
    }

    pub fn status_line(&self) -> String {
        let engine = self.engine();
        let dims = engine.dimensions();
        let state = self.state();
        format!(
            "Generation {} | {} live | {}x{} {} | {} | interval {}ms | sound {} (column {})",
            engine.generation(),
            engine.live_count(),
            dims.rows,
            dims.cols,
            engine.rule(),
            if state.paused { "paused" } else { "running" },
            state.tick_interval().as_millis(),
            if state.sonification { "on" } else { "off" },
            self.scanner().current_column(),
        )
    }
}
