//! Driver - owns the engine and scanner and runs one tick at a time
//!
//! Each tick:
//! apply pending edits (caller) -> advance unless paused -> scan one column
//! if sonification is on -> hand the live cells to the renderer
//!
//! Scheduling policy (pause flag, tick interval) lives here and never in the
//! engine, which stays a pure state-transition object.

pub mod command;
pub mod render;
pub mod sink;

use std::collections::BTreeSet;
use std::time::Duration;

use serde::Serialize;

use crate::core::config::{DriverConfig, LifeConfig};
use crate::core::error::Result;
use crate::core::types::Generation;
use crate::engine::{BoardEngine, SeedStrategy};
use crate::scan::ColumnScanner;

pub use command::{Command, Response};
pub use render::{Renderer, TextRenderer};
pub use sink::{LoggingSink, SonificationSink};

/// Factor applied by `faster` / `slower`
pub const SPEED_STEP: u32 = 10;

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub generation: Generation,
    /// False when the tick was skipped because the driver is paused
    pub advanced: bool,
    pub live_cells: usize,
    /// Column scanned this tick, if sonification ran
    pub column: Option<usize>,
    pub pitches: Option<BTreeSet<usize>>,
}

/// Scheduling policy, kept apart from simulation content
#[derive(Debug, Clone)]
pub struct DriverState {
    pub paused: bool,
    pub sonification: bool,
    tick_interval: Duration,
    min_interval: Duration,
    max_interval: Duration,
}

impl DriverState {
    pub fn from_config(config: &DriverConfig) -> Self {
        Self {
            paused: config.start_paused,
            sonification: config.sonification,
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            min_interval: Duration::from_millis(config.min_tick_interval_ms),
            max_interval: Duration::from_millis(config.max_tick_interval_ms),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Divide the tick interval by `SPEED_STEP`, clamped to the configured minimum
    pub fn faster(&mut self) -> Duration {
        self.tick_interval = (self.tick_interval / SPEED_STEP).max(self.min_interval);
        self.tick_interval
    }

    /// Multiply the tick interval by `SPEED_STEP`, clamped to the configured maximum
    pub fn slower(&mut self) -> Duration {
        self.tick_interval = self
            .tick_interval
            .saturating_mul(SPEED_STEP)
            .min(self.max_interval);
        self.tick_interval
    }
}

impl Default for DriverState {
    fn default() -> Self {
        Self::from_config(&DriverConfig::default())
    }
}

/// Explicit owner of one simulation: engine, scanner, policy and outputs
pub struct Driver {
    engine: BoardEngine,
    scanner: ColumnScanner,
    state: DriverState,
    seed_strategy: SeedStrategy,
    renderer: Option<Box<dyn Renderer>>,
    sink: Option<Box<dyn SonificationSink>>,
}

impl Driver {
    pub fn new(engine: BoardEngine, scanner: ColumnScanner, state: DriverState) -> Self {
        Self {
            engine,
            scanner,
            state,
            seed_strategy: SeedStrategy::per_cell(),
            renderer: None,
            sink: None,
        }
    }

    pub fn from_config(config: &LifeConfig) -> Result<Self> {
        let engine = BoardEngine::from_config(config)?;
        let scanner = ColumnScanner::new(config.fold_policy());
        let mut driver = Self::new(engine, scanner, DriverState::from_config(&config.driver));
        driver.seed_strategy = config.seed_strategy();
        Ok(driver)
    }

    pub fn set_renderer(&mut self, renderer: Option<Box<dyn Renderer>>) {
        self.renderer = renderer;
    }

    pub fn set_sink(&mut self, sink: Option<Box<dyn SonificationSink>>) {
        self.sink = sink;
    }

    pub fn set_seed_strategy(&mut self, strategy: SeedStrategy) {
        self.seed_strategy = strategy;
    }

    pub fn seed_strategy(&self) -> SeedStrategy {
        self.seed_strategy
    }

    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    /// Mutable engine access for edits between ticks
    pub fn engine_mut(&mut self) -> &mut BoardEngine {
        &mut self.engine
    }

    pub fn scanner(&self) -> &ColumnScanner {
        &self.scanner
    }

    pub fn state(&self) -> &DriverState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DriverState {
        &mut self.state
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.paused = !self.state.paused;
        tracing::info!("{}", if self.state.paused { "Paused" } else { "Resumed" });
        self.state.paused
    }

    pub fn toggle_sonification(&mut self) -> bool {
        self.state.sonification = !self.state.sonification;
        self.state.sonification
    }

    /// One scheduled tick. Skips the generation while paused.
    pub fn tick(&mut self) -> Result<TickReport> {
        let advance = !self.state.paused;
        self.run_tick(advance)
    }

    /// Advance exactly one generation regardless of the pause flag
    pub fn step(&mut self) -> Result<TickReport> {
        self.run_tick(true)
    }

    fn run_tick(&mut self, advance: bool) -> Result<TickReport> {
        if advance {
            self.engine.advance();
        }

        let (column, pitches) = if advance && self.state.sonification {
            let column = self.scanner.current_column();
            let pitches = self.scanner.advance_and_scan(&self.engine);
            if let Some(sink) = self.sink.as_mut() {
                sink.play(column, &pitches);
            }
            (Some(column), Some(pitches))
        } else {
            (None, None)
        };

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(self.engine.live_cells(), self.engine.dimensions())?;
        }

        Ok(TickReport {
            generation: self.engine.generation(),
            advanced: advance,
            live_cells: self.engine.live_count(),
            column,
            pitches,
        })
    }

    /// Reseed with the configured strategy
    pub fn reseed(&mut self) {
        self.engine.seed_random(self.seed_strategy);
        self.scanner.reset();
    }
}
