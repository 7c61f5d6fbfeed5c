//! Simulation configuration with documented defaults
//!
//! Every knob the engine, scanner and driver recognise lives here. Values can
//! come from a TOML file (`LifeConfig::load`) and are then overridden by CLI
//! flags in `main`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{LifeError, Result};
use crate::core::types::Dimensions;
use crate::engine::rules::RuleSet;
use crate::engine::seeding::{SeedStrategy, DEFAULT_PROBABILITY};
use crate::scan::FoldPolicy;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub board: BoardConfig,
    pub rules: RuleConfig,
    pub seeding: SeedingConfig,
    pub scan: ScanConfig,
    pub driver: DriverConfig,

    // === PARALLELIZATION ===
    /// Minimum number of candidate cells before `advance` evaluates in parallel
    ///
    /// Below this threshold, thread overhead exceeds benefits.
    pub parallel_threshold: usize,
}

/// Board dimensions. Fixed for the lifetime of the engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

/// Neighbor counts that keep a live cell alive (`stay`) or give birth (`begin`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub stay: Vec<u8>,
    pub begin: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedKind {
    /// Draw a fixed number of uniform cells
    Counted,
    /// Include every cell independently with a fixed probability
    Probability,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedingConfig {
    pub strategy: SeedKind,
    /// Number of draws for the counted strategy (defaults to area / 9)
    pub density_count: Option<usize>,
    /// Per-cell inclusion probability for the probability strategy
    pub probability: f64,
    /// RNG seed for deterministic runs; entropy when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanKind {
    Fold,
    Identity,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub policy: ScanKind,
    /// Rows at or past this index fold back onto `rows - 1 - row` (defaults to rows / 2)
    pub fold_threshold: Option<usize>,
}

/// Scheduling policy. Owned by the driver, never by the engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub start_paused: bool,
    pub tick_interval_ms: u64,
    pub min_tick_interval_ms: u64,
    pub max_tick_interval_ms: u64,
    pub sonification: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            rules: RuleConfig::default(),
            seeding: SeedingConfig::default(),
            scan: ScanConfig::default(),
            driver: DriverConfig::default(),
            parallel_threshold: 1000,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { rows: 50, cols: 50 }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            stay: vec![2, 3],
            begin: vec![3],
        }
    }
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            strategy: SeedKind::Counted,
            density_count: None,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            policy: ScanKind::Fold,
            fold_threshold: None,
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            start_paused: true,
            tick_interval_ms: 10,
            min_tick_interval_ms: 1,
            max_tick_interval_ms: 100_000,
            sonification: false,
        }
    }
}

impl LifeConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file. Missing sections fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: LifeConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.board.rows, self.board.cols)
    }

    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::new(&self.rules.stay, &self.rules.begin)
    }

    pub fn seed_strategy(&self) -> SeedStrategy {
        match self.seeding.strategy {
            SeedKind::Counted => SeedStrategy::Counted {
                count: self
                    .seeding
                    .density_count
                    .unwrap_or(self.dimensions().area() / 9),
            },
            SeedKind::Probability => SeedStrategy::Probability {
                p: self.seeding.probability,
            },
        }
    }

    pub fn fold_policy(&self) -> FoldPolicy {
        match self.scan.policy {
            ScanKind::Fold => FoldPolicy::Fold {
                threshold: self.scan.fold_threshold.unwrap_or(self.board.rows / 2),
            },
            ScanKind::Identity => FoldPolicy::Identity,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.board.rows == 0 || self.board.cols == 0 {
            return Err(LifeError::InvalidConfig(format!(
                "board must be at least 1x1, got {}x{}",
                self.board.rows, self.board.cols
            )));
        }

        self.rule_set()?;

        if !(0.0..=1.0).contains(&self.seeding.probability) {
            return Err(LifeError::InvalidConfig(format!(
                "seeding probability ({}) must be within [0, 1]",
                self.seeding.probability
            )));
        }

        if let Some(threshold) = self.scan.fold_threshold {
            if threshold > self.board.rows {
                return Err(LifeError::InvalidConfig(format!(
                    "fold_threshold ({}) exceeds board rows ({})",
                    threshold, self.board.rows
                )));
            }
        }

        let driver = &self.driver;
        if driver.min_tick_interval_ms == 0 || driver.min_tick_interval_ms > driver.max_tick_interval_ms {
            return Err(LifeError::InvalidConfig(format!(
                "tick interval bounds ({}..={}) must be non-empty and start above zero",
                driver.min_tick_interval_ms, driver.max_tick_interval_ms
            )));
        }
        if !(driver.min_tick_interval_ms..=driver.max_tick_interval_ms).contains(&driver.tick_interval_ms) {
            return Err(LifeError::InvalidConfig(format!(
                "tick_interval_ms ({}) must be within {}..={}",
                driver.tick_interval_ms, driver.min_tick_interval_ms, driver.max_tick_interval_ms
            )));
        }

        Ok(())
    }
}
