//! Survival / birth rule sets

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::config::RuleConfig;
use crate::core::error::{LifeError, Result};

/// Largest possible Moore-neighborhood count
pub const MAX_NEIGHBORS: u8 = 8;

/// Neighbor counts that keep a live cell alive (`stay`) or bring a dead one to life (`begin`).
///
/// Stored as 9-bit masks indexed by neighbor count. `begin` never contains 0:
/// the engine only evaluates dead cells adjacent to a live one, which would
/// silently miss isolated births.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RuleConfig", into = "RuleConfig")]
pub struct RuleSet {
    stay: u16,
    begin: u16,
}

impl RuleSet {
    pub fn new(stay: &[u8], begin: &[u8]) -> Result<Self> {
        if begin.contains(&0) {
            return Err(LifeError::InvalidRule(
                "begin may not contain 0: dead cells with no live neighbors are never evaluated".into(),
            ));
        }
        Ok(Self {
            stay: mask("stay", stay)?,
            begin: mask("begin", begin)?,
        })
    }

    /// Standard B3/S23 rules
    pub fn conway() -> Self {
        Self {
            stay: (1 << 2) | (1 << 3),
            begin: 1 << 3,
        }
    }

    /// Parse `B<digits>/S<digits>` (either order, case-insensitive)
    pub fn from_notation(notation: &str) -> Result<Self> {
        let mut stay = None;
        let mut begin = None;

        for part in notation.trim().split('/') {
            let mut chars = part.chars();
            let target = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut begin,
                Some('S') => &mut stay,
                _ => {
                    return Err(LifeError::InvalidRule(format!(
                        "expected B.../S... notation, got '{}'",
                        notation
                    )))
                }
            };
            let counts = chars
                .map(|c| {
                    c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                        LifeError::InvalidRule(format!("'{}' is not a neighbor count", c))
                    })
                })
                .collect::<Result<Vec<u8>>>()?;
            *target = Some(counts);
        }

        match (stay, begin) {
            (Some(stay), Some(begin)) => Self::new(&stay, &begin),
            _ => Err(LifeError::InvalidRule(format!(
                "'{}' must name both B and S counts",
                notation
            ))),
        }
    }

    #[inline]
    pub fn survives(&self, neighbors: u8) -> bool {
        self.stay & (1 << neighbors) != 0
    }

    #[inline]
    pub fn born(&self, neighbors: u8) -> bool {
        self.begin & (1 << neighbors) != 0
    }

    pub fn stay_counts(&self) -> Vec<u8> {
        counts(self.stay)
    }

    pub fn begin_counts(&self) -> Vec<u8> {
        counts(self.begin)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::conway()
    }
}

impl TryFrom<RuleConfig> for RuleSet {
    type Error = LifeError;

    fn try_from(config: RuleConfig) -> Result<Self> {
        Self::new(&config.stay, &config.begin)
    }
}

impl From<RuleSet> for RuleConfig {
    fn from(rule: RuleSet) -> Self {
        Self {
            stay: rule.stay_counts(),
            begin: rule.begin_counts(),
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in self.begin_counts() {
            write!(f, "{}", n)?;
        }
        write!(f, "/S")?;
        for n in self.stay_counts() {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

fn mask(name: &str, values: &[u8]) -> Result<u16> {
    values.iter().try_fold(0u16, |acc, &n| {
        if n > MAX_NEIGHBORS {
            Err(LifeError::InvalidRule(format!(
                "{} count {} exceeds {} neighbors",
                name, n, MAX_NEIGHBORS
            )))
        } else {
            Ok(acc | (1 << n))
        }
    })
}

fn counts(mask: u16) -> Vec<u8> {
    (0..=MAX_NEIGHBORS).filter(|n| mask & (1 << n) != 0).collect()
}
