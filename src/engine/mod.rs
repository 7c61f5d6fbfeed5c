//! Simulation engine: board state, rules and the generation transition

pub mod board;
pub mod neighborhood;
pub mod rules;
pub mod seeding;

pub use board::BoardEngine;
pub use neighborhood::NEIGHBOR_OFFSETS;
pub use rules::RuleSet;
pub use seeding::SeedStrategy;
