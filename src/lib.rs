//! torus-life - toroidal cellular automaton with a column-scanning pitch mapper

pub mod core;
pub mod driver;
pub mod engine;
pub mod patterns;
pub mod scan;
