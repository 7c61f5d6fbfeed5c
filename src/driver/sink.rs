//! Sonification sink contract
//!
//! The scanner only emits pitch sets. Tone playback and indicator lights
//! live behind this trait so the simulation runs with zero I/O.

use std::collections::BTreeSet;

/// Consumes one pitch set per advanced generation while sonification is on
pub trait SonificationSink {
    fn play(&mut self, column: usize, pitches: &BTreeSet<usize>);
}

/// Reports each pitch set through `tracing`
#[derive(Debug, Default)]
pub struct LoggingSink {
    played: u64,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pitch sets received so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl SonificationSink for LoggingSink {
    fn play(&mut self, column: usize, pitches: &BTreeSet<usize>) {
        self.played += 1;
        tracing::info!("Column {}: pitches {:?}", column, pitches);
    }
}
