//! Demo layer: repeats its degree once per beat.

use lp_engine::{Degree, Layer};
use lp_ir::{BEATS_PER_BAR, SUBDIVISIONS_PER_BAR};

const SUBDIVISIONS_PER_BEAT: u32 = SUBDIVISIONS_PER_BAR / BEATS_PER_BAR;

/// Plays its degree on every beat while running and remembers what it played.
#[derive(Clone, Debug, Default)]
pub struct PulseLayer {
    id: usize,
    degree: Option<Degree>,
    running: bool,
    /// Subdivisions since the last start
    position: u32,
    played: Vec<Degree>,
}

impl PulseLayer {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn degree(&self) -> Option<Degree> {
        self.degree
    }

    /// Every pulse emitted so far, oldest first.
    pub fn played(&self) -> &[Degree] {
        &self.played
    }
}

impl Layer for PulseLayer {
    fn start(&mut self, degree: Degree) {
        self.degree = Some(degree);
        self.running = true;
        self.position = 0;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn click(&mut self) {
        if !self.running {
            return;
        }
        if self.position % SUBDIVISIONS_PER_BEAT == 0 {
            if let Some(degree) = self.degree {
                log::info!("layer {} plays degree {}", self.id, degree);
                self.played.push(degree);
            }
        }
        self.position = self.position.wrapping_add(1);
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
