//! Headless host for the looper sequencer.
//!
//! Provides a wall clock, a diagnostic log sink, a demo layer and a
//! scripted session controller that the CLI and tests share.

mod clock;
mod diagnostics;
mod pulse;
mod script;

use lp_engine::{Bar, Clock, Handle, MusicalTime, Run, Sequencer};

pub use clock::SystemClock;
pub use diagnostics::DiagnosticLogger;
pub use pulse::PulseLayer;
pub use script::{parse_script, Action, ScriptError};

// Re-export common types so callers don't need lp-engine directly.
pub use lp_engine::{
    Assist, Degree, Duration, Error as EngineError, SequencerConfig, State,
};

/// How long an async host waits between polls.
const POLL_MICROS: u64 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("no live handle #{0}")]
    NoSuchHandle(usize),
}

/// A bar indicator reported by a click, and when.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarMark {
    pub time: MusicalTime,
    pub bar: u32,
}

/// Drives a sequencer of `PulseLayer`s from a list of actions.
pub struct Controller<C: Clock> {
    sequencer: Sequencer<Vec<PulseLayer>, C>,
    /// Live handles, oldest first
    handles: Vec<Handle>,
    marks: Vec<BarMark>,
    /// Revokes that found nothing to undo
    idle_revokes: usize,
    run: Run,
}

impl<C: Clock> Controller<C> {
    pub fn new(layers: usize, clock: C, config: SequencerConfig) -> Self {
        let layers = (0..layers).map(PulseLayer::new).collect();
        Self {
            sequencer: Sequencer::new(layers, clock, config),
            handles: Vec::new(),
            marks: Vec::new(),
            idle_revokes: 0,
            run: Run::Sync,
        }
    }

    /// Advance time by polling `click(Async)` instead of blocking.
    pub fn polling(mut self) -> Self {
        self.run = Run::Async;
        self
    }

    pub fn sequencer(&self) -> &Sequencer<Vec<PulseLayer>, C> {
        &self.sequencer
    }

    /// Bar indicators seen so far.
    pub fn marks(&self) -> &[BarMark] {
        &self.marks
    }

    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }

    /// Number of `revoke` actions that had nothing to undo.
    pub fn idle_revokes(&self) -> usize {
        self.idle_revokes
    }

    pub fn apply(&mut self, action: Action) -> Result<(), ControllerError> {
        log::debug!("[{}] action {:?}", self.sequencer.now(), action);
        match action {
            Action::Record => self.sequencer.record(),
            Action::Wander => self.sequencer.wander(),
            Action::Revoke => {
                if !self.sequencer.revoke() {
                    log::warn!("[{}] revoke: nothing recorded to undo", self.sequencer.now());
                    self.idle_revokes += 1;
                }
            }
            Action::Start(degree) => {
                let handle = self.sequencer.start(degree)?;
                self.handles.push(handle);
            }
            Action::Stop(index) => {
                if index >= self.handles.len() {
                    return Err(ControllerError::NoSuchHandle(index));
                }
                let handle = self.handles.remove(index);
                self.sequencer.stop(handle)?;
            }
            Action::Run(duration) => self.advance(duration),
            Action::Bpm(bpm) => self.sequencer.set_bpm(bpm),
            Action::Assist(assist) => self.sequencer.set_assist(assist),
        }
        Ok(())
    }

    /// Apply every action in order, stopping at the first failure.
    pub fn run_script(&mut self, actions: &[Action]) -> Result<(), ControllerError> {
        for action in actions {
            self.apply(*action)?;
        }
        Ok(())
    }

    fn advance(&mut self, duration: Duration) {
        for _ in 0..duration.total_subdivisions() {
            let time = self.sequencer.now();
            let bar = match self.run {
                Run::Sync => self.sequencer.click(Run::Sync),
                Run::Async => self.poll(),
            };
            if let Bar::Index(bar) = bar {
                self.marks.push(BarMark { time, bar });
            }
        }
    }

    /// Poll until exactly one subdivision has been clicked.
    fn poll(&mut self) -> Bar {
        let before = self.sequencer.now();
        loop {
            let bar = self.sequencer.click(Run::Async);
            if self.sequencer.now() != before {
                return bar;
            }
            self.sequencer.clock_mut().sleep_micros(POLL_MICROS);
        }
    }
}
