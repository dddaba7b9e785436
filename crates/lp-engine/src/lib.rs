//! Sequencer engine for the looper.
//!
//! Drives a set of pattern-playing layers in lock-step with a BPM clock and
//! implements the arm → record → playback → overlay workflow.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod clock;
mod error;
mod handle;
mod layer;
mod recording;
pub mod sequencer;
mod state;
pub mod timing;

pub use clock::{Clock, ManualClock};
pub use error::Error;
pub use handle::Handle;
pub use layer::{Layer, Layers};
pub use recording::{RecordingLog, RecordingWindow};
pub use sequencer::{Sequencer, SequencerConfig};
pub use state::State;

// Re-export the value types so hosts only need this crate.
pub use lp_ir::{
    Assist, Bar, Degree, Duration, Event, EventPayload, LayerId, MusicalTime, Run,
    SUBDIVISIONS_PER_BAR,
};
