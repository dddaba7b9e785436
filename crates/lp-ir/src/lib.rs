//! Core types for the looper sequencer.
//!
//! This crate defines the value types shared by the engine and its hosts:
//! musical time, quantization grids, scale degrees, click results and the
//! events that make up a recorded loop.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod assist;
mod degree;
mod event;
mod musical_time;
mod transport;

pub use assist::{Assist, ParseAssistError};
pub use degree::Degree;
pub use event::{Event, EventPayload, LayerId};
pub use musical_time::{Duration, MusicalTime, BEATS_PER_BAR, SUBDIVISIONS_PER_BAR};
pub use transport::{Bar, Run};
