//! Recorded loop events.

use crate::degree::Degree;
use crate::musical_time::MusicalTime;

/// Index of a layer inside the sequencer's layer set.
pub type LayerId = usize;

/// A start or stop captured while recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    /// Offset from the start of the loop
    pub time: MusicalTime,
    /// Which layer the event drives
    pub layer: LayerId,
    /// What the event does
    pub payload: EventPayload,
}

impl Event {
    /// Create a new event.
    pub fn new(time: MusicalTime, layer: LayerId, payload: EventPayload) -> Self {
        Self {
            time,
            layer,
            payload,
        }
    }

    pub fn start(time: MusicalTime, layer: LayerId, degree: Degree) -> Self {
        Self::new(time, layer, EventPayload::Start(degree))
    }

    pub fn stop(time: MusicalTime, layer: LayerId) -> Self {
        Self::new(time, layer, EventPayload::Stop)
    }

    pub fn is_start(&self) -> bool {
        matches!(self.payload, EventPayload::Start(_))
    }
}

/// What an event does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventPayload {
    /// Start the layer playing a degree
    Start(Degree),
    /// Stop the layer
    Stop,
}
