use core::fmt;

/// Workflow state of the looper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// Free play, nothing recorded
    #[default]
    Wander,
    /// Armed; the next start opens the recording window
    Prerecord,
    /// Capturing starts and stops, loop length grows
    Record,
    /// Replaying the recorded loop
    Playback,
    /// Replaying while layering new starts onto the loop
    Overlay,
}

impl State {
    /// Starts and stops are appended to the recording log in these states.
    pub fn logs_events(self) -> bool {
        matches!(self, State::Record | State::Overlay)
    }

    pub fn is_looping(self) -> bool {
        matches!(self, State::Playback | State::Overlay)
    }

    pub fn name(self) -> &'static str {
        match self {
            State::Wander => "wander",
            State::Prerecord => "prerecord",
            State::Record => "record",
            State::Playback => "playback",
            State::Overlay => "overlay",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
