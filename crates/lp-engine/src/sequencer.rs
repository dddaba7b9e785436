//! The sequencer: workflow state machine and clock advance.
//!
//! Each `click` plays one subdivision:
//!   1) trace any state change since the previous click
//!   2) grow the recording window, or wrap the loop and replay its events
//!   3) click every layer
//!
//! `now` is the subdivision the next click will play. Starts and stops
//! made between clicks are stamped with it.

use lp_ir::{
    Assist, Bar, Degree, Duration, Event, EventPayload, LayerId, MusicalTime, Run,
    SUBDIVISIONS_PER_BAR,
};

use crate::clock::Clock;
use crate::error::Error;
use crate::handle::{Handle, HandleTable};
use crate::layer::{Layer, Layers};
use crate::recording::{RecordingLog, RecordingWindow};
use crate::state::State;
use crate::timing::interval_micros;

const SUBDIVISIONS: u64 = SUBDIVISIONS_PER_BAR as u64;

/// Construction parameters. Both stay adjustable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Beats per minute
    pub bpm: u16,
    /// Quantization applied to recorded events
    pub assist: Assist,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            bpm: 60,
            assist: Assist::No,
        }
    }
}

/// Drives a layer set in lock-step with a BPM clock and runs the
/// live-looping workflow.
pub struct Sequencer<L: Layers, C: Clock> {
    layers: L,
    clock: C,
    bpm: u16,
    assist: Assist,
    state: State,
    /// State seen by the previous click
    previous: State,
    /// Wall-clock time of the previous click; `None` until the first one
    clicked: Option<u64>,
    now: MusicalTime,
    /// Time of the first note ever played; anchors the bar grid
    started: Option<MusicalTime>,
    window: Option<RecordingWindow>,
    loop_bars: Option<u32>,
    /// Offset into the loop of the subdivision `now` refers to
    loop_offset: u64,
    log: RecordingLog,
    handles: HandleTable,
}

impl<L: Layers, C: Clock> Sequencer<L, C> {
    /// Create a sequencer owning `layers` and reading time from `clock`.
    pub fn new(layers: L, clock: C, config: SequencerConfig) -> Self {
        Self {
            layers,
            clock,
            bpm: config.bpm.max(1),
            assist: config.assist,
            state: State::Wander,
            previous: State::Wander,
            clicked: None,
            now: MusicalTime::zero(),
            started: None,
            window: None,
            loop_bars: None,
            loop_offset: 0,
            log: RecordingLog::new(),
            handles: HandleTable::new(),
        }
    }

    // --- Queries ---

    pub fn state(&self) -> State {
        self.state
    }

    /// State as of the most recent click.
    pub fn previous_state(&self) -> State {
        self.previous
    }

    /// True while starts are (or are about to be) captured into the loop.
    pub fn recording(&self) -> bool {
        matches!(self.state, State::Prerecord | State::Record | State::Overlay)
    }

    pub fn looping(&self) -> bool {
        self.state.is_looping()
    }

    /// The subdivision the next click will play.
    pub fn now(&self) -> MusicalTime {
        self.now
    }

    pub fn started(&self) -> Option<MusicalTime> {
        self.started
    }

    pub fn window(&self) -> Option<&RecordingWindow> {
        self.window.as_ref()
    }

    /// Length of the recorded loop, once recording has closed.
    pub fn loop_bars(&self) -> Option<u32> {
        self.loop_bars
    }

    pub fn log(&self) -> &RecordingLog {
        &self.log
    }

    /// Number of handles not yet stopped.
    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }

    pub fn layers(&self) -> &L {
        &self.layers
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn bpm(&self) -> u16 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: u16) {
        self.bpm = bpm.max(1);
        log::debug!("[{}] bpm set to {}", self.now, self.bpm);
    }

    pub fn assist(&self) -> Assist {
        self.assist
    }

    pub fn set_assist(&mut self, assist: Assist) {
        self.assist = assist;
        log::debug!("[{}] assist set to {:?}", self.now, assist);
    }

    // --- Layers ---

    /// Start a free layer playing `degree`.
    ///
    /// In `Prerecord` this opens the recording window; in `Record` and
    /// `Overlay` the start is appended to the loop.
    pub fn start(&mut self, degree: Degree) -> Result<Handle, Error> {
        let Some(layer) = self.free_layer() else {
            log::warn!("[{}] no free layer for degree {}", self.now, degree);
            return Err(Error::NoFreeLayer);
        };

        if self.started.is_none() {
            self.started = Some(self.now);
        }

        if self.state == State::Prerecord {
            let anchor = self.quantized_now();
            self.window = Some(RecordingWindow::new(anchor));
            self.state = State::Record;
            log::debug!("[{}] recording window opened at {}", self.now, anchor);
        }

        let recorded = self.state.logs_events();
        if recorded {
            if let Some(offset) = self.event_offset() {
                self.log.push(Event::start(offset, layer, degree));
            }
        }

        if let Some(l) = self.layers.layer_mut(layer) {
            l.start(degree);
        }
        let handle = self.handles.bind(layer, recorded);
        log::trace!(
            "[{}] start degree {} on layer {}{}",
            self.now,
            degree,
            layer,
            if recorded { " (recorded)" } else { "" }
        );
        Ok(handle)
    }

    /// Stop the layer bound to `handle` and invalidate the handle.
    pub fn stop(&mut self, handle: Handle) -> Result<(), Error> {
        let Some(binding) = self.handles.release(handle) else {
            log::error!("[{}] stop called with an invalid handle", self.now);
            return Err(Error::InvalidHandle);
        };

        if let Some(l) = self.layers.layer_mut(binding.layer) {
            l.stop();
        }

        // A note held across Record -> Playback still needs its stop in the loop.
        if binding.recorded {
            if let Some(offset) = self.event_offset() {
                self.log.push(Event::stop(offset, binding.layer));
            }
        }

        log::trace!("[{}] stop layer {}", self.now, binding.layer);
        Ok(())
    }

    /// Undo the most recently recorded start (and its stop).
    ///
    /// Returns `false` when wandering or when there is nothing to undo.
    pub fn revoke(&mut self) -> bool {
        if self.state == State::Wander {
            return false;
        }
        let Some(layer) = self.log.revoke_last() else {
            log::debug!("[{}] nothing to revoke", self.now);
            return false;
        };

        self.handles.forget_recording(layer);
        if let Some(l) = self.layers.layer_mut(layer) {
            if l.is_running() {
                l.stop();
            }
        }
        log::debug!("[{}] revoked layer {}", self.now, layer);
        true
    }

    fn free_layer(&self) -> Option<LayerId> {
        (0..self.layers.count()).find(|&i| {
            !self.handles.is_bound(i)
                && !self.log.references(i)
                && self.layers.layer(i).is_some_and(|l| !l.is_running())
        })
    }

    // --- State changes ---

    /// Toggle through the record workflow:
    /// wander → prerecord → (first start) record → playback ⇄ overlay.
    /// From prerecord, disarms back to wander.
    pub fn record(&mut self) {
        let from = self.state;
        self.state = match from {
            State::Wander => State::Prerecord,
            State::Prerecord => State::Wander,
            State::Record => {
                self.close_window();
                State::Playback
            }
            State::Playback => State::Overlay,
            State::Overlay => State::Playback,
        };
        log::debug!("[{}] record: {} -> {}", self.now, from, self.state);
    }

    /// Abandon the recording or loop and go back to wandering.
    ///
    /// Layers owned by the loop are stopped; live handles stay valid but
    /// are no longer recorded.
    pub fn wander(&mut self) {
        for layer in 0..self.layers.count() {
            if self.log.references(layer) {
                if let Some(l) = self.layers.layer_mut(layer) {
                    l.stop();
                }
            }
        }
        self.handles.forget_all_recordings();
        self.log.clear();
        self.window = None;
        self.loop_bars = None;
        self.loop_offset = 0;
        log::debug!("[{}] wander: {} -> {}", self.now, self.state, State::Wander);
        self.state = State::Wander;
    }

    fn close_window(&mut self) {
        let Some(window) = self.window.take() else {
            return;
        };
        let elapsed = self
            .now
            .total_subdivisions()
            .saturating_sub(window.started_at.total_subdivisions());
        let full = window.bars as u64;
        let remainder = elapsed.saturating_sub(full * SUBDIVISIONS);
        let extra = match self.assist {
            Assist::No => remainder > 0,
            _ => remainder * 2 >= SUBDIVISIONS,
        };
        let bars = (full + extra as u64).max(1) as u32;

        let length = bars as u64 * SUBDIVISIONS;
        self.log.wrap_into(length);
        if elapsed > 0 && elapsed < length {
            // Everything up to here was just played live.
            self.log
                .drain_until(MusicalTime::from_subdivisions(elapsed - 1));
        }
        self.loop_bars = Some(bars);
        self.loop_offset = elapsed;
        log::debug!(
            "[{}] loop closed: {} bars ({} subdivisions recorded)",
            self.now,
            bars,
            elapsed
        );
    }

    // --- Time ---

    /// `now` rounded to the assist grid, measured from the first note.
    fn quantized_now(&self) -> MusicalTime {
        let anchor = self.started.unwrap_or(self.now).total_subdivisions();
        let relative = self.now.total_subdivisions().saturating_sub(anchor);
        MusicalTime::from_subdivisions(anchor + self.assist.quantize_subdivisions(relative))
    }

    /// Loop-relative offset for an event recorded now.
    fn event_offset(&self) -> Option<MusicalTime> {
        match self.state {
            State::Record => {
                let window = self.window.as_ref()?;
                let offset = self.quantized_now().since(window.started_at);
                Some(MusicalTime::from_subdivisions(offset.total_subdivisions()))
            }
            State::Playback | State::Overlay => {
                let length = self.loop_bars? as u64 * SUBDIVISIONS;
                let offset = self.assist.quantize_subdivisions(self.loop_offset) % length;
                Some(MusicalTime::from_subdivisions(offset))
            }
            State::Wander | State::Prerecord => None,
        }
    }

    /// Click the next subdivision.
    ///
    /// `Run::Sync` blocks until the subdivision is due; `Run::Async`
    /// returns `Bar::Same` if it is too soon. The very first click always
    /// fires immediately.
    ///
    /// Returns `Bar::None` outside a recorded loop, `Bar::Index(n)` when bar
    /// `n` of the loop starts, and `Bar::Same` otherwise.
    pub fn click(&mut self, run: Run) -> Bar {
        let mut now = self.clock.now_micros();

        if let Some(previous) = self.clicked {
            if now < previous {
                // Clock went backwards: due, and the anchor holds until it catches up.
                log::warn!("[{}] clock went backwards by {}us", self.now, previous - now);
                return self.tick();
            }
            let due = previous.saturating_add(interval_micros(self.bpm, self.now.subdivision));
            if now < due {
                match run {
                    Run::Async => return Bar::Same,
                    Run::Sync => {
                        self.clock.sleep_micros(due - now);
                        now = due;
                    }
                }
            }
            self.clicked = Some(now.max(due));
        } else {
            self.clicked = Some(now);
        }

        self.tick()
    }

    /// Click synchronously for `duration`.
    pub fn run(&mut self, duration: Duration) {
        for _ in 0..duration.total_subdivisions() {
            self.click(Run::Sync);
        }
    }

    /// Play `degree` for `duration`, then stop it.
    pub fn play(&mut self, degree: Degree, duration: Duration) -> Result<(), Error> {
        let handle = self.start(degree)?;
        self.run(duration);
        self.stop(handle)
    }

    fn tick(&mut self) -> Bar {
        if self.state != self.previous {
            log::trace!("[{}] state {} -> {}", self.now, self.previous, self.state);
            self.previous = self.state;
        }

        let bar = match self.state {
            State::Wander | State::Prerecord => Bar::None,
            State::Record => self.tick_record(),
            State::Playback | State::Overlay => self.tick_loop(),
        };

        for i in 0..self.layers.count() {
            if let Some(layer) = self.layers.layer_mut(i) {
                layer.click();
            }
        }

        if let Bar::Index(n) = bar {
            log::trace!("[{}] bar {}", self.now, n);
        }
        self.now = self.now.next();
        bar
    }

    fn tick_record(&mut self) -> Bar {
        let Some(window) = self.window.as_mut() else {
            return Bar::None;
        };
        if self.now < window.started_at {
            // Anchor was quantized forward and has not arrived yet.
            return Bar::Same;
        }
        let offset = self.now.total_subdivisions() - window.started_at.total_subdivisions();
        if (offset + 1) % SUBDIVISIONS == 0 {
            window.bars += 1;
        }
        if offset % SUBDIVISIONS == 0 {
            Bar::Index((offset / SUBDIVISIONS) as u32)
        } else {
            Bar::Same
        }
    }

    fn tick_loop(&mut self) -> Bar {
        let Some(bars) = self.loop_bars else {
            return Bar::None;
        };
        let length = bars as u64 * SUBDIVISIONS;
        if self.loop_offset >= length {
            self.loop_offset = 0;
            self.log.reset_cursor();
        }

        let range = self
            .log
            .drain_until(MusicalTime::from_subdivisions(self.loop_offset));
        for i in range {
            let Some(&event) = self.log.get(i) else {
                continue;
            };
            if let Some(layer) = self.layers.layer_mut(event.layer) {
                match event.payload {
                    EventPayload::Start(degree) => layer.start(degree),
                    EventPayload::Stop => layer.stop(),
                }
            }
        }

        let bar = if self.loop_offset % SUBDIVISIONS == 0 {
            Bar::Index((self.loop_offset / SUBDIVISIONS) as u32)
        } else {
            Bar::Same
        };
        self.loop_offset += 1;
        bar
    }
}
