//! Bar-based time representation.
//!
//! `MusicalTime` counts whole bars plus a subdivision inside the bar.
//! Every quantization grid must land exactly on a subdivision, so the
//! resolution is a common multiple of all supported grids.

use core::fmt;

/// Subdivisions per bar. LCM(12, 8, 6, 4, 3, 16) = 48, so every assist
/// grid and a 16th-note grid align with a subdivision boundary.
pub const SUBDIVISIONS_PER_BAR: u32 = 48;

/// Beats in one bar (4/4).
pub const BEATS_PER_BAR: u32 = 4;

/// A position in musical time (bar + subdivision within the bar).
///
/// Ordering: bar is primary, subdivision is secondary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MusicalTime {
    /// Whole bars
    pub bar: u32,
    /// Position inside the bar: 0..SUBDIVISIONS_PER_BAR
    pub subdivision: u32,
}

impl MusicalTime {
    /// The zero position.
    pub const fn zero() -> Self {
        Self { bar: 0, subdivision: 0 }
    }

    /// Create a time at an exact bar boundary.
    pub const fn from_bars(bar: u32) -> Self {
        Self { bar, subdivision: 0 }
    }

    /// Build a time from an absolute subdivision count.
    pub const fn from_subdivisions(total: u64) -> Self {
        Self {
            bar: (total / SUBDIVISIONS_PER_BAR as u64) as u32,
            subdivision: (total % SUBDIVISIONS_PER_BAR as u64) as u32,
        }
    }

    /// Absolute subdivision count from zero.
    pub const fn total_subdivisions(self) -> u64 {
        self.bar as u64 * SUBDIVISIONS_PER_BAR as u64 + self.subdivision as u64
    }

    /// The following subdivision, wrapping into the next bar.
    pub fn next(self) -> Self {
        if self.subdivision + 1 == SUBDIVISIONS_PER_BAR {
            Self::from_bars(self.bar + 1)
        } else {
            Self {
                bar: self.bar,
                subdivision: self.subdivision + 1,
            }
        }
    }

    /// Advance by a musical duration.
    pub fn add(self, duration: Duration) -> Self {
        Self::from_subdivisions(self.total_subdivisions() + duration.total_subdivisions())
    }

    /// Time elapsed since `earlier`. Saturates to zero if `earlier` is later.
    pub fn since(self, earlier: MusicalTime) -> Duration {
        Duration::from_subdivisions(
            self.total_subdivisions()
                .saturating_sub(earlier.total_subdivisions()),
        )
    }

    /// True when this time sits exactly on a bar boundary.
    pub const fn is_bar_start(self) -> bool {
        self.subdivision == 0
    }
}

impl PartialOrd for MusicalTime {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MusicalTime {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.bar
            .cmp(&other.bar)
            .then(self.subdivision.cmp(&other.subdivision))
    }
}

impl fmt::Display for MusicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.bar, self.subdivision)
    }
}

/// A length of musical time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    pub bars: u32,
    pub subdivisions: u32,
}

impl Duration {
    pub const fn from_bars(bars: u32) -> Self {
        Self { bars, subdivisions: 0 }
    }

    /// Normalizes so that `subdivisions < SUBDIVISIONS_PER_BAR`.
    pub const fn from_subdivisions(total: u64) -> Self {
        Self {
            bars: (total / SUBDIVISIONS_PER_BAR as u64) as u32,
            subdivisions: (total % SUBDIVISIONS_PER_BAR as u64) as u32,
        }
    }

    pub const fn total_subdivisions(self) -> u64 {
        self.bars as u64 * SUBDIVISIONS_PER_BAR as u64 + self.subdivisions as u64
    }

    pub const fn is_zero(self) -> bool {
        self.bars == 0 && self.subdivisions == 0
    }
}
