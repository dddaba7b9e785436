//! Click modes and click results.

/// Outcome of a single `click`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bar {
    /// Not inside a recorded loop; there is no bar to report
    None,
    /// Nothing changed since the previous click
    Same,
    /// A new bar of the loop has started. `Index(0)` is the loop boundary.
    Index(u32),
}

impl Bar {
    /// True when a bar of the loop started on this click.
    pub fn is_new_bar(self) -> bool {
        matches!(self, Bar::Index(_))
    }
}

/// How `click` behaves when the next subdivision is not yet due.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Run {
    /// Block until the subdivision boundary arrives
    #[default]
    Sync,
    /// Return `Bar::Same` immediately
    Async,
}
