//! Layer traits: the pattern players the sequencer drives.

use alloc::vec::Vec;
use lp_ir::Degree;

/// An independently clocked pattern-playing voice.
///
/// The layer owns its playback cursor and decides what to emit on each
/// click; the sequencer only starts, stops and clicks it.
pub trait Layer {
    /// Begin playing `degree`, restarting the pattern if already running.
    fn start(&mut self, degree: Degree);

    /// Stop playing. Stopping an idle layer is a no-op.
    fn stop(&mut self);

    /// Advance one subdivision.
    fn click(&mut self);

    /// Whether the layer is currently sounding.
    fn is_running(&self) -> bool;
}

/// An ordered, fixed-size collection of layers.
pub trait Layers {
    type Layer: Layer;

    fn count(&self) -> usize;

    fn layer(&self, index: usize) -> Option<&Self::Layer>;

    fn layer_mut(&mut self, index: usize) -> Option<&mut Self::Layer>;
}

impl<L: Layer> Layers for Vec<L> {
    type Layer = L;

    fn count(&self) -> usize {
        self.len()
    }

    fn layer(&self, index: usize) -> Option<&L> {
        self.get(index)
    }

    fn layer_mut(&mut self, index: usize) -> Option<&mut L> {
        self.get_mut(index)
    }
}

impl<L: Layer, const N: usize> Layers for [L; N] {
    type Layer = L;

    fn count(&self) -> usize {
        N
    }

    fn layer(&self, index: usize) -> Option<&L> {
        self.get(index)
    }

    fn layer_mut(&mut self, index: usize) -> Option<&mut L> {
        self.get_mut(index)
    }
}

impl<L: Layer, const N: usize> Layers for heapless::Vec<L, N> {
    type Layer = L;

    fn count(&self) -> usize {
        self.len()
    }

    fn layer(&self, index: usize) -> Option<&L> {
        self.get(index)
    }

    fn layer_mut(&mut self, index: usize) -> Option<&mut L> {
        self.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Toggle {
        on: bool,
    }

    impl Layer for Toggle {
        fn start(&mut self, _degree: Degree) {
            self.on = true;
        }
        fn stop(&mut self) {
            self.on = false;
        }
        fn click(&mut self) {}
        fn is_running(&self) -> bool {
            self.on
        }
    }

    fn start_second<S: Layers>(set: &mut S) {
        set.layer_mut(1).unwrap().start(Degree(1));
    }

    #[test]
    fn array_set() {
        let mut set = [Toggle::default(), Toggle::default()];
        start_second(&mut set);
        assert_eq!(Layers::count(&set), 2);
        assert!(set.layer(1).unwrap().is_running());
        assert!(set.layer(2).is_none());
    }

    #[test]
    fn heapless_set() {
        let mut set: heapless::Vec<Toggle, 4> = heapless::Vec::new();
        for _ in 0..3 {
            let _ = set.push(Toggle::default());
        }
        start_second(&mut set);
        assert_eq!(Layers::count(&set), 3);
        assert!(!set.layer(0).unwrap().is_running());
        assert!(set.layer(1).unwrap().is_running());
    }
}
