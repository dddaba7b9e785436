//! Handles: client tokens bound to one layer.

use lp_ir::LayerId;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Opaque token returned by `Sequencer::start`.
    ///
    /// Generation-checked: once stopped, the same value is rejected with
    /// `Error::InvalidHandle` even if its slot is reused.
    pub struct Handle;
}

/// What a live handle is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Binding {
    pub layer: LayerId,
    /// The start was logged, so the stop must be logged too.
    pub recorded: bool,
}

/// Live handles of one sequencer.
#[derive(Debug, Default)]
pub(crate) struct HandleTable {
    bindings: SlotMap<Handle, Binding>,
}

impl HandleTable {
    pub fn new() -> Self {
        Self {
            bindings: SlotMap::with_key(),
        }
    }

    pub fn bind(&mut self, layer: LayerId, recorded: bool) -> Handle {
        self.bindings.insert(Binding { layer, recorded })
    }

    /// Invalidate a handle, returning what it was bound to.
    pub fn release(&mut self, handle: Handle) -> Option<Binding> {
        self.bindings.remove(handle)
    }

    pub fn is_bound(&self, layer: LayerId) -> bool {
        self.bindings.values().any(|b| b.layer == layer)
    }

    /// Stop logging for whichever handles drive `layer`.
    pub fn forget_recording(&mut self, layer: LayerId) {
        for binding in self.bindings.values_mut() {
            if binding.layer == layer {
                binding.recorded = false;
            }
        }
    }

    /// Stop logging for every live handle.
    pub fn forget_all_recordings(&mut self) {
        for binding in self.bindings.values_mut() {
            binding.recorded = false;
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
