/// Failures reported by sequencer operations.
///
/// Neither variant leaves the state machine or the recording log modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Every layer is bound to a handle, owned by the recorded loop, or sounding
    #[error("no free layer available")]
    NoFreeLayer,
    /// The handle was already stopped or never came from this sequencer
    #[error("handle is no longer valid")]
    InvalidHandle,
}
