use thiserror::Error;

use crate::node_store::NodeHandle;

/// Error type returned by handle-based node access and tolerance validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// The handle was issued by a store generation that has since been rebuilt.
    #[error("stale handle {handle:?}: store is at generation {current}")]
    StaleHandle {
        /// Handle that was dereferenced.
        handle: NodeHandle,
        /// Generation of the live store.
        current: u64,
    },

    /// The handle points past the end of the store.
    #[error("handle {handle:?} out of bounds for store of {len} nodes")]
    HandleOutOfBounds {
        /// Handle that was dereferenced.
        handle: NodeHandle,
        /// Number of nodes in the live store.
        len: usize,
    },

    /// Balance tolerance constants must be finite and non-negative.
    #[error("invalid balance tolerance: multiplier {multiplier}, additive {additive}")]
    InvalidTolerance {
        /// Multiplicative slack `C`.
        multiplier: f64,
        /// Additive slack `K`.
        additive: f64,
    },
}
