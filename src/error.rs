//! Errors for the checked slice accessors.
//!
//! The compute path never fails; only the slice-based loads and stores
//! return these.

use thiserror::Error;

/// Why a slice could not be used as four lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LaneError {
    /// Fewer than four elements.
    #[error("slice too short: need 4 lanes, got {len}")]
    TooShort {
        /// Length of the rejected slice.
        len: usize,
    },

    /// Start address not on a 16-byte boundary.
    #[error("slice not 16-byte aligned: address {addr:#x}")]
    Misaligned {
        /// Address of the first element.
        addr: usize,
    },
}
