//! One API for 4-lane `f32` / `i32` SIMD on SSE2 and NEON.
//!
//! `quadlane` lets numeric kernels (filters, small matrix math, image
//! processing) be written once against named operations and compile to the
//! right 128-bit instructions on either hardware family:
//!
//! - **Types**: [`F32x4`], [`I32x4`] (16 bytes, 16-byte aligned)
//! - **Memory**: aligned / unaligned loads and stores, [`store_add`],
//!   [`store_sub`], [`F32x4::store_scalar`]
//! - **Arithmetic**: `+ - *`, [`add3`], [`add4`], `min`, `max`, `sqrt`,
//!   `recip`, `rsqrt`
//! - **Logic and masks**: `& | ^`, `and_not`, `cmp_gt`, `cmp_lt`, [`select`]
//! - **Conversion**: [`I32x4::to_float`], [`F32x4::to_int`] (truncating),
//!   [`F32x4::as_int`] / [`I32x4::as_float`] (bit reinterpretation)
//!
//! # Backend Selection
//!
//! The backend is fixed at compile time by the target:
//!
//! | Architecture | Backend | rsqrt | recip |
//! |--------------|---------|-------|-------|
//! | x86_64 | SSE2 | `rsqrtps`, no refinement | `rcpps`, no refinement |
//! | aarch64 | NEON | `vrsqrte` + 2 Newton-Raphson steps | `vrecpe` + 1 step |
//! | Other | - | compile error | |
//!
//! There is no runtime dispatch and no portable fallback: both instruction
//! sets are baseline for their architecture. [`BACKEND`] names the one in
//! use.
//!
//! # Cross-backend guarantees
//!
//! Bit-identical on both backends: lane order, construction, loads/stores,
//! `+ - *`, `sqrt`, bitwise logic (NEON goes through the integer unit),
//! comparison masks (`0xFFFF_FFFF` / `0`), `to_float`, and `to_int` for
//! in-range values.
//!
//! Not bit-identical: `recip` and `rsqrt` (both within 1e-3 relative error),
//! `min`/`max` with NaN inputs, `to_int` for NaN or out-of-range lanes.
//!
//! # Example
//!
//! ```rust
//! use quadlane::{select, F32x4};
//!
//! let a = F32x4::new(1.0, 2.0, 3.0, 4.0);
//! let b = F32x4::new(4.0, 3.0, 2.0, 1.0);
//!
//! // Masks are all-ones where a > b
//! let mask = a.cmp_gt(b);
//! assert_eq!(mask.to_bits(), [0, 0, 0xFFFF_FFFF, 0xFFFF_FFFF]);
//!
//! // Branchless max
//! assert_eq!(select(mask, a, b).to_array(), [4.0, 3.0, 3.0, 4.0]);
//!
//! // Normalize by length with the fast reciprocal square root
//! let len2 = a * a;
//! let inv = len2.rsqrt();
//! assert!((inv.first() - 1.0).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod arch;
mod error;
mod lanes;
mod memory;
mod ops;

pub use arch::{ActiveBackend, Backend};
pub use error::LaneError;
pub use lanes::{F32x4, I32x4};
pub use memory::{
    store_add, store_add_ptr, store_splat, store_sub, store_sub_ptr, Align16, ALIGN,
};
pub use ops::{add3, add4, select, select_i32};

/// Name of the backend compiled into this build: `"sse2"` or `"neon"`.
pub const BACKEND: &str = <ActiveBackend as Backend>::NAME;

/// Accuracy floor promised by [`F32x4::recip`] and [`F32x4::rsqrt`] on every
/// backend, as a relative error.
///
/// SSE2's raw estimates are documented at 1.5 * 2^-12 (~3.7e-4); NEON's
/// refined estimates are tighter.
pub const APPROX_REL_ERROR: f32 = 1e-3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name() {
        assert!(BACKEND == "sse2" || BACKEND == "neon");
    }

    #[test]
    fn test_end_to_end_mask() {
        let a = F32x4::new(1.0, 2.0, 3.0, 4.0);
        let b = F32x4::new(4.0, 3.0, 2.0, 1.0);
        assert_eq!(a.cmp_gt(b).to_bits(), [0, 0, 0xFFFF_FFFF, 0xFFFF_FFFF]);
    }

    #[test]
    fn test_rsqrt_of_four() {
        let r = F32x4::splat(4.0).rsqrt().to_array();
        for lane in r {
            assert!((lane - 0.5).abs() / 0.5 < APPROX_REL_ERROR, "{}", lane);
        }
    }

    #[test]
    fn test_sub_undoes_add_for_integers() {
        let x = F32x4::new(1.0, -7.0, 1024.0, 16_777_215.0);
        let y = F32x4::new(3.0, 5.0, -1024.0, 0.0);
        assert_eq!(((x + y) - y).to_array(), x.to_array());
    }
}
