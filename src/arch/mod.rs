//! Architecture-specific backends.
//!
//! Each backend maps the facade's operation set onto one instruction set
//! family. Exactly one is compiled per target:
//!
//! | Architecture | Backend | Instructions |
//! |--------------|---------|--------------|
//! | x86_64 | [`x86_64::Sse`] | SSE + SSE2 (baseline, always present) |
//! | aarch64 | [`aarch64::Neon`] | NEON / AdvSIMD (baseline, always present) |
//!
//! There is no runtime detection: both instruction sets are part of their
//! target's baseline, so the choice is made by `target_arch` alone.
//!
//! The raw-pointer methods on [`Backend`] are unsafe. Everything else is a
//! total function over register bit patterns.

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "aarch64")]
pub mod aarch64;

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
compile_error!("quadlane supports only x86_64 (SSE2) and aarch64 (NEON) targets");

/// The backend compiled into this build.
#[cfg(target_arch = "x86_64")]
pub type ActiveBackend = x86_64::Sse;

/// The backend compiled into this build.
#[cfg(target_arch = "aarch64")]
pub type ActiveBackend = aarch64::Neon;

mod sealed {
    pub trait Sealed {}
}

/// Operation set shared by every backend.
///
/// Sealed: the crate ships exactly two realizations and selects one at
/// compile time. Generic code never needs to name this trait; the
/// [`F32x4`](crate::F32x4) and [`I32x4`](crate::I32x4) wrappers call it
/// through [`ActiveBackend`].
///
/// Lane order is fixed: lane 0 is the lowest address in memory and the first
/// argument of `set_*`.
pub trait Backend: sealed::Sealed {
    /// Register holding four `f32` lanes.
    type F32: Copy;
    /// Register holding four `i32` lanes.
    type I32: Copy;

    /// Short backend name, e.g. `"sse2"`.
    const NAME: &'static str;

    /// Newton-Raphson steps applied after the hardware reciprocal estimate.
    const RECIP_REFINEMENT_STEPS: u32;

    /// Newton-Raphson steps applied after the hardware rsqrt estimate.
    ///
    /// `e' = e * (1.5 - 0.5 * x * e * e)` per step.
    const RSQRT_REFINEMENT_STEPS: u32;

    /// Whether the unaligned load/store instructions differ from the
    /// aligned ones on this backend.
    const DISTINCT_UNALIGNED_ACCESS: bool;

    // ----- construction -----

    /// Broadcast one `f32` to all lanes.
    fn splat_f32(x: f32) -> Self::F32;
    /// Broadcast one `i32` to all lanes.
    fn splat_i32(x: i32) -> Self::I32;
    /// Lanes `[a, b, c, d]`.
    fn set_f32(a: f32, b: f32, c: f32, d: f32) -> Self::F32;
    /// Lanes `[a, b, c, d]`.
    fn set_i32(a: i32, b: i32, c: i32, d: i32) -> Self::I32;
    /// Lane 0.
    fn first_f32(v: Self::F32) -> f32;
    /// Lane 0.
    fn first_i32(v: Self::I32) -> i32;

    // ----- memory -----

    /// # Safety
    ///
    /// `p` must be valid for reading 4 `f32` and 16-byte aligned.
    unsafe fn load_f32(p: *const f32) -> Self::F32;
    /// # Safety
    ///
    /// `p` must be valid for reading 4 `f32`. Any alignment.
    unsafe fn loadu_f32(p: *const f32) -> Self::F32;
    /// # Safety
    ///
    /// `p` must be valid for writing 4 `f32` and 16-byte aligned.
    unsafe fn store_f32(p: *mut f32, v: Self::F32);
    /// # Safety
    ///
    /// `p` must be valid for writing 4 `f32`. Any alignment.
    unsafe fn storeu_f32(p: *mut f32, v: Self::F32);
    /// Writes lane 0 only.
    ///
    /// # Safety
    ///
    /// `p` must be valid for writing one `f32`.
    unsafe fn store_lane0_f32(p: *mut f32, v: Self::F32);
    /// # Safety
    ///
    /// `p` must be valid for reading 4 `i32` and 16-byte aligned.
    unsafe fn load_i32(p: *const i32) -> Self::I32;
    /// # Safety
    ///
    /// `p` must be valid for reading 4 `i32`. Any alignment.
    unsafe fn loadu_i32(p: *const i32) -> Self::I32;
    /// # Safety
    ///
    /// `p` must be valid for writing 4 `i32` and 16-byte aligned.
    unsafe fn store_i32(p: *mut i32, v: Self::I32);
    /// # Safety
    ///
    /// `p` must be valid for writing 4 `i32`. Any alignment.
    unsafe fn storeu_i32(p: *mut i32, v: Self::I32);

    // ----- arithmetic -----

    /// Lane-wise `a + b`.
    fn add_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// Lane-wise `a - b`.
    fn sub_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// Lane-wise `a * b`.
    fn mul_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// Lane-wise minimum, with the hardware's NaN behaviour.
    fn min_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// Lane-wise maximum, with the hardware's NaN behaviour.
    fn max_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// Approximate `1 / a`.
    fn recip_f32(a: Self::F32) -> Self::F32;
    /// Approximate `1 / sqrt(a)`.
    fn rsqrt_f32(a: Self::F32) -> Self::F32;
    /// Correctly rounded `sqrt(a)`.
    fn sqrt_f32(a: Self::F32) -> Self::F32;
    /// Wrapping lane-wise `a + b`.
    fn add_i32(a: Self::I32, b: Self::I32) -> Self::I32;
    /// Wrapping lane-wise `a - b`.
    fn sub_i32(a: Self::I32, b: Self::I32) -> Self::I32;

    // ----- logical -----

    /// Bitwise `a & b`.
    fn and_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// Bitwise `a | b`.
    fn or_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// Bitwise `a ^ b`.
    fn xor_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// `(!a) & b`
    fn andnot_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// Bitwise `a & b`.
    fn and_i32(a: Self::I32, b: Self::I32) -> Self::I32;
    /// Bitwise `a | b`.
    fn or_i32(a: Self::I32, b: Self::I32) -> Self::I32;
    /// Bitwise `a ^ b`.
    fn xor_i32(a: Self::I32, b: Self::I32) -> Self::I32;
    /// `(!a) & b`
    fn andnot_i32(a: Self::I32, b: Self::I32) -> Self::I32;

    // ----- comparison (all-ones / all-zeros lane masks) -----

    /// Mask of `a > b`.
    fn cmpgt_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// Mask of `a < b`.
    fn cmplt_f32(a: Self::F32, b: Self::F32) -> Self::F32;
    /// Mask of `a > b`.
    fn cmpgt_i32(a: Self::I32, b: Self::I32) -> Self::I32;
    /// Mask of `a < b`.
    fn cmplt_i32(a: Self::I32, b: Self::I32) -> Self::I32;

    // ----- conversion -----

    /// Numeric conversion, `i32 -> f32` per lane.
    fn cvt_i32_f32(a: Self::I32) -> Self::F32;
    /// Numeric conversion with truncation toward zero.
    fn cvtt_f32_i32(a: Self::F32) -> Self::I32;
    /// Same 128 bits, viewed as integers.
    fn bits_f32_i32(a: Self::F32) -> Self::I32;
    /// Same 128 bits, viewed as floats.
    fn bits_i32_f32(a: Self::I32) -> Self::F32;
}
