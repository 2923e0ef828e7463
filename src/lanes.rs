//! The two lane types: [`F32x4`] and [`I32x4`].
//!
//! Both wrap the active backend's 128-bit register. They are plain values:
//! 16 bytes, 16-byte aligned, `Copy`, no allocation.
//!
//! Lane 0 is always the first constructor argument and the lowest memory
//! address, on every backend.

use std::fmt;

use crate::arch::{ActiveBackend as B, Backend};

type RegF = <B as Backend>::F32;
type RegI = <B as Backend>::I32;

/// Four `f32` lanes in one 128-bit register.
///
/// ```
/// use quadlane::F32x4;
///
/// let v = F32x4::new(1.0, 2.0, 3.0, 4.0);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(v.first(), 1.0);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x4(pub(crate) RegF);

/// Four `i32` lanes in one 128-bit register.
///
/// ```
/// use quadlane::I32x4;
///
/// let v = I32x4::new(-1, 0, 1, 2);
/// assert_eq!(v.to_array(), [-1, 0, 1, 2]);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct I32x4(pub(crate) RegI);

impl F32x4 {
    /// Number of lanes.
    pub const LANES: usize = 4;

    /// Lanes `[a, b, c, d]`, `a` in lane 0.
    #[inline(always)]
    #[must_use]
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self(B::set_f32(a, b, c, d))
    }

    /// `x` in every lane.
    #[inline(always)]
    #[must_use]
    pub fn splat(x: f32) -> Self {
        Self(B::splat_f32(x))
    }

    /// All lanes `+0.0`.
    #[inline(always)]
    #[must_use]
    pub fn zero() -> Self {
        Self::splat(0.0)
    }

    /// Lane 0.
    #[inline(always)]
    #[must_use]
    pub fn first(self) -> f32 {
        B::first_f32(self.0)
    }

    /// All four lanes, lane 0 first.
    #[inline]
    #[must_use]
    pub fn to_array(self) -> [f32; 4] {
        let mut out = [0.0_f32; 4];
        self.store_unaligned(&mut out);
        out
    }

    /// The raw bit pattern of each lane.
    #[inline]
    #[must_use]
    pub fn to_bits(self) -> [u32; 4] {
        self.to_array().map(f32::to_bits)
    }

    /// The same 128 bits viewed as four `i32` lanes.
    ///
    /// No numeric conversion happens; see [`F32x4::to_int`] for that.
    #[inline(always)]
    #[must_use]
    pub fn as_int(self) -> I32x4 {
        I32x4(B::bits_f32_i32(self.0))
    }

    /// Numeric conversion, truncating toward zero.
    ///
    /// Lanes outside the `i32` range are backend-specific: SSE2 yields
    /// `i32::MIN`, NEON saturates. NaN lanes likewise (`i32::MIN` vs `0`).
    ///
    /// ```
    /// use quadlane::F32x4;
    ///
    /// let v = F32x4::new(1.9, -1.9, 0.5, -0.5).to_int();
    /// assert_eq!(v.to_array(), [1, -1, 0, 0]);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn to_int(self) -> I32x4 {
        I32x4(B::cvtt_f32_i32(self.0))
    }
}

impl I32x4 {
    /// Number of lanes.
    pub const LANES: usize = 4;

    /// Lanes `[a, b, c, d]`, `a` in lane 0.
    #[inline(always)]
    #[must_use]
    pub fn new(a: i32, b: i32, c: i32, d: i32) -> Self {
        Self(B::set_i32(a, b, c, d))
    }

    /// `x` in every lane.
    #[inline(always)]
    #[must_use]
    pub fn splat(x: i32) -> Self {
        Self(B::splat_i32(x))
    }

    /// All lanes zero.
    #[inline(always)]
    #[must_use]
    pub fn zero() -> Self {
        Self::splat(0)
    }

    /// Lane 0.
    #[inline(always)]
    #[must_use]
    pub fn first(self) -> i32 {
        B::first_i32(self.0)
    }

    /// All four lanes, lane 0 first.
    #[inline]
    #[must_use]
    pub fn to_array(self) -> [i32; 4] {
        let mut out = [0_i32; 4];
        self.store_unaligned(&mut out);
        out
    }

    /// Each lane reinterpreted as `u32`, handy for inspecting masks.
    #[inline]
    #[must_use]
    pub fn to_bits(self) -> [u32; 4] {
        self.to_array().map(|x| x as u32)
    }

    /// The same 128 bits viewed as four `f32` lanes.
    #[inline(always)]
    #[must_use]
    pub fn as_float(self) -> F32x4 {
        F32x4(B::bits_i32_f32(self.0))
    }

    /// Numeric conversion. Exact for `|x| < 2^24`, otherwise rounded to
    /// nearest.
    #[inline(always)]
    #[must_use]
    pub fn to_float(self) -> F32x4 {
        F32x4(B::cvt_i32_f32(self.0))
    }
}

impl Default for F32x4 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl Default for I32x4 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for F32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.to_array();
        f.debug_tuple("F32x4").field(&a).field(&b).field(&c).field(&d).finish()
    }
}

impl fmt::Debug for I32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.to_array();
        f.debug_tuple("I32x4").field(&a).field(&b).field(&c).field(&d).finish()
    }
}

impl From<[f32; 4]> for F32x4 {
    #[inline(always)]
    fn from([a, b, c, d]: [f32; 4]) -> Self {
        Self::new(a, b, c, d)
    }
}

impl From<F32x4> for [f32; 4] {
    #[inline]
    fn from(v: F32x4) -> Self {
        v.to_array()
    }
}

impl From<f32> for F32x4 {
    #[inline(always)]
    fn from(x: f32) -> Self {
        Self::splat(x)
    }
}

impl From<[i32; 4]> for I32x4 {
    #[inline(always)]
    fn from([a, b, c, d]: [i32; 4]) -> Self {
        Self::new(a, b, c, d)
    }
}

impl From<I32x4> for [i32; 4] {
    #[inline]
    fn from(v: I32x4) -> Self {
        v.to_array()
    }
}

impl From<i32> for I32x4 {
    #[inline(always)]
    fn from(x: i32) -> Self {
        Self::splat(x)
    }
}

// SAFETY: both wrap a 16-byte register with no padding and no invalid bit
// patterns; all-zero is a valid value.
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Zeroable for F32x4 {}
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Pod for F32x4 {}
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Zeroable for I32x4 {}
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Pod for I32x4 {}
