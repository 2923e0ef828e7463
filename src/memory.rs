//! Loads, stores, and fused read-modify-write.
//!
//! # Aligned vs unaligned
//!
//! Two tiers are kept:
//!
//! | Tier | Safe form | Raw form | SSE2 | NEON |
//! |------|-----------|----------|------|------|
//! | aligned | `&Align16<[T; 4]>` | `load_ptr` / `store_ptr` | `movaps` | `ld1` |
//! | unaligned | `&[T; 4]` | `load_unaligned_ptr` / `store_unaligned_ptr` | `movups` | `ld1` |
//!
//! The aligned tier is safe whenever the address comes from an
//! [`Align16`]: the type carries the 16-byte guarantee, so no caller
//! discipline is needed. The raw-pointer forms are `unsafe` and a misaligned
//! pointer is undefined behaviour (a fault on SSE2 in practice). On NEON both
//! tiers compile to the same instruction.
//!
//! # Stores return their value
//!
//! Every store returns the vector it wrote, so a computation can be written
//! and kept in a register in one expression.

use crate::arch::{ActiveBackend as B, Backend};
use crate::error::LaneError;
use crate::{F32x4, I32x4};

/// Required alignment of the aligned tier, in bytes.
pub const ALIGN: usize = 16;

/// A value stored on a 16-byte boundary.
///
/// ```
/// use quadlane::{Align16, F32x4};
///
/// let buf = Align16([1.0_f32, 2.0, 3.0, 4.0]);
/// let v = F32x4::load(&buf);
/// assert_eq!(v.to_array(), buf.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C, align(16))]
pub struct Align16<T>(pub T);

impl<T> Align16<T> {
    /// Wraps `value`.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Unwraps the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Align16<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> std::ops::DerefMut for Align16<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

// SAFETY: `repr(C)` around a Pod; the alignment padding of `Align16<[f32; 4]>`
// and `Align16<[i32; 4]>` is zero bytes.
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Zeroable for Align16<[f32; 4]> {}
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Pod for Align16<[f32; 4]> {}
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Zeroable for Align16<[i32; 4]> {}
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Pod for Align16<[i32; 4]> {}

#[inline]
fn check_len(len: usize) -> Result<(), LaneError> {
    if len < 4 {
        return Err(LaneError::TooShort { len });
    }
    Ok(())
}

impl F32x4 {
    /// Aligned load.
    #[inline(always)]
    #[must_use]
    pub fn load(src: &Align16<[f32; 4]>) -> Self {
        // SAFETY: Align16 guarantees 16-byte alignment and 4 readable lanes.
        unsafe { Self::load_ptr(src.0.as_ptr()) }
    }

    /// Unaligned load. Works for any address.
    #[inline(always)]
    #[must_use]
    pub fn load_unaligned(src: &[f32; 4]) -> Self {
        // SAFETY: the array has 4 readable lanes.
        unsafe { Self::load_unaligned_ptr(src.as_ptr()) }
    }

    /// Aligned load from a raw pointer.
    ///
    /// # Safety
    ///
    /// `p` must be valid for reading 4 `f32` and aligned to 16 bytes.
    /// Use [`F32x4::load_unaligned_ptr`] when alignment is not guaranteed.
    #[inline(always)]
    #[must_use]
    pub unsafe fn load_ptr(p: *const f32) -> Self {
        Self(B::load_f32(p))
    }

    /// Unaligned load from a raw pointer.
    ///
    /// # Safety
    ///
    /// `p` must be valid for reading 4 `f32`.
    #[inline(always)]
    #[must_use]
    pub unsafe fn load_unaligned_ptr(p: *const f32) -> Self {
        Self(B::loadu_f32(p))
    }

    /// First four elements of `src`, any alignment.
    ///
    /// ```
    /// use quadlane::{F32x4, LaneError};
    ///
    /// let v = F32x4::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0])?;
    /// assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(F32x4::from_slice(&[1.0]).unwrap_err(), LaneError::TooShort { len: 1 });
    /// # Ok::<(), LaneError>(())
    /// ```
    #[inline]
    pub fn from_slice(src: &[f32]) -> Result<Self, LaneError> {
        check_len(src.len())?;
        // SAFETY: at least 4 readable lanes.
        Ok(unsafe { Self::load_unaligned_ptr(src.as_ptr()) })
    }

    /// First four elements of `src` through the aligned tier.
    ///
    /// Fails instead of faulting when `src` does not start on a 16-byte
    /// boundary.
    #[inline]
    pub fn load_aligned_slice(src: &[f32]) -> Result<Self, LaneError> {
        check_len(src.len())?;
        let addr = src.as_ptr() as usize;
        if addr % ALIGN != 0 {
            return Err(LaneError::Misaligned { addr });
        }
        // SAFETY: length and alignment checked above.
        Ok(unsafe { Self::load_ptr(src.as_ptr()) })
    }

    /// Aligned store of all four lanes; returns `self`.
    #[inline(always)]
    pub fn store(self, dst: &mut Align16<[f32; 4]>) -> Self {
        // SAFETY: Align16 guarantees alignment; `&mut` guarantees exclusivity.
        unsafe { self.store_ptr(dst.0.as_mut_ptr()) }
    }

    /// Unaligned store of all four lanes; returns `self`.
    #[inline(always)]
    pub fn store_unaligned(self, dst: &mut [f32; 4]) -> Self {
        // SAFETY: the array has 4 writable lanes.
        unsafe { self.store_unaligned_ptr(dst.as_mut_ptr()) }
    }

    /// Aligned store to a raw pointer; returns `self`.
    ///
    /// # Safety
    ///
    /// `p` must be valid for writing 4 `f32` and aligned to 16 bytes.
    #[inline(always)]
    pub unsafe fn store_ptr(self, p: *mut f32) -> Self {
        B::store_f32(p, self.0);
        self
    }

    /// Unaligned store to a raw pointer; returns `self`.
    ///
    /// # Safety
    ///
    /// `p` must be valid for writing 4 `f32`.
    #[inline(always)]
    pub unsafe fn store_unaligned_ptr(self, p: *mut f32) -> Self {
        B::storeu_f32(p, self.0);
        self
    }

    /// Writes lane 0 to `dst` and nothing else; returns `self`.
    ///
    /// For scalar accumulators that live in a SIMD register.
    ///
    /// ```
    /// use quadlane::F32x4;
    ///
    /// let mut total = 0.0_f32;
    /// F32x4::new(6.0, 7.0, 8.0, 9.0).store_scalar(&mut total);
    /// assert_eq!(total, 6.0);
    /// ```
    #[inline(always)]
    pub fn store_scalar(self, dst: &mut f32) -> Self {
        // SAFETY: `dst` is one writable f32.
        unsafe { B::store_lane0_f32(dst, self.0) };
        self
    }

    /// Writes the four lanes to the front of `dst`, any alignment.
    #[inline]
    pub fn write_to_slice(self, dst: &mut [f32]) -> Result<Self, LaneError> {
        check_len(dst.len())?;
        // SAFETY: at least 4 writable lanes.
        Ok(unsafe { self.store_unaligned_ptr(dst.as_mut_ptr()) })
    }
}

impl I32x4 {
    /// Aligned load.
    #[inline(always)]
    #[must_use]
    pub fn load(src: &Align16<[i32; 4]>) -> Self {
        // SAFETY: Align16 guarantees 16-byte alignment and 4 readable lanes.
        unsafe { Self(B::load_i32(src.0.as_ptr())) }
    }

    /// Unaligned load.
    #[inline(always)]
    #[must_use]
    pub fn load_unaligned(src: &[i32; 4]) -> Self {
        // SAFETY: the array has 4 readable lanes.
        unsafe { Self(B::loadu_i32(src.as_ptr())) }
    }

    /// Aligned store; returns `self`.
    #[inline(always)]
    pub fn store(self, dst: &mut Align16<[i32; 4]>) -> Self {
        // SAFETY: Align16 guarantees alignment; `&mut` guarantees exclusivity.
        unsafe { B::store_i32(dst.0.as_mut_ptr(), self.0) };
        self
    }

    /// Unaligned store; returns `self`.
    #[inline(always)]
    pub fn store_unaligned(self, dst: &mut [i32; 4]) -> Self {
        // SAFETY: the array has 4 writable lanes.
        unsafe { B::storeu_i32(dst.as_mut_ptr(), self.0) };
        self
    }

    /// First four elements of `src`, any alignment.
    #[inline]
    pub fn from_slice(src: &[i32]) -> Result<Self, LaneError> {
        check_len(src.len())?;
        // SAFETY: at least 4 readable lanes.
        Ok(unsafe { Self(B::loadu_i32(src.as_ptr())) })
    }
}

/// `*dst += v` as one load-add-store; returns the sum.
///
/// No atomicity: exclusive access comes from `&mut`, and the raw form
/// [`store_add_ptr`] leaves serialization to the caller.
///
/// ```
/// use quadlane::{store_add, Align16, F32x4};
///
/// let mut acc = Align16([1.0_f32, 1.0, 1.0, 1.0]);
/// let sum = store_add(&mut acc, F32x4::new(1.0, 2.0, 3.0, 4.0));
/// assert_eq!(acc.0, [2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(sum.to_array(), acc.0);
/// ```
#[inline(always)]
pub fn store_add(dst: &mut Align16<[f32; 4]>, v: F32x4) -> F32x4 {
    // SAFETY: Align16 is aligned and readable/writable for 4 lanes.
    unsafe { store_add_ptr(dst.0.as_mut_ptr(), v) }
}

/// `*dst -= v` as one load-sub-store; returns the difference.
#[inline(always)]
pub fn store_sub(dst: &mut Align16<[f32; 4]>, v: F32x4) -> F32x4 {
    // SAFETY: as for `store_add`.
    unsafe { store_sub_ptr(dst.0.as_mut_ptr(), v) }
}

/// Raw-pointer [`store_add`].
///
/// # Safety
///
/// `p` must be valid for reading and writing 4 `f32`, aligned to 16 bytes,
/// and not concurrently accessed.
#[inline(always)]
pub unsafe fn store_add_ptr(p: *mut f32, v: F32x4) -> F32x4 {
    F32x4::load_ptr(p).add(v).store_ptr(p)
}

/// Raw-pointer [`store_sub`].
///
/// # Safety
///
/// Same contract as [`store_add_ptr`].
#[inline(always)]
pub unsafe fn store_sub_ptr(p: *mut f32, v: F32x4) -> F32x4 {
    F32x4::load_ptr(p).sub(v).store_ptr(p)
}

/// Broadcasts `x` into all four lanes of `dst`; returns the broadcast vector.
#[inline(always)]
pub fn store_splat(dst: &mut Align16<[f32; 4]>, x: f32) -> F32x4 {
    F32x4::splat(x).store(dst)
}
