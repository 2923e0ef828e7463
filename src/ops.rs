//! Lane-wise arithmetic, logic, comparison, and the operator impls.
//!
//! # Masks
//!
//! `cmp_gt` / `cmp_lt` return a vector of the operand's type whose lanes are
//! either all-ones (`0xFFFF_FFFF`) or all-zeros. Masks feed straight into
//! [`and`](F32x4::and), [`and_not`](F32x4::and_not) and [`or`](F32x4::or), so
//! a per-lane choice needs no branch:
//!
//! ```
//! use quadlane::{select, F32x4};
//!
//! let a = F32x4::new(1.0, 2.0, 3.0, 4.0);
//! let b = F32x4::new(4.0, 3.0, 2.0, 1.0);
//! let larger = select(a.cmp_gt(b), a, b);
//! assert_eq!(larger.to_array(), [4.0, 3.0, 3.0, 4.0]);
//! ```
//!
//! # Approximations
//!
//! [`F32x4::recip`] and [`F32x4::rsqrt`] return hardware estimates. The
//! accuracy floor and the Newton-Raphson steps each backend applies are fixed
//! (see [`Backend::RECIP_REFINEMENT_STEPS`] and
//! [`Backend::RSQRT_REFINEMENT_STEPS`]); both backends stay within 1e-3
//! relative error, but they do not return identical bits. Code that needs
//! full precision uses [`F32x4::sqrt`] and division, or refines further.

use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Mul,
    MulAssign, Sub, SubAssign,
};

use crate::arch::{ActiveBackend as B, Backend};
use crate::{F32x4, I32x4};

#[allow(clippy::should_implement_trait)]
impl F32x4 {
    /// Lane-wise `self + rhs`.
    #[inline(always)]
    #[must_use]
    pub fn add(self, rhs: Self) -> Self {
        Self(B::add_f32(self.0, rhs.0))
    }

    /// Lane-wise `self - rhs`.
    #[inline(always)]
    #[must_use]
    pub fn sub(self, rhs: Self) -> Self {
        Self(B::sub_f32(self.0, rhs.0))
    }

    /// Lane-wise `self * rhs`.
    #[inline(always)]
    #[must_use]
    pub fn mul(self, rhs: Self) -> Self {
        Self(B::mul_f32(self.0, rhs.0))
    }

    /// Every lane multiplied by `k`.
    #[inline(always)]
    #[must_use]
    pub fn scale(self, k: f32) -> Self {
        self.mul(Self::splat(k))
    }

    /// Lane-wise minimum.
    ///
    /// NaN handling is the hardware's: SSE returns `rhs` when either lane is
    /// NaN, NEON returns NaN.
    #[inline(always)]
    #[must_use]
    pub fn min(self, rhs: Self) -> Self {
        Self(B::min_f32(self.0, rhs.0))
    }

    /// Lane-wise maximum. Same NaN caveat as [`F32x4::min`].
    #[inline(always)]
    #[must_use]
    pub fn max(self, rhs: Self) -> Self {
        Self(B::max_f32(self.0, rhs.0))
    }

    /// Approximate `1 / x`.
    ///
    /// SSE: raw `rcpps` (~12 bits). NEON: `vrecpe` plus one Newton-Raphson
    /// step.
    #[inline(always)]
    #[must_use]
    pub fn recip(self) -> Self {
        Self(B::recip_f32(self.0))
    }

    /// Approximate `1 / sqrt(x)`.
    ///
    /// SSE: raw `rsqrtps` (~12 bits). NEON: `vrsqrte` plus exactly two
    /// Newton-Raphson steps `e' = e * (1.5 - 0.5*x*e*e)`.
    ///
    /// ```
    /// use quadlane::F32x4;
    ///
    /// let r = F32x4::splat(4.0).rsqrt().first();
    /// assert!((r - 0.5).abs() / 0.5 < 1e-3);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn rsqrt(self) -> Self {
        Self(B::rsqrt_f32(self.0))
    }

    /// Correctly rounded square root.
    #[inline(always)]
    #[must_use]
    pub fn sqrt(self) -> Self {
        Self(B::sqrt_f32(self.0))
    }

    /// Bitwise `self & rhs`.
    #[inline(always)]
    #[must_use]
    pub fn and(self, rhs: Self) -> Self {
        Self(B::and_f32(self.0, rhs.0))
    }

    /// Bitwise `self | rhs`.
    #[inline(always)]
    #[must_use]
    pub fn or(self, rhs: Self) -> Self {
        Self(B::or_f32(self.0, rhs.0))
    }

    /// Bitwise `self ^ rhs`.
    #[inline(always)]
    #[must_use]
    pub fn xor(self, rhs: Self) -> Self {
        Self(B::xor_f32(self.0, rhs.0))
    }

    /// Bitwise `(!self) & rhs`.
    ///
    /// Note the operand order: it is the receiver that gets inverted, as in
    /// `andnps`.
    #[inline(always)]
    #[must_use]
    pub fn and_not(self, rhs: Self) -> Self {
        Self(B::andnot_f32(self.0, rhs.0))
    }

    /// Lane mask of `self > rhs`. NaN lanes compare false.
    #[inline(always)]
    #[must_use]
    pub fn cmp_gt(self, rhs: Self) -> Self {
        Self(B::cmpgt_f32(self.0, rhs.0))
    }

    /// Lane mask of `self < rhs`. NaN lanes compare false.
    #[inline(always)]
    #[must_use]
    pub fn cmp_lt(self, rhs: Self) -> Self {
        Self(B::cmplt_f32(self.0, rhs.0))
    }
}

#[allow(clippy::should_implement_trait)]
impl I32x4 {
    /// Wrapping lane-wise `self + rhs`.
    #[inline(always)]
    #[must_use]
    pub fn add(self, rhs: Self) -> Self {
        Self(B::add_i32(self.0, rhs.0))
    }

    /// Wrapping lane-wise `self - rhs`.
    #[inline(always)]
    #[must_use]
    pub fn sub(self, rhs: Self) -> Self {
        Self(B::sub_i32(self.0, rhs.0))
    }

    /// Bitwise `self & rhs`.
    #[inline(always)]
    #[must_use]
    pub fn and(self, rhs: Self) -> Self {
        Self(B::and_i32(self.0, rhs.0))
    }

    /// Bitwise `self | rhs`.
    #[inline(always)]
    #[must_use]
    pub fn or(self, rhs: Self) -> Self {
        Self(B::or_i32(self.0, rhs.0))
    }

    /// Bitwise `self ^ rhs`.
    #[inline(always)]
    #[must_use]
    pub fn xor(self, rhs: Self) -> Self {
        Self(B::xor_i32(self.0, rhs.0))
    }

    /// Bitwise `(!self) & rhs`.
    #[inline(always)]
    #[must_use]
    pub fn and_not(self, rhs: Self) -> Self {
        Self(B::andnot_i32(self.0, rhs.0))
    }

    /// Lane mask of `self > rhs` (signed).
    #[inline(always)]
    #[must_use]
    pub fn cmp_gt(self, rhs: Self) -> Self {
        Self(B::cmpgt_i32(self.0, rhs.0))
    }

    /// Lane mask of `self < rhs` (signed).
    #[inline(always)]
    #[must_use]
    pub fn cmp_lt(self, rhs: Self) -> Self {
        Self(B::cmplt_i32(self.0, rhs.0))
    }
}

/// `a + b + c`, evaluated as `(a + b) + c`.
#[inline(always)]
#[must_use]
pub fn add3(a: F32x4, b: F32x4, c: F32x4) -> F32x4 {
    a.add(b).add(c)
}

/// `a + b + c + d`, evaluated as `((a + b) + c) + d`.
///
/// The order is fixed so results are reproducible; it is not a tree
/// reduction.
#[inline(always)]
#[must_use]
pub fn add4(a: F32x4, b: F32x4, c: F32x4, d: F32x4) -> F32x4 {
    a.add(b).add(c).add(d)
}

/// Per-lane `if mask { a } else { b }` as `(mask & a) | (!mask & b)`.
///
/// `mask` lanes must be all-ones or all-zeros (any comparison result);
/// other bit patterns blend the two inputs bitwise.
#[inline(always)]
#[must_use]
pub fn select(mask: F32x4, a: F32x4, b: F32x4) -> F32x4 {
    mask.and(a).or(mask.and_not(b))
}

/// Integer counterpart of [`select`].
#[inline(always)]
#[must_use]
pub fn select_i32(mask: I32x4, a: I32x4, b: I32x4) -> I32x4 {
    mask.and(a).or(mask.and_not(b))
}

// ─────────────────────────────────────────────────────────────────────────────
// Operator impls
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! binop {
    ($ty:ty, $trait:ident, $method:ident, $assign:ident, $assign_method:ident, $inherent:ident) => {
        impl $trait for $ty {
            type Output = $ty;

            #[inline(always)]
            fn $method(self, rhs: $ty) -> $ty {
                <$ty>::$inherent(self, rhs)
            }
        }

        impl $assign for $ty {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: $ty) {
                *self = <$ty>::$inherent(*self, rhs);
            }
        }
    };
}

binop!(F32x4, Add, add, AddAssign, add_assign, add);
binop!(F32x4, Sub, sub, SubAssign, sub_assign, sub);
binop!(F32x4, Mul, mul, MulAssign, mul_assign, mul);
binop!(F32x4, BitAnd, bitand, BitAndAssign, bitand_assign, and);
binop!(F32x4, BitOr, bitor, BitOrAssign, bitor_assign, or);
binop!(F32x4, BitXor, bitxor, BitXorAssign, bitxor_assign, xor);
binop!(I32x4, Add, add, AddAssign, add_assign, add);
binop!(I32x4, Sub, sub, SubAssign, sub_assign, sub);
binop!(I32x4, BitAnd, bitand, BitAndAssign, bitand_assign, and);
binop!(I32x4, BitOr, bitor, BitOrAssign, bitor_assign, or);
binop!(I32x4, BitXor, bitxor, BitXorAssign, bitxor_assign, xor);

impl Mul<f32> for F32x4 {
    type Output = F32x4;

    #[inline(always)]
    fn mul(self, k: f32) -> F32x4 {
        self.scale(k)
    }
}

impl Mul<F32x4> for f32 {
    type Output = F32x4;

    #[inline(always)]
    fn mul(self, v: F32x4) -> F32x4 {
        F32x4::splat(self).mul(v)
    }
}

impl MulAssign<f32> for F32x4 {
    #[inline(always)]
    fn mul_assign(&mut self, k: f32) {
        *self = self.scale(k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_identity() {
        let x = F32x4::new(1.5, -2.0, 1e30, -0.0);
        let y = x + F32x4::splat(0.0);
        assert_eq!(y.to_array(), [1.5, -2.0, 1e30, 0.0]);
    }

    #[test]
    fn test_add_chains_are_left_associative() {
        // 1e8 + (-1e8) + 1.0 = 1.0, but 1e8 + ((-1e8) + 1.0) = 0.0 in f32.
        let a = F32x4::splat(1e8);
        let b = F32x4::splat(-1e8);
        let c = F32x4::splat(1.0);
        assert_eq!(add3(a, b, c).to_array(), [1.0; 4]);
        assert_eq!(add4(a, b, c, F32x4::splat(2.0)).to_array(), [3.0; 4]);
        assert_eq!(add3(a, b, c).to_bits(), (a + b + c).to_bits());
    }

    #[test]
    fn test_scalar_mul_forms_agree() {
        let v = F32x4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((v * 2.0).to_array(), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!((2.0 * v).to_array(), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!((v * F32x4::splat(2.0)).to_array(), [2.0, 4.0, 6.0, 8.0]);
        let mut w = v;
        w *= 0.5;
        assert_eq!(w.to_array(), [0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_inc_dec_register() {
        let mut acc = F32x4::zero();
        acc += F32x4::new(1.0, 2.0, 3.0, 4.0);
        acc += F32x4::splat(1.0);
        acc -= F32x4::splat(0.5);
        assert_eq!(acc.to_array(), [1.5, 2.5, 3.5, 4.5]);
    }

    #[test]
    fn test_min_max() {
        let a = F32x4::new(1.0, 5.0, -3.0, 0.0);
        let b = F32x4::new(2.0, 4.0, -4.0, 0.0);
        assert_eq!(a.min(b).to_array(), [1.0, 4.0, -4.0, 0.0]);
        assert_eq!(a.max(b).to_array(), [2.0, 5.0, -3.0, 0.0]);
    }

    #[test]
    fn test_sqrt_is_exact() {
        let v = F32x4::new(4.0, 9.0, 2.0, 0.0).sqrt();
        assert_eq!(v.to_array(), [2.0, 3.0, 2.0_f32.sqrt(), 0.0]);
    }

    #[test]
    fn test_recip_within_floor() {
        let v = F32x4::new(1.0, 2.0, 4.0, 0.125).recip().to_array();
        for (got, want) in v.iter().zip([1.0_f32, 0.5, 0.25, 8.0]) {
            assert!((got - want).abs() / want < 1e-3, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_compare_masks() {
        let a = F32x4::new(1.0, 2.0, 3.0, 4.0);
        let b = F32x4::new(4.0, 3.0, 2.0, 1.0);
        assert_eq!(a.cmp_gt(b).to_bits(), [0, 0, u32::MAX, u32::MAX]);
        assert_eq!(a.cmp_lt(b).to_bits(), [u32::MAX, u32::MAX, 0, 0]);

        let ia = I32x4::new(1, 2, 3, 4);
        let ib = I32x4::new(4, 3, 2, 1);
        assert_eq!(ia.cmp_gt(ib).to_array(), [0, 0, -1, -1]);
        assert_eq!(ia.cmp_lt(ib).to_array(), [-1, -1, 0, 0]);
    }

    #[test]
    fn test_and_not_operand_order() {
        let ones = I32x4::splat(-1).as_float();
        let x = F32x4::new(1.0, -2.0, 3.5, f32::NAN);
        assert_eq!(x.and_not(ones).to_bits(), x.to_bits().map(|b| !b));
        assert_eq!(ones.and_not(x).to_bits(), [0; 4]);
        assert_eq!(F32x4::zero().and_not(x).to_bits(), x.to_bits());
    }

    #[test]
    fn test_abs_via_sign_mask() {
        let sign = F32x4::splat(-0.0);
        let v = F32x4::new(-1.5, 2.0, -0.0, -f32::INFINITY);
        assert_eq!(sign.and_not(v).to_array(), [1.5, 2.0, 0.0, f32::INFINITY]);
        assert_eq!((v ^ sign).to_array(), [1.5, -2.0, 0.0, f32::INFINITY]);
    }

    #[test]
    fn test_select_reproduces_max() {
        let a = F32x4::new(1.0, 7.0, -3.0, 2.0);
        let b = F32x4::new(2.0, 6.0, -4.0, 2.0);
        assert_eq!(select(a.cmp_gt(b), a, b).to_array(), a.max(b).to_array());
    }

    #[test]
    fn test_integer_ops_wrap() {
        let a = I32x4::new(i32::MAX, i32::MIN, 5, -5);
        let b = I32x4::splat(1);
        assert_eq!((a + b).to_array(), [i32::MIN, i32::MIN + 1, 6, -4]);
        assert_eq!((a - b).to_array(), [i32::MAX - 1, i32::MAX, 4, -6]);
        assert_eq!((a & I32x4::splat(0xff)).to_array(), [0xff, 0, 5, 0xfb]);
        assert_eq!((a ^ a).to_array(), [0; 4]);
        assert_eq!((a | I32x4::zero()).to_array(), a.to_array());
    }

    #[test]
    fn test_select_i32() {
        let a = I32x4::new(1, 20, 3, 40);
        let b = I32x4::new(10, 2, 30, 4);
        assert_eq!(select_i32(a.cmp_gt(b), a, b).to_array(), [10, 20, 30, 40]);
    }
}
