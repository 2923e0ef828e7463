//! aarch64 backend using NEON.
//!
//! NEON is always available on aarch64, so no runtime detection needed.
//!
//! # Where NEON differs from SSE
//!
//! - NEON has no float-typed bitwise instructions. `and`/`or`/`xor`/`andnot`
//!   on `float32x4_t` reinterpret the lanes as `int32x4_t`, run the integer
//!   instruction and reinterpret back. The result is bit-identical to SSE's
//!   `andps` family.
//! - Comparisons produce `uint32x4_t` masks; they are reinterpreted to the
//!   operand's lane type so the all-ones / all-zeros convention matches SSE.
//! - `vrecpeq_f32` / `vrsqrteq_f32` give only ~8 bits. Estimates are refined
//!   with Newton-Raphson steps (`vrecpsq_f32`, `vrsqrtsq_f32`) to reach at
//!   least SSE's ~12-bit floor:
//!
//! | Operation | Estimate | Steps | Typical relative error |
//! |-----------|----------|-------|------------------------|
//! | recip | `vrecpeq_f32` | 1 | ~1e-5 |
//! | rsqrt | `vrsqrteq_f32` | 2 | ~1e-6 |
//!
//! - `vld1q_f32` accepts any alignment, so the aligned and unaligned paths
//!   compile to the same instruction.
//! - `vcvtq_s32_f32` truncates toward zero like `cvttps2dq` but saturates
//!   out-of-range lanes instead of producing `i32::MIN`.

// Newer toolchains treat baseline-feature intrinsics as safe to call.
#![allow(unused_unsafe)]

use std::arch::aarch64::{
    float32x4_t, int32x4_t, vaddq_f32, vaddq_s32, vandq_s32, vbicq_s32, vcgtq_f32, vcgtq_s32,
    vcltq_f32, vcltq_s32, vcvtq_f32_s32, vcvtq_s32_f32, vdupq_n_f32, vdupq_n_s32, veorq_s32,
    vgetq_lane_f32, vgetq_lane_s32, vld1q_f32, vld1q_s32, vmaxq_f32, vminq_f32, vmulq_f32,
    vorrq_s32, vrecpeq_f32, vrecpsq_f32, vreinterpretq_f32_s32, vreinterpretq_f32_u32,
    vreinterpretq_s32_f32, vreinterpretq_s32_u32, vrsqrteq_f32, vrsqrtsq_f32, vsqrtq_f32,
    vst1q_f32, vst1q_lane_f32, vst1q_s32, vsubq_f32, vsubq_s32,
};

use super::{sealed::Sealed, Backend};

/// NEON realization of [`Backend`].
#[derive(Debug, Clone, Copy)]
pub enum Neon {}

impl Sealed for Neon {}

impl Neon {
    /// Runs an integer instruction over the bits of two float registers.
    #[inline(always)]
    fn on_bits(
        a: float32x4_t,
        b: float32x4_t,
        op: impl Fn(int32x4_t, int32x4_t) -> int32x4_t,
    ) -> float32x4_t {
        Self::bits_i32_f32(op(Self::bits_f32_i32(a), Self::bits_f32_i32(b)))
    }
}

impl Backend for Neon {
    type F32 = float32x4_t;
    type I32 = int32x4_t;

    const NAME: &'static str = "neon";
    const RECIP_REFINEMENT_STEPS: u32 = 1;
    const RSQRT_REFINEMENT_STEPS: u32 = 2;
    const DISTINCT_UNALIGNED_ACCESS: bool = false;

    #[inline(always)]
    fn splat_f32(x: f32) -> float32x4_t {
        // SAFETY: NEON is baseline on aarch64.
        unsafe { vdupq_n_f32(x) }
    }

    #[inline(always)]
    fn splat_i32(x: i32) -> int32x4_t {
        unsafe { vdupq_n_s32(x) }
    }

    #[inline(always)]
    fn set_f32(a: f32, b: f32, c: f32, d: f32) -> float32x4_t {
        let lanes = [a, b, c, d];
        // SAFETY: `lanes` holds 4 readable f32; vld1q has no alignment requirement.
        unsafe { vld1q_f32(lanes.as_ptr()) }
    }

    #[inline(always)]
    fn set_i32(a: i32, b: i32, c: i32, d: i32) -> int32x4_t {
        let lanes = [a, b, c, d];
        unsafe { vld1q_s32(lanes.as_ptr()) }
    }

    #[inline(always)]
    fn first_f32(v: float32x4_t) -> f32 {
        unsafe { vgetq_lane_f32::<0>(v) }
    }

    #[inline(always)]
    fn first_i32(v: int32x4_t) -> i32 {
        unsafe { vgetq_lane_s32::<0>(v) }
    }

    #[inline(always)]
    unsafe fn load_f32(p: *const f32) -> float32x4_t {
        debug_assert_eq!(p as usize % 16, 0, "load_f32: misaligned pointer");
        vld1q_f32(p)
    }

    #[inline(always)]
    unsafe fn loadu_f32(p: *const f32) -> float32x4_t {
        vld1q_f32(p)
    }

    #[inline(always)]
    unsafe fn store_f32(p: *mut f32, v: float32x4_t) {
        debug_assert_eq!(p as usize % 16, 0, "store_f32: misaligned pointer");
        vst1q_f32(p, v)
    }

    #[inline(always)]
    unsafe fn storeu_f32(p: *mut f32, v: float32x4_t) {
        vst1q_f32(p, v)
    }

    #[inline(always)]
    unsafe fn store_lane0_f32(p: *mut f32, v: float32x4_t) {
        vst1q_lane_f32::<0>(p, v)
    }

    #[inline(always)]
    unsafe fn load_i32(p: *const i32) -> int32x4_t {
        debug_assert_eq!(p as usize % 16, 0, "load_i32: misaligned pointer");
        vld1q_s32(p)
    }

    #[inline(always)]
    unsafe fn loadu_i32(p: *const i32) -> int32x4_t {
        vld1q_s32(p)
    }

    #[inline(always)]
    unsafe fn store_i32(p: *mut i32, v: int32x4_t) {
        debug_assert_eq!(p as usize % 16, 0, "store_i32: misaligned pointer");
        vst1q_s32(p, v)
    }

    #[inline(always)]
    unsafe fn storeu_i32(p: *mut i32, v: int32x4_t) {
        vst1q_s32(p, v)
    }

    #[inline(always)]
    fn add_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        unsafe { vaddq_f32(a, b) }
    }

    #[inline(always)]
    fn sub_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        unsafe { vsubq_f32(a, b) }
    }

    #[inline(always)]
    fn mul_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        unsafe { vmulq_f32(a, b) }
    }

    #[inline(always)]
    fn min_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        unsafe { vminq_f32(a, b) }
    }

    #[inline(always)]
    fn max_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        unsafe { vmaxq_f32(a, b) }
    }

    #[inline(always)]
    fn recip_f32(a: float32x4_t) -> float32x4_t {
        unsafe {
            let mut e = vrecpeq_f32(a);
            for _ in 0..Self::RECIP_REFINEMENT_STEPS {
                // vrecps(a, e) = 2 - a*e
                e = vmulq_f32(e, vrecpsq_f32(a, e));
            }
            e
        }
    }

    #[inline(always)]
    fn rsqrt_f32(a: float32x4_t) -> float32x4_t {
        unsafe {
            let mut e = vrsqrteq_f32(a);
            for _ in 0..Self::RSQRT_REFINEMENT_STEPS {
                // vrsqrts(a, e*e) = (3 - a*e*e) / 2
                e = vmulq_f32(e, vrsqrtsq_f32(a, vmulq_f32(e, e)));
            }
            e
        }
    }

    #[inline(always)]
    fn sqrt_f32(a: float32x4_t) -> float32x4_t {
        unsafe { vsqrtq_f32(a) }
    }

    #[inline(always)]
    fn add_i32(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        unsafe { vaddq_s32(a, b) }
    }

    #[inline(always)]
    fn sub_i32(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        unsafe { vsubq_s32(a, b) }
    }

    #[inline(always)]
    fn and_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        Self::on_bits(a, b, Self::and_i32)
    }

    #[inline(always)]
    fn or_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        Self::on_bits(a, b, Self::or_i32)
    }

    #[inline(always)]
    fn xor_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        Self::on_bits(a, b, Self::xor_i32)
    }

    #[inline(always)]
    fn andnot_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        Self::on_bits(a, b, Self::andnot_i32)
    }

    #[inline(always)]
    fn and_i32(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        unsafe { vandq_s32(a, b) }
    }

    #[inline(always)]
    fn or_i32(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        unsafe { vorrq_s32(a, b) }
    }

    #[inline(always)]
    fn xor_i32(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        unsafe { veorq_s32(a, b) }
    }

    #[inline(always)]
    fn andnot_i32(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        // vbic(x, y) = x & !y, so the operands swap.
        unsafe { vbicq_s32(b, a) }
    }

    #[inline(always)]
    fn cmpgt_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        unsafe { vreinterpretq_f32_u32(vcgtq_f32(a, b)) }
    }

    #[inline(always)]
    fn cmplt_f32(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        unsafe { vreinterpretq_f32_u32(vcltq_f32(a, b)) }
    }

    #[inline(always)]
    fn cmpgt_i32(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        unsafe { vreinterpretq_s32_u32(vcgtq_s32(a, b)) }
    }

    #[inline(always)]
    fn cmplt_i32(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        unsafe { vreinterpretq_s32_u32(vcltq_s32(a, b)) }
    }

    #[inline(always)]
    fn cvt_i32_f32(a: int32x4_t) -> float32x4_t {
        unsafe { vcvtq_f32_s32(a) }
    }

    #[inline(always)]
    fn cvtt_f32_i32(a: float32x4_t) -> int32x4_t {
        unsafe { vcvtq_s32_f32(a) }
    }

    #[inline(always)]
    fn bits_f32_i32(a: float32x4_t) -> int32x4_t {
        unsafe { vreinterpretq_s32_f32(a) }
    }

    #[inline(always)]
    fn bits_i32_f32(a: int32x4_t) -> float32x4_t {
        unsafe { vreinterpretq_f32_s32(a) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lanes(v: float32x4_t) -> [f32; 4] {
        let mut out = [0.0_f32; 4];
        unsafe { Neon::storeu_f32(out.as_mut_ptr(), v) };
        out
    }

    #[test]
    fn test_set_f32_lane_order() {
        let v = Neon::set_f32(1.0, 2.0, 3.0, 4.0);
        assert_eq!(lanes(v), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Neon::first_f32(v), 1.0);
    }

    #[test]
    fn test_float_logic_matches_scalar_bits() {
        let a = Neon::set_f32(1.5, -2.0, f32::INFINITY, 0.0);
        let b = Neon::set_f32(-0.0, 3.25, 7.0, f32::MIN_POSITIVE);
        let and = lanes(Neon::and_f32(a, b));
        let andnot = lanes(Neon::andnot_f32(a, b));
        let xa = lanes(a);
        let xb = lanes(b);
        for i in 0..4 {
            assert_eq!(and[i].to_bits(), xa[i].to_bits() & xb[i].to_bits());
            assert_eq!(andnot[i].to_bits(), !xa[i].to_bits() & xb[i].to_bits());
        }
    }

    #[test]
    fn test_refined_estimates() {
        for x in [0.25_f32, 1.0, 2.0, 3.0, 4.0, 10.0, 1234.5, 1e-3] {
            let r = Neon::first_f32(Neon::recip_f32(Neon::splat_f32(x)));
            let rel = (r - 1.0 / x).abs() * x;
            assert!(rel < 1e-4, "recip x={}: rel={}", x, rel);

            let s = Neon::first_f32(Neon::rsqrt_f32(Neon::splat_f32(x)));
            let exact = 1.0 / x.sqrt();
            let rel = (s - exact).abs() / exact;
            assert!(rel < 1e-5, "rsqrt x={}: rel={}", x, rel);
        }
    }

    #[test]
    fn test_cvt_saturates_out_of_range() {
        let v = Neon::cvtt_f32_i32(Neon::splat_f32(3.0e9));
        assert_eq!(Neon::first_i32(v), i32::MAX);
    }
}
