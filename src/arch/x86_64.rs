//! x86_64 backend using SSE and SSE2.
//!
//! Both are part of the x86_64 baseline, so every intrinsic here is always
//! available and no runtime detection is needed.
//!
//! # Accuracy
//!
//! | Operation | Instruction | Refinement | Max relative error |
//! |-----------|-------------|------------|--------------------|
//! | recip | `rcpps` | none | 1.5 * 2^-12 (~3.7e-4) |
//! | rsqrt | `rsqrtps` | none | 1.5 * 2^-12 (~3.7e-4) |
//! | sqrt | `sqrtps` | n/a | correctly rounded |
//!
//! Float logic (`andps`, `andnps`, ...) is native, so no bit reinterpretation
//! is involved.

// Newer toolchains treat baseline-feature intrinsics as safe to call.
#![allow(unused_unsafe)]

use std::arch::x86_64::{
    __m128, __m128i, _mm_add_epi32, _mm_add_ps, _mm_and_ps, _mm_and_si128, _mm_andnot_ps,
    _mm_andnot_si128, _mm_castps_si128, _mm_castsi128_ps, _mm_cmpgt_epi32, _mm_cmpgt_ps,
    _mm_cmplt_epi32, _mm_cmplt_ps, _mm_cvtepi32_ps, _mm_cvtsi128_si32, _mm_cvtss_f32,
    _mm_cvttps_epi32, _mm_load_ps, _mm_load_si128, _mm_loadu_ps, _mm_loadu_si128, _mm_max_ps,
    _mm_min_ps, _mm_mul_ps, _mm_or_ps, _mm_or_si128, _mm_rcp_ps, _mm_rsqrt_ps, _mm_set1_epi32,
    _mm_set1_ps, _mm_setr_epi32, _mm_setr_ps, _mm_sqrt_ps, _mm_store_ps, _mm_store_si128,
    _mm_store_ss, _mm_storeu_ps, _mm_storeu_si128, _mm_sub_epi32, _mm_sub_ps, _mm_xor_ps,
    _mm_xor_si128,
};

use super::{sealed::Sealed, Backend};

/// SSE/SSE2 realization of [`Backend`].
#[derive(Debug, Clone, Copy)]
pub enum Sse {}

impl Sealed for Sse {}

impl Backend for Sse {
    type F32 = __m128;
    type I32 = __m128i;

    const NAME: &'static str = "sse2";
    const RECIP_REFINEMENT_STEPS: u32 = 0;
    const RSQRT_REFINEMENT_STEPS: u32 = 0;
    const DISTINCT_UNALIGNED_ACCESS: bool = true;

    #[inline(always)]
    fn splat_f32(x: f32) -> __m128 {
        // SAFETY: SSE is baseline on x86_64.
        unsafe { _mm_set1_ps(x) }
    }

    #[inline(always)]
    fn splat_i32(x: i32) -> __m128i {
        // SAFETY: SSE2 is baseline on x86_64.
        unsafe { _mm_set1_epi32(x) }
    }

    #[inline(always)]
    fn set_f32(a: f32, b: f32, c: f32, d: f32) -> __m128 {
        // `setr` takes lane 0 first; `_mm_set_ps` would reverse the order.
        unsafe { _mm_setr_ps(a, b, c, d) }
    }

    #[inline(always)]
    fn set_i32(a: i32, b: i32, c: i32, d: i32) -> __m128i {
        unsafe { _mm_setr_epi32(a, b, c, d) }
    }

    #[inline(always)]
    fn first_f32(v: __m128) -> f32 {
        unsafe { _mm_cvtss_f32(v) }
    }

    #[inline(always)]
    fn first_i32(v: __m128i) -> i32 {
        unsafe { _mm_cvtsi128_si32(v) }
    }

    #[inline(always)]
    unsafe fn load_f32(p: *const f32) -> __m128 {
        debug_assert_eq!(p as usize % 16, 0, "load_f32: misaligned pointer");
        _mm_load_ps(p)
    }

    #[inline(always)]
    unsafe fn loadu_f32(p: *const f32) -> __m128 {
        _mm_loadu_ps(p)
    }

    #[inline(always)]
    unsafe fn store_f32(p: *mut f32, v: __m128) {
        debug_assert_eq!(p as usize % 16, 0, "store_f32: misaligned pointer");
        _mm_store_ps(p, v)
    }

    #[inline(always)]
    unsafe fn storeu_f32(p: *mut f32, v: __m128) {
        _mm_storeu_ps(p, v)
    }

    #[inline(always)]
    unsafe fn store_lane0_f32(p: *mut f32, v: __m128) {
        _mm_store_ss(p, v)
    }

    #[inline(always)]
    unsafe fn load_i32(p: *const i32) -> __m128i {
        debug_assert_eq!(p as usize % 16, 0, "load_i32: misaligned pointer");
        _mm_load_si128(p.cast::<__m128i>())
    }

    #[inline(always)]
    unsafe fn loadu_i32(p: *const i32) -> __m128i {
        _mm_loadu_si128(p.cast::<__m128i>())
    }

    #[inline(always)]
    unsafe fn store_i32(p: *mut i32, v: __m128i) {
        debug_assert_eq!(p as usize % 16, 0, "store_i32: misaligned pointer");
        _mm_store_si128(p.cast::<__m128i>(), v)
    }

    #[inline(always)]
    unsafe fn storeu_i32(p: *mut i32, v: __m128i) {
        _mm_storeu_si128(p.cast::<__m128i>(), v)
    }

    #[inline(always)]
    fn add_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_add_ps(a, b) }
    }

    #[inline(always)]
    fn sub_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_sub_ps(a, b) }
    }

    #[inline(always)]
    fn mul_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_mul_ps(a, b) }
    }

    #[inline(always)]
    fn min_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_min_ps(a, b) }
    }

    #[inline(always)]
    fn max_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_max_ps(a, b) }
    }

    #[inline(always)]
    fn recip_f32(a: __m128) -> __m128 {
        unsafe { _mm_rcp_ps(a) }
    }

    #[inline(always)]
    fn rsqrt_f32(a: __m128) -> __m128 {
        unsafe { _mm_rsqrt_ps(a) }
    }

    #[inline(always)]
    fn sqrt_f32(a: __m128) -> __m128 {
        unsafe { _mm_sqrt_ps(a) }
    }

    #[inline(always)]
    fn add_i32(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_add_epi32(a, b) }
    }

    #[inline(always)]
    fn sub_i32(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_sub_epi32(a, b) }
    }

    #[inline(always)]
    fn and_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_and_ps(a, b) }
    }

    #[inline(always)]
    fn or_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_or_ps(a, b) }
    }

    #[inline(always)]
    fn xor_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_xor_ps(a, b) }
    }

    #[inline(always)]
    fn andnot_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_andnot_ps(a, b) }
    }

    #[inline(always)]
    fn and_i32(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_and_si128(a, b) }
    }

    #[inline(always)]
    fn or_i32(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_or_si128(a, b) }
    }

    #[inline(always)]
    fn xor_i32(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_xor_si128(a, b) }
    }

    #[inline(always)]
    fn andnot_i32(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_andnot_si128(a, b) }
    }

    #[inline(always)]
    fn cmpgt_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmpgt_ps(a, b) }
    }

    #[inline(always)]
    fn cmplt_f32(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmplt_ps(a, b) }
    }

    #[inline(always)]
    fn cmpgt_i32(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_cmpgt_epi32(a, b) }
    }

    #[inline(always)]
    fn cmplt_i32(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_cmplt_epi32(a, b) }
    }

    #[inline(always)]
    fn cvt_i32_f32(a: __m128i) -> __m128 {
        unsafe { _mm_cvtepi32_ps(a) }
    }

    #[inline(always)]
    fn cvtt_f32_i32(a: __m128) -> __m128i {
        // Out-of-range lanes become 0x8000_0000 (the "integer indefinite").
        unsafe { _mm_cvttps_epi32(a) }
    }

    #[inline(always)]
    fn bits_f32_i32(a: __m128) -> __m128i {
        unsafe { _mm_castps_si128(a) }
    }

    #[inline(always)]
    fn bits_i32_f32(a: __m128i) -> __m128 {
        unsafe { _mm_castsi128_ps(a) }
    }
}
