//! SIMD Correctness Tests: Differential Testing Approach
//!
//! Strategy: Model each lane operation in pure scalar Rust, then verify the
//! active backend matches on a deterministic spread of inputs.
//!
//! Exact operations must agree bit for bit. Approximate ones (`recip`,
//! `rsqrt`) must stay inside `APPROX_REL_ERROR`.

#![allow(clippy::float_cmp)]

use quadlane::{add3, add4, select, F32x4, I32x4, APPROX_REL_ERROR};

// =============================================================================
// Reference Implementations (Pure Scalar)
// =============================================================================

fn ref_map2(a: [f32; 4], b: [f32; 4], f: impl Fn(f32, f32) -> f32) -> [f32; 4] {
    [f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3])]
}

fn ref_bits2(a: [f32; 4], b: [f32; 4], f: impl Fn(u32, u32) -> u32) -> [u32; 4] {
    let mut out = [0u32; 4];
    for i in 0..4 {
        out[i] = f(a[i].to_bits(), b[i].to_bits());
    }
    out
}

fn ref_mask(a: [f32; 4], b: [f32; 4], f: impl Fn(f32, f32) -> bool) -> [u32; 4] {
    let mut out = [0u32; 4];
    for i in 0..4 {
        out[i] = if f(a[i], b[i]) { u32::MAX } else { 0 };
    }
    out
}

fn bits(v: [f32; 4]) -> [u32; 4] {
    v.map(f32::to_bits)
}

// =============================================================================
// Test Helpers
// =============================================================================

/// Generate deterministic test lanes
fn test_lanes(seed: u64) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (i, lane) in out.iter_mut().enumerate() {
        let x = (seed.wrapping_mul(31).wrapping_add(i as u64 * 17)) as f32;
        *lane = (x * 0.37).sin() * 1000.0;
    }
    out
}

fn test_ints(seed: u64) -> [i32; 4] {
    let mut out = [0i32; 4];
    for (i, lane) in out.iter_mut().enumerate() {
        let x = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(i as u64 * 1442695040888963407);
        *lane = (x >> 32) as i32;
    }
    out
}

fn rel_err(got: f32, want: f32) -> f32 {
    ((got - want) / want).abs()
}

// =============================================================================
// Differential Tests
// =============================================================================

#[test]
fn simd_correctness_arithmetic() {
    for seed in 0..200 {
        let a = test_lanes(seed);
        let b = test_lanes(seed + 1000);
        let (va, vb) = (F32x4::from(a), F32x4::from(b));

        assert_eq!(bits((va + vb).to_array()), bits(ref_map2(a, b, |x, y| x + y)));
        assert_eq!(bits((va - vb).to_array()), bits(ref_map2(a, b, |x, y| x - y)));
        assert_eq!(bits((va * vb).to_array()), bits(ref_map2(a, b, |x, y| x * y)));
        assert_eq!(bits((va * 0.5).to_array()), bits(a.map(|x| x * 0.5)));
        assert_eq!(bits((3.0 * vb).to_array()), bits(b.map(|x| 3.0 * x)));
    }
}

#[test]
fn simd_correctness_min_max() {
    for seed in 0..200 {
        let a = test_lanes(seed);
        let b = test_lanes(seed + 7);
        let (va, vb) = (F32x4::from(a), F32x4::from(b));
        assert_eq!(va.min(vb).to_array(), ref_map2(a, b, f32::min));
        assert_eq!(va.max(vb).to_array(), ref_map2(a, b, f32::max));
    }
}

#[test]
fn simd_correctness_multi_operand_add() {
    for seed in 0..100 {
        let a = test_lanes(seed);
        let b = test_lanes(seed + 1);
        let c = test_lanes(seed + 2);
        let d = test_lanes(seed + 3);
        let want3 = ref_map2(ref_map2(a, b, |x, y| x + y), c, |x, y| x + y);
        let want4 = ref_map2(want3, d, |x, y| x + y);

        let got3 = add3(a.into(), b.into(), c.into());
        let got4 = add4(a.into(), b.into(), c.into(), d.into());
        assert_eq!(bits(got3.to_array()), bits(want3), "add3 seed={}", seed);
        assert_eq!(bits(got4.to_array()), bits(want4), "add4 seed={}", seed);
    }
}

#[test]
fn simd_correctness_sqrt() {
    for seed in 0..200 {
        let a = test_lanes(seed).map(f32::abs);
        let got = F32x4::from(a).sqrt().to_array();
        assert_eq!(bits(got), bits(a.map(f32::sqrt)), "seed={}", seed);
    }
}

#[test]
fn simd_correctness_approximations() {
    for seed in 0..200 {
        let a = test_lanes(seed).map(|x| x.abs() + 1e-3);
        let recip = F32x4::from(a).recip().to_array();
        let rsqrt = F32x4::from(a).rsqrt().to_array();
        for i in 0..4 {
            assert!(
                rel_err(recip[i], 1.0 / a[i]) < APPROX_REL_ERROR,
                "recip x={}: got={}",
                a[i],
                recip[i]
            );
            assert!(
                rel_err(rsqrt[i], 1.0 / a[i].sqrt()) < APPROX_REL_ERROR,
                "rsqrt x={}: got={}",
                a[i],
                rsqrt[i]
            );
        }
    }
}

#[test]
fn simd_correctness_float_logic() {
    for seed in 0..200 {
        let a = test_lanes(seed);
        let b = test_lanes(seed + 500);
        let (va, vb) = (F32x4::from(a), F32x4::from(b));

        assert_eq!((va & vb).to_bits(), ref_bits2(a, b, |x, y| x & y));
        assert_eq!((va | vb).to_bits(), ref_bits2(a, b, |x, y| x | y));
        assert_eq!((va ^ vb).to_bits(), ref_bits2(a, b, |x, y| x ^ y));
        assert_eq!(va.and_not(vb).to_bits(), ref_bits2(a, b, |x, y| !x & y));
    }
}

#[test]
fn simd_correctness_int_ops() {
    for seed in 0..200 {
        let a = test_ints(seed);
        let b = test_ints(seed + 99);
        let (va, vb) = (I32x4::from(a), I32x4::from(b));

        let zip = |f: fn(i32, i32) -> i32| [f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3])];
        assert_eq!((va + vb).to_array(), zip(i32::wrapping_add));
        assert_eq!((va - vb).to_array(), zip(i32::wrapping_sub));
        assert_eq!((va & vb).to_array(), zip(|x, y| x & y));
        assert_eq!((va | vb).to_array(), zip(|x, y| x | y));
        assert_eq!((va ^ vb).to_array(), zip(|x, y| x ^ y));
        assert_eq!(va.and_not(vb).to_array(), zip(|x, y| !x & y));
        assert_eq!(va.cmp_gt(vb).to_array(), zip(|x, y| if x > y { -1 } else { 0 }));
        assert_eq!(va.cmp_lt(vb).to_array(), zip(|x, y| if x < y { -1 } else { 0 }));
    }
}

#[test]
fn simd_correctness_float_compare() {
    for seed in 0..200 {
        let a = test_lanes(seed);
        let mut b = test_lanes(seed + 3);
        // Force some equal lanes so the strict comparisons get exercised.
        b[seed as usize % 4] = a[seed as usize % 4];
        let (va, vb) = (F32x4::from(a), F32x4::from(b));

        assert_eq!(va.cmp_gt(vb).to_bits(), ref_mask(a, b, |x, y| x > y));
        assert_eq!(va.cmp_lt(vb).to_bits(), ref_mask(a, b, |x, y| x < y));
    }
}

#[test]
fn simd_correctness_select_matches_max() {
    for seed in 0..200 {
        let a = F32x4::from(test_lanes(seed));
        let b = F32x4::from(test_lanes(seed + 11));
        assert_eq!(select(a.cmp_gt(b), a, b).to_bits(), a.max(b).to_bits());
        assert_eq!(select(a.cmp_lt(b), a, b).to_bits(), a.min(b).to_bits());
    }
}

#[test]
fn simd_correctness_conversions() {
    for seed in 0..200 {
        let a = test_lanes(seed);
        assert_eq!(F32x4::from(a).to_int().to_array(), a.map(|x| x as i32));

        let i = test_ints(seed).map(|x| x >> 8); // |x| < 2^24
        assert_eq!(I32x4::from(i).to_float().to_array(), i.map(|x| x as f32));
        assert_eq!(I32x4::from(i).to_float().to_int().to_array(), i);
    }
}
