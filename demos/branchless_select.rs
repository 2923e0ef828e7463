//! Branchless Select
//!
//! Comparison masks are all-ones or all-zeros per lane, so `and`, `and_not`
//! and `or` pick between two vectors without a branch:
//!
//! ```text
//! select(mask, a, b) = (mask & a) | (!mask & b)
//! ```
//!
//! ```bash
//! cargo run --example branchless_select --release
//! ```

use quadlane::{select, F32x4, BACKEND};

fn main() {
    println!("backend: {}", BACKEND);

    let a = F32x4::new(1.0, 2.0, 3.0, 4.0);
    let b = F32x4::new(4.0, 3.0, 2.0, 1.0);

    // Lanes where a > b are all-ones.
    let mask = a.cmp_gt(b);
    println!("a            = {:?}", a);
    println!("b            = {:?}", b);
    println!("a > b (bits) = {:08x?}", mask.to_bits());
    assert_eq!(mask.to_bits(), [0, 0, 0xFFFF_FFFF, 0xFFFF_FFFF]);

    // Built by hand from the three logic operations.
    let by_hand = mask.and(a).or(mask.and_not(b));
    println!("select       = {:?}", by_hand);
    assert_eq!(by_hand.to_array(), select(mask, a, b).to_array());
    assert_eq!(by_hand.to_array(), a.max(b).to_array());

    // Same idea for a ReLU: keep positive lanes, zero the rest.
    let x = F32x4::new(-1.5, 0.25, -0.0, 8.0);
    let relu = x.cmp_gt(F32x4::zero()).and(x);
    println!("relu({:?}) = {:?}", x, relu);
    assert_eq!(relu.to_array(), [0.0, 0.25, 0.0, 8.0]);

    // Approximate normalization; the estimate's accuracy depends on backend.
    let len2 = F32x4::new(4.0, 9.0, 16.0, 25.0);
    let inv = len2.rsqrt();
    println!("rsqrt({:?}) ~= {:?}", len2, inv);
}
