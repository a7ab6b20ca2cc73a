//! NEON-accelerated L7 bulk ops, 128-bit lanes.
//!
//! Unrolled 2 lanes at a time, with a same-width tail loop for the remainder that doesn't fill a
//! pair, then a scalar tail via [`portable`] for whatever doesn't fill even one lane.

use core::mem::size_of;
use core::sync::atomic::{compiler_fence, Ordering};

use core::arch::aarch64::*;

use super::portable;

const LANES: usize = size_of::<uint8x16_t>();

#[inline(always)]
fn load(src: &[u8]) -> uint8x16_t {
    debug_assert_eq!(src.len(), LANES);
    // SAFETY: this module is compiled only when NEON is available; `src` has at least `LANES` bytes.
    unsafe { vld1q_u8(src.as_ptr()) }
}

#[inline(always)]
fn store(dst: &mut [u8], v: uint8x16_t) {
    debug_assert_eq!(dst.len(), LANES);
    // SAFETY: this module is compiled only when NEON is available; `dst` has at least `LANES` bytes.
    unsafe { vst1q_u8(dst.as_mut_ptr(), v) }
}

#[inline]
pub fn memxor_auto(dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len());
    let mut i = 0;
    while i + 2 * LANES <= dst.len() {
        let d0 = load(&dst[i..i + LANES]);
        let s0 = load(&src[i..i + LANES]);
        let d1 = load(&dst[i + LANES..i + 2 * LANES]);
        let s1 = load(&src[i + LANES..i + 2 * LANES]);
        // SAFETY: this module is compiled only when NEON is available.
        let (r0, r1) = unsafe { (veorq_u8(d0, s0), veorq_u8(d1, s1)) };
        store(&mut dst[i..i + LANES], r0);
        store(&mut dst[i + LANES..i + 2 * LANES], r1);
        i += 2 * LANES;
    }
    while i + LANES <= dst.len() {
        let d = load(&dst[i..i + LANES]);
        let s = load(&src[i..i + LANES]);
        // SAFETY: this module is compiled only when NEON is available.
        let r = unsafe { veorq_u8(d, s) };
        store(&mut dst[i..i + LANES], r);
        i += LANES;
    }
    portable::memxor_auto(&mut dst[i..], &src[i..]);
    compiler_fence(Ordering::SeqCst);
}

#[inline]
pub fn memcpy_when_auto(cond: u32, dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len());
    let mask_byte = 0u8.wrapping_sub(cond & 1) as u8;
    // SAFETY: this module is compiled only when NEON is available.
    let vmask = unsafe { vdupq_n_u8(mask_byte) };
    let mut i = 0;
    while i + 2 * LANES <= dst.len() {
        let d0 = load(&dst[i..i + LANES]);
        let s0 = load(&src[i..i + LANES]);
        let d1 = load(&dst[i + LANES..i + 2 * LANES]);
        let s1 = load(&src[i + LANES..i + 2 * LANES]);
        // SAFETY: this module is compiled only when NEON is available.
        let (r0, r1) = unsafe {
            (
                vorrq_u8(vandq_u8(s0, vmask), vbicq_u8(d0, vmask)),
                vorrq_u8(vandq_u8(s1, vmask), vbicq_u8(d1, vmask)),
            )
        };
        store(&mut dst[i..i + LANES], r0);
        store(&mut dst[i + LANES..i + 2 * LANES], r1);
        i += 2 * LANES;
    }
    while i + LANES <= dst.len() {
        let d = load(&dst[i..i + LANES]);
        let s = load(&src[i..i + LANES]);
        // SAFETY: this module is compiled only when NEON is available.
        let r = unsafe { vorrq_u8(vandq_u8(s, vmask), vbicq_u8(d, vmask)) };
        store(&mut dst[i..i + LANES], r);
        i += LANES;
    }
    portable::memcpy_when_auto(cond, &mut dst[i..], &src[i..]);
    compiler_fence(Ordering::SeqCst);
}

#[inline]
pub fn memswap_when_auto(cond: u32, a: &mut [u8], b: &mut [u8]) {
    assert_eq!(a.len(), b.len());
    let mask_byte = 0u8.wrapping_sub(cond & 1) as u8;
    // SAFETY: this module is compiled only when NEON is available.
    let vmask = unsafe { vdupq_n_u8(mask_byte) };
    let mut i = 0;
    while i + 2 * LANES <= a.len() {
        let va0 = load(&a[i..i + LANES]);
        let vb0 = load(&b[i..i + LANES]);
        let va1 = load(&a[i + LANES..i + 2 * LANES]);
        let vb1 = load(&b[i + LANES..i + 2 * LANES]);
        // SAFETY: this module is compiled only when NEON is available.
        let (t0, t1) = unsafe {
            (
                vandq_u8(veorq_u8(va0, vb0), vmask),
                vandq_u8(veorq_u8(va1, vb1), vmask),
            )
        };
        // SAFETY: this module is compiled only when NEON is available.
        let (ra0, rb0, ra1, rb1) = unsafe {
            (
                veorq_u8(va0, t0),
                veorq_u8(vb0, t0),
                veorq_u8(va1, t1),
                veorq_u8(vb1, t1),
            )
        };
        store(&mut a[i..i + LANES], ra0);
        store(&mut b[i..i + LANES], rb0);
        store(&mut a[i + LANES..i + 2 * LANES], ra1);
        store(&mut b[i + LANES..i + 2 * LANES], rb1);
        i += 2 * LANES;
    }
    while i + LANES <= a.len() {
        let va = load(&a[i..i + LANES]);
        let vb = load(&b[i..i + LANES]);
        // SAFETY: this module is compiled only when NEON is available.
        let t = unsafe { vandq_u8(veorq_u8(va, vb), vmask) };
        // SAFETY: this module is compiled only when NEON is available.
        let (ra, rb) = unsafe { (veorq_u8(va, t), veorq_u8(vb, t)) };
        store(&mut a[i..i + LANES], ra);
        store(&mut b[i..i + LANES], rb);
        i += LANES;
    }
    portable::memswap_when_auto(cond, &mut a[i..], &mut b[i..]);
    compiler_fence(Ordering::SeqCst);
}
