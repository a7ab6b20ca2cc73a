//! AVX2-accelerated L7 bulk ops, 256-bit lanes.
//!
//! Unrolled 2 lanes at a time, with a same-width tail loop for the remainder that doesn't fill a
//! pair, then a scalar tail via [`portable`] for whatever doesn't fill even one lane.

use core::mem::size_of;
use core::sync::atomic::{compiler_fence, Ordering};

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::portable;

const LANES: usize = size_of::<__m256i>();

#[inline(always)]
fn loadu(src: &[u8]) -> __m256i {
    debug_assert_eq!(src.len(), LANES);
    // SAFETY: this module is compiled only when AVX2 is available; `src` has at least `LANES` bytes.
    unsafe { _mm256_loadu_si256(src.as_ptr().cast()) }
}

#[inline(always)]
fn storeu(dst: &mut [u8], v: __m256i) {
    debug_assert_eq!(dst.len(), LANES);
    // SAFETY: this module is compiled only when AVX2 is available; `dst` has at least `LANES` bytes.
    unsafe { _mm256_storeu_si256(dst.as_mut_ptr().cast(), v) }
}

#[inline]
pub fn memxor_auto(dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len());
    let mut i = 0;
    while i + 2 * LANES <= dst.len() {
        let d0 = loadu(&dst[i..i + LANES]);
        let s0 = loadu(&src[i..i + LANES]);
        let d1 = loadu(&dst[i + LANES..i + 2 * LANES]);
        let s1 = loadu(&src[i + LANES..i + 2 * LANES]);
        // SAFETY: this module is compiled only when AVX2 is available.
        let (r0, r1) = unsafe { (_mm256_xor_si256(d0, s0), _mm256_xor_si256(d1, s1)) };
        storeu(&mut dst[i..i + LANES], r0);
        storeu(&mut dst[i + LANES..i + 2 * LANES], r1);
        i += 2 * LANES;
    }
    while i + LANES <= dst.len() {
        let d = loadu(&dst[i..i + LANES]);
        let s = loadu(&src[i..i + LANES]);
        // SAFETY: this module is compiled only when AVX2 is available.
        let r = unsafe { _mm256_xor_si256(d, s) };
        storeu(&mut dst[i..i + LANES], r);
        i += LANES;
    }
    portable::memxor_auto(&mut dst[i..], &src[i..]);
    compiler_fence(Ordering::SeqCst);
}

#[inline]
pub fn memcpy_when_auto(cond: u32, dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len());
    let mask_byte = 0u8.wrapping_sub((cond & 1) as u8) as i8;
    // SAFETY: this module is compiled only when AVX2 is available.
    let vmask = unsafe { _mm256_set1_epi8(mask_byte) };
    let mut i = 0;
    while i + 2 * LANES <= dst.len() {
        let d0 = loadu(&dst[i..i + LANES]);
        let s0 = loadu(&src[i..i + LANES]);
        let d1 = loadu(&dst[i + LANES..i + 2 * LANES]);
        let s1 = loadu(&src[i + LANES..i + 2 * LANES]);
        // SAFETY: this module is compiled only when AVX2 is available.
        let (r0, r1) = unsafe {
            (
                _mm256_or_si256(_mm256_and_si256(s0, vmask), _mm256_andnot_si256(vmask, d0)),
                _mm256_or_si256(_mm256_and_si256(s1, vmask), _mm256_andnot_si256(vmask, d1)),
            )
        };
        storeu(&mut dst[i..i + LANES], r0);
        storeu(&mut dst[i + LANES..i + 2 * LANES], r1);
        i += 2 * LANES;
    }
    while i + LANES <= dst.len() {
        let d = loadu(&dst[i..i + LANES]);
        let s = loadu(&src[i..i + LANES]);
        // SAFETY: this module is compiled only when AVX2 is available.
        let r = unsafe {
            _mm256_or_si256(_mm256_and_si256(s, vmask), _mm256_andnot_si256(vmask, d))
        };
        storeu(&mut dst[i..i + LANES], r);
        i += LANES;
    }
    portable::memcpy_when_auto(cond, &mut dst[i..], &src[i..]);
    compiler_fence(Ordering::SeqCst);
}

#[inline]
pub fn memswap_when_auto(cond: u32, a: &mut [u8], b: &mut [u8]) {
    assert_eq!(a.len(), b.len());
    let mask_byte = 0u8.wrapping_sub((cond & 1) as u8) as i8;
    // SAFETY: this module is compiled only when AVX2 is available.
    let vmask = unsafe { _mm256_set1_epi8(mask_byte) };
    let mut i = 0;
    while i + 2 * LANES <= a.len() {
        let va0 = loadu(&a[i..i + LANES]);
        let vb0 = loadu(&b[i..i + LANES]);
        let va1 = loadu(&a[i + LANES..i + 2 * LANES]);
        let vb1 = loadu(&b[i + LANES..i + 2 * LANES]);
        // SAFETY: this module is compiled only when AVX2 is available.
        let (t0, t1) = unsafe {
            (
                _mm256_and_si256(_mm256_xor_si256(va0, vb0), vmask),
                _mm256_and_si256(_mm256_xor_si256(va1, vb1), vmask),
            )
        };
        // SAFETY: this module is compiled only when AVX2 is available.
        let (ra0, rb0, ra1, rb1) = unsafe {
            (
                _mm256_xor_si256(va0, t0),
                _mm256_xor_si256(vb0, t0),
                _mm256_xor_si256(va1, t1),
                _mm256_xor_si256(vb1, t1),
            )
        };
        storeu(&mut a[i..i + LANES], ra0);
        storeu(&mut b[i..i + LANES], rb0);
        storeu(&mut a[i + LANES..i + 2 * LANES], ra1);
        storeu(&mut b[i + LANES..i + 2 * LANES], rb1);
        i += 2 * LANES;
    }
    while i + LANES <= a.len() {
        let va = loadu(&a[i..i + LANES]);
        let vb = loadu(&b[i..i + LANES]);
        // SAFETY: this module is compiled only when AVX2 is available.
        let t = unsafe { _mm256_and_si256(_mm256_xor_si256(va, vb), vmask) };
        // SAFETY: this module is compiled only when AVX2 is available.
        let (ra, rb) = unsafe { (_mm256_xor_si256(va, t), _mm256_xor_si256(vb, t)) };
        storeu(&mut a[i..i + LANES], ra);
        storeu(&mut b[i..i + LANES], rb);
        i += LANES;
    }
    portable::memswap_when_auto(cond, &mut a[i..], &mut b[i..]);
    compiler_fence(Ordering::SeqCst);
}
