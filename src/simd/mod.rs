//! L7: SIMD-accelerated bulk ops, selected at compile time.
//!
//! `memxor_auto`/`memcpy_when_auto`/`memswap_when_auto` are drop-in accelerated versions of
//! [`crate::memory::mem8`]'s equivalents. Same signatures, same results, just faster on a build
//! compiled for a CPU wide enough to use them. The back-end is chosen at compile time: there is
//! no runtime CPU-feature probe here, because a binary built with `--features avx2` (or compiled
//! with the matching `-C target-feature`) is assumed to be deployed to hardware that has it.
//! Builds without a matching feature and target support fall back to the portable scalar path,
//! which is bit-for-bit identical to [`crate::memory::mem8`].

mod portable;

#[cfg(all(
    feature = "avx2",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "avx2"
))]
mod avx2;

#[cfg(all(
    feature = "sse2",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2",
    not(all(feature = "avx2", target_feature = "avx2"))
))]
mod sse2;

#[cfg(all(
    feature = "neon",
    target_arch = "aarch64",
    target_feature = "neon"
))]
mod neon;

#[cfg(all(
    feature = "avx2",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "avx2"
))]
pub use avx2::{memcpy_when_auto, memswap_when_auto, memxor_auto};

#[cfg(all(
    feature = "sse2",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2",
    not(all(feature = "avx2", target_feature = "avx2"))
))]
pub use sse2::{memcpy_when_auto, memswap_when_auto, memxor_auto};

#[cfg(all(
    feature = "neon",
    target_arch = "aarch64",
    target_feature = "neon"
))]
pub use neon::{memcpy_when_auto, memswap_when_auto, memxor_auto};

#[cfg(not(any(
    all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2"),
    all(feature = "sse2", any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"),
    all(feature = "neon", target_arch = "aarch64", target_feature = "neon"),
)))]
pub use portable::{memcpy_when_auto, memswap_when_auto, memxor_auto};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::mem8;

    #[test]
    fn memxor_auto_matches_scalar() {
        let mut state = 7u64;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        for len in [0usize, 1, 2, 15, 16, 17, 31, 32, 33, 63, 64, 65, 200] {
            let a: Vec<u8> = (0..len).map(|_| next() as u8).collect();
            let b: Vec<u8> = (0..len).map(|_| next() as u8).collect();

            let mut fast = a.clone();
            memxor_auto(&mut fast, &b);

            let mut scalar = a.clone();
            mem8::memxor(&mut scalar, &b);

            assert_eq!(fast, scalar, "len={len}");
        }
    }

    #[test]
    fn memcpy_when_auto_matches_scalar() {
        let a = vec![1u8; 77];
        let b: Vec<u8> = (0..77).map(|i| i as u8).collect();
        for cond in [0u32, 1] {
            let mut fast = a.clone();
            memcpy_when_auto(cond, &mut fast, &b);

            let mut scalar = a.clone();
            mem8::memcpy_when(cond, &mut scalar, &b);

            assert_eq!(fast, scalar, "cond={cond}");
        }
    }

    #[test]
    fn memswap_when_auto_matches_scalar() {
        let a0 = vec![5u8; 50];
        let b0: Vec<u8> = (0..50).map(|i| (i * 3) as u8).collect();
        for cond in [0u32, 1] {
            let (mut fa, mut fb) = (a0.clone(), b0.clone());
            memswap_when_auto(cond, &mut fa, &mut fb);

            let (mut sa, mut sb) = (a0.clone(), b0.clone());
            mem8::memswap_when(cond, &mut sa, &mut sb);

            assert_eq!((fa, fb), (sa, sb), "cond={cond}");
        }
    }
}
