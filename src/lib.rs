//! Dependency-free, `no_std` constant-time primitives for building side-channel-resistant code.
//!
//! This crate is a toolbox, not a cryptographic algorithm: it has no notion of keys, ciphers, or
//! protocols. What it provides is the small set of building blocks correct constant-time code is
//! built out of: mask algebra, branchless selection, oblivious memory and table access,
//! carry-propagating arithmetic, and the hardening glue (secure wipe, speculation fences, error
//! accumulation) that keeps all of the above from being undone by the optimizer or the CPU's own
//! speculative execution.
//!
//! # Layers
//!
//! - [`mask`]: mask algebra (L0): `mask_from_bit`, `mask_is_zero`, `mask_eq`, `mask_lt`.
//! - [`select`]: selectors and conditional word ops (L1): `select`, `cswap`, `zero_when`.
//! - [`memory`]: oblivious byte/word memory (L2): `memxor`, `memcpy_when`, reductions.
//! - [`scan`]: constant-time scans (L3): `mem_eq`, `mem_cmp`, `zeropad_data_len`, PKCS#7 unpad.
//! - [`lookup`]: oblivious table lookup/store (L4).
//! - [`arith`]: constant-time arithmetic (L5): `adc`/`sbc`, bit-serial division, sorting.
//! - [`harden`]: hardening glue (L6): secure wipe, speculation fence, error accumulation.
//! - [`simd`]: optional SIMD-accelerated bulk ops (L7), back-end chosen at compile time.
//! - [`endian`]: endianness and bit utilities (L8).
//!
//! # Guarantees and non-goals
//!
//! Every primitive above is data-oblivious: its control flow and memory access pattern do not
//! depend on secret inputs, only on publicly-known lengths. That claim holds against a timing-only
//! adversary; it says nothing about an attacker who can run code on the same core (cross-VM cache
//! attacks, hyperthreading) or fault the machine. This crate does not implement or wrap any
//! cryptographic algorithm, and it deliberately does not ship a statistical timing harness
//! (`dudect`-style) or microbenchmark suite. Those are external tools this crate's primitives are
//! built to satisfy, not build-time dependencies of it.
//!
//! # Examples
//!
//! ```
//! use flatline::scan::mem_eq;
//!
//! assert!(mem_eq(b"secret", b"secret"));
//! assert!(!mem_eq(b"secret", b"public"));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod arith;
pub mod dit;
pub mod endian;
pub mod harden;
mod hide;
pub mod lookup;
pub mod mask;
pub mod memory;
pub mod scan;
pub mod select;
pub mod simd;

pub use arith::{
    adc_u32, adc_u64, adc_when_u32, adc_when_u64, add_when_u32, add_when_u64, clamp_u32,
    clamp_u64, clamp_usize, div_mod_ct_u32, div_mod_ct_u64, max_u32, max_u64, max_usize, min_u32,
    min_u64, min_usize, sbc_u32, sbc_u64, sbc_when_u32, sbc_when_u64, sort2_u32, sort4_u32,
};
pub use endian::{
    bswap32, bswap64, load_be16, load_be32, load_be64, load_le16, load_le32, load_le64, rol32,
    rol64, ror32, ror64, store_be16, store_be32, store_be64, store_le16, store_le32, store_le64,
};
pub use harden::{
    commit_if_ok, explicit_bzero, index_clamp, masked_load_u8, memwipe_when, spec_fence, ErrAcc,
};
pub use lookup::{
    lookup_u16, lookup_u32, lookup_u64, lookup_u8, select_block, store_at_u16, store_at_u32,
    store_at_u64, store_at_u8, table_apply_u8,
};
pub use scan::{mem_cmp, mem_eq, memeq_mask, pkcs7_unpad_ct, zeropad_data_len, Pkcs7Unpad};
