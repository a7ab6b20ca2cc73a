//! L4: oblivious table lookup and store.
//!
//! `lookup_*` and `store_at_*` touch every element of the table on every call. The index is
//! secret, so the *access pattern* must not depend on it, even though the final answer does.
//! This is the direct countermeasure to table-driven cache-timing attacks (classic AES T-table
//! leakage): there is no indexing expression anywhere below that takes a secret operand.

use core::sync::atomic::{compiler_fence, Ordering};

use crate::mask::masksz;
use crate::select::{select16, select32, select64, select8};

macro_rules! lookup_ops {
    ($lookup:ident, $store_at:ident, $select_mod:ident, $ty:ty) => {
        /// Returns `table[index]` without branching or addressing on `index`.
        ///
        /// Scans the whole table; each element is folded in via `select` keyed on whether the
        /// running position equals `index`, so every element of `table` is read exactly once
        /// regardless of where `index` points.
        #[must_use]
        #[inline]
        pub fn $lookup(table: &[$ty], index: usize) -> $ty {
            let mut acc: $ty = 0;
            for (i, &item) in table.iter().enumerate() {
                let hit = (masksz::mask_eq(i, index) & 1) as u32;
                acc = $select_mod::select(hit, item, acc);
            }
            compiler_fence(Ordering::SeqCst);
            acc
        }

        /// Writes `value` into `table[index]`, touching every slot of `table` on every call.
        #[inline]
        pub fn $store_at(table: &mut [$ty], index: usize, value: $ty) {
            for (i, slot) in table.iter_mut().enumerate() {
                let hit = (masksz::mask_eq(i, index) & 1) as u32;
                *slot = $select_mod::select(hit, value, *slot);
            }
            compiler_fence(Ordering::SeqCst);
        }
    };
}

lookup_ops!(lookup_u8, store_at_u8, select8, u8);
lookup_ops!(lookup_u16, store_at_u16, select16, u16);
lookup_ops!(lookup_u32, store_at_u32, select32, u32);
lookup_ops!(lookup_u64, store_at_u64, select64, u64);

/// Substitution-box application: `out[i] = table[input[i]]` for every `i`, each lookup a full
/// oblivious scan of `table`. Panics if `out.len() != input.len()`.
///
/// This is the oblivious-lookup analogue of an AES S-box substitution layer: `input` holds
/// secret bytes, `table` is the (public) substitution table, and the whole point is that looking
/// up 257 different secret bytes against a 256-entry table takes the same memory access pattern
/// every time.
#[inline]
pub fn table_apply_u8(out: &mut [u8], input: &[u8], table: &[u8]) {
    assert_eq!(out.len(), input.len());
    for (o, &b) in out.iter_mut().zip(input.iter()) {
        *o = lookup_u8(table, usize::from(b));
    }
    compiler_fence(Ordering::SeqCst);
}

/// Selects one fixed-size block out of `blocks` by index, writing the result into `out`.
///
/// Every block is XORed into `out` under its own `hit` mask, so the whole table is read
/// regardless of which block `index` names. `out` must be the same length as each block in
/// `blocks`; panics otherwise.
#[inline]
pub fn select_block(blocks: &[&[u8]], index: usize, out: &mut [u8]) {
    out.fill(0);
    for (i, block) in blocks.iter().enumerate() {
        assert_eq!(block.len(), out.len());
        let hit = (masksz::mask_eq(i, index) & 1) as u32;
        let m = crate::mask::mask8::mask_from_bit(hit);
        for (o, &b) in out.iter_mut().zip(block.iter()) {
            *o |= b & m;
        }
    }
    compiler_fence(Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_every_index() {
        let table: Vec<u32> = (0..16).map(|i| i * i).collect();
        for i in 0..table.len() {
            assert_eq!(lookup_u32(&table, i), table[i]);
        }
    }

    #[test]
    fn lookup_out_of_range_returns_zero() {
        let table = [1u32, 2, 3, 4];
        assert_eq!(lookup_u32(&table, 99), 0);
    }

    #[test]
    fn store_at_writes_single_slot() {
        let mut table = [0u8; 8];
        store_at_u8(&mut table, 3, 0xAB);
        assert_eq!(table, [0, 0, 0, 0xAB, 0, 0, 0, 0]);
        store_at_u8(&mut table, 3, 0x00);
        assert_eq!(table, [0u8; 8]);
    }

    #[test]
    fn table_apply_matches_elementwise_lookup() {
        let sbox: Vec<u8> = (0..256).map(|i| ((i * 29 + 7) & 0xFF) as u8).collect();
        let input: Vec<u8> = (0..=255u16).map(|i| i as u8).chain([0, 42]).collect();
        let mut out = vec![0u8; input.len()];
        table_apply_u8(&mut out, &input, &sbox);
        for (i, &b) in input.iter().enumerate() {
            assert_eq!(out[i], sbox[usize::from(b)]);
        }
    }

    #[test]
    fn select_block_picks_correct_block() {
        let b0 = [1u8, 2, 3];
        let b1 = [4u8, 5, 6];
        let b2 = [7u8, 8, 9];
        let blocks: [&[u8]; 3] = [&b0, &b1, &b2];
        let mut out = [0u8; 3];
        select_block(&blocks, 1, &mut out);
        assert_eq!(out, b1);
        select_block(&blocks, 2, &mut out);
        assert_eq!(out, b2);
    }
}
