//! Hides values from the optimizer.
//!
//! Every layer above this one relies on `hide_*` to stop the compiler from reconstructing a
//! branch out of a branchless expression (constant folding a mask, or short-circuiting an
//! accumulator once it becomes all-ones or non-zero). The trick, taken from `constant_time_eq`,
//! is inline assembly that passes a value through unchanged: the `nomem`/`pure`/
//! `preserves_flags` options tell the optimizer the instruction has no observable effect, but
//! the optimizer still can't see *through* it, so it can't prove anything about the value on
//! the other side.

macro_rules! hide_fn {
    ($name:ident, $ty:ty, reg_byte) => {
        /// Hides a value from the optimizer.
        #[cfg(all(not(miri), any(target_arch = "x86", target_arch = "x86_64")))]
        #[must_use]
        #[inline(always)]
        pub(crate) fn $name(mut value: $ty) -> $ty {
            // SAFETY: the input value is passed unchanged to the output, the inline assembly does nothing.
            unsafe {
                core::arch::asm!("/* {0} */", inout(reg_byte) value, options(pure, nomem, nostack, preserves_flags));
            }
            value
        }

        /// Hides a value from the optimizer.
        #[cfg(all(
            not(miri),
            any(
                target_arch = "arm",
                target_arch = "aarch64",
                target_arch = "arm64ec",
                target_arch = "riscv32",
                target_arch = "riscv64",
                target_arch = "loongarch64",
                target_arch = "s390x",
            )
        ))]
        #[allow(asm_sub_register)]
        #[must_use]
        #[inline(always)]
        pub(crate) fn $name(mut value: $ty) -> $ty {
            // SAFETY: the input value is passed unchanged to the output, the inline assembly does nothing.
            unsafe {
                core::arch::asm!("/* {0} */", inout(reg) value, options(pure, nomem, nostack, preserves_flags));
            }
            value
        }

        /// Attempts to hide a value from the optimizer.
        #[cfg(any(
            miri,
            not(any(
                target_arch = "x86",
                target_arch = "x86_64",
                target_arch = "arm",
                target_arch = "aarch64",
                target_arch = "arm64ec",
                target_arch = "riscv32",
                target_arch = "riscv64",
                target_arch = "loongarch64",
                target_arch = "s390x",
            ))
        ))]
        #[must_use]
        #[inline(never)]
        pub(crate) fn $name(value: $ty) -> $ty {
            core::hint::black_box(value)
        }
    };
    ($name:ident, $ty:ty, reg) => {
        /// Hides a value from the optimizer.
        #[cfg(all(
            not(miri),
            any(
                target_arch = "x86",
                target_arch = "x86_64",
                target_arch = "arm",
                target_arch = "aarch64",
                target_arch = "arm64ec",
                target_arch = "riscv32",
                target_arch = "riscv64",
                target_arch = "loongarch64",
                target_arch = "s390x",
            )
        ))]
        #[must_use]
        #[inline(always)]
        pub(crate) fn $name(mut value: $ty) -> $ty {
            // SAFETY: the input value is passed unchanged to the output, the inline assembly does nothing.
            unsafe {
                core::arch::asm!("/* {0} */", inlateout(reg) value, options(pure, nomem, preserves_flags, nostack));
            }
            value
        }

        /// Attempts to hide a value from the optimizer.
        #[cfg(any(
            miri,
            not(any(
                target_arch = "x86",
                target_arch = "x86_64",
                target_arch = "arm",
                target_arch = "aarch64",
                target_arch = "arm64ec",
                target_arch = "riscv32",
                target_arch = "riscv64",
                target_arch = "loongarch64",
                target_arch = "s390x",
            ))
        ))]
        #[must_use]
        #[inline(never)]
        pub(crate) fn $name(value: $ty) -> $ty {
            core::hint::black_box(value)
        }
    };
}

hide_fn!(hide_u8, u8, reg_byte);
hide_fn!(hide_u16, u16, reg);
hide_fn!(hide_u32, u32, reg);
hide_fn!(hide_u64, u64, reg);
hide_fn!(hide_usize, usize, reg);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hide_is_identity() {
        assert_eq!(hide_u8(0x5a), 0x5a);
        assert_eq!(hide_u16(0x1234), 0x1234);
        assert_eq!(hide_u32(0xdead_beef), 0xdead_beef);
        assert_eq!(hide_u64(0xdead_beef_f00d_cafe), 0xdead_beef_f00d_cafe);
        assert_eq!(hide_usize(12345), 12345);
    }

    #[cfg(feature = "count_instructions_test")]
    extern crate std;

    #[cfg(feature = "count_instructions_test")]
    #[test]
    fn count_hide_u32_instructions() -> std::io::Result<()> {
        use count_instructions::count_instructions;

        fn count() -> std::io::Result<usize> {
            let mut count = 0;
            assert_eq!(
                10u32,
                count_instructions(
                    || hide_u32(1) + hide_u32(2) + hide_u32(3) + hide_u32(4),
                    |_| count += 1
                )?
            );
            Ok(count)
        }

        fn count_optimized() -> std::io::Result<usize> {
            #[inline(always)]
            fn inline_identity(value: u32) -> u32 {
                value
            }

            let mut count = 0;
            assert_eq!(
                10u32,
                count_instructions(
                    || inline_identity(1) + inline_identity(2) + inline_identity(3) + inline_identity(4),
                    |_| count += 1
                )?
            );
            Ok(count)
        }

        assert!(count()? > count_optimized()?);
        Ok(())
    }
}
