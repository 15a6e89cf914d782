//! Width-parameterized fixed-point helpers.
//!
//! Every numeric path in the crate works on [`Sample`] values: `i64` is wide
//! enough to hold any supported sample width (8/16/32) plus the guard bits
//! the adder tree accumulates, so intermediate arithmetic never wraps.

/// A signed fixed-point audio sample, sign-extended into an `i64`.
pub type Sample = i64;

/// Largest value representable in `width` signed bits: `2^(width-1) - 1`.
#[inline]
pub const fn width_max(width: u32) -> Sample {
    (1i64 << (width - 1)) - 1
}

/// Smallest value representable in `width` signed bits: `-2^(width-1)`.
#[inline]
pub const fn width_min(width: u32) -> Sample {
    -(1i64 << (width - 1))
}

/// Symmetric saturating clamp to `[-(2^(width-1)-1), 2^(width-1)-1]`.
///
/// The oscillator recurrence uses the symmetric range so the rotation state
/// never reaches the asymmetric two's-complement minimum.
#[inline]
pub const fn saturate(val: Sample, width: u32) -> Sample {
    let max = width_max(width);
    if val > max {
        max
    } else if val < -max {
        -max
    } else {
        val
    }
}

/// Sign-extend the low `width` bits of `val`.
#[inline]
pub const fn sign_extend(val: Sample, width: u32) -> Sample {
    let shift = 64 - width;
    (val << shift) >> shift
}

/// Bit `index` of `val` as a bool.
#[inline]
pub const fn bit(val: Sample, index: u32) -> bool {
    (val >> index) & 1 != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_extremes() {
        assert_eq!(width_max(8), 127);
        assert_eq!(width_min(8), -128);
        assert_eq!(width_max(16), 32767);
        assert_eq!(width_min(16), -32768);
        assert_eq!(width_max(32), 2_147_483_647);
        assert_eq!(width_min(32), -2_147_483_648);
    }

    #[test]
    fn saturate_is_symmetric() {
        assert_eq!(saturate(1000, 8), 127);
        assert_eq!(saturate(-1000, 8), -127);
        assert_eq!(saturate(-128, 8), -127);
        assert_eq!(saturate(126, 8), 126);
        assert_eq!(saturate(0, 16), 0);
        assert_eq!(saturate(40_000, 16), 32767);
        assert_eq!(saturate(-40_000, 16), -32767);
    }

    #[test]
    fn sign_extend_widths() {
        assert_eq!(sign_extend(0xFF, 8), -1);
        assert_eq!(sign_extend(0x7F, 8), 127);
        assert_eq!(sign_extend(0x80, 8), -128);
        assert_eq!(sign_extend(0xFFFF, 16), -1);
        assert_eq!(sign_extend(0x8000, 16), -32768);
        // Bits above the width are ignored
        assert_eq!(sign_extend(0x1_0001, 16), 1);
    }

    #[test]
    fn bit_extraction() {
        assert!(bit(0b100, 2));
        assert!(!bit(0b100, 1));
        // Works on negative values (two's complement)
        assert!(bit(-1, 63));
        assert!(bit(-1, 0));
    }
}
