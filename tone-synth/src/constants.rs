/// Default reference clock frequency in Hz (audio master clock, 256×Fs).
pub const CLOCK_HZ: u32 = 12_288_000;

/// Default target sample rate in Hz.
pub const SAMPLE_RATE_HZ: u32 = 48_000;

/// Default audio sample width in bits. Must be 8, 16 or 32.
pub const SAMPLE_WIDTH: u32 = 16;

/// Default two-wire bus clock frequency in Hz (standard mode).
pub const BUS_HZ: u32 = 100_000;

/// Bit-clock periods per audio frame: 32 per channel, supporting up to
/// 32 data bits each.
pub const BIT_PERIODS_PER_FRAME: u32 = 64;

/// Fixed-point scale of the oscillator recurrence. The phase increment is
/// `round(2π / period * OSC_SCALE)` so the per-tick update stays in integers;
/// the scale is large enough that even the longest default voice period
/// (tens of thousands of reference ticks) keeps a nonzero increment.
pub const OSC_SCALE: i64 = 1 << 20;

/// Divider toggles both bus lines are held idle between transactions.
pub const BUS_FREE_TOGGLES: u32 = 4;

/// Maximum two-wire data-hold time in nanoseconds. The engine changes the
/// data line in the same reference-clock tick the clock line falls, so one
/// reference period must not exceed this.
pub const MAX_DATA_HOLD_NS: u32 = 3_450;

/// Default observation width of the in-flight transfer byte debug tap.
pub const DEBUG_WIDTH: u32 = 8;

/// Default per-voice period divisors: C4, E4, G4, C5 at [`CLOCK_HZ`].
pub const DEFAULT_VOICE_PERIODS: [u32; 4] = [46_967, 37_278, 31_347, 23_484];
