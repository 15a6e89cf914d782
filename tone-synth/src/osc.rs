//! Sine oscillator built from an integer rotation recurrence.
//!
//! Each voice keeps a `(sin, cos)` pair and rotates it by a fixed phase step
//! every reference-clock tick:
//!
//! ```text
//! sin' = clamp(sin + d_phase * cos / scale)
//! cos' = clamp(cos - d_phase * sin / scale)
//! ```
//!
//! with `d_phase = round(2π / period * scale)`. The clamp saturates to the
//! symmetric range so the slow energy drift of the Euler rotation can never
//! wrap. Floating point is used exactly once, to derive `d_phase` at
//! construction; the per-tick update is pure integer arithmetic.

use crate::constants::OSC_SCALE;
use crate::dsp::{saturate, width_max, Sample};

/// Restartable sine-wave generator, one per voice.
///
/// The output approximates `sin(2π·t/period)` scaled to the full range of a
/// `width`-bit signed sample. A synchronous clear restarts the wave at its
/// zero crossing immediately, without waiting for the cycle boundary — the
/// resulting discontinuity is the intended note on/off click.
#[derive(Debug, Clone)]
pub struct SineOscillator {
    width: u32,
    period: u32,
    /// Phase step per tick, pre-scaled by [`OSC_SCALE`].
    d_phase: i64,
    sin: Sample,
    cos: Sample,
    step: u32,
}

impl SineOscillator {
    /// Create an oscillator producing `width`-bit samples with `period`
    /// reference-clock ticks per full wave cycle.
    ///
    /// Widths of 0 or 1 have no meaningful sample range and are rejected.
    pub fn new(width: u32, period: u32) -> Self {
        assert!(width >= 2, "oscillator width must be at least 2 bits");
        assert!(period >= 1, "oscillator period must be at least 1 tick");
        let d_phase = libm::roundf(
            2.0 * core::f32::consts::PI / period as f32 * OSC_SCALE as f32,
        ) as i64;
        // A zero increment would freeze the rotation at silence.
        assert!(
            d_phase >= 1,
            "oscillator period too long for the phase step scale"
        );
        SineOscillator {
            width,
            period,
            d_phase,
            sin: 0,
            cos: width_max(width),
            step: 0,
        }
    }

    /// Create an oscillator for a target frequency in Hz, rounding the period
    /// to the nearest whole number of reference-clock ticks.
    pub fn for_frequency(width: u32, clock_hz: u32, freq_hz: f32) -> Self {
        let period = libm::roundf(clock_hz as f32 / freq_hz) as u32;
        Self::new(width, period)
    }

    /// Ticks per full wave cycle.
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Current sample value.
    pub fn output(&self) -> Sample {
        self.sin
    }

    /// Force the initial state `(0, max)` and restart the step counter.
    pub fn reset(&mut self) {
        self.sin = 0;
        self.cos = width_max(self.width);
        self.step = 0;
    }

    /// Advance one reference-clock tick.
    ///
    /// `clear` is the synchronous clear input: when held, the oscillator is
    /// pinned to its initial state and the output stays at zero.
    pub fn tick(&mut self, clear: bool) {
        if clear {
            self.reset();
            return;
        }
        self.step += 1;
        if self.step >= self.period {
            // Cycle boundary: restart from the exact initial state instead of
            // letting recurrence error accumulate across cycles.
            self.reset();
            return;
        }
        let sin = self.sin;
        let cos = self.cos;
        self.sin = saturate(sin + self.d_phase * cos / OSC_SCALE, self.width);
        self.cos = saturate(cos - self.d_phase * sin / OSC_SCALE, self.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_zero_max() {
        let osc = SineOscillator::new(16, 100);
        assert_eq!(osc.output(), 0);
        assert_eq!(osc.cos, 32767);
    }

    #[test]
    fn first_steps_follow_recurrence() {
        // period 100 -> d_phase = round(2π/100 * 2^20) = 65884
        let mut osc = SineOscillator::new(16, 100);
        assert_eq!(osc.d_phase, 65_884);

        osc.tick(false);
        // sin = 0 + 65884 * 32767 / 2^20 = 2058 (integer division)
        assert_eq!(osc.output(), 2058);
        assert_eq!(osc.cos, 32767);

        osc.tick(false);
        // sin = 2058 + 65884 * 32767 / 2^20 = 4116
        // cos = 32767 - 65884 * 2058 / 2^20 = 32638
        assert_eq!(osc.output(), 4116);
        assert_eq!(osc.cos, 32638);
    }

    #[test]
    fn restarts_exactly_at_period() {
        let mut osc = SineOscillator::new(16, 100);
        for _ in 0..100 {
            osc.tick(false);
        }
        assert_eq!(osc.output(), 0);
        assert_eq!(osc.cos, 32767);

        // Second cycle reproduces the first sample exactly
        osc.tick(false);
        assert_eq!(osc.output(), 2058);
    }

    #[test]
    fn longest_default_voice_leaves_zero() {
        // C4 at 12.288 MHz: ~47k ticks per cycle; the increment must stay
        // nonzero so a held key actually produces signal
        let mut osc = SineOscillator::new(16, 46_967);
        assert!(osc.d_phase >= 1);
        for _ in 0..1_000 {
            osc.tick(false);
        }
        assert!(osc.output() > 1_000, "got {}", osc.output());
    }

    #[test]
    fn full_cycle_is_periodic() {
        let mut a = SineOscillator::new(16, 250);
        let mut b = SineOscillator::new(16, 250);
        // Offset b by one full cycle; the sequences must coincide
        for _ in 0..250 {
            b.tick(false);
        }
        for _ in 0..250 {
            assert_eq!(a.output(), b.output());
            a.tick(false);
            b.tick(false);
        }
    }

    #[test]
    fn clear_forces_initial_state_anywhere() {
        let mut osc = SineOscillator::new(16, 100);
        for _ in 0..37 {
            osc.tick(false);
        }
        assert_ne!(osc.output(), 0);
        osc.tick(true);
        assert_eq!(osc.output(), 0);
        assert_eq!(osc.cos, 32767);
        // Held clear keeps the output silent
        osc.tick(true);
        assert_eq!(osc.output(), 0);
    }

    #[test]
    fn recurrence_never_leaves_range() {
        let mut osc = SineOscillator::new(8, 40);
        for _ in 0..10_000 {
            osc.tick(false);
            assert!(osc.output() <= 127 && osc.output() >= -127);
            assert!(osc.cos <= 127 && osc.cos >= -127);
        }
    }

    #[test]
    fn for_frequency_rounds_period() {
        let osc = SineOscillator::for_frequency(16, 12_288_000, 440.0);
        // 12_288_000 / 440 = 27927.27 -> 27927
        assert_eq!(osc.period(), 27_927);
    }

    #[test]
    #[should_panic(expected = "width")]
    fn degenerate_width_rejected() {
        let _ = SineOscillator::new(1, 100);
    }

    #[test]
    #[should_panic(expected = "phase step")]
    fn rejects_period_beyond_scale() {
        // round(2π/period * 2^20) = 0 here: the rotation would freeze
        let _ = SineOscillator::new(16, 20_000_000);
    }
}
