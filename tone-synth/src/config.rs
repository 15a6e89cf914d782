//! Build-time synthesizer configuration.
//!
//! Everything here is fixed when the [`Synth`](crate::synth::Synth) is
//! constructed; nothing is runtime-adjustable. Each component validates the
//! parameters it consumes in its own constructor and treats violations as
//! fatal configuration errors.

use crate::constants;

/// Complete parameter set for one synthesizer instance.
#[derive(Debug, Clone, Copy)]
pub struct SynthConfig {
    /// Reference clock frequency in Hz. Every component advances on this
    /// clock; all other frequencies are derived from it by integer division.
    pub clock_hz: u32,
    /// Target audio sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Audio sample width in bits (8, 16 or 32).
    pub sample_width: u32,
    /// Target two-wire bus clock frequency in Hz.
    pub bus_hz: u32,
    /// Observation width of the configuration engine's debug tap.
    pub debug_width: u32,
    /// Period divisor per voice (reference-clock ticks per full wave cycle).
    /// The voice count is the table length and must be a power of two.
    pub voice_periods: &'static [u32],
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            clock_hz: constants::CLOCK_HZ,
            sample_rate_hz: constants::SAMPLE_RATE_HZ,
            sample_width: constants::SAMPLE_WIDTH,
            bus_hz: constants::BUS_HZ,
            debug_width: constants::DEBUG_WIDTH,
            voice_periods: &constants::DEFAULT_VOICE_PERIODS,
        }
    }
}
