//! Top-level synthesizer: voices → adder tree → clip guard → serial audio,
//! with the bus configuration engine running alongside.
//!
//! Everything advances in lock-step on one reference-clock edge. The fixed
//! pipeline (tree latency plus the guard register) is honored purely by
//! evaluation order inside [`Synth::tick`]: each component consumes the
//! registered outputs its producers held before the edge, so no component
//! ever sees a same-edge value.

use crate::adder::{AdderTree, MAX_TREE_INPUTS};
use crate::codec::registers;
use crate::config::SynthConfig;
use crate::dsp::Sample;
use crate::guard::ClipGuard;
use crate::i2c::{I2cConfigEngine, LineState};
use crate::i2s::I2sTransmitter;
use crate::osc::SineOscillator;

/// Output pin levels after one clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthPins {
    /// Audio bit clock.
    pub bclk: bool,
    /// Audio frame clock (high = left channel).
    pub lrclk: bool,
    /// Serial audio data.
    pub dout: bool,
    /// Configuration bus clock line.
    pub scl: bool,
    /// Configuration bus data line, with explicit ownership.
    pub sda: LineState,
}

/// Complete synthesizer instance.
pub struct Synth {
    voices: [SineOscillator; MAX_TREE_INPUTS],
    num_voices: usize,
    tree: AdderTree,
    guard: ClipGuard,
    i2s: I2sTransmitter,
    i2c: I2cConfigEngine,
}

impl Synth {
    /// Build the synthesizer from a validated configuration. Each component
    /// asserts its own parameters; a bad configuration never constructs.
    pub fn new(config: &SynthConfig) -> Self {
        let num_voices = config.voice_periods.len();
        let voices = core::array::from_fn(|i| {
            // Slots past the voice count stay at a dummy period; they are
            // never ticked or summed.
            let period = config.voice_periods.get(i).copied().unwrap_or(1);
            SineOscillator::new(config.sample_width, period)
        });
        Synth {
            voices,
            num_voices,
            tree: AdderTree::new(config.sample_width, num_voices),
            guard: ClipGuard::new(config.sample_width),
            i2s: I2sTransmitter::new(
                config.clock_hz,
                config.sample_rate_hz,
                config.sample_width,
            ),
            i2c: I2cConfigEngine::new(
                config.clock_hz,
                config.bus_hz,
                config.debug_width,
                registers::BUS_ADDRESS,
                &registers::CONFIG_TABLE,
            ),
        }
    }

    /// Number of voices.
    pub fn num_voices(&self) -> usize {
        self.num_voices
    }

    /// The mono sample currently feeding both transmitter channels.
    pub fn sample(&self) -> Sample {
        self.guard.output()
    }

    /// Per-parameter codec configuration bitmap.
    pub fn config_status(&self) -> u32 {
        self.i2c.status()
    }

    /// True once the codec configuration sequence has completed.
    pub fn config_finished(&self) -> bool {
        self.i2c.finished()
    }

    /// Configuration engine's in-flight byte tap.
    pub fn debug_byte(&self) -> u32 {
        self.i2c.debug_byte()
    }

    /// Current output pin levels.
    pub fn pins(&self) -> SynthPins {
        SynthPins {
            bclk: self.i2s.bclk(),
            lrclk: self.i2s.lrclk(),
            dout: self.i2s.dout(),
            scl: self.i2c.scl(),
            sda: self.i2c.sda(),
        }
    }

    /// Advance every component one reference-clock edge.
    ///
    /// Bit `i` of `keys` plays voice `i`; a cleared bit holds that voice's
    /// synchronous clear. `sda_in` is the resolved level of the shared bus
    /// data line before this edge.
    ///
    /// Consumers are evaluated before their producers so each stage reads
    /// registered pre-edge values, keeping the pipeline cycle-accurate.
    pub fn tick(&mut self, keys: u32, sda_in: bool) -> SynthPins {
        let sample = self.guard.output();
        self.i2s.tick(sample, sample);
        self.guard.tick(self.tree.sum(), self.tree.overflow());
        let mut inputs = [0 as Sample; MAX_TREE_INPUTS];
        for (i, voice) in self.voices[..self.num_voices].iter().enumerate() {
            inputs[i] = voice.output();
        }
        self.tree.tick(&inputs[..self.num_voices]);
        for (i, voice) in self.voices[..self.num_voices].iter_mut().enumerate() {
            voice.tick(keys & (1 << i) == 0);
        }
        self.i2c.tick(sda_in);
        self.pins()
    }

    /// Force every component to its initial state (models the external
    /// reset input, which overrides all clocked state).
    pub fn reset(&mut self) {
        for voice in self.voices[..self.num_voices].iter_mut() {
            voice.reset();
        }
        self.tree.reset();
        self.guard.reset();
        self.i2s.reset();
        self.i2c.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_synth() -> Synth {
        Synth::new(&SynthConfig::default())
    }

    #[test]
    fn default_configuration_constructs() {
        let synth = make_synth();
        assert_eq!(synth.num_voices(), 4);
        assert_eq!(synth.sample(), 0);
        assert!(!synth.config_finished());
    }

    #[test]
    fn silent_with_no_keys() {
        let mut synth = make_synth();
        for _ in 0..2_000 {
            synth.tick(0, true);
            assert_eq!(synth.sample(), 0);
        }
    }

    #[test]
    fn pressed_key_produces_signal() {
        let mut synth = make_synth();
        let mut nonzero = false;
        // A quarter wave of the lowest default voice is well inside this
        for _ in 0..20_000 {
            synth.tick(0b0001, true);
            nonzero |= synth.sample() != 0;
        }
        assert!(nonzero);
    }

    #[test]
    fn releasing_keys_silences_after_pipeline_drains() {
        let mut synth = make_synth();
        for _ in 0..20_000 {
            synth.tick(0b1111, true);
        }
        // Tree latency (2) + guard (1) + a margin
        for _ in 0..8 {
            synth.tick(0, true);
        }
        for _ in 0..1_000 {
            synth.tick(0, true);
            assert_eq!(synth.sample(), 0);
        }
    }

    #[test]
    fn pins_reflect_component_outputs() {
        let mut synth = make_synth();
        let pins = synth.tick(0, true);
        assert_eq!(pins.bclk, true); // idles high before the first frame
        assert_eq!(pins.lrclk, false);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut synth = make_synth();
        for _ in 0..50_000 {
            synth.tick(0b1111, true);
        }
        synth.reset();
        assert_eq!(synth.sample(), 0);
        assert_eq!(synth.config_status(), 0);
        let pins = synth.pins();
        assert!(pins.scl);
        assert_eq!(pins.sda, LineState::Released);
        assert!(!pins.lrclk);
    }

    #[test]
    fn configuration_runs_concurrently_with_audio() {
        let mut synth = make_synth();
        // No slave ACK (line reads high): engine must keep retrying while
        // audio keeps streaming
        let mut lr_edges = 0;
        let mut prev_lr = false;
        for _ in 0..100_000 {
            let pins = synth.tick(0b0001, true);
            if pins.lrclk && !prev_lr {
                lr_edges += 1;
            }
            prev_lr = pins.lrclk;
        }
        assert!(lr_edges > 300);
        assert!(!synth.config_finished());
    }
}
