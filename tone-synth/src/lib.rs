//! # tone-synth
//!
//! A `no_std`, zero-allocation, cycle-accurate model of a multi-voice tone
//! synthesizer: integer-recurrence sine voices summed through a registered
//! adder tree, clamped by an overflow guard, and streamed to an external
//! TLV320AIC23B stereo DAC over a left-justified serial audio link, while a
//! two-wire master engine configures the DAC register by register.
//!
//! Every component advances on one shared reference clock and exposes only
//! registered outputs, so the whole design can be ticked edge by edge and
//! observed at the pin level.
//!
//! ## Architecture
//!
//! | Stage | Module | Purpose |
//! |-------|--------|---------|
//! | Voices | [`osc`] | Sine oscillators from an integer rotation recurrence |
//! | Mix | [`adder`] | Registered balanced adder tree with overflow flag |
//! | Clamp | [`guard`] | Direction-tracking saturation on overflow |
//! | Audio out | [`i2s`] | Frame/bit clock derivation and MSB-first serializer |
//! | Control | [`i2c`] | Two-wire master replaying the codec register table |
//! | Codec | [`codec`] | TLV320AIC23B register map and host driver (feature-gated) |
//! | Top | [`synth`] | Lock-step composition of all of the above |
//!
//! ## Quick start
//!
//! ```ignore
//! use tone_synth::config::SynthConfig;
//! use tone_synth::synth::Synth;
//!
//! let mut synth = Synth::new(&SynthConfig::default());
//!
//! // One reference-clock edge per call; bit 0 plays the first voice.
//! loop {
//!     let pins = synth.tick(0b0001, sda_line_level);
//!     drive_outputs(pins.bclk, pins.lrclk, pins.dout, pins.scl, pins.sda);
//! }
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `aic23` | yes | TLV320AIC23B host driver (requires `embedded-hal`) |
//!
//! ## Default parameters
//!
//! - **Reference clock:** 12.288 MHz ([`constants::CLOCK_HZ`])
//! - **Sample rate:** 48 kHz, 256×Fs ([`constants::SAMPLE_RATE_HZ`])
//! - **Sample format:** signed 16-bit, left-justified
//! - **Voices:** C4/E4/G4/C5 ([`constants::DEFAULT_VOICE_PERIODS`])

#![no_std]

pub mod constants;
pub mod config;
pub mod dsp;
pub mod osc;
pub mod adder;
pub mod guard;
pub mod i2s;
pub mod i2c;
pub mod codec;
pub mod synth;


pub use crate::config::SynthConfig;
pub use crate::i2c::LineState;
pub use crate::synth::{Synth, SynthPins};
