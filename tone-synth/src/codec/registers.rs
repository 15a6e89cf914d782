//! TLV320AIC23B register addresses and the power-on configuration table.
//!
//! Register addresses are 7-bit and values are 9-bit; on the wire they pack
//! into two bytes as `{addr[6:0], value[8]} {value[7:0]}`.

// The input-side registers are defined for completeness but the write-only
// configuration path never reads them back.
#![allow(dead_code)]

// ── Bus address ────────────────────────────────────────────────────────────

/// 7-bit two-wire address (CS pin low).
pub const BUS_ADDRESS: u8 = 0x1A;

// ── Input volume ───────────────────────────────────────────────────────────

/// Left line-in volume.
/// - Bit  8   — LRS (simultaneous update)
/// - Bit  7   — LIM (mute)
/// - Bits 4:0 — LIV (volume, 0x17 = 0 dB)
pub const LEFT_LINE_IN: u8 = 0x00;

/// Right line-in volume; same layout as [`LEFT_LINE_IN`].
pub const RIGHT_LINE_IN: u8 = 0x01;

// ── Headphone volume ───────────────────────────────────────────────────────

/// Left headphone volume.
/// - Bit  8   — RLS (simultaneous update)
/// - Bit  7   — LZC (zero-cross update)
/// - Bits 6:0 — LHV (volume, 0x79 = 0 dB, ≤ 0x2F mutes)
pub const LEFT_HP_VOL: u8 = 0x02;

/// Right headphone volume; same layout as [`LEFT_HP_VOL`].
pub const RIGHT_HP_VOL: u8 = 0x03;

// ── Path and power control ─────────────────────────────────────────────────

/// Analog audio path control.
/// - Bits 7:6 — SIDEATT (sidetone attenuation)
/// - Bit  5   — STA (sidetone enable)
/// - Bit  4   — DAC (select DAC output)
/// - Bit  3   — BYP (line-in bypass)
/// - Bit  2   — INSEL (0 = line, 1 = mic)
/// - Bit  1   — MUTEMIC
/// - Bit  0   — MICBOOST (+20 dB)
pub const ANALOG_PATH: u8 = 0x04;

/// Digital audio path control.
/// - Bit  3   — DACMU (DAC soft mute)
/// - Bits 2:1 — DEEMP (de-emphasis)
/// - Bit  0   — ADCHPD (ADC high-pass disable)
pub const DIGITAL_PATH: u8 = 0x05;

/// Power-down control, one bit per block, 1 = powered down.
/// - Bit  7 — OFF (device)
/// - Bit  6 — CLK
/// - Bit  5 — OSC
/// - Bit  4 — OUT
/// - Bit  3 — DAC
/// - Bit  2 — ADC
/// - Bit  1 — MIC
/// - Bit  0 — LINE
pub const POWER_DOWN: u8 = 0x06;

// ── Interface configuration ────────────────────────────────────────────────

/// Digital audio interface format.
/// - Bit  6   — MS (0 = slave, 1 = master)
/// - Bit  5   — LRSWAP
/// - Bit  4   — LRP (frame-clock polarity)
/// - Bits 3:2 — IWL (0 = 16-bit, 1 = 20, 2 = 24, 3 = 32)
/// - Bits 1:0 — FOR (0 = right-justified, 1 = left-justified, 2 = I2S, 3 = DSP)
pub const DIGITAL_FORMAT: u8 = 0x07;

/// Sample-rate control.
/// - Bit  7   — CLKOUT divider
/// - Bit  6   — CLKIN divider
/// - Bits 5:2 — SR (0b0000 = 48 kHz at 256×Fs)
/// - Bit  1   — BOSR (base oversampling)
/// - Bit  0   — USB/normal mode
pub const SAMPLE_RATE: u8 = 0x08;

/// Digital interface activation; bit 0 enables the audio interface.
pub const DIGITAL_ACTIVATE: u8 = 0x09;

/// Writing 0 resets the device to its power-on defaults.
pub const RESET: u8 = 0x0F;

// ── Power-on configuration ─────────────────────────────────────────────────

/// Ordered 9-bit values for registers 0 through 9: DAC playback path at
/// 0 dB, left-justified 16-bit slave interface, 48 kHz from a 12.288 MHz
/// master clock, interface activated last. The bus engine replays this
/// table verbatim; entry `i` targets register `i`.
pub const CONFIG_TABLE: [u16; 10] = [
    0x017, // LEFT_LINE_IN: 0 dB
    0x017, // RIGHT_LINE_IN: 0 dB
    0x079, // LEFT_HP_VOL: 0 dB
    0x079, // RIGHT_HP_VOL: 0 dB
    0x012, // ANALOG_PATH: DAC selected, mic muted
    0x000, // DIGITAL_PATH: DAC unmuted, no de-emphasis
    0x007, // POWER_DOWN: line, mic, ADC off; DAC and outputs on
    0x001, // DIGITAL_FORMAT: left-justified, 16-bit, slave
    0x000, // SAMPLE_RATE: 48 kHz, 256×Fs, normal mode
    0x001, // DIGITAL_ACTIVATE: interface on
];
