//! TLV320AIC23B codec driver.
//!
//! Host-side driver for the TI TLV320AIC23B stereo codec, generic over any
//! [`embedded_hal::i2c::I2c`] implementation. It writes the same register
//! values the cycle-accurate bus engine replays, so a board can be brought
//! up from a host MCU with identical results.
//!
//! # Example
//!
//! ```ignore
//! let mut codec = Aic23::new(i2c);
//! codec.reset()?;
//! codec.configure()?;     // DAC playback path, 16-bit left-justified, 48 kHz
//! codec.volume(0.8)?;
//! ```

use embedded_hal::i2c::I2c;

use super::registers as reg;

/// Headphone volume register floor; values at or below this mute the output.
const HP_VOL_MUTE: u16 = 0x2F;

/// Headphone volume register value for 0 dB.
const HP_VOL_MAX: u16 = 0x79;

/// TLV320AIC23B codec driver.
pub struct Aic23<I2C> {
    i2c: I2C,
    address: u8,
    /// Whether the headphone output is currently muted.
    muted: bool,
}

impl<I2C> Aic23<I2C>
where
    I2C: I2c,
{
    /// Default two-wire address (CS pin low).
    pub const DEFAULT_ADDRESS: u8 = reg::BUS_ADDRESS;

    /// Create a driver with the default address (0x1A).
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: Self::DEFAULT_ADDRESS,
            muted: true,
        }
    }

    /// Create a driver with a specific two-wire address (CS pin high: 0x1B).
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            muted: true,
        }
    }

    // ── Low-level helpers ──────────────────────────────────────────────

    /// Write a 9-bit value to a 7-bit register.
    pub fn write_register(&mut self, register: u8, value: u16) -> Result<(), I2C::Error> {
        let buf = [(register << 1) | ((value >> 8) as u8 & 1), value as u8];
        self.i2c.write(self.address, &buf)
    }

    // ── Bring-up sequence ──────────────────────────────────────────────

    /// Reset the codec to its power-on defaults.
    pub fn reset(&mut self) -> Result<(), I2C::Error> {
        self.muted = true;
        self.write_register(reg::RESET, 0)
    }

    /// Replay the full power-on configuration: DAC playback path at 0 dB,
    /// left-justified 16-bit slave interface, 48 kHz from a 12.288 MHz
    /// master clock.
    pub fn configure(&mut self) -> Result<(), I2C::Error> {
        for (register, &value) in reg::CONFIG_TABLE.iter().enumerate() {
            self.write_register(register as u8, value)?;
        }
        self.muted = false;
        Ok(())
    }

    // ── Headphone volume ───────────────────────────────────────────────

    /// Set headphone volume on both channels (0.0 = muted, 1.0 = 0 dB).
    ///
    /// The register range below the mute floor is skipped: any non-zero
    /// level maps into the audible span and auto-unmutes.
    pub fn volume(&mut self, level: f32) -> Result<(), I2C::Error> {
        if level <= 0.0 {
            return self.mute();
        }
        let span = (HP_VOL_MAX - HP_VOL_MUTE - 1) as f32;
        let mut val = HP_VOL_MUTE + 1 + (level * span + 0.499) as u16;
        if val > HP_VOL_MAX {
            val = HP_VOL_MAX;
        }
        self.muted = false;
        self.write_register(reg::LEFT_HP_VOL, val)?;
        self.write_register(reg::RIGHT_HP_VOL, val)
    }

    /// Mute the headphone output on both channels.
    pub fn mute(&mut self) -> Result<(), I2C::Error> {
        self.muted = true;
        self.write_register(reg::LEFT_HP_VOL, 0)?;
        self.write_register(reg::RIGHT_HP_VOL, 0)
    }

    // ── Release ────────────────────────────────────────────────────────

    /// Consume the driver and return the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
