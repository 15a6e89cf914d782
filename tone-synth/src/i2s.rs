//! Serial stereo audio transmitter (left-justified, MSB-first).
//!
//! Derives two clock domains from the single reference clock:
//!
//! ```text
//! reference clock ──┬─► frame clock (lrclk)  F / (high + low ticks) = R
//! (F Hz)            └─► bit clock   (bclk)   64 periods per frame
//!
//!        ┌ lrclk high: left channel ┐┌ lrclk low: right channel ┐
//! lrclk  ─┐________________________┌─────────────────────────────
//! bclk   ──┐_┌─┐_┌─┐_ ... ┌────────  (idles high after W periods)
//! dout    [W-1][W-2] ...  [0]
//! ```
//!
//! The frame clock's two half-periods are `floor(F/R/2)` and the remainder,
//! so they differ by at most one tick and the long-run frame rate is exact.
//! Both channel registers latch the live inputs at the frame boundary, the
//! MSB is driven in the same tick, and every later bit is driven on the
//! bit-clock high→low transition; the data line holds its value in between.

use crate::constants::BIT_PERIODS_PER_FRAME;
use crate::dsp::{bit, Sample};

/// Cycle-accurate serializer for one stereo sample stream.
#[derive(Debug, Clone)]
pub struct I2sTransmitter {
    width: u32,
    /// Frame-clock high phase length in reference ticks.
    high_len: u32,
    /// Frame-clock low phase length; `high_len` or `high_len + 1`.
    low_len: u32,
    /// Bit-clock half-period in reference ticks.
    bclk_half: u32,

    lrclk: bool,
    frame_ctr: u32,
    bclk: bool,
    bclk_ctr: u32,
    /// Completed bit periods in the current transfer window.
    bits_sent: u32,
    bit_index: u32,
    /// Bit clock toggles only while true; held high otherwise.
    active: bool,
    left_reg: Sample,
    right_reg: Sample,
    dout: bool,
}

impl I2sTransmitter {
    /// Create a transmitter for reference clock `clock_hz`, target sample
    /// rate `sample_rate_hz` and sample width `width`.
    ///
    /// Only widths of 8, 16 or 32 bits are supported; anything else is a
    /// fatal configuration error.
    pub fn new(clock_hz: u32, sample_rate_hz: u32, width: u32) -> Self {
        assert!(
            width == 8 || width == 16 || width == 32,
            "audio sample width must be 8, 16 or 32 bits"
        );
        let frame_ticks = clock_hz / sample_rate_hz;
        let high_len = frame_ticks / 2;
        let low_len = frame_ticks - high_len;
        let bclk_half = clock_hz / (BIT_PERIODS_PER_FRAME * sample_rate_hz) / 2;
        assert!(
            bclk_half >= 1,
            "reference clock too slow for the bit clock at this sample rate"
        );
        let mut tx = I2sTransmitter {
            width,
            high_len,
            low_len,
            bclk_half,
            lrclk: false,
            frame_ctr: 0,
            bclk: true,
            bclk_ctr: 0,
            bits_sent: 0,
            bit_index: width - 1,
            active: false,
            left_reg: 0,
            right_reg: 0,
            dout: false,
        };
        tx.reset();
        tx
    }

    /// Bit clock output. Idles high outside the transfer window.
    pub fn bclk(&self) -> bool {
        self.bclk
    }

    /// Frame clock output. High while the left channel is valid.
    pub fn lrclk(&self) -> bool {
        self.lrclk
    }

    /// Serial data output.
    pub fn dout(&self) -> bool {
        self.dout
    }

    /// Reference-clock ticks per audio frame.
    pub fn frame_ticks(&self) -> u32 {
        self.high_len + self.low_len
    }

    /// Return to the post-reset state. The first half-period is pre-counted
    /// one tick so the first frame transition lands one cycle early,
    /// matching the steady-state phase from the start.
    pub fn reset(&mut self) {
        self.lrclk = false;
        self.frame_ctr = 1;
        self.bclk = true;
        self.bclk_ctr = 0;
        self.bits_sent = 0;
        self.bit_index = self.width - 1;
        self.active = false;
        self.left_reg = 0;
        self.right_reg = 0;
        self.dout = false;
    }

    /// Bit of the active channel register selected by the bit counter.
    fn current_bit(&self) -> bool {
        let reg = if self.lrclk { self.left_reg } else { self.right_reg };
        bit(reg, self.bit_index)
    }

    /// Advance one reference-clock tick with the live channel inputs.
    pub fn tick(&mut self, left: Sample, right: Sample) {
        self.frame_ctr += 1;
        let half_len = if self.lrclk { self.high_len } else { self.low_len };
        if self.frame_ctr >= half_len {
            // Half-frame boundary: toggle the frame clock and restart the
            // bit engine. The bit clock falls here, so the boundary always
            // coincides with a bit-clock transition.
            self.frame_ctr = 0;
            self.lrclk = !self.lrclk;
            if self.lrclk {
                // Frame boundary proper: latch both channels from the live
                // inputs, not a delayed copy.
                self.left_reg = left;
                self.right_reg = right;
            }
            self.bclk = false;
            self.bclk_ctr = 0;
            self.bits_sent = 0;
            self.bit_index = self.width - 1;
            self.active = true;
            self.dout = self.current_bit();
            return;
        }
        if !self.active {
            return;
        }
        self.bclk_ctr += 1;
        if self.bclk_ctr < self.bclk_half {
            return;
        }
        self.bclk_ctr = 0;
        if !self.bclk {
            // Rising edge: the receiver samples here.
            self.bclk = true;
            return;
        }
        // High→low completes one bit period.
        if self.bits_sent + 1 < self.width {
            self.bclk = false;
            self.bits_sent += 1;
            self.bit_index -= 1;
            self.dout = self.current_bit();
        } else {
            // All W bits out: idle high, bit counter wraps for the next half.
            self.active = false;
            self.bit_index = self.width - 1;
        }
    }
}
