//! Plays a four-voice chord through the pin-level model and decodes the
//! serial audio stream the way an external DAC would, printing the first
//! frames and a short summary.

use tone_synth::dsp::sign_extend;
use tone_synth::{Synth, SynthConfig};

fn main() {
    let config = SynthConfig::default();
    let mut synth = Synth::new(&config);

    let frame_ticks = config.clock_hz / config.sample_rate_hz;
    let frames_wanted = 2_000u32;

    let mut prev_bclk = true;
    let mut prev_lr = false;
    let mut shift: u64 = 0;
    let mut nbits = 0u32;
    let mut decoded = Vec::new();

    for _ in 0..(frame_ticks * (frames_wanted + 2)) {
        // All four voices down, no codec on the bus (data line reads high)
        let pins = synth.tick(0b1111, true);

        if pins.lrclk != prev_lr {
            if nbits == config.sample_width && prev_lr {
                decoded.push(sign_extend(shift as i64, config.sample_width));
            }
            shift = 0;
            nbits = 0;
        }
        if pins.bclk && !prev_bclk && nbits < config.sample_width {
            shift = (shift << 1) | pins.dout as u64;
            nbits += 1;
        }
        prev_bclk = pins.bclk;
        prev_lr = pins.lrclk;
    }

    println!("decoded {} frames at {} Hz", decoded.len(), config.sample_rate_hz);
    print!("first 16:");
    for s in decoded.iter().take(16) {
        print!(" {s}");
    }
    println!();

    let min = decoded.iter().min().copied().unwrap_or(0);
    let max = decoded.iter().max().copied().unwrap_or(0);
    let clipped = decoded
        .iter()
        .filter(|&&s| s == 32_767 || s == -32_768)
        .count();
    println!("range [{min}, {max}], {clipped} clipped frames");
}
