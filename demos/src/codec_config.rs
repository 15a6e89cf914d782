//! Traces the codec configuration sequence on the two-wire bus: a simple
//! ACK-all slave model shifts in every byte and the transcript is printed
//! as register writes.

use tone_synth::{LineState, Synth, SynthConfig};

struct Slave {
    prev_scl: bool,
    prev_sda: bool,
    shift: u16,
    nbits: u32,
    driving_ack: bool,
    bytes: Vec<u8>,
}

impl Slave {
    fn observe(&mut self, scl: bool, sda: bool) {
        if scl && self.prev_scl && sda != self.prev_sda && !sda {
            self.shift = 0;
            self.nbits = 0;
        }
        if scl && !self.prev_scl && !self.driving_ack {
            self.shift = (self.shift << 1) | sda as u16;
            self.nbits += 1;
        }
        if !scl && self.prev_scl {
            if self.driving_ack {
                self.driving_ack = false;
            } else if self.nbits == 8 {
                self.bytes.push(self.shift as u8);
                self.driving_ack = true;
                self.shift = 0;
                self.nbits = 0;
            }
        }
        self.prev_scl = scl;
        self.prev_sda = sda;
    }
}

fn main() {
    let mut synth = Synth::new(&SynthConfig::default());
    let mut slave = Slave {
        prev_scl: true,
        prev_sda: true,
        shift: 0,
        nbits: 0,
        driving_ack: false,
        bytes: Vec::new(),
    };

    let mut sda = LineState::Released;
    let mut ticks = 0u64;
    while !synth.config_finished() && ticks < 1_000_000 {
        let bus = sda.level(slave.driving_ack);
        let pins = synth.tick(0, bus);
        slave.observe(pins.scl, pins.sda.level(slave.driving_ack));
        sda = pins.sda;
        ticks += 1;
    }

    println!(
        "configuration {} after {ticks} ticks, status {:#05x}",
        if synth.config_finished() { "finished" } else { "stalled" },
        synth.config_status()
    );
    for chunk in slave.bytes.chunks(3) {
        if let [addr, reg, val] = chunk {
            println!(
                "  addr {:#04x} write reg {:#03x} = {:#05x}",
                addr >> 1,
                reg >> 1,
                (((reg & 1) as u16) << 8) | *val as u16
            );
        }
    }
}
