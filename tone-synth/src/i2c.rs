//! Two-wire (I2C) master configuration engine.
//!
//! Replays a compiled-in table of 9-bit register values to one fixed slave
//! address as a sequence of three-byte write transactions:
//!
//! ```text
//! start | addr<<1 | A | reg<<1 | value[8] | A | value[7:0] | A | stop
//! ```
//!
//! Register addresses are implicit: entry `i` of the table targets register
//! `i`. Each byte is shifted out MSB-first, one bit per clock-line falling
//! edge, then the data line is released for one clock period so the slave can
//! pull it low to acknowledge. A NACK aborts the transaction at its stop
//! condition and the same parameter is retried from its first byte after the
//! bus-free pause; there is no retry limit, so a dead slave stalls
//! configuration indefinitely.
//!
//! The clock line is a free-running divided-down toggle, held high only while
//! the bus is idle (`bus_free` and the terminal state). Ownership of the data
//! line is explicit in the type: the engine publishes a [`LineState`], and
//! only during the acknowledge window is the line [`Released`] to the slave.
//!
//! [`Released`]: LineState::Released

use crate::constants::{BUS_FREE_TOGGLES, MAX_DATA_HOLD_NS};

/// Drive state of the shared data line.
///
/// The bus has a pull-up: a released line reads high unless some other
/// party drives it low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// The engine owns the line and drives this level.
    Driven(bool),
    /// High-impedance; the slave may drive the line.
    Released,
}

impl LineState {
    /// Resolved electrical level given whether any other party pulls the
    /// line low.
    pub fn level(self, pulled_low: bool) -> bool {
        match self {
            LineState::Driven(level) => level,
            LineState::Released => !pulled_low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting to assert the start condition, then hand off to `Transmit`.
    Start,
    /// Shifting out the current byte, one bit per falling edge.
    Transmit,
    /// Data line released; slave's ACK sampled at mid-high.
    Acknowledge,
    /// Data low, released at mid-high while the clock is high.
    Stop,
    /// Both lines idle for the minimum bus-free time.
    BusFree,
    /// All parameters sent; no further transitions.
    Final,
}

/// Master-side two-wire state machine driving one slave device.
#[derive(Debug, Clone)]
pub struct I2cConfigEngine {
    address: u8,
    table: &'static [u16],
    /// Clock-line half-period in reference ticks.
    scl_half: u32,
    debug_mask: u32,

    state: State,
    scl: bool,
    scl_ctr: u32,
    sda: LineState,
    /// Index of the parameter currently being sent.
    param: usize,
    /// Byte position within the three-byte transaction, 0..3.
    byte_idx: u8,
    /// The byte on the wire, kept whole for the debug tap.
    cur_byte: u8,
    /// Bits of `cur_byte` already driven.
    bits_done: u8,
    /// Start condition asserted; transmit begins on the next falling edge.
    start_sent: bool,
    /// ACK level sampled during the acknowledge window (true = ACKed).
    ack: bool,
    /// Clock-divider wraps spent in `BusFree`.
    pause_toggles: u32,
    /// Per-parameter completion bitmap.
    status: u32,
}

impl I2cConfigEngine {
    /// Create an engine clocked at `clock_hz` targeting a `bus_hz` bus,
    /// writing `table` to the 7-bit `address`.
    ///
    /// All parameter validation is construction-time; violations are fatal.
    pub fn new(
        clock_hz: u32,
        bus_hz: u32,
        debug_width: u32,
        address: u8,
        table: &'static [u16],
    ) -> Self {
        assert!(
            1_000_000_000 / clock_hz <= MAX_DATA_HOLD_NS,
            "reference clock too slow for the bus data-hold limit"
        );
        assert!(bus_hz <= 400_000, "bus frequency above fast-mode limit");
        let scl_half = clock_hz / (2 * bus_hz);
        // Mid-phase sampling needs a usable fraction of the half-period.
        assert!(
            scl_half >= 8,
            "bus frequency too high for the reference clock"
        );
        assert!(
            debug_width >= 8,
            "debug tap must be at least one transfer byte wide"
        );
        assert!(
            !table.is_empty() && table.len() <= 32,
            "configuration table must hold 1..=32 parameters"
        );
        let debug_mask = if debug_width >= 32 {
            u32::MAX
        } else {
            (1u32 << debug_width) - 1
        };
        let mut engine = I2cConfigEngine {
            address,
            table,
            scl_half,
            debug_mask,
            state: State::Start,
            scl: true,
            scl_ctr: 0,
            sda: LineState::Released,
            param: 0,
            byte_idx: 0,
            cur_byte: 0,
            bits_done: 0,
            start_sent: false,
            ack: false,
            pause_toggles: 0,
            status: 0,
        };
        engine.reset();
        engine
    }

    /// Clock line output.
    pub fn scl(&self) -> bool {
        self.scl
    }

    /// Data line drive state.
    pub fn sda(&self) -> LineState {
        self.sda
    }

    /// Per-parameter completion bitmap, bit `i` set once parameter `i`'s
    /// stop condition has been reached after three ACKed bytes.
    pub fn status(&self) -> u32 {
        self.status
    }

    /// True once every parameter in the table has completed.
    pub fn finished(&self) -> bool {
        // Table length is 1..=32, so build the full mask shift-safely.
        self.status == u32::MAX >> (32 - self.table.len() as u32)
    }

    /// Observation tap: the byte currently on the wire, masked to the
    /// configured debug width.
    pub fn debug_byte(&self) -> u32 {
        self.cur_byte as u32 & self.debug_mask
    }

    /// Return to the post-reset state: clock high, data released, first
    /// parameter pending.
    pub fn reset(&mut self) {
        self.state = State::Start;
        self.scl = true;
        self.scl_ctr = 0;
        self.sda = LineState::Released;
        self.param = 0;
        self.byte_idx = 0;
        self.cur_byte = 0;
        self.bits_done = 0;
        self.start_sent = false;
        self.ack = false;
        self.pause_toggles = 0;
        self.status = 0;
    }

    /// Byte `idx` of the current parameter's transaction.
    fn transfer_byte(&self, idx: u8) -> u8 {
        let value = self.table[self.param];
        match idx {
            0 => self.address << 1, // write bit is 0
            1 => ((self.param as u8) << 1) | ((value >> 8) as u8 & 1),
            _ => value as u8,
        }
    }

    /// Begin shifting `idx` of the current parameter; drives the MSB now.
    fn load_byte(&mut self, idx: u8) {
        self.byte_idx = idx;
        self.cur_byte = self.transfer_byte(idx);
        self.bits_done = 0;
        self.state = State::Transmit;
        self.drive_next_bit();
    }

    fn drive_next_bit(&mut self) {
        let bit = (self.cur_byte >> (7 - self.bits_done)) & 1 != 0;
        self.sda = LineState::Driven(bit);
        self.bits_done += 1;
    }

    /// Falling clock edge: the one place data may change.
    fn on_falling_edge(&mut self) {
        match self.state {
            State::Start => {
                if self.start_sent {
                    self.start_sent = false;
                    self.load_byte(0);
                }
            }
            State::Transmit => {
                if self.bits_done < 8 {
                    self.drive_next_bit();
                } else {
                    // Ninth period: hand the line to the slave.
                    self.sda = LineState::Released;
                    self.state = State::Acknowledge;
                }
            }
            State::Acknowledge => {
                if self.ack && self.byte_idx < 2 {
                    self.load_byte(self.byte_idx + 1);
                } else {
                    // Byte three ACKed, or any NACK: line low so the stop
                    // condition can release it while the clock is high.
                    self.sda = LineState::Driven(false);
                    self.state = State::Stop;
                }
            }
            State::Stop | State::BusFree | State::Final => {}
        }
    }

    /// Middle of a clock-high phase: start/stop conditions and ACK sampling.
    fn on_mid_high(&mut self, sda_in: bool) {
        match self.state {
            State::Start => {
                // Start condition: data falls while the clock is high.
                self.sda = LineState::Driven(false);
                self.start_sent = true;
            }
            State::Acknowledge => {
                // Slave pulls low to acknowledge.
                self.ack = !sda_in;
            }
            State::Stop => {
                // Stop condition: data rises while the clock is high.
                self.sda = LineState::Released;
                let complete = self.ack && self.byte_idx == 2;
                if complete {
                    self.status |= 1 << self.param;
                    self.param += 1;
                }
                if self.param == self.table.len() {
                    self.state = State::Final;
                } else {
                    self.state = State::BusFree;
                    self.pause_toggles = 0;
                }
                self.scl_ctr = 0;
            }
            State::Transmit | State::BusFree | State::Final => {}
        }
    }

    /// Advance one reference-clock tick. `sda_in` is the resolved level of
    /// the shared data line before this edge.
    pub fn tick(&mut self, sda_in: bool) {
        match self.state {
            State::Final => return,
            State::BusFree => {
                // Clock held high; the divider keeps running to time the
                // bus-free interval in toggle-equivalents.
                self.scl_ctr += 1;
                if self.scl_ctr >= self.scl_half {
                    self.scl_ctr = 0;
                    self.pause_toggles += 1;
                    if self.pause_toggles >= BUS_FREE_TOGGLES {
                        self.state = State::Start;
                    }
                }
                return;
            }
            _ => {}
        }
        self.scl_ctr += 1;
        if self.scl && self.scl_ctr == self.scl_half / 2 {
            self.on_mid_high(sda_in);
            return;
        }
        if self.scl_ctr >= self.scl_half {
            self.scl_ctr = 0;
            self.scl = !self.scl;
            if !self.scl {
                self.on_falling_edge();
            }
        }
    }
}
