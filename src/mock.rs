//! Recording transport used by the unit tests.

use crate::bus::{Ack, Direction, Transport};
use crate::common::{line, Register};
use std::collections::VecDeque;

/// Delay provider that returns immediately.
pub struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start(u8, Direction),
    Write(u8),
    Read(Ack),
    Stop,
    DelayUs(u32),
    DelayMs(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Transport that records every call and answers reads from a script.
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    /// Bytes returned by reads, in order.  Reads return 0 once exhausted.
    pub reads: VecDeque<u8>,
    /// Fail the n-th write (0-based).
    pub fail_write: Option<usize>,
    writes: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reads(reads: &[u8]) -> Self {
        Self {
            reads: reads.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Forget everything recorded so far, including the write count used by `fail_write`.
    pub fn clear(&mut self) {
        self.events.clear();
        self.writes = 0;
    }

    pub fn written(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Write(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn acks(&self) -> Vec<Ack> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Read(ack) => Some(*ack),
                _ => None,
            })
            .collect()
    }

    /// Decode the recorded stream back into framed bytes.
    pub fn frames(&self) -> Vec<Frame> {
        decode(&self.events)
    }
}

impl Transport for Recorder {
    type Error = MockError;

    fn start(&mut self, address: u8, direction: Direction) -> Result<(), MockError> {
        self.events.push(Event::Start(address, direction));
        Ok(())
    }

    fn write(&mut self, byte: u8) -> Result<(), MockError> {
        let n = self.writes;
        self.writes += 1;
        if self.fail_write == Some(n) {
            return Err(MockError);
        }
        self.events.push(Event::Write(byte));
        Ok(())
    }

    fn read(&mut self, ack: Ack) -> Result<u8, MockError> {
        self.events.push(Event::Read(ack));
        Ok(self.reads.pop_front().unwrap_or(0))
    }

    fn stop(&mut self) -> Result<(), MockError> {
        self.events.push(Event::Stop);
        Ok(())
    }

    fn delay_us(&mut self, us: u32) {
        self.events.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(Event::DelayMs(ms));
    }
}

/// One byte as seen by the controller, reassembled from two nibble transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub address: u8,
    pub register: Register,
    pub byte: u8,
    pub backlight: bool,
}

impl Frame {
    pub fn command(address: u8, byte: u8, backlight: bool) -> Self {
        Self {
            address,
            register: Register::Command,
            byte,
            backlight,
        }
    }

    pub fn data(address: u8, byte: u8, backlight: bool) -> Self {
        Self {
            address,
            register: Register::Data,
            byte,
            backlight,
        }
    }
}

/// Finds every complete nibble transfer
/// (`start, write x, write x|EN, delay, write x, stop`) and pairs them up into bytes.
///
/// Panics if the nibbles of one byte disagree on their control lines.
fn decode(events: &[Event]) -> Vec<Frame> {
    let mut nibbles = Vec::new();
    let mut i = 0;
    while i + 6 <= events.len() {
        match &events[i..i + 6] {
            [Event::Start(address, Direction::Write), Event::Write(a), Event::Write(b), Event::DelayUs(_), Event::Write(c), Event::Stop]
                if *b == *a | line::EN && c == a && *a & (line::EN | line::RW) == 0 =>
            {
                nibbles.push((*address, *a));
                i += 6;
            }
            _ => i += 1,
        }
    }
    assert!(nibbles.len() % 2 == 0, "dangling nibble in {:?}", events);

    nibbles
        .chunks(2)
        .map(|pair| {
            let (address, high) = pair[0];
            let (_, low) = pair[1];
            assert_eq!(high & !line::DATA, low & !line::DATA, "control lines changed mid-byte");
            Frame {
                address,
                register: if high & line::RS != 0 {
                    Register::Data
                } else {
                    Register::Command
                },
                byte: (high & line::DATA) | (low >> 4),
                backlight: high & line::BL != 0,
            }
        })
        .collect()
}
