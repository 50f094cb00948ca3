//! Framing of controller bytes into expander transfers.
//!
//! Only the four upper expander lines reach the controller's data bus, so each byte travels as two
//! nibbles, high nibble first.  Every nibble is its own bus transfer:
//!
//! 1. write the nibble with `EN` low,
//! 2. write it again with `EN` high and hold for the enable pulse width,
//! 3. write it with `EN` low again, latching it into the controller,
//! 4. stop and let the controller settle.
use crate::bus::{Ack, Direction, Transport};
use crate::common::{line, Register};
use crate::{Config, Error, Settle};

/// Everything a transfer needs to know about the display it talks to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Link {
    pub address: u8,
    pub backlight: bool,
    pub config: Config,
}

impl Link {
    fn backlight_bit(&self) -> u8 {
        if self.backlight {
            line::BL
        } else {
            0
        }
    }
}

pub(crate) trait FrameExt: Transport {
    /// Clock one nibble (already in the data line positions) into the controller.
    fn write_nibble(&mut self, link: &Link, lines: u8) -> Result<(), Self::Error> {
        let lines = lines & !line::EN;
        self.start(link.address, Direction::Write)?;
        self.write(lines)?;
        self.write(lines | line::EN)?;
        self.delay_us(link.config.enable_pulse_us);
        self.write(lines)?;
        self.stop()
    }

    /// Write one byte to `register`, settling according to the link's configuration.
    fn write_byte(
        &mut self,
        link: &Link,
        register: Register,
        byte: u8,
    ) -> Result<(), Error<Self::Error>> {
        log::trace!("lcd {:#04x}: {:?} {:#04x}", link.address, register, byte);
        let control = register.bits() | link.backlight_bit();

        self.write_nibble(link, (byte & line::DATA) | control)
            .map_err(Error::Transport)?;
        if let Settle::Delay { ms } = link.config.settle {
            self.delay_ms(ms);
        }

        self.write_nibble(link, (byte << 4) | control)
            .map_err(Error::Transport)?;
        match link.config.settle {
            Settle::Delay { ms } => {
                self.delay_ms(ms);
                Ok(())
            }
            Settle::PollBusy { max_polls } => self.wait_ready(link, max_polls),
        }
    }

    /// Poll the busy flag until it clears.
    ///
    /// In 4-bit mode every read takes two enable pulses.  Each poll clocks out the low nibble
    /// after the flag so the controller is back at a byte boundary before the next transfer.
    fn wait_ready(&mut self, link: &Link, max_polls: u16) -> Result<(), Error<Self::Error>> {
        for _ in 0..max_polls {
            let busy = self.read_busy(link).map_err(Error::Transport)?;
            self.skip_read_nibble(link).map_err(Error::Transport)?;
            if !busy {
                return Ok(());
            }
        }
        log::warn!(
            "lcd {:#04x}: still busy after {} polls",
            link.address,
            max_polls
        );
        Err(Error::BusyTimeout)
    }

    /// Read the busy flag (bit 7 of the expander port while the controller drives the bus).
    fn read_busy(&mut self, link: &Link) -> Result<bool, Self::Error> {
        let bl = link.backlight_bit();
        self.start(link.address, Direction::Write)?;
        self.write(line::RW | bl)?;
        self.write(line::RW | line::EN | bl)?;

        self.start(link.address, Direction::Read)?;
        let status = self.read(Ack::Final)?;

        self.start(link.address, Direction::Write)?;
        self.write(bl)?;
        self.stop()?;
        Ok(status & 0x80 != 0)
    }

    /// Pulse `EN` once more with `RW` high, discarding the nibble the controller presents.
    fn skip_read_nibble(&mut self, link: &Link) -> Result<(), Self::Error> {
        let bl = link.backlight_bit();
        self.start(link.address, Direction::Write)?;
        self.write(line::RW | bl)?;
        self.write(line::RW | line::EN | bl)?;
        self.delay_us(link.config.enable_pulse_us);
        self.write(bl)?;
        self.stop()
    }

    /// Run a data-register read cycle, filling all of `buf` with port snapshots.
    ///
    /// Every byte but the last is acknowledged.  `buf` must not be empty.
    fn read_data(&mut self, link: &Link, buf: &mut [u8]) -> Result<(), Self::Error> {
        debug_assert!(!buf.is_empty());
        let bl = link.backlight_bit();
        self.start(link.address, Direction::Write)?;
        self.write(line::RS | line::RW | bl)?;
        self.write(line::RS | line::RW | line::EN | bl)?;

        self.start(link.address, Direction::Read)?;
        let last = buf.len() - 1;
        for (i, byte) in buf.iter_mut().enumerate() {
            let ack = if i == last { Ack::Final } else { Ack::Continue };
            *byte = self.read(ack)?;
        }

        self.start(link.address, Direction::Write)?;
        self.write(line::RS | bl)?;
        self.stop()
    }

    /// Drive only the backlight line, leaving the controller untouched.
    fn write_backlight(&mut self, link: &Link) -> Result<(), Self::Error> {
        self.start(link.address, Direction::Write)?;
        self.write(link.backlight_bit())?;
        self.stop()
    }
}

impl<T: Transport + ?Sized> FrameExt for T {}
