use embedded_hal::delay::DelayNs;
use embedded_hal::i2c as hal_i2c;

/// Transfer direction selected when addressing the expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Write,
    Read,
}

/// Acknowledge behaviour of a single read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// Acknowledge the byte, more bytes will be read.
    Continue,
    /// Do not acknowledge the byte, ending the read.
    Final,
}

/// Byte-level I2C master plus the blocking delays the display timing needs.
///
/// All operations block.  Implementations are free to retry addressing until the device answers;
/// the driver never inspects anything but the returned error.
pub trait Transport {
    type Error;

    /// Address the device at the 7-bit `address` for a transfer in `direction`.
    fn start(&mut self, address: u8, direction: Direction) -> Result<(), Self::Error>;

    /// Write one byte to the currently addressed device.
    fn write(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Read one byte from the currently addressed device.
    fn read(&mut self, ack: Ack) -> Result<u8, Self::Error>;

    /// End the current transfer.
    fn stop(&mut self) -> Result<(), Self::Error>;

    fn delay_us(&mut self, us: u32);

    fn delay_ms(&mut self, ms: u32);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn start(&mut self, address: u8, direction: Direction) -> Result<(), Self::Error> {
        T::start(self, address, direction)
    }
    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        T::write(self, byte)
    }
    fn read(&mut self, ack: Ack) -> Result<u8, Self::Error> {
        T::read(self, ack)
    }
    fn stop(&mut self) -> Result<(), Self::Error> {
        T::stop(self)
    }
    fn delay_us(&mut self, us: u32) {
        T::delay_us(self, us)
    }
    fn delay_ms(&mut self, ms: u32) {
        T::delay_ms(self, ms)
    }
}

/// [`Transport`] on top of an `embedded-hal` I2C bus and delay provider.
///
/// `embedded-hal` only knows complete transactions, so every byte written becomes a one-byte
/// write transaction and every byte read a one-byte read transaction (the HAL terminates it with
/// a NAK on its own).  The PCF8574 latches each byte on its own, so the lines see exactly the same
/// sequence of states.
pub struct I2cTransport<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    direction: Direction,
}

impl<I2C, D> I2cTransport<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: 0,
            direction: Direction::Write,
        }
    }

    /// Give back the wrapped bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> Transport for I2cTransport<I2C, D>
where
    I2C: hal_i2c::I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn start(&mut self, address: u8, direction: Direction) -> Result<(), Self::Error> {
        self.address = address;
        self.direction = direction;
        Ok(())
    }

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        debug_assert_eq!(self.direction, Direction::Write);
        self.i2c.write(self.address, &[byte])
    }

    fn read(&mut self, _ack: Ack) -> Result<u8, Self::Error> {
        debug_assert_eq!(self.direction, Direction::Read);
        let mut buf = [0x00];
        self.i2c.read(self.address, &mut buf)?;
        Ok(buf[0])
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{Ack, Direction, I2cTransport, Transport};
    use crate::mock::NoDelay;
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    #[test]
    fn writes_are_single_byte_transactions() {
        let expectations = [
            mock_i2c::Transaction::write(0x27, vec![0x28]),
            mock_i2c::Transaction::write(0x27, vec![0x2c]),
            mock_i2c::Transaction::write(0x27, vec![0x28]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut transport = I2cTransport::new(bus.clone(), NoDelay);
        transport.start(0x27, Direction::Write).unwrap();
        transport.write(0x28).unwrap();
        transport.write(0x2c).unwrap();
        transport.delay_us(1);
        transport.write(0x28).unwrap();
        transport.stop().unwrap();

        bus.done();
    }

    #[test]
    fn reads_follow_last_address() {
        let expectations = [
            mock_i2c::Transaction::write(0x3f, vec![0x0b]),
            mock_i2c::Transaction::read(0x3f, vec![0x80]),
            mock_i2c::Transaction::read(0x3f, vec![0x41]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut transport = I2cTransport::new(bus.clone(), NoDelay);
        transport.start(0x3f, Direction::Write).unwrap();
        transport.write(0x0b).unwrap();
        transport.start(0x3f, Direction::Read).unwrap();
        assert_eq!(transport.read(Ack::Continue).unwrap(), 0x80);
        assert_eq!(transport.read(Ack::Final).unwrap(), 0x41);

        let (_i2c, _delay) = transport.release();
        bus.done();
    }
}
