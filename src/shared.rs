use core::fmt;

use crate::common::{mode, ReadDirection, GLYPH_ROWS};
use crate::{BusMutex, Error, Lcd, Transport};

/// A display bound to a transport shared through a [`BusMutex`].
///
/// Each operation holds the lock for its entire duration, so operations of different displays on
/// the same bus never interleave, even though each of them spans many bus transfers.
///
/// ```
/// use core::cell::RefCell;
/// use hd44780_pcf8574::{Error, Lcd, SharedLcd, Transport};
///
/// fn status<T: Transport>(bus: T) -> Result<(), Error<T::Error>> {
///     let bus = RefCell::new(bus);
///     let top = Lcd::new().init(&mut *bus.borrow_mut(), 0x27, true)?;
///     let bottom = Lcd::new().init(&mut *bus.borrow_mut(), 0x26, true)?;
///
///     let top = SharedLcd::new(top, &bus);
///     let bottom = SharedLcd::new(bottom, &bus);
///     top.print_str("temperature")?;
///     bottom.print_str("21.5 C")?;
///     Ok(())
/// }
/// ```
pub struct SharedLcd<'a, M> {
    lcd: Lcd<mode::Ready>,
    bus: &'a M,
}

impl<'a, M, T> SharedLcd<'a, M>
where
    T: Transport,
    M: BusMutex<Bus = T>,
{
    pub fn new(lcd: Lcd<mode::Ready>, bus: &'a M) -> Self {
        Self { lcd, bus }
    }

    /// Unbind the display from the bus.
    pub fn into_inner(self) -> Lcd<mode::Ready> {
        self.lcd
    }

    pub fn lcd(&self) -> &Lcd<mode::Ready> {
        &self.lcd
    }

    pub fn command(&self, cmd: u8) -> Result<(), Error<T::Error>> {
        self.bus.lock(|bus| self.lcd.command(bus, cmd))
    }

    pub fn data(&self, byte: u8) -> Result<(), Error<T::Error>> {
        self.bus.lock(|bus| self.lcd.data(bus, byte))
    }

    pub fn clear(&self) -> Result<(), Error<T::Error>> {
        self.bus.lock(|bus| self.lcd.clear(bus))
    }

    pub fn display_off(&mut self, backlight: bool) -> Result<(), Error<T::Error>> {
        let lcd = &mut self.lcd;
        self.bus.lock(|bus| lcd.display_off(bus, backlight))
    }

    pub fn display_on(&self) -> Result<(), Error<T::Error>> {
        self.bus.lock(|bus| self.lcd.display_on(bus))
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        let lcd = &mut self.lcd;
        self.bus.lock(|bus| lcd.set_backlight(bus, on))
    }

    pub fn set_cursor(&self, row: u8, col: u8) -> Result<(), Error<T::Error>> {
        self.bus.lock(|bus| self.lcd.set_cursor(bus, row, col))
    }

    /// Print bytes up to the first NUL, holding the bus for the whole text.
    pub fn print(&self, text: &[u8]) -> Result<(), Error<T::Error>> {
        self.bus.lock(|bus| self.lcd.print(bus, text))
    }

    pub fn print_str(&self, text: &str) -> Result<(), Error<T::Error>> {
        self.bus.lock(|bus| self.lcd.print_str(bus, text))
    }

    pub fn store_glyph(&self, pattern: &[u8; GLYPH_ROWS], index: u8) -> Result<(), Error<T::Error>> {
        self.bus.lock(|bus| self.lcd.store_glyph(bus, pattern, index))
    }

    pub fn print_glyph(&self, index: u8) -> Result<(), Error<T::Error>> {
        self.bus.lock(|bus| self.lcd.print_glyph(bus, index))
    }

    pub fn read_ddram(
        &self,
        buf: &mut [u8],
        address: u8,
        direction: ReadDirection,
    ) -> Result<(), Error<T::Error>> {
        self.bus
            .lock(|bus| self.lcd.read_ddram(bus, buf, address, direction))
    }

    pub fn query_busy(&self) -> Result<bool, Error<T::Error>> {
        self.bus.lock(|bus| self.lcd.query_busy(bus))
    }
}

impl<'a, M, T> fmt::Write for SharedLcd<'a, M>
where
    T: Transport,
    M: BusMutex<Bus = T>,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print_str(s).map_err(|_| fmt::Error)
    }
}
