use core::marker::PhantomData;

use crate::common::{command, mode, CursorStyle, ReadDirection, Register};
use crate::common::{GLYPH_ROWS, GLYPH_SLOTS, ROW_ADDRESSES};
use crate::frame::{FrameExt, Link};
use crate::{Config, Error, Settle, Transport};

/// Handle for one HD44780 display behind a PCF8574 expander.
///
/// The handle only holds the per-display state (bus address, backlight, cursor style, timing);
/// the bus itself is passed to every operation.  This way any number of displays can share one
/// bus, each identified by its own address.
///
/// A handle starts out [`Uninitialized`][mode::Uninitialized], where only the configuration can
/// be changed.  [`init()`][Lcd::init] brings the display up and turns the handle into a
/// [`Ready`][mode::Ready] one which offers all other operations.
///
/// ```
/// use hd44780_pcf8574::{Error, Lcd, Transport};
///
/// fn hello<T: Transport>(bus: &mut T) -> Result<(), Error<T::Error>> {
///     let mut lcd = Lcd::new();
///     lcd.set_cursor_style(true, false);
///     let lcd = lcd.init(bus, 0x27, true)?;
///
///     lcd.clear(bus)?;
///     lcd.set_cursor(bus, 1, 3)?;
///     lcd.print(bus, b"Hello")?;
///     Ok(())
/// }
/// ```
///
/// Handles are not `Copy`: a copy would keep its own backlight state and fall out of step with
/// the display after [`set_backlight()`][Lcd::set_backlight] on the original.
///
/// ```compile_fail
/// fn copied(lcd: hd44780_pcf8574::Lcd<hd44780_pcf8574::mode::Ready>) {
///     let a = lcd;
///     let b = lcd;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Lcd<MODE> {
    address: u8,
    backlight: bool,
    cursor: CursorStyle,
    config: Config,
    _m: PhantomData<MODE>,
}

impl Lcd<mode::Uninitialized> {
    pub const fn new() -> Self {
        Self {
            address: 0,
            backlight: false,
            cursor: CursorStyle {
                visible: false,
                blink: false,
            },
            config: Config::new(),
            _m: PhantomData,
        }
    }

    /// Replace the timing configuration.
    pub const fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Choose the cursor appearance applied by [`init()`][Lcd::init].
    ///
    /// This does not touch the bus.
    pub fn set_cursor_style(&mut self, visible: bool, blink: bool) {
        self.cursor = CursorStyle { visible, blink };
    }

    /// Bind the handle to the expander at `address` and put the display into 4-bit, two-line
    /// mode with the display turned on.
    ///
    /// The bring-up always waits the fixed settle time after each nibble: the busy flag cannot
    /// be read before the controller has been switched into 4-bit mode.
    pub fn init<T: Transport>(
        self,
        bus: &mut T,
        address: u8,
        backlight: bool,
    ) -> Result<Lcd<mode::Ready>, Error<T::Error>> {
        log::debug!(
            "lcd {:#04x}: init (backlight {}, cursor {:?})",
            address,
            backlight,
            self.cursor
        );
        let lcd = Lcd {
            address,
            backlight,
            cursor: self.cursor,
            config: self.config,
            _m: PhantomData,
        };

        let mut link = lcd.link();
        if let Settle::PollBusy { .. } = link.config.settle {
            link.config.settle = Settle::default();
        }
        for cmd in [
            command::FOUR_BIT_MODE,
            command::FUNCTION_SET | command::TWO_LINES,
            lcd.cursor.display_on_command(),
        ] {
            bus.write_byte(&link, Register::Command, cmd)?;
        }
        Ok(lcd)
    }
}

impl Default for Lcd<mode::Uninitialized> {
    fn default() -> Self {
        Self::new()
    }
}

impl<MODE> Lcd<MODE> {
    pub fn cursor_style(&self) -> CursorStyle {
        self.cursor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Lcd<mode::Ready> {
    /// 7-bit bus address of the expander.
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    fn link(&self) -> Link {
        Link {
            address: self.address,
            backlight: self.backlight,
            config: self.config,
        }
    }

    /// Send a raw instruction.
    pub fn command<T: Transport>(&self, bus: &mut T, cmd: u8) -> Result<(), Error<T::Error>> {
        bus.write_byte(&self.link(), Register::Command, cmd)
    }

    /// Write a raw byte to the data register at the current address.
    pub fn data<T: Transport>(&self, bus: &mut T, byte: u8) -> Result<(), Error<T::Error>> {
        bus.write_byte(&self.link(), Register::Data, byte)
    }

    /// Clear the display and return the cursor home.
    pub fn clear<T: Transport>(&self, bus: &mut T) -> Result<(), Error<T::Error>> {
        self.command(bus, command::CLEAR_DISPLAY)
    }

    /// Turn the display off and set the backlight state.
    ///
    /// The new backlight state is carried by the display-off instruction and every transfer after
    /// it.  Display contents are kept; [`display_on()`][Lcd::display_on] shows them again.
    pub fn display_off<T: Transport>(
        &mut self,
        bus: &mut T,
        backlight: bool,
    ) -> Result<(), Error<T::Error>> {
        log::debug!("lcd {:#04x}: display off (backlight {})", self.address, backlight);
        self.backlight = backlight;
        self.command(bus, command::DISPLAY_CONTROL)
    }

    /// Turn the display back on with the cursor style chosen before initialization.
    pub fn display_on<T: Transport>(&self, bus: &mut T) -> Result<(), Error<T::Error>> {
        log::debug!("lcd {:#04x}: display on", self.address);
        self.command(bus, self.cursor.display_on_command())
    }

    /// Switch the backlight immediately, without sending an instruction to the controller.
    pub fn set_backlight<T: Transport>(
        &mut self,
        bus: &mut T,
        on: bool,
    ) -> Result<(), Error<T::Error>> {
        self.backlight = on;
        bus.write_backlight(&self.link()).map_err(Error::Transport)
    }

    /// Move the cursor to `col` of `row`.
    ///
    /// Rows are looked up in [`ROW_ADDRESSES`]; rows beyond 3 and columns that would overflow the
    /// instruction are rejected.  Columns past the visible width are not detected.
    pub fn set_cursor<T: Transport>(
        &self,
        bus: &mut T,
        row: u8,
        col: u8,
    ) -> Result<(), Error<T::Error>> {
        let cmd = ROW_ADDRESSES
            .get(usize::from(row))
            .and_then(|base| base.checked_add(col))
            .ok_or(Error::InvalidCursorPosition { row, col })?;
        self.command(bus, cmd)
    }

    /// Print bytes at the cursor position.
    ///
    /// Printing stops at the first NUL byte, so NUL-terminated buffers can be passed as they
    /// are.  Bytes are sent as-is; which glyph they show depends on the display's character ROM.
    pub fn print<T: Transport>(&self, bus: &mut T, text: &[u8]) -> Result<(), Error<T::Error>> {
        let len = text.iter().position(|&b| b == 0).unwrap_or(text.len());
        for &byte in &text[..len] {
            self.data(bus, byte)?;
        }
        Ok(())
    }

    /// Print the bytes of a string slice, see [`print()`][Lcd::print].
    pub fn print_str<T: Transport>(&self, bus: &mut T, text: &str) -> Result<(), Error<T::Error>> {
        self.print(bus, text.as_bytes())
    }

    /// Program the custom glyph `index` (taken modulo 8) with a 5x8 pattern, one byte per row.
    ///
    /// Afterwards the address counter points into CGRAM, so call
    /// [`set_cursor()`][Lcd::set_cursor] before printing again.
    pub fn store_glyph<T: Transport>(
        &self,
        bus: &mut T,
        pattern: &[u8; GLYPH_ROWS],
        index: u8,
    ) -> Result<(), Error<T::Error>> {
        let slot = index % GLYPH_SLOTS;
        self.command(bus, command::SET_CGRAM_ADDR + slot * GLYPH_ROWS as u8)?;
        for &row in pattern {
            self.data(bus, row)?;
        }
        Ok(())
    }

    /// Print custom glyph `index` (taken modulo 8) at the cursor position.
    pub fn print_glyph<T: Transport>(&self, bus: &mut T, index: u8) -> Result<(), Error<T::Error>> {
        self.data(bus, index % GLYPH_SLOTS)
    }

    /// Read `buf.len()` bytes of display memory starting at the 7-bit DDRAM `address`.
    ///
    /// `address` is the raw DDRAM address (`0x00..=0x7f`), not a set-DDRAM instruction.  The
    /// [`ROW_ADDRESSES`] entries already carry the instruction bit, so the start of the second
    /// row is `0x40`, not `0xc0`; values with bit 7 set return
    /// [`Error::InvalidDdramAddress`].
    ///
    /// The address counter moves in `direction` while reading.  Reads past the end of DDRAM wrap
    /// around the way the controller does.  An empty `buf` does nothing.
    pub fn read_ddram<T: Transport>(
        &self,
        bus: &mut T,
        buf: &mut [u8],
        address: u8,
        direction: ReadDirection,
    ) -> Result<(), Error<T::Error>> {
        if address & command::SET_DDRAM_ADDR != 0 {
            return Err(Error::InvalidDdramAddress(address));
        }
        if buf.is_empty() {
            return Ok(());
        }
        self.command(bus, direction.shift_command())?;
        self.command(bus, command::SET_DDRAM_ADDR | address)?;
        bus.read_data(&self.link(), buf).map_err(Error::Transport)
    }

    /// Whether the controller is still executing an instruction.
    pub fn query_busy<T: Transport>(&self, bus: &mut T) -> Result<bool, Error<T::Error>> {
        bus.read_busy(&self.link()).map_err(Error::Transport)
    }
}
