/// Expander output lines.
///
/// The PCF8574 has no registers: every byte written to it drives all eight lines at once, so each
/// byte has to carry the complete state of the control lines as well as the data nibble.
///
/// | Bit | Line |
/// | --- | --- |
/// | 0 | `RS` (register select) |
/// | 1 | `RW` (read / not write) |
/// | 2 | `EN` (enable strobe) |
/// | 3 | `BL` (backlight) |
/// | 4..=7 | `D4`..=`D7` |
pub mod line {
    pub const RS: u8 = 1 << 0;
    pub const RW: u8 = 1 << 1;
    pub const EN: u8 = 1 << 2;
    pub const BL: u8 = 1 << 3;
    /// Mask of the four data lines.
    pub const DATA: u8 = 0xf0;
}

/// HD44780 instruction set, as far as this driver uses it.
pub mod command {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    /// Sent as the first instruction after power-on to switch the controller into 4-bit mode.
    pub const FOUR_BIT_MODE: u8 = 0x02;

    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    pub const CURSOR_SHIFT: u8 = 0x10;
    pub const SHIFT_RIGHT: u8 = 0x04;

    pub const FUNCTION_SET: u8 = 0x20;
    pub const TWO_LINES: u8 = 0x08;

    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// Set-DDRAM-address instruction for the first column of each row.
///
/// Rows 2 and 3 of four-line modules continue rows 0 and 1 in the controller's memory, hence the
/// odd offsets.
pub const ROW_ADDRESSES: [u8; 4] = [0x80, 0xc0, 0x94, 0xd4];

/// Number of programmable glyphs in CGRAM.  Glyph indices wrap around this value.
pub const GLYPH_SLOTS: u8 = 8;

/// Number of pattern rows making up one CGRAM glyph.
pub const GLYPH_ROWS: usize = 8;

/// Which controller register a byte is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Instruction register (`RS` low).
    Command,
    /// Data register (`RS` high).
    Data,
}

impl Register {
    pub(crate) fn bits(self) -> u8 {
        match self {
            Register::Command => 0,
            Register::Data => line::RS,
        }
    }
}

/// Direction in which the address counter moves while reading DDRAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadDirection {
    /// Towards lower addresses (leftwards).
    Decrement,
    /// Towards higher addresses (rightwards).
    Increment,
}

impl ReadDirection {
    pub(crate) fn shift_command(self) -> u8 {
        match self {
            ReadDirection::Decrement => command::CURSOR_SHIFT,
            ReadDirection::Increment => command::CURSOR_SHIFT | command::SHIFT_RIGHT,
        }
    }
}

/// Appearance of the cursor, baked into the display-control instruction during initialization.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorStyle {
    /// Underline cursor shown.
    pub visible: bool,
    /// Cursor cell blinking.
    pub blink: bool,
}

impl CursorStyle {
    /// Display-control instruction turning the display on with this cursor style.
    pub(crate) fn display_on_command(self) -> u8 {
        let mut cmd = command::DISPLAY_CONTROL | command::DISPLAY_ON;
        if self.visible {
            cmd |= command::CURSOR_ON;
        }
        if self.blink {
            cmd |= command::BLINK_ON;
        }
        cmd
    }
}

/// Display handle states
pub mod mode {
    /// Handle that has not been brought up yet.  Only configuration is possible.
    #[derive(Debug, Clone, Copy)]
    pub struct Uninitialized;

    /// Handle whose display is in 4-bit mode and accepts all operations.
    #[derive(Debug, Clone, Copy)]
    pub struct Ready;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_on_command() {
        assert_eq!(CursorStyle::default().display_on_command(), 0x0c);
        let style = CursorStyle {
            visible: true,
            blink: false,
        };
        assert_eq!(style.display_on_command(), 0x0e);
        let style = CursorStyle {
            visible: true,
            blink: true,
        };
        assert_eq!(style.display_on_command(), 0x0f);
    }

    #[test]
    fn shift_command() {
        assert_eq!(ReadDirection::Decrement.shift_command(), 0x10);
        assert_eq!(ReadDirection::Increment.shift_command(), 0x14);
    }

    #[test]
    fn register_select() {
        assert_eq!(Register::Command.bits(), 0);
        assert_eq!(Register::Data.bits(), line::RS);
    }
}
