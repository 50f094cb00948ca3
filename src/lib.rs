//! Driver for HD44780 character LCDs attached through a PCF8574 I2C port-expander, the usual
//! "I2C backpack" found on 16x2 and 20x4 modules.
//!
//! The controller is driven in 4-bit mode: each byte is clocked in as two nibbles, with the
//! register select, read/write, enable and backlight lines sharing the expander byte with the
//! data nibble.
//!
//! A display is represented by an [`Lcd`] handle which holds only its own state.  The bus is
//! passed to every operation as a [`Transport`]; [`I2cTransport`] provides one for any
//! `embedded-hal` I2C bus and delay.  To share a bus between displays in different places, see
//! [`SharedLcd`] and [`BusMutex`].
#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod address;
mod bus;
mod common;
mod config;
mod error;
mod frame;
mod lcd;
mod mutex;
mod shared;

#[cfg(test)]
mod mock;

pub use bus::{Ack, Direction, I2cTransport, Transport};
pub use common::{command, line, mode};
pub use common::{CursorStyle, ReadDirection, Register, GLYPH_ROWS, GLYPH_SLOTS, ROW_ADDRESSES};
pub use config::{Config, Settle, DEFAULT_ENABLE_PULSE_US, DEFAULT_SETTLE_MS};
pub use error::Error;
pub use lcd::Lcd;
pub use mutex::BusMutex;
pub use shared::SharedLcd;
