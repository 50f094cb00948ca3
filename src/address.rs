//! Bus addresses of the expander variants found on LCD backpacks.
//!
//! All addresses in this crate are 7-bit.  Code written for 8-bit addressing (for example the
//! common `0x4E`) uses the 7-bit address shifted left by one (`0x27`).

/// `PCF8574`: `0x20..=0x27`, selected by the A0..A2 pins.
pub const fn pcf8574(a0: bool, a1: bool, a2: bool) -> u8 {
    0x20 | straps(a0, a1, a2)
}

/// `PCF8574A`: `0x38..=0x3f`, selected by the A0..A2 pins.
pub const fn pcf8574a(a0: bool, a1: bool, a2: bool) -> u8 {
    0x38 | straps(a0, a1, a2)
}

const fn straps(a0: bool, a1: bool, a2: bool) -> u8 {
    ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8)
}

#[cfg(test)]
mod tests {
    #[test]
    fn pcf8574() {
        assert_eq!(super::pcf8574(false, false, false), 0x20);
        assert_eq!(super::pcf8574(true, false, false), 0x21);
        // Most backpacks leave all address pins pulled up.
        assert_eq!(super::pcf8574(true, true, true), 0x27);
    }

    #[test]
    fn pcf8574a() {
        assert_eq!(super::pcf8574a(true, false, false), 0x39);
        assert_eq!(super::pcf8574a(true, true, true), 0x3f);
    }
}
