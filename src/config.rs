//! Bus timing configuration.

/// Minimum enable pulse width of the controller.
pub const DEFAULT_ENABLE_PULSE_US: u32 = 1;
/// Fixed wait after each nibble, longer than the slowest instruction (clear) needs.
pub const DEFAULT_SETTLE_MS: u32 = 2;

/// How the driver waits for the controller to finish an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Settle {
    /// Wait a fixed number of milliseconds after every nibble.
    Delay { ms: u32 },
    /// Poll the busy flag after each complete byte, giving up after `max_polls` reads.
    ///
    /// Lower latency than [`Settle::Delay`], at the cost of extra bus traffic and a possible
    /// [`Error::BusyTimeout`][crate::Error::BusyTimeout].
    PollBusy { max_polls: u16 },
}

impl Default for Settle {
    fn default() -> Self {
        Settle::Delay {
            ms: DEFAULT_SETTLE_MS,
        }
    }
}

/// Timing configuration of a display handle.
///
/// ```
/// use hd44780_pcf8574::{Config, Settle};
///
/// let config = Config::new()
///     .enable_pulse_us(2)
///     .settle(Settle::PollBusy { max_polls: 100 });
/// assert_eq!(config.enable_pulse_us, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// How long `EN` is held high for each nibble.
    pub enable_pulse_us: u32,
    pub settle: Settle,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            enable_pulse_us: DEFAULT_ENABLE_PULSE_US,
            settle: Settle::Delay {
                ms: DEFAULT_SETTLE_MS,
            },
        }
    }

    pub const fn enable_pulse_us(mut self, us: u32) -> Self {
        self.enable_pulse_us = us;
        self
    }

    pub const fn settle(mut self, settle: Settle) -> Self {
        self.settle = settle;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
