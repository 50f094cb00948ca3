use core::fmt;

/// Errors returned by display operations.
///
/// `E` is the error type of the underlying [`Transport`][crate::Transport].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport failed.  The operation was abandoned part-way through.
    Transport(E),
    /// The row is outside `0..4` or the column runs past the end of the address space.
    InvalidCursorPosition { row: u8, col: u8 },
    /// DDRAM addresses are 7 bits wide.
    InvalidDdramAddress(u8),
    /// The busy flag did not clear within the configured number of polls.
    BusyTimeout,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport error: {:?}", e),
            Error::InvalidCursorPosition { row, col } => {
                write!(f, "invalid cursor position row {} col {}", row, col)
            }
            Error::InvalidDdramAddress(addr) => write!(f, "invalid DDRAM address {:#04x}", addr),
            Error::BusyTimeout => f.write_str("display stayed busy"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}
