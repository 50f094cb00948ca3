/// Lock around a [`Transport`][crate::Transport] shared by several displays.
///
/// A [`SharedLcd`][crate::SharedLcd] takes the lock once per display operation and keeps it
/// until the last nibble of that operation has been clocked in.  Printing a line on one display
/// therefore never gets interleaved with a cursor move on another display behind the same bus.
///
/// Provided implementations:
///
/// - [`core::cell::RefCell`]: displays driven from a single execution context.
/// - `std::sync::Mutex` (feature `std`): displays driven from several threads.
/// - `critical_section::Mutex<RefCell<_>>` (feature `critical-section`): displays driven from
///   both the main loop and interrupt handlers.
///
/// Any other lock can be plugged in by implementing [`lock()`][BusMutex::lock] on a newtype:
///
/// ```
/// use hd44780_pcf8574::BusMutex;
///
/// /// Bus that counts how many display operations ran on it.
/// struct Counted<T> {
///     bus: core::cell::RefCell<T>,
///     ops: core::cell::Cell<u32>,
/// }
///
/// impl<T> BusMutex for Counted<T> {
///     type Bus = T;
///
///     fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
///         self.ops.set(self.ops.get() + 1);
///         f(&mut self.bus.borrow_mut())
///     }
/// }
/// ```
pub trait BusMutex {
    /// The transport behind the lock.
    type Bus;

    /// Run `f` with exclusive access to the transport.
    fn lock<R, F: FnOnce(&mut Self::Bus) -> R>(&self, f: F) -> R;
}

impl<T> BusMutex for core::cell::RefCell<T> {
    type Bus = T;

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        f(&mut self.borrow_mut())
    }
}

#[cfg(any(test, feature = "std"))]
impl<T> BusMutex for std::sync::Mutex<T> {
    type Bus = T;

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        // A panic in another display operation leaves the bus mid-transfer either way; the next
        // operation starts with a fresh start condition.
        let mut bus = match self.lock() {
            Ok(bus) => bus,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut bus)
    }
}

#[cfg(feature = "critical-section")]
impl<T> BusMutex for critical_section::Mutex<core::cell::RefCell<T>> {
    type Bus = T;

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        critical_section::with(|cs| f(&mut self.borrow_ref_mut(cs)))
    }
}
