//! Abstract flash device contract.
//!
//! This is the only thing a caller has to implement. Everything else in this
//! crate treats the device opaquely: it erases whole sectors, it programs
//! (bitwise-ANDs) bytes into a region that must not already contain zero
//! bits the caller wants cleared back to one, and it reads bytes back.

/// A NOR-flash-shaped storage device.
///
/// All addresses passed to these methods are absolute byte offsets into the
/// underlying medium; the partition base offset has already been applied by
/// the caller (`RingStore`).
///
/// Implementors own whatever driver state is needed to talk to the physical
/// part (or, for tests, a `Vec<u8>`). `RingStore` never reenters these
/// methods from within themselves, and never calls them from more than one
/// thread at a time.
pub trait Flash {
    /// Erase the sector containing `address` back to all-ones.
    fn erase(&mut self, address: u32) -> Result<(), ()>;

    /// Bitwise-AND `data` into the device starting at `address`.
    ///
    /// Must only be used to clear bits from one to zero; the result of
    /// trying to set an already-zero bit back to one is device-defined (on
    /// real NOR flash it silently fails to do so).
    fn program(&mut self, address: u32, data: &[u8]) -> Result<(), ()>;

    /// Read `buf.len()` bytes starting at `address`.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), ()>;
}
