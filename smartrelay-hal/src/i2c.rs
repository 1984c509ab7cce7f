//! I2C bus abstractions
//!
//! Provides the master-side trait the protocol client needs, plus an
//! adapter for buses that already implement `embedded_hal::i2c::I2c`.

/// I2C bus master
///
/// The Smart Relay protocol is strictly write-then-read: a command frame is
/// written to the device address, then the fixed-length response is read
/// back in a separate transaction. Only these two operations are required.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// Sends exactly `data`, blocking until the transfer is accepted or
    /// fails (NACK, arbitration loss, timeout).
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// Attempts to fill `buf` and returns the number of bytes actually
    /// read. Most bus implementations either fill the whole buffer or
    /// fail, but a short read is representable so the caller can detect a
    /// response that ended early instead of consuming stale bytes.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Adapter implementing [`I2cBus`] for any `embedded_hal::i2c::I2c` bus
///
/// `embedded-hal` reads fill the whole buffer or fail, so a successful
/// read always reports the full length.
#[cfg(feature = "embedded-hal")]
pub struct EmbeddedHalBus<I2C>(pub I2C);

#[cfg(feature = "embedded-hal")]
impl<I2C> EmbeddedHalBus<I2C> {
    /// Wrap an embedded-hal bus
    pub fn new(bus: I2C) -> Self {
        Self(bus)
    }

    /// Recover the wrapped bus
    pub fn into_inner(self) -> I2C {
        self.0
    }
}

#[cfg(feature = "embedded-hal")]
impl<I2C: embedded_hal::i2c::I2c> I2cBus for EmbeddedHalBus<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.0.read(address, buf)?;
        Ok(buf.len())
    }
}
