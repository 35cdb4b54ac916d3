//! I2C master
//!
//! The navigation controller is the only master. It talks to one device,
//! the encoder controller, with short writes (a command byte) and short
//! reads (a fixed-size answer).

/// Blocking I2C master
///
/// Every call must return within a bounded time, for example through the
/// peripheral's clock-stretch or bus-idle timeout. Callers only enforce
/// deadlines between transactions.
pub trait I2cBus {
    /// NACK, arbitration loss or bus fault
    type Error;

    /// Send `data` to the 7-bit `address`
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buf` from the 7-bit `address`; `buf.len()` is the byte count
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}
