//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};

use super::{BusKind, Lps2xInterface};

/// Default 7-bit address (SDO/SA0 pulled high).
pub const DEFAULT_I2C_ADDRESS: SevenBitAddress = 0x5D;
/// Alternate 7-bit address (SDO/SA0 pulled low).
pub const ALTERNATE_I2C_ADDRESS: SevenBitAddress = 0x5C;

/// I2C-based interface implementation for the LPS2X driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: SevenBitAddress,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface for the device at `address`.
    pub const fn new(i2c: I2C, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Returns the 7-bit address in use.
    pub const fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Lps2xInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn bus_kind(&self) -> BusKind {
        BusKind::I2c
    }

    /// Addresses the device with an empty write; a missing ACK surfaces as a bus error.
    ///
    /// Some HALs refuse zero-length writes and report their own error here, in
    /// which case `init` fails even with the chip present. Wrap the bus in a
    /// custom [`Lps2xInterface`] to skip this check on such targets.
    fn begin(&mut self) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[])
    }

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        self.i2c.write_read(self.address, &[register], buf)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        let sub_address = [register];
        let mut operations = [Operation::Write(&sub_address), Operation::Write(data)];
        self.i2c.transaction(self.address, &mut operations)
    }
}
