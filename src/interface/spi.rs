//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.

use embedded_hal::spi::{Mode, Operation, SpiDevice, MODE_0};

use super::{BusKind, Lps2xInterface};

/// SPI mode the LPS2X expects (CPOL = 0, CPHA = 0, MSB first).
pub const SPI_MODE: Mode = MODE_0;
/// SPI clock the driver is validated at.
pub const SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// SPI-based interface implementation for the LPS2X driver.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    ///
    /// The device must already be configured for [`SPI_MODE`] at [`SPI_FREQUENCY_HZ`].
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Builds the command byte used to address registers over SPI.
    ///
    /// Bit 7 selects read, bit 6 (auto-increment) is passed through from `register`.
    fn command_byte(register: u8, is_read: bool) -> u8 {
        if is_read {
            register | 0x80
        } else {
            register & 0x7F
        }
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Lps2xInterface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn bus_kind(&self) -> BusKind {
        BusKind::Spi
    }

    fn begin(&mut self) -> core::result::Result<(), Self::Error> {
        // Chip select is owned by the SpiDevice; nothing to check.
        Ok(())
    }

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.write_many(register, core::slice::from_ref(&value))
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

        let command = [Self::command_byte(register, true)];
        let mut operations = [Operation::Write(&command), Operation::Read(buf)];
        self.spi.transaction(&mut operations)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        let command = [Self::command_byte(register, false)];
        let mut operations = [Operation::Write(&command), Operation::Write(data)];
        self.spi.transaction(&mut operations)
    }
}

#[cfg(test)]
mod tests {
    use super::SpiInterface;
    use crate::interface::Lps2xInterface;
    use embedded_hal_mock::eh1::spi::{Mock, Transaction};

    #[test]
    fn read_sets_read_bit() {
        let mock = Mock::new(&[
            Transaction::transaction_start(),
            Transaction::write_vec(vec![0x8F]),
            Transaction::read_vec(vec![0xBD]),
            Transaction::transaction_end(),
        ]);
        let mut interface = SpiInterface::new(mock);

        assert_eq!(interface.read_register(0x0F).unwrap(), 0xBD);
        interface.release().done();
    }

    #[test]
    fn auto_increment_bit_passes_through_on_read() {
        let mock = Mock::new(&[
            Transaction::transaction_start(),
            Transaction::write_vec(vec![0xEB]),
            Transaction::read_vec(vec![0x34, 0x12]),
            Transaction::transaction_end(),
        ]);
        let mut interface = SpiInterface::new(mock);

        let mut buffer = [0u8; 2];
        interface.read_many(0x2B | 0x80 | 0x40, &mut buffer).unwrap();
        assert_eq!(buffer, [0x34, 0x12]);
        interface.release().done();
    }

    #[test]
    fn write_clears_read_bit() {
        let mock = Mock::new(&[
            Transaction::transaction_start(),
            Transaction::write_vec(vec![0x20]),
            Transaction::write_vec(vec![0xC0]),
            Transaction::transaction_end(),
        ]);
        let mut interface = SpiInterface::new(mock);

        interface.write_register(0xA0, 0xC0).unwrap();
        interface.release().done();
    }

    #[test]
    fn write_many_transfers_command_and_payload() {
        let mock = Mock::new(&[
            Transaction::transaction_start(),
            Transaction::write_vec(vec![0x22]),
            Transaction::write_vec(vec![0x83, 0x01]),
            Transaction::transaction_end(),
        ]);
        let mut interface = SpiInterface::new(mock);

        interface.write_many(0x22, &[0x83, 0x01]).unwrap();
        interface.release().done();
    }

    #[test]
    fn empty_transfers_are_skipped() {
        let mock = Mock::new(&[]);
        let mut interface = SpiInterface::new(mock);

        interface.read_many(0x28, &mut []).unwrap();
        interface.write_many(0x20, &[]).unwrap();
        interface.begin().unwrap();
        interface.release().done();
    }
}
