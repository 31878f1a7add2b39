//! Bus interface abstraction for the LPS2X driver.

pub mod i2c;
pub mod spi;

use self::i2c::I2cInterface;
use self::spi::SpiInterface;

/// Bus family behind an interface. Selects the multi-byte addressing convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusKind {
    /// I2C: bit 7 of the sub-address requests auto-increment.
    I2c,
    /// SPI: bit 7 is the read flag, bit 6 requests auto-increment.
    Spi,
}

/// Abstraction over the low-level bus access required by the driver.
pub trait Lps2xInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Returns the bus family of this interface.
    fn bus_kind(&self) -> BusKind;

    /// Confirms the bus is usable before the first register access.
    fn begin(&mut self) -> core::result::Result<(), Self::Error>;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Reads multiple consecutive registers into the provided buffer.
    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Writes multiple consecutive registers from the provided buffer.
    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error>;
}

/// Error raised by a [`Transport`], tagged with the bus that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<I2cE, SpiE> {
    /// Error from the I2C bus.
    I2c(I2cE),
    /// Error from the SPI bus.
    Spi(SpiE),
}

/// A single active bus binding, chosen at runtime.
///
/// Holds exactly one of the two transports, so switching buses means
/// replacing the whole value.
pub enum Transport<I2C, SPI> {
    /// Bound to an I2C bus.
    I2c(I2cInterface<I2C>),
    /// Bound to an SPI device.
    Spi(SpiInterface<SPI>),
}

impl<I2C, SPI> Transport<I2C, SPI> {
    /// Binds an I2C bus at the given 7-bit address.
    pub const fn i2c(i2c: I2C, address: u8) -> Self {
        Self::I2c(I2cInterface::new(i2c, address))
    }

    /// Binds an SPI device.
    pub const fn spi(spi: SPI) -> Self {
        Self::Spi(SpiInterface::new(spi))
    }
}

impl<I2C, SPI> Lps2xInterface for Transport<I2C, SPI>
where
    I2cInterface<I2C>: Lps2xInterface,
    SpiInterface<SPI>: Lps2xInterface,
{
    type Error = TransportError<
        <I2cInterface<I2C> as Lps2xInterface>::Error,
        <SpiInterface<SPI> as Lps2xInterface>::Error,
    >;

    fn bus_kind(&self) -> BusKind {
        match self {
            Self::I2c(_) => BusKind::I2c,
            Self::Spi(_) => BusKind::Spi,
        }
    }

    fn begin(&mut self) -> core::result::Result<(), Self::Error> {
        match self {
            Self::I2c(bus) => bus.begin().map_err(TransportError::I2c),
            Self::Spi(bus) => bus.begin().map_err(TransportError::Spi),
        }
    }

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        match self {
            Self::I2c(bus) => bus.write_register(register, value).map_err(TransportError::I2c),
            Self::Spi(bus) => bus.write_register(register, value).map_err(TransportError::Spi),
        }
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        match self {
            Self::I2c(bus) => bus.read_register(register).map_err(TransportError::I2c),
            Self::Spi(bus) => bus.read_register(register).map_err(TransportError::Spi),
        }
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        match self {
            Self::I2c(bus) => bus.read_many(register, buf).map_err(TransportError::I2c),
            Self::Spi(bus) => bus.read_many(register, buf).map_err(TransportError::Spi),
        }
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        match self {
            Self::I2c(bus) => bus.write_many(register, data).map_err(TransportError::I2c),
            Self::Spi(bus) => bus.write_many(register, data).map_err(TransportError::Spi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BusKind, Lps2xInterface, Transport};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn i2c_variant_reports_kind_and_forwards() {
        let i2c = I2cMock::new(&[I2cTransaction::write_read(
            0x5D,
            vec![0x0F],
            vec![0xBD],
        )]);
        let mut transport: Transport<I2cMock, SpiMock<u8>> = Transport::i2c(i2c, 0x5D);

        assert_eq!(transport.bus_kind(), BusKind::I2c);
        assert_eq!(transport.read_register(0x0F).unwrap(), 0xBD);

        if let Transport::I2c(bus) = transport {
            bus.release().done();
        }
    }

    #[test]
    fn spi_variant_reports_kind_and_forwards() {
        let spi = SpiMock::new(&[
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x21]),
            SpiTransaction::write_vec(vec![0x04]),
            SpiTransaction::transaction_end(),
        ]);
        let mut transport: Transport<I2cMock, SpiMock<u8>> = Transport::spi(spi);

        assert_eq!(transport.bus_kind(), BusKind::Spi);
        transport.write_register(0x21, 0x04).unwrap();

        if let Transport::Spi(bus) = transport {
            bus.release().done();
        }
    }
}
