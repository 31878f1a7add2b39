//! High-level LPS2X device driver implementation.

use crate::config::{Config, ResetPolicy};
use crate::conversion::{
    pressure_code, pressure_hpa, sign_extend_pressure, sign_extend_temperature, temperature_c,
    temperature_code,
};
use crate::error::{Error, Result};
use crate::interface::i2c::I2cInterface;
use crate::interface::spi::SpiInterface;
use crate::interface::{BusKind, Lps2xInterface};
use crate::params::{DataRate, InterruptPolarity, InterruptSignal, PowerMode};
use crate::registers::{
    CtrlReg1, CtrlReg2, CtrlReg3, CtrlReg4, Register, CHIP_ID, MULTI_BYTE_FLAG,
    REG_PRESS_OUT_XL, REG_TEMP_OUT_L, REG_WHO_AM_I, SPI_AUTO_INCREMENT_FLAG,
};
use crate::sensor::{Channel, Clock, PressureSensor, Sensor, SensorEvent, SensorInfo, SensorType, TemperatureSensor};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use embedded_hal::spi::SpiDevice;

/// Identities stamped on events, fixed by [`Lps2x::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorIds {
    /// Pressure channel identity.
    pub pressure: i32,
    /// Temperature channel identity, always `pressure + 1`.
    pub temperature: i32,
}

impl SensorIds {
    /// Derives both identities from the pressure channel's.
    pub const fn from_base(base: i32) -> Self {
        Self {
            pressure: base,
            temperature: base.wrapping_add(1),
        }
    }
}

/// Sign-extended output codes from the most recent read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Temperature code, 16-bit range.
    pub temperature: i32,
    /// Pressure code, 24-bit range.
    pub pressure: i32,
}

impl RawSample {
    /// Pressure in hPa.
    pub fn pressure_hpa(&self) -> f32 {
        pressure_hpa(self.pressure)
    }

    /// Temperature in °C.
    pub fn temperature_c(&self) -> f32 {
        temperature_c(self.temperature)
    }
}

/// Pressure and temperature taken from one read.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Pressure in hPa.
    pub pressure_hpa: f32,
    /// Temperature in °C.
    pub temperature_c: f32,
}

/// High-level synchronous driver for the LPS2X pressure sensor.
pub struct Lps2x<IFACE> {
    interface: IFACE,
    config: Config,
    ids: Option<SensorIds>,
    raw: RawSample,
}

impl<IFACE> Lps2x<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance bound to the provided bus interface.
    ///
    /// No bus traffic happens until [`init`](Self::init).
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self {
            interface,
            config,
            ids: None,
            raw: RawSample::default(),
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Replaces the bus binding and returns the previous one.
    ///
    /// The driver is uninitialized afterwards; call [`init`](Self::init) again.
    pub fn rebind(&mut self, interface: IFACE) -> IFACE {
        self.ids = None;
        self.raw = RawSample::default();
        core::mem::replace(&mut self.interface, interface)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the configuration used by the next [`init`](Self::init).
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Identities assigned by the last successful [`init`](Self::init).
    pub fn sensor_ids(&self) -> Option<SensorIds> {
        self.ids
    }

    /// Codes captured by the most recent read.
    pub fn raw_sample(&self) -> RawSample {
        self.raw
    }

    // ==================================================================
    // == Channel Adapters ==============================================
    // ==================================================================
    /// Pressure channel adapter, available once [`init`](Self::init) succeeded.
    pub fn pressure_sensor(&mut self) -> Option<PressureSensor<'_, IFACE>> {
        let ids = self.ids?;
        Some(PressureSensor::new(self, ids.pressure))
    }

    /// Temperature channel adapter, available once [`init`](Self::init) succeeded.
    pub fn temperature_sensor(&mut self) -> Option<TemperatureSensor<'_, IFACE>> {
        let ids = self.ids?;
        Some(TemperatureSensor::new(self, ids.temperature))
    }

    /// Adapter for the channel reporting `kind`.
    pub fn channel(&mut self, kind: SensorType) -> Option<Channel<'_, IFACE>> {
        match kind {
            SensorType::Pressure => self.pressure_sensor().map(Channel::Pressure),
            SensorType::AmbientTemperature => self.temperature_sensor().map(Channel::Temperature),
        }
    }
}

impl<I2C> Lps2x<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == Bus Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, address: SevenBitAddress, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c, address), config)
    }

    /// Releases the driver, returning the I2C bus and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<SPI> Lps2x<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI, config: Config) -> Self {
        Self::new(SpiInterface::new(spi), config)
    }

    /// Releases the driver, returning the SPI device and configuration.
    pub fn release_spi(self) -> (SPI, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> Lps2x<IFACE>
where
    IFACE: Lps2xInterface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Identification ===============================
    // ==================================================================
    /// Brings the sensor up: address check, identify, reset, power on, apply the data rate.
    ///
    /// Each step runs only if the previous one succeeded. On any failure the
    /// driver stays uninitialized and no channel adapters are handed out.
    /// Calling this again re-runs the whole sequence.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;
        self.ids = None;
        debug!("lps2x: init, sensor id {}", self.config.sensor_id);

        self.interface.begin().map_err(Error::Interface)?;

        let id = self.chip_id()?;
        if id != CHIP_ID {
            warn!("lps2x: unexpected WHO_AM_I {=u8:#x}", id);
            return Err(Error::DeviceIdMismatch(id));
        }

        let ids = SensorIds::from_base(self.config.sensor_id);

        self.reset(delay)?;
        self.power_down(false)?;
        self.set_data_rate(self.config.data_rate)?;

        self.ids = Some(ids);
        Ok(())
    }

    /// Reads the `WHO_AM_I` register.
    pub fn chip_id(&mut self) -> Result<u8, CommE> {
        self.interface
            .read_register(REG_WHO_AM_I)
            .map_err(Error::Interface)
    }

    /// Returns whether `WHO_AM_I` matches the LPS2X chip id.
    pub fn is_connected(&mut self) -> Result<bool, CommE> {
        Ok(self.chip_id()? == CHIP_ID)
    }

    /// Issues a software reset and waits for the chip to clear `SWRESET`.
    ///
    /// The bit is polled immediately, then every
    /// [`reset_poll_interval_ms`](Config::reset_poll_interval_ms) until it clears
    /// or the [`ResetPolicy`] runs out.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.modify_register(|ctrl2: &mut CtrlReg2| ctrl2.set_swreset(true))?;

        let mut polls: u32 = 0;
        loop {
            let ctrl2: CtrlReg2 = self.read_register()?;
            polls = polls.saturating_add(1);
            if !ctrl2.swreset() {
                trace!("lps2x: reset done after {} polls", polls);
                return Ok(());
            }

            if let ResetPolicy::Bounded { max_attempts } = self.config.reset {
                if polls >= max_attempts {
                    warn!("lps2x: SWRESET still set after {} polls", polls);
                    return Err(Error::ResetTimeout);
                }
            }

            delay.delay_ms(self.config.reset_poll_interval_ms);
        }
    }

    // ==================================================================
    // == Power & Rate Configuration ====================================
    // ==================================================================
    /// Enters (`true`) or leaves (`false`) power-down mode.
    pub fn power_down(&mut self, power_down: bool) -> Result<(), CommE> {
        // PD = 0 means powered down.
        let mode = if power_down {
            PowerMode::PowerDown
        } else {
            PowerMode::Active
        };
        self.modify_register(|ctrl1: &mut CtrlReg1| ctrl1.set_pd(mode))?;
        Ok(())
    }

    /// Returns whether the chip is in power-down mode.
    pub fn is_powered_down(&mut self) -> Result<bool, CommE> {
        let ctrl1: CtrlReg1 = self.read_register()?;
        Ok(ctrl1.pd() == PowerMode::PowerDown)
    }

    /// Reads the configured output data rate.
    pub fn data_rate(&mut self) -> Result<DataRate, CommE> {
        let ctrl1: CtrlReg1 = self.read_register()?;
        ctrl1.odr_or_err().map_err(|_| Error::UnexpectedRegisterData)
    }

    /// Sets the output data rate.
    pub fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), CommE> {
        self.modify_register(|ctrl1: &mut CtrlReg1| ctrl1.set_odr(data_rate))?;
        debug!("lps2x: data rate {}", data_rate);
        Ok(())
    }

    // ==================================================================
    // == Interrupt Configuration =======================================
    // ==================================================================
    /// Selects INT pin polarity.
    pub fn interrupts_active_low(&mut self, active_low: bool) -> Result<(), CommE> {
        let polarity = if active_low {
            InterruptPolarity::ActiveLow
        } else {
            InterruptPolarity::ActiveHigh
        };
        self.modify_register(|ctrl3: &mut CtrlReg3| ctrl3.set_int_h_l(polarity))?;
        Ok(())
    }

    /// Reads INT pin polarity.
    pub fn interrupt_polarity(&mut self) -> Result<InterruptPolarity, CommE> {
        let ctrl3: CtrlReg3 = self.read_register()?;
        Ok(ctrl3.int_h_l())
    }

    /// Routes (or stops routing) data-ready to the INT pin.
    ///
    /// `INT_S` is set to `0b11` in both cases; only `P1_DRDY` follows `enabled`.
    /// The datasheet names `0b11` the pressure high-or-low signal rather than
    /// [`InterruptSignal::DataSignal`], and `CTRL_REG4` routing only applies to
    /// the data signal, so on parts that follow the datasheet `P1_DRDY` may have
    /// no effect on the pin. Callers needing `0b00` can write `CTRL_REG3`
    /// through [`interface_mut`](Self::interface_mut).
    pub fn enable_data_ready_interrupts(&mut self, enabled: bool) -> Result<(), CommE> {
        self.modify_register(|ctrl3: &mut CtrlReg3| {
            ctrl3.set_int_s(InterruptSignal::PressureHighOrLow)
        })?;
        self.modify_register(|ctrl4: &mut CtrlReg4| ctrl4.set_p1_drdy(enabled))?;
        Ok(())
    }

    /// Returns whether data-ready is routed to the INT pin.
    pub fn data_ready_interrupts_enabled(&mut self) -> Result<bool, CommE> {
        let ctrl4: CtrlReg4 = self.read_register()?;
        Ok(ctrl4.p1_drdy())
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Register address for a burst read starting at `register` on the bound bus.
    fn burst_address(&self, register: u8) -> u8 {
        match self.interface.bus_kind() {
            BusKind::I2c => register | MULTI_BYTE_FLAG,
            BusKind::Spi => register | MULTI_BYTE_FLAG | SPI_AUTO_INCREMENT_FLAG,
        }
    }

    /// Reads temperature then pressure output registers and stores the decoded codes.
    ///
    /// Unlike [`get_event`](Self::get_event) this does not require a successful
    /// [`init`](Self::init); before init the chip may still be powered down and
    /// report stale output registers.
    pub fn read_raw(&mut self) -> Result<RawSample, CommE> {
        let mut temperature = [0u8; 2];
        let address = self.burst_address(REG_TEMP_OUT_L);
        self.interface
            .read_many(address, &mut temperature)
            .map_err(Error::Interface)?;

        let mut pressure = [0u8; 3];
        let address = self.burst_address(REG_PRESS_OUT_XL);
        self.interface
            .read_many(address, &mut pressure)
            .map_err(Error::Interface)?;

        self.raw = RawSample {
            temperature: sign_extend_temperature(temperature_code(temperature)),
            pressure: sign_extend_pressure(pressure_code(pressure)),
        };
        trace!("lps2x: raw t={} p={}", self.raw.temperature, self.raw.pressure);
        Ok(self.raw)
    }

    /// Reads both channels and returns them in physical units.
    ///
    /// Like [`read_raw`](Self::read_raw), this skips the init check.
    pub fn read(&mut self) -> Result<Measurement, CommE> {
        let raw = self.read_raw()?;
        Ok(Measurement {
            pressure_hpa: raw.pressure_hpa(),
            temperature_c: raw.temperature_c(),
        })
    }

    /// Samples once and returns `(pressure, temperature)` events sharing one timestamp.
    pub fn get_event<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<(SensorEvent, SensorEvent), CommE> {
        let ids = self.ids.ok_or(Error::NotInitialized)?;
        let timestamp = clock.now_ms();
        let raw = self.read_raw()?;

        Ok((
            SensorEvent::pressure(ids.pressure, timestamp, raw.pressure_hpa()),
            SensorEvent::temperature(ids.temperature, timestamp, raw.temperature_c()),
        ))
    }

    // ==================================================================
    // == Internal Register Helpers =====================================
    // ==================================================================
    fn read_register<R: Register>(&mut self) -> Result<R, CommE> {
        let value = self
            .interface
            .read_register(R::ADDRESS)
            .map_err(Error::Interface)?;
        Ok(R::from(value))
    }

    fn modify_register<R, F>(&mut self, mutate: F) -> Result<R, CommE>
    where
        R: Register,
        F: FnOnce(&mut R),
    {
        let current = self
            .interface
            .read_register(R::ADDRESS)
            .map_err(Error::Interface)?;

        let mut register = R::from(current);
        mutate(&mut register);

        let updated: u8 = register.into();
        if updated != current {
            self.interface
                .write_register(R::ADDRESS, updated)
                .map_err(Error::Interface)?;
        }

        Ok(register)
    }
}

impl<IFACE, CommE> Sensor for Lps2x<IFACE>
where
    IFACE: Lps2xInterface<Error = CommE>,
{
    type Error = Error<CommE>;
    type Event = (SensorEvent, SensorEvent);
    type Info = (SensorInfo, SensorInfo);

    /// Metadata for both channels. Before `init`, identities come from the configuration.
    fn describe(&self) -> Self::Info {
        let ids = self
            .ids
            .unwrap_or(SensorIds::from_base(self.config.sensor_id));
        (
            SensorInfo::pressure(ids.pressure),
            SensorInfo::temperature(ids.temperature),
        )
    }

    fn get_event<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<Self::Event, CommE> {
        Lps2x::get_event(self, clock)
    }
}
