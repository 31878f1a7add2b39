//! Unified sensor abstraction: event records, static metadata, and the
//! per-channel adapters handed out by [`Lps2x`].
//!
//! [`SensorEvent`] keeps the C layout of the common sensor event record
//! (version, id, type, reserved word, timestamp, four-float payload) so it can
//! be handed to consumers that expect that layout.

use crate::device::Lps2x;
use crate::error::{Error, Result};
use crate::interface::Lps2xInterface;

/// Millisecond time source used to stamp events.
pub trait Clock {
    /// Current time in milliseconds. Wrap-around is the caller's concern.
    fn now_ms(&self) -> u32;
}

impl<F> Clock for F
where
    F: Fn() -> u32,
{
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// Sensor type tags shared with the unified sensor event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i32)]
pub enum SensorType {
    /// Pressure in hPa.
    Pressure = 6,
    /// Ambient temperature in °C.
    AmbientTemperature = 13,
}

/// A single timestamped measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct SensorEvent {
    /// Size of this record in bytes.
    pub version: i32,
    /// Identity of the channel that produced the value.
    pub sensor_id: i32,
    /// Meaning of `data[0]`.
    pub sensor_type: SensorType,
    /// Always zero.
    pub reserved0: i32,
    /// Capture time in milliseconds.
    pub timestamp: u32,
    /// Value payload; only `data[0]` is used by this driver.
    pub data: [f32; 4],
}

/// Record version written into every [`SensorEvent`].
pub const EVENT_VERSION: i32 = core::mem::size_of::<SensorEvent>() as i32;

impl SensorEvent {
    fn new(sensor_id: i32, sensor_type: SensorType, timestamp: u32, value: f32) -> Self {
        Self {
            version: EVENT_VERSION,
            sensor_id,
            sensor_type,
            reserved0: 0,
            timestamp,
            data: [value, 0.0, 0.0, 0.0],
        }
    }

    /// Builds a pressure event.
    pub fn pressure(sensor_id: i32, timestamp: u32, hpa: f32) -> Self {
        Self::new(sensor_id, SensorType::Pressure, timestamp, hpa)
    }

    /// Builds an ambient temperature event.
    pub fn temperature(sensor_id: i32, timestamp: u32, celsius: f32) -> Self {
        Self::new(sensor_id, SensorType::AmbientTemperature, timestamp, celsius)
    }

    /// The scaled value, interpreted according to `sensor_type`.
    pub fn value(&self) -> f32 {
        self.data[0]
    }

    /// Pressure in hPa, if this is a pressure event.
    pub fn pressure_hpa(&self) -> Option<f32> {
        (self.sensor_type == SensorType::Pressure).then_some(self.data[0])
    }

    /// Temperature in °C, if this is a temperature event.
    pub fn temperature_c(&self) -> Option<f32> {
        (self.sensor_type == SensorType::AmbientTemperature).then_some(self.data[0])
    }
}

/// Static description of one measurement channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorInfo {
    /// Short channel name.
    pub name: &'static str,
    /// Driver version.
    pub version: i32,
    /// Identity of the channel.
    pub sensor_id: i32,
    /// Measurement kind.
    pub sensor_type: SensorType,
    /// Largest value the channel reports.
    pub max_value: f32,
    /// Smallest value the channel reports.
    pub min_value: f32,
    /// Smallest distinguishable step.
    pub resolution: f32,
    /// Minimum interval between samples in microseconds; `0` for no limit.
    pub min_delay: i32,
}

impl SensorInfo {
    /// Pressure channel metadata.
    pub const fn pressure(sensor_id: i32) -> Self {
        Self {
            name: "LPS2X_P",
            version: 1,
            sensor_id,
            sensor_type: SensorType::Pressure,
            max_value: 1260.0,
            min_value: 260.0,
            // 4096 LSB = 1 hPa
            resolution: 2.441e-4,
            min_delay: 0,
        }
    }

    /// Temperature channel metadata.
    pub const fn temperature(sensor_id: i32) -> Self {
        Self {
            name: "LPS2X_T",
            version: 1,
            sensor_id,
            sensor_type: SensorType::AmbientTemperature,
            max_value: 105.0,
            min_value: -30.0,
            // 480 LSB = 1 °C
            resolution: 0.00208,
            min_delay: 0,
        }
    }
}

/// A source of measurements.
///
/// Implemented by [`Lps2x`] for the combined read and by the two channel adapters.
pub trait Sensor {
    /// Error returned when sampling fails.
    type Error;
    /// What a single `get_event` call produces.
    type Event;
    /// What `describe` produces.
    type Info;

    /// Returns static metadata.
    fn describe(&self) -> Self::Info;

    /// Samples the chip and returns a freshly stamped event.
    fn get_event<C: Clock + ?Sized>(&mut self, clock: &C) -> core::result::Result<Self::Event, Self::Error>;
}

/// Pressure channel adapter borrowed from an initialized [`Lps2x`].
pub struct PressureSensor<'a, IFACE> {
    device: &'a mut Lps2x<IFACE>,
    sensor_id: i32,
}

impl<'a, IFACE> PressureSensor<'a, IFACE> {
    pub(crate) fn new(device: &'a mut Lps2x<IFACE>, sensor_id: i32) -> Self {
        Self { device, sensor_id }
    }

    /// Identity stamped on events from this channel.
    pub fn sensor_id(&self) -> i32 {
        self.sensor_id
    }
}

impl<IFACE, CommE> Sensor for PressureSensor<'_, IFACE>
where
    IFACE: Lps2xInterface<Error = CommE>,
{
    type Error = Error<CommE>;
    type Event = SensorEvent;
    type Info = SensorInfo;

    fn describe(&self) -> SensorInfo {
        SensorInfo::pressure(self.sensor_id)
    }

    fn get_event<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<SensorEvent, CommE> {
        let sample = self.device.read_raw()?;
        Ok(SensorEvent::pressure(
            self.sensor_id,
            clock.now_ms(),
            sample.pressure_hpa(),
        ))
    }
}

/// Temperature channel adapter borrowed from an initialized [`Lps2x`].
pub struct TemperatureSensor<'a, IFACE> {
    device: &'a mut Lps2x<IFACE>,
    sensor_id: i32,
}

impl<'a, IFACE> TemperatureSensor<'a, IFACE> {
    pub(crate) fn new(device: &'a mut Lps2x<IFACE>, sensor_id: i32) -> Self {
        Self { device, sensor_id }
    }

    /// Identity stamped on events from this channel.
    pub fn sensor_id(&self) -> i32 {
        self.sensor_id
    }
}

impl<IFACE, CommE> Sensor for TemperatureSensor<'_, IFACE>
where
    IFACE: Lps2xInterface<Error = CommE>,
{
    type Error = Error<CommE>;
    type Event = SensorEvent;
    type Info = SensorInfo;

    fn describe(&self) -> SensorInfo {
        SensorInfo::temperature(self.sensor_id)
    }

    fn get_event<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<SensorEvent, CommE> {
        let sample = self.device.read_raw()?;
        Ok(SensorEvent::temperature(
            self.sensor_id,
            clock.now_ms(),
            sample.temperature_c(),
        ))
    }
}

/// Either channel adapter, for code that picks the channel at runtime.
pub enum Channel<'a, IFACE> {
    /// Pressure channel.
    Pressure(PressureSensor<'a, IFACE>),
    /// Temperature channel.
    Temperature(TemperatureSensor<'a, IFACE>),
}

impl<IFACE, CommE> Sensor for Channel<'_, IFACE>
where
    IFACE: Lps2xInterface<Error = CommE>,
{
    type Error = Error<CommE>;
    type Event = SensorEvent;
    type Info = SensorInfo;

    fn describe(&self) -> SensorInfo {
        match self {
            Self::Pressure(sensor) => sensor.describe(),
            Self::Temperature(sensor) => sensor.describe(),
        }
    }

    fn get_event<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<SensorEvent, CommE> {
        match self {
            Self::Pressure(sensor) => sensor.get_event(clock),
            Self::Temperature(sensor) => sensor.get_event(clock),
        }
    }
}
