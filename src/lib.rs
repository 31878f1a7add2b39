#![cfg_attr(not(test), no_std)]

mod log;

mod error;

pub mod config;
pub mod conversion;
pub mod device;
pub mod interface;
pub mod params;
pub mod registers;
pub mod sensor;

pub use crate::config::Config;
pub use crate::device::{Lps2x, Measurement, RawSample, SensorIds};
pub use crate::error::{Error, Result};
pub use crate::interface::i2c::{ALTERNATE_I2C_ADDRESS, DEFAULT_I2C_ADDRESS};
pub use crate::sensor::{Clock, Sensor, SensorEvent, SensorInfo, SensorType};
