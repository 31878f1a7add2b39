//! Strongly typed parameter enumerations for the LPS2X driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs.
//!
//! # Examples
//!
//! ```rust
//! use lps2x::params::{DataRate, InterruptPolarity};
//!
//! let rate = DataRate::Hz12_5;
//! assert_eq!(rate.millihertz(), 12_500);
//! let _ = InterruptPolarity::ActiveLow;
//! ```

use modular_bitfield::prelude::Specifier;

/// Output data rate selections encoded in `CTRL_REG1.ODR[2:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum DataRate {
    /// Single conversion on request.
    OneShot = 0b000,
    /// 1 Hz continuous conversion.
    Hz1 = 0b001,
    /// 7 Hz continuous conversion.
    Hz7 = 0b010,
    /// 12.5 Hz continuous conversion.
    Hz12_5 = 0b011,
    /// 25 Hz continuous conversion.
    Hz25 = 0b100,
}

impl DataRate {
    /// Every rate the chip defines, in register order.
    pub const ALL: [DataRate; 5] = [
        Self::OneShot,
        Self::Hz1,
        Self::Hz7,
        Self::Hz12_5,
        Self::Hz25,
    ];

    /// Returns the continuous conversion rate in millihertz, `0` for one-shot.
    pub const fn millihertz(self) -> u32 {
        match self {
            Self::OneShot => 0,
            Self::Hz1 => 1_000,
            Self::Hz7 => 7_000,
            Self::Hz12_5 => 12_500,
            Self::Hz25 => 25_000,
        }
    }
}

/// Power-down control bit (`CTRL_REG1.PD`). The chip is powered down when the bit is clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum PowerMode {
    /// Power-down mode (bit cleared, reset default).
    PowerDown = 0,
    /// Active mode.
    Active = 1,
}

/// Interrupt pin polarity (`CTRL_REG3.INT_H_L`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum InterruptPolarity {
    /// INT pin is driven high when asserted.
    ActiveHigh = 0,
    /// INT pin is driven low when asserted.
    ActiveLow = 1,
}

/// Signal routed to the INT pin (`CTRL_REG3.INT_S[1:0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum InterruptSignal {
    /// Data signal selected by `CTRL_REG4`.
    DataSignal = 0b00,
    /// Pressure high event.
    PressureHigh = 0b01,
    /// Pressure low event.
    PressureLow = 0b10,
    /// Pressure high or low event.
    PressureHighOrLow = 0b11,
}
