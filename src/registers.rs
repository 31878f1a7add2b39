//! Register map definitions for the LPS2X pressure sensor.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{DataRate, InterruptPolarity, InterruptSignal, PowerMode};

/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x0F;
/// Register address of `CTRL_REG1` (power-down, data rate).
pub const REG_CTRL_REG1: u8 = 0x20;
/// Register address of `CTRL_REG2` (boot, software reset, one-shot).
pub const REG_CTRL_REG2: u8 = 0x21;
/// Register address of `CTRL_REG3` (interrupt polarity and signal selection).
pub const REG_CTRL_REG3: u8 = 0x22;
/// Register address of `CTRL_REG4` (INT pin routing).
pub const REG_CTRL_REG4: u8 = 0x23;
/// Register address of `INTERRUPT_CFG`.
pub const REG_INTERRUPT_CFG: u8 = 0x24;
/// Register address of `PRESS_OUT_XL`, first of three pressure bytes.
pub const REG_PRESS_OUT_XL: u8 = 0x28;
/// Register address of `TEMP_OUT_L`, first of two temperature bytes.
pub const REG_TEMP_OUT_L: u8 = 0x2B;

/// Expected `WHO_AM_I` value.
pub const CHIP_ID: u8 = 0xBD;

/// Sub-address flag requesting auto-increment on I2C. Doubles as the SPI read bit.
pub const MULTI_BYTE_FLAG: u8 = 0x80;
/// SPI address bit requesting auto-increment on multi-byte transfers.
pub const SPI_AUTO_INCREMENT_FLAG: u8 = 0x40;

/// A read/write control register with a bit-field view.
pub trait Register: From<u8> + Into<u8> + Copy {
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
}

/// Bitfield representation of `CTRL_REG1` (address `0x20`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg1 {
    // SPI 3-wire mode select (bit 0).
    pub sim: bool,
    // Reset the autozero reference (bit 1).
    pub reset_az: bool,
    // Block data update (bit 2).
    pub bdu: bool,
    // Differential interrupt generation enable (bit 3).
    pub diff_en: bool,
    // Output data rate selection (bits 6:4).
    pub odr: DataRate,
    // Power-down control (bit 7).
    pub pd: PowerMode,
}

impl From<u8> for CtrlReg1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<CtrlReg1> for u8 {
    fn from(value: CtrlReg1) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of `CTRL_REG2` (address `0x21`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg2 {
    // Trigger a one-shot conversion (bit 0).
    pub one_shot: bool,
    // Autozero enable (bit 1).
    pub autozero: bool,
    // Software reset, self-clearing (bit 2).
    pub swreset: bool,
    // I2C interface disable (bit 3).
    pub i2c_dis: bool,
    // FIFO mean decimation (bit 4).
    pub fifo_mean_dec: bool,
    // Stop on FIFO watermark (bit 5).
    pub stop_on_fth: bool,
    // FIFO enable (bit 6).
    pub fifo_en: bool,
    // Reboot memory content (bit 7).
    pub boot: bool,
}

impl From<u8> for CtrlReg2 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<CtrlReg2> for u8 {
    fn from(value: CtrlReg2) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of `CTRL_REG3` (address `0x22`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg3 {
    // Signal routed to the INT pin (bits 1:0).
    pub int_s: InterruptSignal,
    #[skip]
    __: B4,
    // Push-pull (0) or open-drain (1) INT output (bit 6).
    pub pp_od: bool,
    // Interrupt active high/low (bit 7).
    pub int_h_l: InterruptPolarity,
}

impl From<u8> for CtrlReg3 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<CtrlReg3> for u8 {
    fn from(value: CtrlReg3) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of `CTRL_REG4` (address `0x23`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg4 {
    // Data-ready on INT pin (bit 0).
    pub p1_drdy: bool,
    // FIFO overrun on INT pin (bit 1).
    pub p1_overrun: bool,
    // FIFO watermark on INT pin (bit 2).
    pub p1_wtm: bool,
    // FIFO empty on INT pin (bit 3).
    pub p1_empty: bool,
    #[skip]
    __: B4,
}

impl From<u8> for CtrlReg4 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<CtrlReg4> for u8 {
    fn from(value: CtrlReg4) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for CtrlReg1 {
    const ADDRESS: u8 = REG_CTRL_REG1;
}

impl Register for CtrlReg2 {
    const ADDRESS: u8 = REG_CTRL_REG2;
}

impl Register for CtrlReg3 {
    const ADDRESS: u8 = REG_CTRL_REG3;
}

impl Register for CtrlReg4 {
    const ADDRESS: u8 = REG_CTRL_REG4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_reg1_layout_matches_datasheet() {
        let reg = CtrlReg1::new()
            .with_pd(PowerMode::Active)
            .with_odr(DataRate::Hz25)
            .with_bdu(true);

        assert_eq!(u8::from(reg), 0b1_100_0_1_0_0);
    }

    /// Writing the data rate must leave the power-down bit and low bits alone.
    #[test]
    fn ctrl_reg1_odr_update_preserves_siblings() {
        let mut reg = CtrlReg1::from(0b1000_0101);
        reg.set_odr(DataRate::Hz7);

        assert_eq!(u8::from(reg), 0b1010_0101);
        assert_eq!(reg.pd(), PowerMode::Active);
    }

    #[test]
    fn ctrl_reg1_undefined_rate_is_reported() {
        let reg = CtrlReg1::from(0b0111_0000);
        assert!(reg.odr_or_err().is_err());
    }

    #[test]
    fn control_registers_map_to_their_addresses() {
        assert_eq!(CtrlReg1::ADDRESS, REG_CTRL_REG1);
        assert_eq!(CtrlReg2::ADDRESS, REG_CTRL_REG2);
        assert_eq!(CtrlReg3::ADDRESS, REG_CTRL_REG3);
        assert_eq!(CtrlReg4::ADDRESS, REG_CTRL_REG4);
    }

    #[test]
    fn ctrl_reg2_swreset_is_bit_two() {
        let reg = CtrlReg2::new().with_swreset(true);
        assert_eq!(u8::from(reg), 0b0000_0100);
    }

    #[test]
    fn ctrl_reg3_fields() {
        let reg = CtrlReg3::from(0b1000_0011);
        assert_eq!(reg.int_h_l(), InterruptPolarity::ActiveLow);
        assert_eq!(reg.int_s(), InterruptSignal::PressureHighOrLow);
        assert!(!reg.pp_od());
    }

    #[test]
    fn ctrl_reg4_drdy_is_bit_zero() {
        let reg = CtrlReg4::from(0b1111_0001);
        assert!(reg.p1_drdy());
        assert_eq!(u8::from(reg.with_p1_drdy(false)), 0b1111_0000);
    }
}
