//! Temperature sensor conversion
//!
//! The LSM303C temperature sensor sits in the magnetometer bank and outputs a
//! signed 16-bit count with 8 LSB/°C, reading 0 at 25 °C.

/// Temperature sensitivity in LSB/°C
pub const TEMP_SENSITIVITY: f32 = 8.0;

/// Temperature at a raw reading of 0, in °C
pub const TEMP_OFFSET_CELSIUS: f32 = 25.0;

/// Convert a raw temperature count to degrees Celsius
#[must_use]
pub fn temperature_to_celsius(raw: i16) -> f32 {
    f32::from(raw) / TEMP_SENSITIVITY + TEMP_OFFSET_CELSIUS
}

/// Convert degrees Celsius to degrees Fahrenheit
///
/// NaN stays NaN.
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}
