//! Sensor modules for the LSM303C
//!
//! This module provides types, enums, and configuration fields for each sensor
//! in the LSM303C:
//! - Accelerometer (3-axis)
//! - Magnetometer (3-axis)
//! - Temperature (hosted by the magnetometer)
//!
//! All sensor operations are performed through methods on `Lsm303cDriver`.

pub mod accelerometer;
pub mod magnetometer;
pub mod temperature;

// Re-export main types
pub use accelerometer::{AccelAxes, AccelBlockDataUpdate, AccelDataMg, AccelFullScale, AccelOdr};
pub use magnetometer::{
    MagBlockDataUpdate, MagDataGauss, MagFullScale, MagOdr, MagRunMode, MagTemperature, MagXyMode,
    MagZMode,
};
pub use temperature::{celsius_to_fahrenheit, temperature_to_celsius};
