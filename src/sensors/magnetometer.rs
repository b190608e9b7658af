//! Magnetometer sensor types and configuration
//!
//! Provides the setting enums for the LSM303C magnetometer and the
//! raw-to-gauss conversion. The temperature sensor enable bit also lives in
//! the magnetometer bank.

use crate::Chip;
use crate::config::ConfigField;
use crate::registers::mag;

/// Magnetometer output data rate (`CTRL_REG1_M` DO bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagOdr {
    /// 0.625 Hz
    Hz0_625 = 0x00,
    /// 1.25 Hz
    Hz1_25 = 0x04,
    /// 2.5 Hz
    Hz2_5 = 0x08,
    /// 5 Hz
    Hz5 = 0x0C,
    /// 10 Hz
    Hz10 = 0x10,
    /// 20 Hz
    Hz20 = 0x14,
    /// 40 Hz
    Hz40 = 0x18,
    /// 80 Hz
    Hz80 = 0x1C,
}

impl MagOdr {
    /// Output data rate in Hz
    #[must_use]
    pub const fn rate_hz(self) -> f32 {
        match self {
            Self::Hz0_625 => 0.625,
            Self::Hz1_25 => 1.25,
            Self::Hz2_5 => 2.5,
            Self::Hz5 => 5.0,
            Self::Hz10 => 10.0,
            Self::Hz20 => 20.0,
            Self::Hz40 => 40.0,
            Self::Hz80 => 80.0,
        }
    }
}

impl ConfigField for MagOdr {
    const CHIP: Chip = Chip::Magnetometer;
    const REGISTER: u8 = mag::CTRL_REG1;
    const MASK: u8 = mag::CTRL_REG1_DO_MASK;

    fn bits(self) -> u8 {
        self as u8
    }
}

/// Magnetometer full-scale range (`CTRL_REG2_M` FS bits)
///
/// The datasheet only characterizes ±16 gauss; the other codes are accepted
/// by the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagFullScale {
    /// ±4 gauss
    Ga4 = 0x00,
    /// ±8 gauss
    Ga8 = 0x20,
    /// ±12 gauss
    Ga12 = 0x40,
    /// ±16 gauss
    Ga16 = 0x60,
}

impl MagFullScale {
    /// Get the sensitivity in gauss/LSB
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Ga4 => 0.000_122_070_312_5,  // 4 / 32768
            Self::Ga8 => 0.000_244_140_625,    // 8 / 32768
            Self::Ga12 => 0.000_366_210_937_5, // 12 / 32768
            Self::Ga16 => 0.000_488_281_25,    // 16 / 32768
        }
    }
}

impl ConfigField for MagFullScale {
    const CHIP: Chip = Chip::Magnetometer;
    const REGISTER: u8 = mag::CTRL_REG2;
    const MASK: u8 = mag::CTRL_REG2_FS_MASK;

    fn bits(self) -> u8 {
        self as u8
    }
}

/// Magnetometer block data update (`CTRL_REG5_M` BDU bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagBlockDataUpdate {
    /// Continuous update
    Disabled = 0x00,
    /// Output registers frozen until both bytes were read
    Enabled = 0x40,
}

impl ConfigField for MagBlockDataUpdate {
    const CHIP: Chip = Chip::Magnetometer;
    const REGISTER: u8 = mag::CTRL_REG5;
    const MASK: u8 = mag::CTRL_REG5_BDU;

    fn bits(self) -> u8 {
        self as u8
    }
}

/// Magnetometer X/Y axes operating mode (`CTRL_REG1_M` OM bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagXyMode {
    /// Low-power mode
    LowPower = 0x00,
    /// Medium-performance mode
    MediumPerformance = 0x20,
    /// High-performance mode
    HighPerformance = 0x40,
    /// Ultra-high-performance mode
    UltraHighPerformance = 0x60,
}

impl ConfigField for MagXyMode {
    const CHIP: Chip = Chip::Magnetometer;
    const REGISTER: u8 = mag::CTRL_REG1;
    const MASK: u8 = mag::CTRL_REG1_OM_MASK;

    fn bits(self) -> u8 {
        self as u8
    }
}

/// Magnetometer Z axis operating mode (`CTRL_REG4_M` OMZ bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagZMode {
    /// Low-power mode
    LowPower = 0x00,
    /// Medium-performance mode
    MediumPerformance = 0x04,
    /// High-performance mode
    HighPerformance = 0x08,
    /// Ultra-high-performance mode
    UltraHighPerformance = 0x0C,
}

impl ConfigField for MagZMode {
    const CHIP: Chip = Chip::Magnetometer;
    const REGISTER: u8 = mag::CTRL_REG4;
    const MASK: u8 = mag::CTRL_REG4_OMZ_MASK;

    fn bits(self) -> u8 {
        self as u8
    }
}

/// Magnetometer run mode (`CTRL_REG3_M` MD bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagRunMode {
    /// Continuous conversion
    Continuous = 0x00,
    /// Single conversion, then back to power-down
    Single = 0x01,
    /// Power-down (reset value; 0x02 is also power-down)
    PowerDown = 0x03,
}

impl ConfigField for MagRunMode {
    const CHIP: Chip = Chip::Magnetometer;
    const REGISTER: u8 = mag::CTRL_REG3;
    const MASK: u8 = mag::CTRL_REG3_MD_MASK;

    fn bits(self) -> u8 {
        self as u8
    }
}

/// Temperature sensor enable (`CTRL_REG1_M` `TEMP_EN` bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagTemperature {
    /// Temperature sensor off
    Disabled = 0x00,
    /// Temperature sensor on
    Enabled = 0x80,
}

impl ConfigField for MagTemperature {
    const CHIP: Chip = Chip::Magnetometer;
    const REGISTER: u8 = mag::CTRL_REG1;
    const MASK: u8 = mag::CTRL_REG1_TEMP_EN;

    fn bits(self) -> u8 {
        self as u8
    }
}

/// Magnetometer data in physical units (gauss)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagDataGauss {
    /// X-axis magnetic field in gauss
    pub x: f32,
    /// Y-axis magnetic field in gauss
    pub y: f32,
    /// Z-axis magnetic field in gauss
    pub z: f32,
}

impl MagDataGauss {
    /// Create from raw sensor values
    ///
    /// `sensitivity` is in gauss/LSB (from `MagFullScale::sensitivity()`).
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw_x) * sensitivity,
            y: f32::from(raw_y) * sensitivity,
            z: f32::from(raw_z) * sensitivity,
        }
    }

    /// Get the magnitude of the magnetic field vector in gauss
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
