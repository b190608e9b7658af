//! Accelerometer sensor types and configuration
//!
//! Provides the setting enums for the LSM303C accelerometer and the
//! raw-to-milli-g conversion.

use core::ops::BitOr;

use crate::Chip;
use crate::config::ConfigField;
use crate::registers::accel;

/// Accelerometer full-scale range (`CTRL4_A` FS bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2g range (most sensitive, least range)
    G2 = 0x00,
    /// ±4g range
    G4 = 0x20,
    /// ±8g range (least sensitive, most range)
    G8 = 0x30,
}

impl AccelFullScale {
    /// Get the sensitivity in mg/LSB
    ///
    /// This is used to convert raw sensor values to physical units: the
    /// full-scale range spread over the signed 16-bit output.
    ///
    /// The value is positive, so axes keep the datasheet orientation. The
    /// SparkFun Arduino library scales by the negated constant
    /// (`SENSITIVITY_ACC = -0.06103515625`); readings ported from it have
    /// every acceleration axis inverted.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::G2 => 0.061_035_156_25, // 2000 / 32768
            Self::G4 => 0.122_070_312_5,  // 4000 / 32768
            Self::G8 => 0.244_140_625,    // 8000 / 32768
        }
    }
}

impl ConfigField for AccelFullScale {
    const CHIP: Chip = Chip::Accelerometer;
    const REGISTER: u8 = accel::CTRL4;
    const MASK: u8 = accel::CTRL4_FS_MASK;

    fn bits(self) -> u8 {
        self as u8
    }
}

/// Accelerometer output data rate (`CTRL1_A` ODR bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelOdr {
    /// Power-down, no conversions
    PowerDown = 0x00,
    /// 10 Hz
    Hz10 = 0x10,
    /// 50 Hz
    Hz50 = 0x20,
    /// 100 Hz
    Hz100 = 0x30,
    /// 200 Hz
    Hz200 = 0x40,
    /// 400 Hz
    Hz400 = 0x50,
    /// 800 Hz
    Hz800 = 0x60,
}

impl AccelOdr {
    /// Output data rate in Hz (`None` when powered down)
    #[must_use]
    pub const fn rate_hz(self) -> Option<u16> {
        match self {
            Self::PowerDown => None,
            Self::Hz10 => Some(10),
            Self::Hz50 => Some(50),
            Self::Hz100 => Some(100),
            Self::Hz200 => Some(200),
            Self::Hz400 => Some(400),
            Self::Hz800 => Some(800),
        }
    }
}

impl ConfigField for AccelOdr {
    const CHIP: Chip = Chip::Accelerometer;
    const REGISTER: u8 = accel::CTRL1;
    const MASK: u8 = accel::CTRL1_ODR_MASK;

    fn bits(self) -> u8 {
        self as u8
    }
}

/// Accelerometer block data update (`CTRL1_A` BDU bit)
///
/// When enabled, the output registers are not updated until both bytes of
/// the previous sample were read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelBlockDataUpdate {
    /// Continuous update
    Disabled = 0x00,
    /// Output registers frozen until read
    Enabled = 0x08,
}

impl ConfigField for AccelBlockDataUpdate {
    const CHIP: Chip = Chip::Accelerometer;
    const REGISTER: u8 = accel::CTRL1;
    const MASK: u8 = accel::CTRL1_BDU;

    fn bits(self) -> u8 {
        self as u8
    }
}

/// Enabled accelerometer axes (`CTRL1_A` XEN/YEN/ZEN bits)
///
/// Axes combine with `|`:
///
/// ```ignore
/// let axes = AccelAxes::X | AccelAxes::Z;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelAxes(u8);

impl AccelAxes {
    /// No axis enabled
    pub const NONE: Self = Self(0x00);
    /// X axis
    pub const X: Self = Self(0x01);
    /// Y axis
    pub const Y: Self = Self(0x02);
    /// Z axis
    pub const Z: Self = Self(0x04);
    /// X, Y and Z
    pub const ALL: Self = Self(0x07);

    /// Raw enable bits
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `true` if every axis in `other` is enabled here
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for AccelAxes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl ConfigField for AccelAxes {
    const CHIP: Chip = Chip::Accelerometer;
    const REGISTER: u8 = accel::CTRL1;
    const MASK: u8 = accel::CTRL1_AXES_MASK;

    fn bits(self) -> u8 {
        self.0
    }
}

/// Accelerometer data in physical units (milli-g)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataMg {
    /// X-axis acceleration in mg
    pub x: f32,
    /// Y-axis acceleration in mg
    pub y: f32,
    /// Z-axis acceleration in mg
    pub z: f32,
}

impl AccelDataMg {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw_x` - Raw X-axis value
    /// * `raw_y` - Raw Y-axis value
    /// * `raw_z` - Raw Z-axis value
    /// * `sensitivity` - Sensitivity in mg/LSB (from `AccelFullScale::sensitivity()`)
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw_x) * sensitivity,
            y: f32::from(raw_y) * sensitivity,
            z: f32::from(raw_z) * sensitivity,
        }
    }

    /// Get the magnitude of the acceleration vector in mg
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
