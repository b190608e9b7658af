#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod device;
pub mod imu;
pub mod interface;
pub mod registers;
pub mod sensors;

// Re-export main types
pub use config::{BringUpReport, BringUpStep, ConfigField, FieldSetting, Lsm303cConfig};
pub use device::{AccelStatus, Lsm303cDriver, MagStatus, RawSample};
pub use imu::MotionSensor;
pub use interface::{DataLine, I2cInterface, InterfaceMode, RegisterInterface, SpiInterface};
pub use sensors::{
    AccelAxes, AccelBlockDataUpdate, AccelDataMg, AccelFullScale, AccelOdr, MagBlockDataUpdate,
    MagDataGauss, MagFullScale, MagOdr, MagRunMode, MagTemperature, MagXyMode, MagZMode,
};

/// Accelerometer I2C address (fixed by the package, no address pin)
pub const ACCEL_I2C_ADDRESS: u8 = 0x1D;

/// Magnetometer I2C address (fixed by the package, no address pin)
pub const MAG_I2C_ADDRESS: u8 = 0x1E;

/// Expected value of the accelerometer `WHO_AM_I_A` register
pub const ACCEL_WHO_AM_I_VALUE: u8 = 0x41;

/// Expected value of the magnetometer `WHO_AM_I_M` register
pub const MAG_WHO_AM_I_VALUE: u8 = 0x3D;

/// Sub-device selector
///
/// The LSM303C packages two independent register banks. On I2C each one answers
/// on its own address, on SPI each one has its own chip-select line while the
/// clock and data lines are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Chip {
    /// Accelerometer register bank
    Accelerometer,
    /// Magnetometer register bank (also hosts the temperature sensor)
    Magnetometer,
}

impl Chip {
    /// I2C address of this sub-device
    #[must_use]
    pub const fn i2c_address(self) -> u8 {
        match self {
            Self::Accelerometer => ACCEL_I2C_ADDRESS,
            Self::Magnetometer => MAG_I2C_ADDRESS,
        }
    }

    /// Expected `WHO_AM_I` value of this sub-device
    #[must_use]
    pub const fn who_am_i_value(self) -> u8 {
        match self {
            Self::Accelerometer => ACCEL_WHO_AM_I_VALUE,
            Self::Magnetometer => MAG_WHO_AM_I_VALUE,
        }
    }
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device (hardware error)
    Bus(E),
    /// Invalid configuration, e.g. an unrecognized interface mode value
    InvalidConfig,
    /// The requested transport path is not implemented by the owned interface
    NotSupported,
    /// Invalid `WHO_AM_I` register value (contains the chip and the value read)
    InvalidDevice(Chip, u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
