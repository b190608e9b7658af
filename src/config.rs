//! Configuration bitfields and the bring-up sequence
//!
//! Every LSM303C setting occupies a few bits of a control register that it
//! shares with unrelated settings. A setting is therefore described as a
//! [`FieldSetting`] (chip, register, mask, bits) and applied with a strict
//! read-modify-write cycle so the neighbouring bits survive.
//!
//! # Example
//!
//! ```ignore
//! # use lsm303c::{Lsm303cConfig, InterfaceMode, AccelOdr};
//! let config = Lsm303cConfig {
//!     accel_odr: AccelOdr::Hz400,
//!     ..Lsm303cConfig::default()
//! };
//! imu.init(InterfaceMode::I2c, &config)?;
//! # Ok::<(), lsm303c::Error<()>>(())
//! ```

use crate::sensors::{
    AccelAxes, AccelBlockDataUpdate, AccelFullScale, AccelOdr, MagBlockDataUpdate, MagFullScale,
    MagOdr, MagRunMode, MagXyMode, MagZMode,
};
use crate::{Chip, Error};

/// Maximum number of steps a bring-up can run (ten settings plus two SPI
/// read-enable writes)
pub const MAX_BRING_UP_STEPS: usize = 12;

/// One logical setting inside a shared control register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldSetting {
    /// Register bank holding the field
    pub chip: Chip,
    /// Register address
    pub register: u8,
    /// Bits owned by the field
    pub mask: u8,
    /// New field value, already shifted into position
    pub bits: u8,
}

impl FieldSetting {
    /// Merge the field into the current register value
    ///
    /// Bits outside `mask` are taken from `current`, bits inside from `bits`.
    #[must_use]
    pub const fn apply(self, current: u8) -> u8 {
        (current & !self.mask) | (self.bits & self.mask)
    }
}

/// A typed register field
///
/// Implemented by the setting enums in [`sensors`](crate::sensors). The
/// discriminant of each variant is the field value in register position.
pub trait ConfigField: Copy {
    /// Register bank holding the field
    const CHIP: Chip;
    /// Register address
    const REGISTER: u8;
    /// Bits owned by the field
    const MASK: u8;

    /// Field value in register position
    fn bits(self) -> u8;

    /// Describe this value as a [`FieldSetting`]
    fn setting(self) -> FieldSetting {
        FieldSetting {
            chip: Self::CHIP,
            register: Self::REGISTER,
            mask: Self::MASK,
            bits: self.bits() & Self::MASK,
        }
    }
}

/// Steps of the bring-up sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringUpStep {
    /// Magnetometer SPI read enable (SPI only, blind write)
    MagSpiMode,
    /// Accelerometer SPI read enable (SPI only, blind write)
    AccelSpiMode,
    /// Magnetometer output data rate
    MagOdr,
    /// Magnetometer full scale
    MagFullScale,
    /// Magnetometer block data update
    MagBlockDataUpdate,
    /// Magnetometer X/Y operating mode
    MagXyMode,
    /// Magnetometer Z operating mode
    MagZMode,
    /// Magnetometer run mode
    MagRunMode,
    /// Accelerometer full scale
    AccelFullScale,
    /// Accelerometer block data update
    AccelBlockDataUpdate,
    /// Accelerometer axis enable mask
    AccelAxes,
    /// Accelerometer output data rate
    AccelOdr,
}

/// Complete sensor configuration applied by [`init`](crate::Lsm303cDriver::init)
///
/// The default matches the usual bring-up: magnetometer at 40 Hz, ±16 gauss,
/// high-performance on all axes, continuous conversion; accelerometer at
/// 100 Hz, ±2 g, all axes enabled; block data update on for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lsm303cConfig {
    /// Magnetometer output data rate
    pub mag_odr: MagOdr,
    /// Magnetometer full scale
    pub mag_full_scale: MagFullScale,
    /// Magnetometer block data update
    pub mag_block_data_update: MagBlockDataUpdate,
    /// Magnetometer X/Y operating mode
    pub mag_xy_mode: MagXyMode,
    /// Magnetometer Z operating mode
    pub mag_z_mode: MagZMode,
    /// Magnetometer run mode
    pub mag_run_mode: MagRunMode,
    /// Accelerometer full scale
    pub accel_full_scale: AccelFullScale,
    /// Accelerometer block data update
    pub accel_block_data_update: AccelBlockDataUpdate,
    /// Enabled accelerometer axes
    pub accel_axes: AccelAxes,
    /// Accelerometer output data rate
    pub accel_odr: AccelOdr,
}

impl Default for Lsm303cConfig {
    fn default() -> Self {
        Self {
            mag_odr: MagOdr::Hz40,
            mag_full_scale: MagFullScale::Ga16,
            mag_block_data_update: MagBlockDataUpdate::Enabled,
            mag_xy_mode: MagXyMode::HighPerformance,
            mag_z_mode: MagZMode::HighPerformance,
            mag_run_mode: MagRunMode::Continuous,
            accel_full_scale: AccelFullScale::G2,
            accel_block_data_update: AccelBlockDataUpdate::Enabled,
            accel_axes: AccelAxes::ALL,
            accel_odr: AccelOdr::Hz100,
        }
    }
}

impl Lsm303cConfig {
    /// The ten read-modify-write steps of the bring-up, in the order they
    /// must be applied
    #[must_use]
    pub fn steps(&self) -> [(BringUpStep, FieldSetting); 10] {
        [
            (BringUpStep::MagOdr, self.mag_odr.setting()),
            (BringUpStep::MagFullScale, self.mag_full_scale.setting()),
            (
                BringUpStep::MagBlockDataUpdate,
                self.mag_block_data_update.setting(),
            ),
            (BringUpStep::MagXyMode, self.mag_xy_mode.setting()),
            (BringUpStep::MagZMode, self.mag_z_mode.setting()),
            (BringUpStep::MagRunMode, self.mag_run_mode.setting()),
            (BringUpStep::AccelFullScale, self.accel_full_scale.setting()),
            (
                BringUpStep::AccelBlockDataUpdate,
                self.accel_block_data_update.setting(),
            ),
            (BringUpStep::AccelAxes, self.accel_axes.setting()),
            (BringUpStep::AccelOdr, self.accel_odr.setting()),
        ]
    }
}

/// Outcome of a bring-up
///
/// Every step is attempted even after an earlier one failed, so the report
/// lists all failing steps. Nothing is rolled back: after a failure the chip
/// is left partially configured.
#[derive(Debug)]
pub struct BringUpReport<E> {
    attempted: usize,
    failures: heapless::Vec<(BringUpStep, Error<E>), MAX_BRING_UP_STEPS>,
}

impl<E> Default for BringUpReport<E> {
    fn default() -> Self {
        Self {
            attempted: 0,
            failures: heapless::Vec::new(),
        }
    }
}

impl<E> BringUpReport<E> {
    /// Record the outcome of one step
    pub(crate) fn record(&mut self, step: BringUpStep, result: Result<(), Error<E>>) {
        self.attempted += 1;
        if let Err(error) = result {
            // Capacity covers every step, a full vector cannot happen
            let _ = self.failures.push((step, error));
        }
    }

    /// Number of steps that were executed
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.attempted
    }

    /// `true` if every step succeeded
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failed steps with their errors, in execution order
    #[must_use]
    pub fn failures(&self) -> &[(BringUpStep, Error<E>)] {
        &self.failures
    }

    /// Collapse the report into a single result
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step.
    pub fn into_result(self) -> Result<(), Error<E>> {
        match self.failures.into_iter().next() {
            Some((_, error)) => Err(error),
            None => Ok(()),
        }
    }
}
