//! High-level driver API for the LSM303C
//!
//! This module provides the driver itself: register access routed through
//! the owned [`RegisterInterface`], read-modify-write configuration, the
//! status-gated acquisition of accelerometer and magnetometer samples, and
//! the float accessors built on top of them.

use crate::config::{BringUpReport, BringUpStep, ConfigField, FieldSetting, Lsm303cConfig};
use crate::interface::{InterfaceMode, RegisterInterface};
use crate::registers::{accel, mag};
use crate::sensors::{
    AccelAxes, AccelBlockDataUpdate, AccelDataMg, AccelFullScale, AccelOdr, MagBlockDataUpdate,
    MagDataGauss, MagFullScale, MagOdr, MagRunMode, MagTemperature, MagXyMode, MagZMode,
    celsius_to_fahrenheit, temperature_to_celsius,
};
use crate::{Chip, Error};

/// Raw 3-axis sample (signed 16-bit counts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// X-axis (raw)
    pub x: i16,
    /// Y-axis (raw)
    pub y: i16,
    /// Z-axis (raw)
    pub z: i16,
}

/// Accelerometer status flags (`STATUS_A`)
///
/// Read before every acquisition and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelStatus(pub u8);

impl AccelStatus {
    /// New X, Y and Z data available
    #[must_use]
    pub const fn new_data(self) -> bool {
        self.0 & accel::STATUS_ZYXDA != 0
    }

    /// Per-axis new data flags (X, Y, Z)
    #[must_use]
    pub const fn axis_new_data(self) -> (bool, bool, bool) {
        (
            self.0 & accel::STATUS_XDA != 0,
            self.0 & accel::STATUS_YDA != 0,
            self.0 & accel::STATUS_ZDA != 0,
        )
    }

    /// A sample was overwritten before it was read
    #[must_use]
    pub const fn overrun(self) -> bool {
        self.0 & accel::STATUS_ZYXOR != 0
    }
}

/// Magnetometer status flags (`STATUS_REG_M`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagStatus(pub u8);

impl MagStatus {
    /// New X, Y and Z data available
    #[must_use]
    pub const fn new_data(self) -> bool {
        self.0 & mag::STATUS_ZYXDA != 0
    }

    /// A sample was overwritten before it was read
    #[must_use]
    pub const fn overrun(self) -> bool {
        self.0 & mag::STATUS_ZYXOR != 0
    }
}

/// Main driver for the LSM303C
///
/// The transport is fixed by the interface handed to [`new`](Self::new) and
/// never changes afterwards. The driver keeps the last complete accelerometer
/// and magnetometer sample; polling faster than the configured output data
/// rate returns that sample again instead of waiting for a new one.
pub struct Lsm303cDriver<I> {
    interface: I,
    accel_sample: Option<RawSample>,
    mag_sample: Option<RawSample>,
    accel_full_scale: AccelFullScale,
    mag_full_scale: MagFullScale,
}

impl<I> Lsm303cDriver<I>
where
    I: RegisterInterface,
{
    /// Create a new LSM303C driver instance
    ///
    /// No bus traffic happens here. Call [`init`](Self::init) to configure
    /// the device. Until then conversions assume ±2 g and ±16 gauss.
    pub const fn new(interface: I) -> Self {
        Self {
            interface,
            accel_sample: None,
            mag_sample: None,
            accel_full_scale: AccelFullScale::G2,
            mag_full_scale: MagFullScale::Ga16,
        }
    }

    /// Transport this driver talks over
    #[must_use]
    pub const fn mode(&self) -> InterfaceMode {
        I::MODE
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Read one register
    ///
    /// Every register access of the driver goes through this method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transfer failed.
    pub fn read_register(&mut self, chip: Chip, address: u8) -> Result<u8, Error<I::Error>> {
        self.interface.read_register(chip, address).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Read of {} register 0x{:02x} failed", chip, address);
            Error::Bus(e)
        })
    }

    /// Write one register
    ///
    /// Over SPI a successful write only means the bits were sent, see
    /// [`SpiInterface`](crate::SpiInterface).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transfer failed.
    pub fn write_register(
        &mut self,
        chip: Chip,
        address: u8,
        value: u8,
    ) -> Result<(), Error<I::Error>> {
        self.interface
            .write_register(chip, address, value)
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Write of 0x{:02x} to {} register 0x{:02x} failed",
                    value,
                    chip,
                    address
                );
                Error::Bus(e)
            })
    }

    /// Read the `WHO_AM_I` register of `chip`
    ///
    /// Should return 0x41 for the accelerometer and 0x3D for the magnetometer.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn who_am_i(&mut self, chip: Chip) -> Result<u8, Error<I::Error>> {
        let address = match chip {
            Chip::Accelerometer => accel::WHO_AM_I,
            Chip::Magnetometer => mag::WHO_AM_I,
        };
        self.read_register(chip, address)
    }

    /// Verify both `WHO_AM_I` registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication fails, or [`Error::InvalidDevice`]
    /// with the offending chip and value on a mismatch.
    pub fn verify_identity(&mut self) -> Result<(), Error<I::Error>> {
        for chip in [Chip::Accelerometer, Chip::Magnetometer] {
            let who_am_i = self.who_am_i(chip)?;
            if who_am_i != chip.who_am_i_value() {
                return Err(Error::InvalidDevice(chip, who_am_i));
            }
        }
        Ok(())
    }

    /// Apply one register field with a read-modify-write cycle
    ///
    /// Reads the register, replaces the bits covered by the mask and writes
    /// the result back. Fields sharing a register must be applied one after
    /// the other; each cycle works on the value left by the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or the write fails. A failed read skips
    /// the write.
    pub fn apply_field(&mut self, setting: FieldSetting) -> Result<(), Error<I::Error>> {
        let current = self.read_register(setting.chip, setting.register)?;
        self.write_register(setting.chip, setting.register, setting.apply(current))
    }

    /// Apply a typed field, see [`apply_field`](Self::apply_field)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_field<F: ConfigField>(&mut self, field: F) -> Result<(), Error<I::Error>> {
        self.apply_field(field.setting())
    }

    /// Set the magnetometer output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_odr(&mut self, odr: MagOdr) -> Result<(), Error<I::Error>> {
        self.set_field(odr)
    }

    /// Set the magnetometer full-scale range
    ///
    /// Subsequent conversions use the new sensitivity once the write succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_full_scale(&mut self, full_scale: MagFullScale) -> Result<(), Error<I::Error>> {
        self.set_field(full_scale)?;
        self.mag_full_scale = full_scale;
        Ok(())
    }

    /// Set the magnetometer block data update mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_block_data_update(
        &mut self,
        mode: MagBlockDataUpdate,
    ) -> Result<(), Error<I::Error>> {
        self.set_field(mode)
    }

    /// Set the magnetometer X/Y operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_xy_mode(&mut self, mode: MagXyMode) -> Result<(), Error<I::Error>> {
        self.set_field(mode)
    }

    /// Set the magnetometer Z operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_z_mode(&mut self, mode: MagZMode) -> Result<(), Error<I::Error>> {
        self.set_field(mode)
    }

    /// Set the magnetometer run mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_run_mode(&mut self, mode: MagRunMode) -> Result<(), Error<I::Error>> {
        self.set_field(mode)
    }

    /// Enable or disable the temperature sensor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_temperature(&mut self, enable: MagTemperature) -> Result<(), Error<I::Error>> {
        self.set_field(enable)
    }

    /// Set the accelerometer full-scale range
    ///
    /// Subsequent conversions use the new sensitivity once the write succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_full_scale(
        &mut self,
        full_scale: AccelFullScale,
    ) -> Result<(), Error<I::Error>> {
        self.set_field(full_scale)?;
        self.accel_full_scale = full_scale;
        Ok(())
    }

    /// Set the accelerometer block data update mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_block_data_update(
        &mut self,
        mode: AccelBlockDataUpdate,
    ) -> Result<(), Error<I::Error>> {
        self.set_field(mode)
    }

    /// Enable accelerometer axes
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_axes(&mut self, axes: AccelAxes) -> Result<(), Error<I::Error>> {
        self.set_field(axes)
    }

    /// Set the accelerometer output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_odr(&mut self, odr: AccelOdr) -> Result<(), Error<I::Error>> {
        self.set_field(odr)
    }

    /// Full-scale range used for acceleration conversions
    #[must_use]
    pub const fn accel_full_scale(&self) -> AccelFullScale {
        self.accel_full_scale
    }

    /// Full-scale range used for magnetic field conversions
    #[must_use]
    pub const fn mag_full_scale(&self) -> MagFullScale {
        self.mag_full_scale
    }

    fn enable_mag_spi_read(&mut self) -> Result<(), Error<I::Error>> {
        self.write_register(
            Chip::Magnetometer,
            mag::CTRL_REG3,
            mag::CTRL_REG3_I2C_DISABLE | mag::CTRL_REG3_SIM,
        )
    }

    fn enable_accel_spi_read(&mut self) -> Result<(), Error<I::Error>> {
        self.write_register(
            Chip::Accelerometer,
            accel::CTRL4,
            accel::CTRL4_IF_ADD_INC | accel::CTRL4_I2C_DISABLE | accel::CTRL4_SIM,
        )?;
        // The blind value clears the FS field
        self.accel_full_scale = AccelFullScale::G2;
        Ok(())
    }

    /// Enable SPI reads on both sub-chips and disable their I2C interfaces
    ///
    /// **Required for SPI operation!** Out of reset the 3-wire SPI port only
    /// accepts writes, so the control registers are written blind here
    /// instead of read-modified-written. [`init`](Self::init) calls this
    /// automatically over SPI.
    ///
    /// The magnetometer is left in continuous mode and the accelerometer at
    /// ±2 g with address auto-increment; the bring-up fields overwrite those.
    /// Acceleration conversions follow the ±2 g reset until the full scale
    /// is set again.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_spi_mode(&mut self) -> Result<(), Error<I::Error>> {
        self.enable_mag_spi_read()?;
        self.enable_accel_spi_read()
    }

    /// Initialize the device
    ///
    /// Runs the bring-up sequence: magnetometer ODR, full scale, block data
    /// update, X/Y mode, Z mode and run mode, then accelerometer full scale,
    /// block data update, axis enable and ODR. Over SPI the read enable
    /// writes of [`enable_spi_mode`](Self::enable_spi_mode) come first.
    ///
    /// Every step is attempted even when an earlier one failed. Use
    /// [`init_with_report`](Self::init_with_report) to see which steps failed.
    ///
    /// # Arguments
    ///
    /// * `mode` - Transport the caller expects; must match the interface
    /// * `config` - Settings to apply
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if `mode` is not the transport of the
    /// owned interface (nothing is sent), otherwise the error of the first
    /// failing step. A failed bring-up leaves the chip partially configured.
    pub fn init(
        &mut self,
        mode: InterfaceMode,
        config: &Lsm303cConfig,
    ) -> Result<(), Error<I::Error>> {
        self.init_with_report(mode, config)?.into_result()
    }

    /// Initialize the device and report every step outcome
    ///
    /// Same sequence as [`init`](Self::init).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if `mode` is not the transport of the
    /// owned interface. Step failures are reported in the returned
    /// [`BringUpReport`], not as an error.
    pub fn init_with_report(
        &mut self,
        mode: InterfaceMode,
        config: &Lsm303cConfig,
    ) -> Result<BringUpReport<I::Error>, Error<I::Error>> {
        if mode != I::MODE {
            #[cfg(feature = "defmt")]
            defmt::error!("Requested {} but the interface is {}", mode, I::MODE);
            return Err(Error::NotSupported);
        }

        let mut report = BringUpReport::default();

        if I::MODE == InterfaceMode::Spi {
            let result = self.enable_mag_spi_read();
            report.record(BringUpStep::MagSpiMode, result);
            let result = self.enable_accel_spi_read();
            report.record(BringUpStep::AccelSpiMode, result);
        }

        for (step, setting) in config.steps() {
            #[cfg(feature = "defmt")]
            defmt::debug!("Bring-up step {}", step);

            let result = self.apply_field(setting);
            if result.is_ok() {
                match step {
                    BringUpStep::MagFullScale => self.mag_full_scale = config.mag_full_scale,
                    BringUpStep::AccelFullScale => {
                        self.accel_full_scale = config.accel_full_scale;
                    }
                    _ => {}
                }
            }
            report.record(step, result);
        }

        #[cfg(feature = "defmt")]
        if !report.is_ok() {
            defmt::warn!(
                "Bring-up finished with {} failed step(s)",
                report.failures().len()
            );
        }

        Ok(report)
    }

    /// Read the accelerometer status register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_status(&mut self) -> Result<AccelStatus, Error<I::Error>> {
        self.read_register(Chip::Accelerometer, accel::STATUS)
            .map(AccelStatus)
    }

    /// Read the magnetometer status register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn mag_status(&mut self) -> Result<MagStatus, Error<I::Error>> {
        self.read_register(Chip::Magnetometer, mag::STATUS_REG)
            .map(MagStatus)
    }

    /// Read a big-endian 16-bit value, high byte first
    fn read_i16(&mut self, chip: Chip, high: u8, low: u8) -> Result<i16, Error<I::Error>> {
        let high = self.read_register(chip, high)?;
        let low = self.read_register(chip, low)?;
        Ok(i16::from_be_bytes([high, low]))
    }

    /// Read accelerometer output registers without checking the status
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_raw(&mut self) -> Result<RawSample, Error<I::Error>> {
        let x = self.read_i16(Chip::Accelerometer, accel::OUT_X_H, accel::OUT_X_L)?;
        let y = self.read_i16(Chip::Accelerometer, accel::OUT_Y_H, accel::OUT_Y_L)?;
        let z = self.read_i16(Chip::Accelerometer, accel::OUT_Z_H, accel::OUT_Z_L)?;
        Ok(RawSample { x, y, z })
    }

    /// Read magnetometer output registers without checking the status
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_mag_raw(&mut self) -> Result<RawSample, Error<I::Error>> {
        let x = self.read_i16(Chip::Magnetometer, mag::OUTX_H, mag::OUTX_L)?;
        let y = self.read_i16(Chip::Magnetometer, mag::OUTY_H, mag::OUTY_L)?;
        let z = self.read_i16(Chip::Magnetometer, mag::OUTZ_H, mag::OUTZ_L)?;
        Ok(RawSample { x, y, z })
    }

    /// Status-gated accelerometer acquisition
    ///
    /// Fetches a new sample only if the status register reports new X, Y and
    /// Z data, otherwise returns the cached one. `None` means no sample was
    /// ever acquired.
    ///
    /// # Errors
    ///
    /// Returns an error if the status read or the sample fetch fails. The
    /// cache is left untouched in that case.
    pub fn accel_sample(&mut self) -> Result<Option<RawSample>, Error<I::Error>> {
        if self.accel_status()?.new_data() {
            self.accel_sample = Some(self.read_accel_raw()?);
        } else {
            #[cfg(feature = "defmt")]
            defmt::trace!("No new accelerometer data, reusing last sample");
        }
        Ok(self.accel_sample)
    }

    /// Status-gated magnetometer acquisition, see [`accel_sample`](Self::accel_sample)
    ///
    /// # Errors
    ///
    /// Returns an error if the status read or the sample fetch fails. The
    /// cache is left untouched in that case.
    pub fn mag_sample(&mut self) -> Result<Option<RawSample>, Error<I::Error>> {
        if self.mag_status()?.new_data() {
            self.mag_sample = Some(self.read_mag_raw()?);
        } else {
            #[cfg(feature = "defmt")]
            defmt::trace!("No new magnetometer data, reusing last sample");
        }
        Ok(self.mag_sample)
    }

    /// Last accelerometer sample, without bus traffic
    #[must_use]
    pub const fn cached_accel(&self) -> Option<RawSample> {
        self.accel_sample
    }

    /// Last magnetometer sample, without bus traffic
    #[must_use]
    pub const fn cached_mag(&self) -> Option<RawSample> {
        self.mag_sample
    }

    /// Read acceleration on all axes in mg
    ///
    /// One status-gated acquisition for the three axes. All fields are NaN
    /// if no sample was ever acquired.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_acceleration(&mut self) -> Result<AccelDataMg, Error<I::Error>> {
        let sensitivity = self.accel_full_scale.sensitivity();
        Ok(match self.accel_sample()? {
            Some(s) => AccelDataMg::from_raw(s.x, s.y, s.z, sensitivity),
            None => AccelDataMg {
                x: f32::NAN,
                y: f32::NAN,
                z: f32::NAN,
            },
        })
    }

    /// Read the magnetic field on all axes in gauss
    ///
    /// All fields are NaN if no sample was ever acquired.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_magnetic_field(&mut self) -> Result<MagDataGauss, Error<I::Error>> {
        let sensitivity = self.mag_full_scale.sensitivity();
        Ok(match self.mag_sample()? {
            Some(s) => MagDataGauss::from_raw(s.x, s.y, s.z, sensitivity),
            None => MagDataGauss {
                x: f32::NAN,
                y: f32::NAN,
                z: f32::NAN,
            },
        })
    }

    fn accel_axis(&mut self, axis: fn(&AccelDataMg) -> f32) -> f32 {
        self.read_acceleration()
            .map_or(f32::NAN, |data| axis(&data))
    }

    fn mag_axis(&mut self, axis: fn(&MagDataGauss) -> f32) -> f32 {
        self.read_magnetic_field()
            .map_or(f32::NAN, |data| axis(&data))
    }

    /// X-axis acceleration in mg, NaN on any failure
    pub fn read_acceleration_x(&mut self) -> f32 {
        self.accel_axis(|d| d.x)
    }

    /// Y-axis acceleration in mg, NaN on any failure
    pub fn read_acceleration_y(&mut self) -> f32 {
        self.accel_axis(|d| d.y)
    }

    /// Z-axis acceleration in mg, NaN on any failure
    pub fn read_acceleration_z(&mut self) -> f32 {
        self.accel_axis(|d| d.z)
    }

    /// X-axis magnetic field in gauss, NaN on any failure
    pub fn read_magnetic_field_x(&mut self) -> f32 {
        self.mag_axis(|d| d.x)
    }

    /// Y-axis magnetic field in gauss, NaN on any failure
    pub fn read_magnetic_field_y(&mut self) -> f32 {
        self.mag_axis(|d| d.y)
    }

    /// Z-axis magnetic field in gauss, NaN on any failure
    pub fn read_magnetic_field_z(&mut self) -> f32 {
        self.mag_axis(|d| d.z)
    }

    /// Read the raw temperature count
    ///
    /// Enables the temperature sensor first, then reads `TEMP_OUT_H_M` and
    /// `TEMP_OUT_L_M`.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. If enabling
    /// the sensor fails, the output registers are not read.
    pub fn read_temperature_raw(&mut self) -> Result<i16, Error<I::Error>> {
        self.set_mag_temperature(MagTemperature::Enabled)?;
        self.read_i16(Chip::Magnetometer, mag::TEMP_OUT_H, mag::TEMP_OUT_L)
    }

    /// Temperature in °C, NaN on any failure
    pub fn read_temperature_c(&mut self) -> f32 {
        self.read_temperature_raw()
            .map_or(f32::NAN, temperature_to_celsius)
    }

    /// Temperature in °F, NaN on any failure
    pub fn read_temperature_f(&mut self) -> f32 {
        celsius_to_fahrenheit(self.read_temperature_c())
    }
}
