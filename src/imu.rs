//! Sensor-agnostic accessor surface
//!
//! Application code that only needs acceleration, magnetic field and
//! temperature readings can be written against [`MotionSensor`] and work with
//! any conforming chip driver. The accessors return plain physical values;
//! every failure shows up as NaN.
//!
//! ```ignore
//! fn log_heading_inputs<S: MotionSensor>(sensor: &mut S) {
//!     let (mx, my) = (sensor.read_magnetic_field_x(), sensor.read_magnetic_field_y());
//!     if mx.is_nan() || my.is_nan() {
//!         return;
//!     }
//!     // ...
//! }
//! ```

use crate::config::Lsm303cConfig;
use crate::device::Lsm303cDriver;
use crate::interface::RegisterInterface;

/// Accelerometer, magnetometer and thermometer accessors
pub trait MotionSensor {
    /// Bring-up error type
    type Error;

    /// Bring the sensor up with its default configuration
    ///
    /// # Errors
    ///
    /// Returns the driver error if any configuration step failed.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// X-axis acceleration in mg
    fn read_acceleration_x(&mut self) -> f32;
    /// Y-axis acceleration in mg
    fn read_acceleration_y(&mut self) -> f32;
    /// Z-axis acceleration in mg
    fn read_acceleration_z(&mut self) -> f32;

    /// X-axis magnetic field in gauss
    fn read_magnetic_field_x(&mut self) -> f32;
    /// Y-axis magnetic field in gauss
    fn read_magnetic_field_y(&mut self) -> f32;
    /// Z-axis magnetic field in gauss
    fn read_magnetic_field_z(&mut self) -> f32;

    /// Temperature in °C
    fn read_temperature_c(&mut self) -> f32;
    /// Temperature in °F
    fn read_temperature_f(&mut self) -> f32;
}

impl<I> MotionSensor for Lsm303cDriver<I>
where
    I: RegisterInterface,
{
    type Error = crate::Error<I::Error>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.init(I::MODE, &Lsm303cConfig::default())
    }

    fn read_acceleration_x(&mut self) -> f32 {
        Self::read_acceleration_x(self)
    }

    fn read_acceleration_y(&mut self) -> f32 {
        Self::read_acceleration_y(self)
    }

    fn read_acceleration_z(&mut self) -> f32 {
        Self::read_acceleration_z(self)
    }

    fn read_magnetic_field_x(&mut self) -> f32 {
        Self::read_magnetic_field_x(self)
    }

    fn read_magnetic_field_y(&mut self) -> f32 {
        Self::read_magnetic_field_y(self)
    }

    fn read_magnetic_field_z(&mut self) -> f32 {
        Self::read_magnetic_field_z(self)
    }

    fn read_temperature_c(&mut self) -> f32 {
        Self::read_temperature_c(self)
    }

    fn read_temperature_f(&mut self) -> f32 {
        Self::read_temperature_f(self)
    }
}
