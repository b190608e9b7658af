//! Unit tests for error handling and recovery

use crate::common::create_mock_driver;
use crate::common::mock_interface::MockError;
use lsm303c::registers::{accel, mag};
use lsm303c::{Chip, Error, InterfaceMode, Lsm303cConfig, MotionSensor};

#[test]
fn test_identity_check_passes() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(Chip::Accelerometer, accel::WHO_AM_I, 0x41);
    interface.set_register(Chip::Magnetometer, mag::WHO_AM_I, 0x3D);

    assert_eq!(driver.who_am_i(Chip::Accelerometer), Ok(0x41));
    assert_eq!(driver.who_am_i(Chip::Magnetometer), Ok(0x3D));
    assert_eq!(driver.verify_identity(), Ok(()));
}

#[test]
fn test_identity_mismatch_reports_chip() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(Chip::Accelerometer, accel::WHO_AM_I, 0x41);
    interface.set_register(Chip::Magnetometer, mag::WHO_AM_I, 0x33);

    assert_eq!(
        driver.verify_identity(),
        Err(Error::InvalidDevice(Chip::Magnetometer, 0x33))
    );
}

#[test]
fn test_identity_read_failure() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_next_read();

    assert_eq!(
        driver.verify_identity(),
        Err(Error::Bus(MockError::Communication))
    );
}

#[test]
fn test_unknown_mode_value_is_invalid_config() {
    assert_eq!(
        InterfaceMode::from_raw::<MockError>(0),
        Ok(InterfaceMode::I2c)
    );
    assert_eq!(
        InterfaceMode::from_raw::<MockError>(1),
        Ok(InterfaceMode::Spi)
    );
    for value in [2u8, 0x80, 0xFF] {
        assert_eq!(
            InterfaceMode::from_raw::<MockError>(value),
            Err(Error::InvalidConfig)
        );
    }
}

#[test]
fn test_bus_error_conversion() {
    let error: Error<MockError> = MockError::Communication.into();
    assert_eq!(error, Error::Bus(MockError::Communication));
}

#[test]
fn test_register_access_errors() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_write();
    assert_eq!(
        driver.write_register(Chip::Accelerometer, accel::CTRL2, 0x00),
        Err(Error::Bus(MockError::Communication))
    );

    interface.fail_next_read();
    assert!(driver.read_register(Chip::Accelerometer, accel::CTRL2).is_err());

    // Single failures do not stick
    driver
        .write_register(Chip::Accelerometer, accel::CTRL2, 0x12)
        .unwrap();
    assert_eq!(driver.read_register(Chip::Accelerometer, accel::CTRL2), Ok(0x12));
}

#[test]
fn test_single_read_failure_recovery() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(16384, 0, 0);

    interface.fail_next_read();
    assert!(driver.read_acceleration_x().is_nan());

    assert_eq!(driver.read_acceleration_x(), 1000.0);
}

#[test]
fn test_motion_sensor_begin_and_accessors() {
    let (mut driver, interface) = create_mock_driver();

    MotionSensor::begin(&mut driver).unwrap();
    assert_eq!(
        interface.get_register(Chip::Accelerometer, accel::CTRL1),
        0x3F
    );

    interface.set_accel_data(0, 16384, 0);
    interface.set_mag_data(0, 0, -2048);
    interface.set_temperature_data(8);

    let sensor: &mut dyn MotionSensor<Error = Error<MockError>> = &mut driver;
    assert_eq!(sensor.read_acceleration_y(), 1000.0);
    assert_eq!(sensor.read_acceleration_x(), 0.0);
    assert_eq!(sensor.read_magnetic_field_z(), -1.0);
    assert_eq!(sensor.read_temperature_c(), 26.0);
}

#[test]
fn test_motion_sensor_begin_reports_failure() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_writes_of(Chip::Accelerometer, accel::CTRL1);

    assert!(MotionSensor::begin(&mut driver).is_err());
    // Magnetometer steps ran regardless
    assert_eq!(interface.get_register(Chip::Magnetometer, mag::CTRL_REG2), 0x60);
}

#[test]
fn test_init_over_matching_mode_only() {
    let (mut driver, _interface) = create_mock_driver();
    assert_eq!(driver.mode(), InterfaceMode::I2c);
    assert_eq!(
        driver.init(InterfaceMode::Spi, &Lsm303cConfig::default()),
        Err(Error::NotSupported)
    );
}
