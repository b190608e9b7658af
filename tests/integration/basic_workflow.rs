//! Integration tests for basic LSM303C workflows

use crate::common::mock_i2c::MockI2c;
use crate::common::test_utils::create_sim_spi_interface;
use crate::common::{assert_float_eq, create_mock_driver};
use lsm303c::registers::{accel, mag};
use lsm303c::{
    ACCEL_I2C_ADDRESS, AccelFullScale, AccelOdr, Chip, I2cInterface, InterfaceMode,
    Lsm303cConfig, Lsm303cDriver, MAG_I2C_ADDRESS, MagFullScale,
};

#[test]
fn test_complete_i2c_workflow() {
    let bus = MockI2c::new();
    bus.set_register(ACCEL_I2C_ADDRESS, accel::WHO_AM_I, 0x41);
    bus.set_register(MAG_I2C_ADDRESS, mag::WHO_AM_I, 0x3D);
    let mut driver = Lsm303cDriver::new(I2cInterface::new(bus.clone()));

    // Step 1: identify and bring up
    driver.verify_identity().unwrap();
    driver
        .init(InterfaceMode::I2c, &Lsm303cConfig::default())
        .unwrap();

    // Step 2: sensor produces a sample
    bus.set_register(ACCEL_I2C_ADDRESS, accel::STATUS, 0x0F);
    for (register, value) in [
        (accel::OUT_X_L, 0x00),
        (accel::OUT_X_H, 0x00),
        (accel::OUT_Y_L, 0x00),
        (accel::OUT_Y_H, 0x00),
        (accel::OUT_Z_L, 0x00),
        (accel::OUT_Z_H, 0x40),
    ] {
        bus.set_register(ACCEL_I2C_ADDRESS, register, value);
    }
    bus.set_register(MAG_I2C_ADDRESS, mag::STATUS_REG, 0x08);
    bus.set_register(MAG_I2C_ADDRESS, mag::OUTX_H, 0x02);
    bus.set_register(MAG_I2C_ADDRESS, mag::OUTX_L, 0x00);
    bus.set_register(MAG_I2C_ADDRESS, mag::TEMP_OUT_H, 0x00);
    bus.set_register(MAG_I2C_ADDRESS, mag::TEMP_OUT_L, 0x28);

    // Step 3: read physical values
    assert_eq!(driver.read_acceleration_z(), 1000.0);
    assert_eq!(driver.read_magnetic_field_x(), 0.25);
    assert_eq!(driver.read_temperature_c(), 30.0);
    assert_eq!(driver.read_temperature_f(), 86.0);

    // Temperature enable landed without disturbing the bring-up bits
    assert_eq!(bus.get_register(MAG_I2C_ADDRESS, mag::CTRL_REG1), 0xD8);
}

#[test]
fn test_complete_spi_workflow() {
    let (interface, bus) = create_sim_spi_interface();
    bus.set_register(Chip::Accelerometer, accel::WHO_AM_I, 0x41);
    bus.set_register(Chip::Magnetometer, mag::WHO_AM_I, 0x3D);
    let mut driver = Lsm303cDriver::new(interface);

    driver
        .init(InterfaceMode::Spi, &Lsm303cConfig::default())
        .unwrap();
    driver.verify_identity().unwrap();

    bus.set_register(Chip::Magnetometer, mag::STATUS_REG, 0x08);
    bus.set_register(Chip::Magnetometer, mag::OUTY_H, 0xF8);
    bus.set_register(Chip::Magnetometer, mag::OUTY_L, 0x00);
    bus.set_register(Chip::Accelerometer, accel::STATUS, 0x08);
    bus.set_register(Chip::Accelerometer, accel::OUT_X_H, 0xE0);
    bus.set_register(Chip::Accelerometer, accel::OUT_X_L, 0x00);

    // -2048 counts at ±16 gauss, -8192 counts at ±2 g
    assert_eq!(driver.read_magnetic_field_y(), -1.0);
    assert_eq!(driver.read_acceleration_x(), -500.0);
    assert!(bus.violations().is_empty(), "{:?}", bus.violations());
}

#[test]
fn test_reconfigure_after_init() {
    let (mut driver, interface) = create_mock_driver();
    driver
        .init(InterfaceMode::I2c, &Lsm303cConfig::default())
        .unwrap();

    driver.set_accel_full_scale(AccelFullScale::G4).unwrap();
    driver.set_accel_odr(AccelOdr::Hz800).unwrap();
    driver.set_mag_full_scale(MagFullScale::Ga12).unwrap();

    // Only the touched fields moved
    assert_eq!(interface.get_register(Chip::Accelerometer, accel::CTRL1), 0x6F);
    assert_eq!(interface.get_register(Chip::Accelerometer, accel::CTRL4), 0x20);
    assert_eq!(interface.get_register(Chip::Magnetometer, mag::CTRL_REG2), 0x40);

    interface.set_accel_data(8192, 0, 0);
    interface.set_mag_data(8192, 0, 0);
    assert_eq!(driver.read_acceleration_x(), 1000.0);
    assert_float_eq(driver.read_magnetic_field_x(), 3.0, 1e-6);
}

#[test]
fn test_polling_faster_than_output_rate() {
    let (mut driver, interface) = create_mock_driver();
    driver
        .init(InterfaceMode::I2c, &Lsm303cConfig::default())
        .unwrap();

    interface.set_accel_data(0, 0, 16384);
    let mut readings = Vec::new();
    for _ in 0..5 {
        readings.push(driver.read_acceleration_z());
    }
    assert!(readings.iter().all(|&z| z == 1000.0));

    // Next sample arrives
    interface.set_accel_data(0, 0, 8192);
    assert_eq!(driver.read_acceleration_z(), 500.0);
}
