//! Unit tests for status-gated sample acquisition and unit conversion

use crate::common::{assert_float_eq, create_mock_driver};
use lsm303c::registers::{accel, mag};
use lsm303c::{AccelFullScale, AccelStatus, Chip, MagFullScale, MagStatus, RawSample};

#[test]
fn test_stale_first_read_is_nan() {
    let (mut driver, interface) = create_mock_driver();

    assert!(driver.read_acceleration_x().is_nan());
    assert!(driver.read_magnetic_field_z().is_nan());

    // Only the status registers were touched
    assert_eq!(interface.reads_of(Chip::Accelerometer), vec![accel::STATUS]);
    assert_eq!(interface.reads_of(Chip::Magnetometer), vec![mag::STATUS_REG]);
    assert_eq!(driver.cached_accel(), None);
    assert_eq!(driver.cached_mag(), None);
}

#[test]
fn test_fetch_reads_high_byte_first() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(1, 2, 3);

    driver.accel_sample().unwrap();

    assert_eq!(
        interface.reads_of(Chip::Accelerometer),
        vec![
            accel::STATUS,
            accel::OUT_X_H,
            accel::OUT_X_L,
            accel::OUT_Y_H,
            accel::OUT_Y_L,
            accel::OUT_Z_H,
            accel::OUT_Z_L,
        ]
    );
}

#[test]
fn test_raw_sample_assembly() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(0x1234, -1, i16::MIN);
    interface.set_mag_data(i16::MAX, 0, -2);

    assert_eq!(
        driver.accel_sample().unwrap(),
        Some(RawSample {
            x: 0x1234,
            y: -1,
            z: i16::MIN,
        })
    );
    assert_eq!(
        driver.mag_sample().unwrap(),
        Some(RawSample {
            x: i16::MAX,
            y: 0,
            z: -2,
        })
    );
}

#[test]
fn test_acceleration_conversion_is_exact() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(16384, -16384, 0);

    let data = driver.read_acceleration().unwrap();

    assert_eq!(data.x, 1000.0);
    assert_eq!(data.y, -1000.0);
    assert_eq!(data.z, 0.0);
}

#[test]
fn test_magnetic_field_conversion_is_exact() {
    let (mut driver, interface) = create_mock_driver();
    assert_eq!(driver.mag_full_scale(), MagFullScale::Ga16);
    interface.set_mag_data(2048, -4096, 1);

    let data = driver.read_magnetic_field().unwrap();

    assert_eq!(data.x, 1.0);
    assert_eq!(data.y, -2.0);
    assert_eq!(data.z, 0.00048828125);
}

#[test]
fn test_conversion_uses_configured_range() {
    let (mut driver, interface) = create_mock_driver();
    driver.set_accel_full_scale(AccelFullScale::G8).unwrap();
    driver.set_mag_full_scale(MagFullScale::Ga4).unwrap();
    interface.set_accel_data(4096, 0, 0);
    interface.set_mag_data(8192, 0, 0);

    assert_eq!(driver.read_acceleration_x(), 1000.0);
    assert_eq!(driver.read_magnetic_field_x(), 1.0);
}

#[test]
fn test_polling_without_new_data_returns_cached_sample() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(100, 200, 300);

    let first = driver.read_acceleration_y();
    interface.clear_operations();
    let second = driver.read_acceleration_y();
    let third = driver.read_acceleration_y();

    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_float_eq(first, 200.0 * AccelFullScale::G2.sensitivity(), 1e-6);
    // Only status polls after the first fetch
    assert_eq!(
        interface.reads_of(Chip::Accelerometer),
        vec![accel::STATUS, accel::STATUS]
    );
}

#[test]
fn test_axis_accessors_share_the_cached_sample() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_mag_data(2048, 4096, 6144);

    // First accessor consumes the new data, the others reuse it
    assert_eq!(driver.read_magnetic_field_x(), 1.0);
    assert_eq!(driver.read_magnetic_field_y(), 2.0);
    assert_eq!(driver.read_magnetic_field_z(), 3.0);
}

#[test]
fn test_new_data_replaces_cache() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(16384, 0, 0);
    assert_eq!(driver.read_acceleration_x(), 1000.0);

    interface.set_accel_data(-8192, 0, 0);
    assert_eq!(driver.read_acceleration_x(), -500.0);
}

#[test]
fn test_fetch_failure_keeps_previous_sample() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(16384, 0, 0);
    assert_eq!(driver.read_acceleration_x(), 1000.0);

    interface.set_accel_data(8192, 0, 0);
    interface.fail_reads_of(Chip::Accelerometer, accel::OUT_Y_H);

    assert!(driver.read_acceleration_x().is_nan());
    assert!(driver.read_acceleration().is_err());
    assert_eq!(
        driver.cached_accel(),
        Some(RawSample {
            x: 16384,
            y: 0,
            z: 0,
        })
    );

    // Data is still flagged, the next poll picks it up
    interface.clear_failures();
    assert_eq!(driver.read_acceleration_x(), 500.0);
}

#[test]
fn test_status_failure_is_nan() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_mag_data(2048, 0, 0);
    assert_eq!(driver.read_magnetic_field_x(), 1.0);

    interface.fail_next_read();
    assert!(driver.read_magnetic_field_x().is_nan());

    // A later stale poll still returns the cached value
    assert_eq!(driver.read_magnetic_field_x(), 1.0);
}

#[test]
fn test_first_fetch_failure_leaves_cache_empty() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_mag_data(1, 2, 3);
    interface.fail_reads_of(Chip::Magnetometer, mag::OUTZ_L);

    assert!(driver.read_magnetic_field_z().is_nan());
    assert_eq!(driver.cached_mag(), None);
}

#[test]
fn test_status_flags() {
    let status = AccelStatus(0x0F);
    assert!(status.new_data());
    assert_eq!(status.axis_new_data(), (true, true, true));
    assert!(!status.overrun());

    let status = AccelStatus(0x81);
    assert!(!status.new_data());
    assert_eq!(status.axis_new_data(), (true, false, false));
    assert!(status.overrun());

    assert!(MagStatus(0x08).new_data());
    assert!(!MagStatus(0x07).new_data());
    assert!(MagStatus(0x80).overrun());
}

#[test]
fn test_partial_axis_flags_do_not_trigger_fetch() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(16384, 0, 0);
    // X and Y ready, the complete-set flag is not
    interface.set_register(Chip::Accelerometer, accel::STATUS, 0x03);

    assert!(driver.read_acceleration_x().is_nan());
    assert_eq!(interface.reads_of(Chip::Accelerometer), vec![accel::STATUS]);
}

#[test]
fn test_vector_magnitude() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(0, 0, 16384);
    interface.set_mag_data(6144, 8192, 0);

    assert_float_eq(driver.read_acceleration().unwrap().magnitude(), 1000.0, 1e-3);
    assert_float_eq(driver.read_magnetic_field().unwrap().magnitude(), 5.0, 1e-5);
}
