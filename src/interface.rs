//! Bus interface implementations for the LSM303C
//!
//! This module provides the two transports the LSM303C can be wired to:
//! the I2C bus (each sub-chip on its own address) and a bit-banged 3-wire
//! SPI bus (shared clock and bidirectional data line, one chip-select per
//! sub-chip). Both implement [`RegisterInterface`], the single-byte register
//! contract the driver is written against.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::registers::{SPI_ADDRESS_MASK, SPI_READ};
use crate::{Chip, Error};

/// Default SPI half clock period in nanoseconds (500 kHz bit rate)
pub const DEFAULT_HALF_PERIOD_NS: u32 = 1_000;

/// Transport used to reach the register banks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceMode {
    /// Addressed two-wire bus
    I2c = 0,
    /// Bit-banged 3-wire SPI bus
    Spi = 1,
}

impl InterfaceMode {
    /// Decode a mode selector stored as a raw byte (0 = I2C, 1 = SPI)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for any other value.
    pub const fn from_raw<E>(value: u8) -> Result<Self, Error<E>> {
        match value {
            0 => Ok(Self::I2c),
            1 => Ok(Self::Spi),
            _ => Err(Error::InvalidConfig),
        }
    }
}

/// Single-byte register access to either sub-chip
///
/// Implementations perform exactly one bus transfer per call and report
/// failures of that transfer; they never retry.
pub trait RegisterInterface {
    /// Transport error type
    type Error;

    /// Transport this interface implements
    const MODE: InterfaceMode;

    /// Read one register of `chip`
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transfer failed. No byte is
    /// produced in that case.
    fn read_register(&mut self, chip: Chip, address: u8) -> Result<u8, Self::Error>;

    /// Write one register of `chip`
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transfer failed.
    fn write_register(&mut self, chip: Chip, address: u8, value: u8) -> Result<(), Self::Error>;
}

/// I2C interface for the LSM303C
///
/// The accelerometer answers on [`ACCEL_I2C_ADDRESS`](crate::ACCEL_I2C_ADDRESS)
/// and the magnetometer on [`MAG_I2C_ADDRESS`](crate::MAG_I2C_ADDRESS); both
/// addresses are fixed by the package.
pub struct I2cInterface<I2C> {
    i2c: I2C,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::new(i2c);
    /// let mut imu = Lsm303cDriver::new(interface);
    /// ```
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    const MODE: InterfaceMode = InterfaceMode::I2c;

    fn read_register(&mut self, chip: Chip, address: u8) -> Result<u8, Self::Error> {
        // Register address write, repeated start, then exactly one byte back
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(chip.i2c_address(), &[address], &mut buffer)?;
        Ok(buffer[0])
    }

    fn write_register(&mut self, chip: Chip, address: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(chip.i2c_address(), &[address, value])
    }
}

/// Bidirectional data line of the 3-wire SPI bus
///
/// The LSM303C has a single SDI/SDO pin per sub-chip, so the host drives the
/// line while shifting out and releases it while the sensor answers.
pub trait DataLine: ErrorType {
    /// Configure the line as an output and drive it to the given level
    ///
    /// # Errors
    ///
    /// Returns the pin error if the line could not be driven.
    fn drive(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Stop driving the line and configure it as an input
    ///
    /// # Errors
    ///
    /// Returns the pin error if the direction could not be changed.
    fn release(&mut self) -> Result<(), Self::Error>;

    /// Sample the line level
    ///
    /// # Errors
    ///
    /// Returns the pin error if the line could not be read.
    fn is_high(&mut self) -> Result<bool, Self::Error>;
}

/// Bit-banged 3-wire SPI interface for the LSM303C
///
/// Clock idles high; the host changes the data line while the clock is low
/// and both sides sample on the rising edge (SPI mode 3). Chip-select lines
/// are active low and only one of them is ever asserted.
///
/// Every byte transfer runs inside a [`critical_section`], so the platform's
/// critical-section implementation must be linked in. Interrupts are restored
/// when the transfer ends, whether it succeeded or not.
///
/// # Limitations
///
/// The bus has no acknowledge phase, so a successful write only means the
/// bits were clocked out. Whether the sensor accepted them can only be
/// checked by reading the register back.
///
/// The sensor answers reads only after the SPI read enable bits are set,
/// see [`Lsm303cDriver::enable_spi_mode`](crate::Lsm303cDriver::enable_spi_mode).
pub struct SpiInterface<CLK, SDA, CSA, CSM, D> {
    clk: CLK,
    sda: SDA,
    cs_accel: CSA,
    cs_mag: CSM,
    delay: D,
    half_period_ns: u32,
}

impl<CLK, SDA, CSA, CSM, D> SpiInterface<CLK, SDA, CSA, CSM, D> {
    /// Create a new bit-banged SPI interface
    ///
    /// # Arguments
    /// * `clk` - Serial clock output
    /// * `sda` - Shared bidirectional data line
    /// * `cs_accel` - Accelerometer chip-select (active low)
    /// * `cs_mag` - Magnetometer chip-select (active low)
    /// * `delay` - Delay provider used for the clock half period
    pub const fn new(clk: CLK, sda: SDA, cs_accel: CSA, cs_mag: CSM, delay: D) -> Self {
        Self {
            clk,
            sda,
            cs_accel,
            cs_mag,
            delay,
            half_period_ns: DEFAULT_HALF_PERIOD_NS,
        }
    }

    /// Override the clock half period (nanoseconds)
    #[must_use]
    pub const fn with_half_period(mut self, half_period_ns: u32) -> Self {
        self.half_period_ns = half_period_ns;
        self
    }

    /// Consume the interface and return the pins and the delay provider
    pub fn release(self) -> (CLK, SDA, CSA, CSM, D) {
        (self.clk, self.sda, self.cs_accel, self.cs_mag, self.delay)
    }
}

impl<CLK, SDA, CSA, CSM, D, E> SpiInterface<CLK, SDA, CSA, CSM, D>
where
    CLK: OutputPin<Error = E>,
    SDA: DataLine<Error = E>,
    CSA: OutputPin<Error = E>,
    CSM: OutputPin<Error = E>,
    D: DelayNs,
{
    fn half_period(&mut self) {
        self.delay.delay_ns(self.half_period_ns);
    }

    /// Assert the select line of `chip`, releasing the other one first
    fn select(&mut self, chip: Chip) -> Result<(), E> {
        self.clk.set_high()?;
        match chip {
            Chip::Accelerometer => {
                self.cs_mag.set_high()?;
                self.cs_accel.set_low()
            }
            Chip::Magnetometer => {
                self.cs_accel.set_high()?;
                self.cs_mag.set_low()
            }
        }
    }

    /// Release both select lines, attempting both even if one fails
    fn deselect(&mut self) -> Result<(), E> {
        let accel = self.cs_accel.set_high();
        let mag = self.cs_mag.set_high();
        accel.and(mag)
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), E> {
        for bit in (0..8).rev() {
            self.clk.set_low()?;
            self.sda.drive(byte & (1 << bit) != 0)?;
            self.half_period();
            self.clk.set_high()?;
            self.half_period();
        }
        Ok(())
    }

    fn shift_in(&mut self) -> Result<u8, E> {
        self.sda.release()?;
        let mut byte = 0u8;
        for _ in 0..8 {
            self.clk.set_low()?;
            self.half_period();
            self.clk.set_high()?;
            byte = (byte << 1) | u8::from(self.sda.is_high()?);
            self.half_period();
        }
        Ok(byte)
    }

    fn read_transfer(&mut self, chip: Chip, address: u8) -> Result<u8, E> {
        self.select(chip)?;
        self.shift_out(SPI_READ | (address & SPI_ADDRESS_MASK))?;
        self.shift_in()
    }

    fn write_transfer(&mut self, chip: Chip, address: u8, value: u8) -> Result<(), E> {
        self.select(chip)?;
        self.shift_out(address & SPI_ADDRESS_MASK)?;
        self.shift_out(value)
    }
}

impl<CLK, SDA, CSA, CSM, D, E> RegisterInterface for SpiInterface<CLK, SDA, CSA, CSM, D>
where
    CLK: OutputPin<Error = E>,
    SDA: DataLine<Error = E>,
    CSA: OutputPin<Error = E>,
    CSM: OutputPin<Error = E>,
    D: DelayNs,
{
    type Error = E;
    const MODE: InterfaceMode = InterfaceMode::Spi;

    fn read_register(&mut self, chip: Chip, address: u8) -> Result<u8, Self::Error> {
        critical_section::with(|_| {
            let result = self.read_transfer(chip, address);
            let deselected = self.deselect();
            let value = result?;
            deselected?;
            Ok(value)
        })
    }

    /// Write one register
    ///
    /// Success only means the bits were clocked out; the 3-wire bus cannot
    /// report whether the sensor latched them.
    fn write_register(&mut self, chip: Chip, address: u8, value: u8) -> Result<(), Self::Error> {
        critical_section::with(|_| {
            let result = self.write_transfer(chip, address, value);
            let deselected = self.deselect();
            result.and(deselected)
        })
    }
}
