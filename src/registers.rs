//! Register definitions for the LSM303C
//!
//! The accelerometer and the magnetometer are separate register banks with
//! overlapping addresses (both start their control block at 0x20), so every
//! address below only has a meaning together with a [`Chip`](crate::Chip).
//!
//! All registers are 8 bits wide and are accessed one byte at a time.

/// Accelerometer register map
pub mod accel {
    /// `TEMP_L_A` - temperature output, low byte
    pub const TEMP_L: u8 = 0x0B;
    /// `TEMP_H_A` - temperature output, high byte
    pub const TEMP_H: u8 = 0x0C;
    /// `ACT_THS_A` - activity threshold
    pub const ACT_THS: u8 = 0x1E;
    /// `ACT_DUR_A` - activity duration
    pub const ACT_DUR: u8 = 0x1F;
    /// `WHO_AM_I_A` - device identification (0x41)
    pub const WHO_AM_I: u8 = 0x0F;
    /// `CTRL1_A` - ODR, block data update, axis enable
    pub const CTRL1: u8 = 0x20;
    /// `CTRL2_A` - high-pass filter configuration
    pub const CTRL2: u8 = 0x21;
    /// `CTRL3_A` - interrupt routing
    pub const CTRL3: u8 = 0x22;
    /// `CTRL4_A` - bandwidth, full scale, serial interface options
    pub const CTRL4: u8 = 0x23;
    /// `CTRL5_A` - debug, reset, decimation, self-test
    pub const CTRL5: u8 = 0x24;
    /// `CTRL6_A` - reboot
    pub const CTRL6: u8 = 0x25;
    /// `CTRL7_A` - interrupt latching
    pub const CTRL7: u8 = 0x26;
    /// `STATUS_A` - data available and overrun flags
    pub const STATUS: u8 = 0x27;
    /// `OUT_X_L_A`
    pub const OUT_X_L: u8 = 0x28;
    /// `OUT_X_H_A`
    pub const OUT_X_H: u8 = 0x29;
    /// `OUT_Y_L_A`
    pub const OUT_Y_L: u8 = 0x2A;
    /// `OUT_Y_H_A`
    pub const OUT_Y_H: u8 = 0x2B;
    /// `OUT_Z_L_A`
    pub const OUT_Z_L: u8 = 0x2C;
    /// `OUT_Z_H_A`
    pub const OUT_Z_H: u8 = 0x2D;
    /// `FIFO_CTRL`
    pub const FIFO_CTRL: u8 = 0x2E;
    /// `FIFO_SRC`
    pub const FIFO_SRC: u8 = 0x2F;

    /// `CTRL1_A` output data rate field (bits 6:4)
    pub const CTRL1_ODR_MASK: u8 = 0x70;
    /// `CTRL1_A` block data update bit
    pub const CTRL1_BDU: u8 = 0x08;
    /// `CTRL1_A` X/Y/Z enable bits
    pub const CTRL1_AXES_MASK: u8 = 0x07;

    /// `CTRL4_A` full-scale field (bits 5:4)
    pub const CTRL4_FS_MASK: u8 = 0x30;
    /// `CTRL4_A` register address auto-increment
    pub const CTRL4_IF_ADD_INC: u8 = 0x04;
    /// `CTRL4_A` I2C interface disable
    pub const CTRL4_I2C_DISABLE: u8 = 0x02;
    /// `CTRL4_A` SPI read enable (3-wire SPI is write-only when clear)
    pub const CTRL4_SIM: u8 = 0x01;

    /// `STATUS_A` X-axis new data available
    pub const STATUS_XDA: u8 = 0x01;
    /// `STATUS_A` Y-axis new data available
    pub const STATUS_YDA: u8 = 0x02;
    /// `STATUS_A` Z-axis new data available
    pub const STATUS_ZDA: u8 = 0x04;
    /// `STATUS_A` new X, Y and Z data available
    pub const STATUS_ZYXDA: u8 = 0x08;
    /// `STATUS_A` X-axis overrun
    pub const STATUS_XOR: u8 = 0x10;
    /// `STATUS_A` Y-axis overrun
    pub const STATUS_YOR: u8 = 0x20;
    /// `STATUS_A` Z-axis overrun
    pub const STATUS_ZOR: u8 = 0x40;
    /// `STATUS_A` X, Y and Z overrun
    pub const STATUS_ZYXOR: u8 = 0x80;
}

/// Magnetometer register map
pub mod mag {
    /// `WHO_AM_I_M` - device identification (0x3D)
    pub const WHO_AM_I: u8 = 0x0F;
    /// `CTRL_REG1_M` - temperature enable, XY operating mode, ODR, self-test
    pub const CTRL_REG1: u8 = 0x20;
    /// `CTRL_REG2_M` - full scale, reboot, soft reset
    pub const CTRL_REG2: u8 = 0x21;
    /// `CTRL_REG3_M` - I2C disable, low power, SPI mode, run mode
    pub const CTRL_REG3: u8 = 0x22;
    /// `CTRL_REG4_M` - Z operating mode, endianness
    pub const CTRL_REG4: u8 = 0x23;
    /// `CTRL_REG5_M` - block data update
    pub const CTRL_REG5: u8 = 0x24;
    /// `STATUS_REG_M` - data available and overrun flags
    pub const STATUS_REG: u8 = 0x27;
    /// `OUTX_L_M`
    pub const OUTX_L: u8 = 0x28;
    /// `OUTX_H_M`
    pub const OUTX_H: u8 = 0x29;
    /// `OUTY_L_M`
    pub const OUTY_L: u8 = 0x2A;
    /// `OUTY_H_M`
    pub const OUTY_H: u8 = 0x2B;
    /// `OUTZ_L_M`
    pub const OUTZ_L: u8 = 0x2C;
    /// `OUTZ_H_M`
    pub const OUTZ_H: u8 = 0x2D;
    /// `TEMP_OUT_L_M`
    pub const TEMP_OUT_L: u8 = 0x2E;
    /// `TEMP_OUT_H_M`
    pub const TEMP_OUT_H: u8 = 0x2F;
    /// `INT_CFG_M`
    pub const INT_CFG: u8 = 0x30;
    /// `INT_SRC_M`
    pub const INT_SRC: u8 = 0x31;
    /// `INT_THS_L_M`
    pub const INT_THS_L: u8 = 0x32;
    /// `INT_THS_H_M`
    pub const INT_THS_H: u8 = 0x33;

    /// `CTRL_REG1_M` temperature sensor enable
    pub const CTRL_REG1_TEMP_EN: u8 = 0x80;
    /// `CTRL_REG1_M` X/Y operating mode field (bits 6:5)
    pub const CTRL_REG1_OM_MASK: u8 = 0x60;
    /// `CTRL_REG1_M` output data rate field (bits 4:2)
    pub const CTRL_REG1_DO_MASK: u8 = 0x1C;

    /// `CTRL_REG2_M` full-scale field (bits 6:5)
    pub const CTRL_REG2_FS_MASK: u8 = 0x60;

    /// `CTRL_REG3_M` I2C interface disable
    pub const CTRL_REG3_I2C_DISABLE: u8 = 0x80;
    /// `CTRL_REG3_M` SPI read enable (3-wire SPI is write-only when clear)
    pub const CTRL_REG3_SIM: u8 = 0x04;
    /// `CTRL_REG3_M` run mode field (bits 1:0)
    pub const CTRL_REG3_MD_MASK: u8 = 0x03;

    /// `CTRL_REG4_M` Z operating mode field (bits 3:2)
    pub const CTRL_REG4_OMZ_MASK: u8 = 0x0C;

    /// `CTRL_REG5_M` block data update bit
    pub const CTRL_REG5_BDU: u8 = 0x40;

    /// `STATUS_REG_M` new X, Y and Z data available
    pub const STATUS_ZYXDA: u8 = 0x08;
    /// `STATUS_REG_M` X, Y and Z overrun
    pub const STATUS_ZYXOR: u8 = 0x80;
}

/// Read/write flag in the SPI address byte (set = read)
pub const SPI_READ: u8 = 0x80;

/// Register address bits of the SPI address byte
pub const SPI_ADDRESS_MASK: u8 = 0x7F;
