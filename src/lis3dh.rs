//! LIS3DH register map and one-shot startup configuration.

use log::{info, warn};

use crate::config::Variant;
use crate::error::SetupError;
use crate::transport::RegisterTransport;

/// 7-bit bus address with SA0 tied low.
pub const DEVICE_ADDRESS: u8 = 0x18;

pub const EXPECTED_DEVICE_ID: u8 = 0x33;

pub const REG_WHO_AM_I: u8 = 0x0F;
pub const REG_CTRL_REG1: u8 = 0x20;
pub const REG_CTRL_REG4: u8 = 0x23;
pub const REG_STATUS: u8 = 0x27;
pub const REG_OUT_X_L: u8 = 0x28;
pub const REG_OUT_X_H: u8 = 0x29;
pub const REG_OUT_Y_L: u8 = 0x2A;
pub const REG_OUT_Y_H: u8 = 0x2B;
pub const REG_OUT_Z_L: u8 = 0x2C;
pub const REG_OUT_Z_H: u8 = 0x2D;

// STATUS_REG
/// ZYXDA: a new sample is available on all three axes.
pub const STATUS_DATA_AVAILABLE: u8 = 0x08;

// CTRL_REG1
const DATA_RATE_100_HZ: u8 = 0x50;
const Z_ENABLE: u8 = 0x04;
const Y_ENABLE: u8 = 0x02;
const X_ENABLE: u8 = 0x01;

pub const CTRL_REG1_100_HZ_XYZ: u8 = DATA_RATE_100_HZ | Z_ENABLE | Y_ENABLE | X_ENABLE;

// CTRL_REG4
const BLOCK_DATA_UPDATE: u8 = 0x80;
const SCALE_PLUS_MINUS_4G: u8 = 0x10;
const HIGH_RESOLUTION: u8 = 0x08;

/// +-2G, normal mode, output registers latched until both halves are read.
pub const CTRL_REG4_NORMAL_2G: u8 = BLOCK_DATA_UPDATE;
/// +-4G, high-resolution mode, block data update.
pub const CTRL_REG4_HIGH_RES_4G: u8 = BLOCK_DATA_UPDATE | SCALE_PLUS_MINUS_4G | HIGH_RESOLUTION;

/// Number of output registers covered by one burst read (X, Y, Z low/high).
pub const OUTPUT_REGISTER_COUNT: usize = 6;

/// Thin handle over a transport for the startup register sequence.
pub struct Lis3dh<'a, T> {
    transport: &'a mut T,
    address: u8,
}

impl<'a, T: RegisterTransport> Lis3dh<'a, T> {
    pub fn new(transport: &'a mut T, address: u8) -> Self {
        Self { transport, address }
    }

    pub fn who_am_i(&mut self) -> Result<u8, SetupError> {
        Ok(self.transport.read_register(self.address, REG_WHO_AM_I)?)
    }

    /// Puts the sensor in the mode `variant` expects.
    ///
    /// CTRL_REG1 is only rewritten when it differs from the target value,
    /// CTRL_REG4 is always written. Both are read back and logged. An
    /// identity mismatch is returned after the registers are written, so the
    /// caller may still decide to stream.
    pub fn configure(&mut self, variant: &Variant) -> Result<(), SetupError> {
        let id = self.who_am_i()?;
        info!("WHO AM I: {:#04x} [expected {:#04x}]", id, EXPECTED_DEVICE_ID);

        let ctrl1 = self.transport.read_register(self.address, REG_CTRL_REG1)?;
        if ctrl1 != variant.ctrl_reg1 {
            self.transport
                .write_register(self.address, REG_CTRL_REG1, variant.ctrl_reg1)?;
        }
        let ctrl1 = self.transport.read_register(self.address, REG_CTRL_REG1)?;
        info!("CTRL_REG1: {:#04x}", ctrl1);

        self.transport
            .write_register(self.address, REG_CTRL_REG4, variant.ctrl_reg4)?;
        let ctrl4 = self.transport.read_register(self.address, REG_CTRL_REG4)?;
        info!("CTRL_REG4: {:#04x}", ctrl4);

        if id != EXPECTED_DEVICE_ID {
            warn!("unexpected device id {:#04x}", id);
            return Err(SetupError::UnexpectedIdentity { found: id });
        }
        Ok(())
    }
}
