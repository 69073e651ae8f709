use crate::lis3dh::{CTRL_REG1_100_HZ_XYZ, CTRL_REG4_HIGH_RES_4G, CTRL_REG4_NORMAL_2G};

// m/s^2
pub const GRAVITY: f32 = 9.81;

pub const FIXED_POINT_SCALE: f32 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Encoding {
    MilliG { mg_per_digit: i16 },
    FixedPoint { g_per_digit: f32 },
}

impl Encoding {
    pub const fn axis_bytes(&self) -> usize {
        match self {
            Encoding::MilliG { .. } => 2,
            Encoding::FixedPoint { .. } => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variant {
    /// Unused low bits of each left-justified output register pair.
    pub shift_bits: u8,
    pub encoding: Encoding,
    pub ctrl_reg1: u8,
    pub ctrl_reg4: u8,
}

impl Variant {
    /// Normal mode (10-bit), +-2G: 8-byte frames of milli-g.
    pub const NORMAL_MILLI_G: Variant = Variant {
        shift_bits: 6,
        encoding: Encoding::MilliG { mg_per_digit: 4 },
        ctrl_reg1: CTRL_REG1_100_HZ_XYZ,
        ctrl_reg4: CTRL_REG4_NORMAL_2G,
    };

    /// High-resolution mode (12-bit), +-4G: 14-byte frames of fixed-point m/s^2.
    pub const HIGH_RES_FIXED_POINT: Variant = Variant {
        shift_bits: 4,
        encoding: Encoding::FixedPoint { g_per_digit: 0.002 },
        ctrl_reg1: CTRL_REG1_100_HZ_XYZ,
        ctrl_reg4: CTRL_REG4_HIGH_RES_4G,
    };

    #[cfg(not(feature = "fixed-point"))]
    pub const SELECTED: Variant = Variant::NORMAL_MILLI_G;

    #[cfg(feature = "fixed-point")]
    pub const SELECTED: Variant = Variant::HIGH_RES_FIXED_POINT;

    pub const fn axis_bytes(&self) -> usize {
        self.encoding.axis_bytes()
    }

    pub const fn frame_len(&self) -> usize {
        2 + 3 * self.axis_bytes()
    }
}
