use crate::config::{Encoding, Variant, FIXED_POINT_SCALE, GRAVITY};
use crate::reader::RawRegisters;

/// X, Y, Z in the unit of the variant it was converted with: milli-g, or
/// m/s^2 times [`FIXED_POINT_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhysicalSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl PhysicalSample {
    pub fn axes(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Little-endian pair, arithmetic shift keeps the sign.
pub fn align(lo: u8, hi: u8, shift_bits: u8) -> i16 {
    i16::from_le_bytes([lo, hi]) >> shift_bits
}

/// Truncates toward zero.
pub fn to_fixed_point(value: f32) -> i32 {
    (value * FIXED_POINT_SCALE) as i32
}

pub struct SampleConverter {
    variant: Variant,
}

impl SampleConverter {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn convert(&self, raw: &RawRegisters) -> PhysicalSample {
        PhysicalSample {
            x: self.convert_axis(raw[0], raw[1]),
            y: self.convert_axis(raw[2], raw[3]),
            z: self.convert_axis(raw[4], raw[5]),
        }
    }

    fn convert_axis(&self, lo: u8, hi: u8) -> i32 {
        let digits = align(lo, hi, self.variant.shift_bits);
        match self.variant.encoding {
            Encoding::MilliG { mg_per_digit } => i32::from(digits.saturating_mul(mg_per_digit)),
            Encoding::FixedPoint { g_per_digit } => {
                to_fixed_point(f32::from(digits) * GRAVITY * g_per_digit)
            }
        }
    }
}
