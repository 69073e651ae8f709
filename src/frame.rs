//! `[0xA0][X][Y][Z][0xC0]`, axes little-endian. No checksum or escaping:
//! receivers split the stream by frame length.

use crate::config::{Encoding, Variant};
use crate::convert::PhysicalSample;

pub const HEADER: u8 = 0xA0;
pub const FOOTER: u8 = 0xC0;

/// Longest frame of any variant.
pub const MAX_FRAME_LEN: usize = 14;

/// Header and footer are placed once in `new`; `encode` only rewrites the
/// payload.
pub struct FrameEncoder {
    encoding: Encoding,
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl FrameEncoder {
    pub fn new(variant: &Variant) -> Self {
        let len = variant.frame_len();
        let mut buf = [0u8; MAX_FRAME_LEN];
        buf[0] = HEADER;
        buf[len - 1] = FOOTER;
        Self {
            encoding: variant.encoding,
            buf,
            len,
        }
    }

    /// Milli-g fields saturate at the `i16` range.
    pub fn encode(&mut self, sample: &PhysicalSample) -> &[u8] {
        let width = self.encoding.axis_bytes();
        for (i, value) in sample.axes().iter().enumerate() {
            let start = 1 + i * width;
            let field = &mut self.buf[start..start + width];
            match self.encoding {
                Encoding::MilliG { .. } => {
                    let narrowed = (*value).clamp(i16::MIN.into(), i16::MAX.into()) as i16;
                    field.copy_from_slice(&narrowed.to_le_bytes())
                }
                Encoding::FixedPoint { .. } => field.copy_from_slice(&value.to_le_bytes()),
            }
        }
        &self.buf[..self.len]
    }
}
