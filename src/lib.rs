#![cfg_attr(not(test), no_std)]

//! LIS3DH accelerometer telemetry, hardware independent part.

pub mod acquisition;
pub mod config;
pub mod convert;
pub mod error;
pub mod frame;
pub mod lis3dh;
pub mod reader;
pub mod signal;
pub mod sink;
pub mod transport;

#[cfg(test)]
mod mock;

pub use acquisition::{Acquisition, Cycle};
pub use config::{Encoding, Variant};
pub use convert::{PhysicalSample, SampleConverter};
pub use error::{SetupError, TransportError};
pub use frame::FrameEncoder;
pub use reader::{Acquired, RawRegisters, SampleReader};
pub use signal::DataReadySignal;
pub use sink::OutputSink;
pub use transport::{I2cTransport, RegisterTransport};
