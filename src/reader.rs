use log::{debug, trace};

use crate::error::TransportError;
use crate::lis3dh::{OUTPUT_REGISTER_COUNT, REG_OUT_X_L, REG_STATUS, STATUS_DATA_AVAILABLE};
use crate::transport::RegisterTransport;

/// X, Y, Z output registers as read, low byte first per axis.
pub type RawRegisters = [u8; OUTPUT_REGISTER_COUNT];

/// Result of one status check plus burst read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquired {
    Sample(RawRegisters),
    /// Status read fine, data-available bit clear.
    NoData,
    Failed(TransportError),
}

/// Fetches one sample from the output registers when the sensor has one.
pub struct SampleReader<T> {
    transport: T,
    address: u8,
}

impl<T: RegisterTransport> SampleReader<T> {
    pub fn new(transport: T, address: u8) -> Self {
        Self { transport, address }
    }

    /// Reads STATUS_REG and tests the data-available bit.
    pub fn data_available(&mut self) -> Result<bool, TransportError> {
        let status = self.transport.read_register(self.address, REG_STATUS)?;
        Ok(status & STATUS_DATA_AVAILABLE != 0)
    }

    /// Burst-reads the six output registers starting at OUT_X_L.
    pub fn read_burst(&mut self) -> Result<RawRegisters, TransportError> {
        let mut raw = [0u8; OUTPUT_REGISTER_COUNT];
        self.transport
            .read_registers(self.address, REG_OUT_X_L, &mut raw)?;
        Ok(raw)
    }

    /// Status check, then the burst read only if a sample is ready.
    /// Nothing is retried.
    pub fn acquire(&mut self) -> Acquired {
        match self.data_available() {
            Ok(true) => {}
            Ok(false) => {
                trace!("no new sample");
                return Acquired::NoData;
            }
            Err(err) => {
                debug!("status read failed: {}", err);
                return Acquired::Failed(err);
            }
        }
        match self.read_burst() {
            Ok(raw) => Acquired::Sample(raw),
            Err(err) => {
                debug!("burst read failed: {}", err);
                Acquired::Failed(err)
            }
        }
    }

    pub fn try_acquire(&mut self) -> Option<RawRegisters> {
        match self.acquire() {
            Acquired::Sample(raw) => Some(raw),
            Acquired::NoData | Acquired::Failed(_) => None,
        }
    }
}
