//! Error types.
//!
//! A failed bus transaction is the only runtime failure of the pipeline.
//! `SetupError` adds the identity check done once at boot.

use core::fmt;

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// Register bus failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Address or data byte not acknowledged
    Nack,
    /// Misplaced start/stop condition
    Bus,
    /// Another master won the bus
    ArbitrationLost,
    /// Data register not serviced in time
    Overrun,
    /// Anything the transport cannot classify, including a stalled bus
    Other,
}

impl From<ErrorKind> for TransportError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
            | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown) => TransportError::Nack,
            ErrorKind::Bus => TransportError::Bus,
            ErrorKind::ArbitrationLoss => TransportError::ArbitrationLost,
            ErrorKind::Overrun => TransportError::Overrun,
            _ => TransportError::Other,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Nack => write!(f, "not acknowledged"),
            TransportError::Bus => write!(f, "bus error"),
            TransportError::ArbitrationLost => write!(f, "arbitration lost"),
            TransportError::Overrun => write!(f, "overrun"),
            TransportError::Other => write!(f, "transport error"),
        }
    }
}

/// Startup configuration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    Transport(TransportError),
    /// WHO_AM_I did not read back the LIS3DH id
    UnexpectedIdentity { found: u8 },
}

impl From<TransportError> for SetupError {
    fn from(err: TransportError) -> Self {
        SetupError::Transport(err)
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Transport(err) => write!(f, "setup failed: {}", err),
            SetupError::UnexpectedIdentity { found } => {
                write!(f, "unexpected device id {:#04x}", found)
            }
        }
    }
}
