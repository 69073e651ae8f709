//! Scripted transport for host tests.

use std::collections::VecDeque;
use std::vec::Vec;

use crate::error::TransportError;
use crate::transport::RegisterTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(u8),
    Burst(u8, usize),
    Write(u8, u8),
}

#[derive(Debug)]
enum Response {
    Byte(u8),
    Burst(Vec<u8>),
    Written,
    Fail(TransportError),
}

/// Answers each transaction with the next queued response, in order.
///
/// Running out of responses fails the transaction with `TransportError::Other`,
/// so an unexpected extra access shows up as a dropped cycle.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: VecDeque<Response>,
    accesses: Vec<Access>,
    devices: Vec<u8>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_byte(&mut self, value: u8) {
        self.responses.push_back(Response::Byte(value));
    }

    pub fn push_burst(&mut self, bytes: &[u8]) {
        self.responses.push_back(Response::Burst(bytes.to_vec()));
    }

    pub fn push_write(&mut self) {
        self.responses.push_back(Response::Written);
    }

    pub fn push_error(&mut self, err: TransportError) {
        self.responses.push_back(Response::Fail(err));
    }

    pub fn accesses(&self) -> &[Access] {
        &self.accesses
    }

    pub fn devices(&self) -> &[u8] {
        &self.devices
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }

    fn next(&mut self, device: u8, access: Access) -> Response {
        self.devices.push(device);
        self.accesses.push(access);
        self.responses
            .pop_front()
            .unwrap_or(Response::Fail(TransportError::Other))
    }
}

impl RegisterTransport for ScriptedTransport {
    fn read_register(&mut self, device: u8, register: u8) -> Result<u8, TransportError> {
        match self.next(device, Access::Read(register)) {
            Response::Byte(value) => Ok(value),
            Response::Fail(err) => Err(err),
            other => panic!("scripted {:?} for a register read", other),
        }
    }

    fn read_registers(
        &mut self,
        device: u8,
        start: u8,
        buffer: &mut [u8],
    ) -> Result<(), TransportError> {
        match self.next(device, Access::Burst(start, buffer.len())) {
            Response::Burst(bytes) => {
                buffer.copy_from_slice(&bytes);
                Ok(())
            }
            Response::Fail(err) => Err(err),
            other => panic!("scripted {:?} for a burst read", other),
        }
    }

    fn write_register(
        &mut self,
        device: u8,
        register: u8,
        value: u8,
    ) -> Result<(), TransportError> {
        match self.next(device, Access::Write(register, value)) {
            Response::Written => Ok(()),
            Response::Fail(err) => Err(err),
            other => panic!("scripted {:?} for a register write", other),
        }
    }
}
