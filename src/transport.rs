//! Register-addressed bus transport.
//!
//! [`RegisterTransport`] is the seam between the acquisition pipeline and the
//! bus. [`I2cTransport`] adapts any blocking `embedded-hal` I2C bus to it.

use embedded_hal::i2c::{Error as _, I2c};

use crate::error::TransportError;

/// Sub-address MSB: advance the register pointer after each byte.
pub const AUTO_INCREMENT: u8 = 0x80;

/// Blocking single- and multi-register access to a device on the bus.
///
/// Register addresses are 7-bit; implementations take care of any
/// device-specific framing needed for burst reads.
pub trait RegisterTransport {
    fn read_register(&mut self, device: u8, register: u8) -> Result<u8, TransportError>;

    /// Reads `buffer.len()` contiguous registers starting at `start`.
    fn read_registers(
        &mut self,
        device: u8,
        start: u8,
        buffer: &mut [u8],
    ) -> Result<(), TransportError>;

    fn write_register(&mut self, device: u8, register: u8, value: u8)
        -> Result<(), TransportError>;
}

impl<T: RegisterTransport + ?Sized> RegisterTransport for &mut T {
    fn read_register(&mut self, device: u8, register: u8) -> Result<u8, TransportError> {
        (**self).read_register(device, register)
    }

    fn read_registers(
        &mut self,
        device: u8,
        start: u8,
        buffer: &mut [u8],
    ) -> Result<(), TransportError> {
        (**self).read_registers(device, start, buffer)
    }

    fn write_register(
        &mut self,
        device: u8,
        register: u8,
        value: u8,
    ) -> Result<(), TransportError> {
        (**self).write_register(device, register, value)
    }
}

/// [`RegisterTransport`] over an `embedded-hal` I2C bus.
pub struct I2cTransport<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> I2cTransport<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterTransport for I2cTransport<I2C> {
    fn read_register(&mut self, device: u8, register: u8) -> Result<u8, TransportError> {
        let mut buf = [0u8];
        self.i2c
            .write_read(device, &[register], &mut buf)
            .map_err(|e| TransportError::from(e.kind()))?;
        Ok(buf[0])
    }

    fn read_registers(
        &mut self,
        device: u8,
        start: u8,
        buffer: &mut [u8],
    ) -> Result<(), TransportError> {
        let sub_address = if buffer.len() > 1 {
            start | AUTO_INCREMENT
        } else {
            start
        };
        self.i2c
            .write_read(device, &[sub_address], buffer)
            .map_err(|e| TransportError::from(e.kind()))
    }

    fn write_register(
        &mut self,
        device: u8,
        register: u8,
        value: u8,
    ) -> Result<(), TransportError> {
        self.i2c
            .write(device, &[register, value])
            .map_err(|e| TransportError::from(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    const DEV_ADDR: u8 = 0x18;

    #[test]
    fn single_read_uses_plain_sub_address() {
        let expectations = [I2cTrans::write_read(DEV_ADDR, vec![0x0F], vec![0x33])];
        let mut transport = I2cTransport::new(I2cMock::new(&expectations));

        assert_eq!(transport.read_register(DEV_ADDR, 0x0F), Ok(0x33));

        transport.release().done();
    }

    #[test]
    fn burst_read_sets_auto_increment() {
        let expectations = [I2cTrans::write_read(
            DEV_ADDR,
            vec![0x28 | AUTO_INCREMENT],
            vec![1, 2, 3, 4, 5, 6],
        )];
        let mut transport = I2cTransport::new(I2cMock::new(&expectations));

        let mut buf = [0u8; 6];
        transport.read_registers(DEV_ADDR, 0x28, &mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 4, 5, 6]);

        transport.release().done();
    }

    #[test]
    fn write_sends_register_then_value() {
        let expectations = [I2cTrans::write(DEV_ADDR, vec![0x20, 0x57])];
        let mut transport = I2cTransport::new(I2cMock::new(&expectations));

        transport.write_register(DEV_ADDR, 0x20, 0x57).unwrap();

        transport.release().done();
    }

    #[test]
    fn bus_errors_map_to_transport_errors() {
        let expectations = [
            I2cTrans::write_read(DEV_ADDR, vec![0x27], vec![0x00]).with_error(ErrorKind::Bus),
            I2cTrans::write(DEV_ADDR, vec![0x23, 0x80]).with_error(ErrorKind::Other),
        ];
        let mut transport = I2cTransport::new(I2cMock::new(&expectations));

        assert_eq!(
            transport.read_register(DEV_ADDR, 0x27),
            Err(TransportError::Bus)
        );
        assert_eq!(
            transport.write_register(DEV_ADDR, 0x23, 0x80),
            Err(TransportError::Other)
        );

        transport.release().done();
    }
}
