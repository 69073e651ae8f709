use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress};
use stm32f4::stm32f407::{self, i2c1};

use super::config::{I2C_FREQUENCY_HZ, PCLK1_HZ};

const READ_FLAG: u8 = 0x01;

// status flag polls before the bus is given up on
const TIMEOUT_SPINS: u32 = 100_000;

const PCLK1_MHZ: u8 = (PCLK1_HZ / 1_000_000) as u8;
// standard mode: t_high = t_low = CCR * t_pclk1
const CCR_STANDARD_MODE: u16 = (PCLK1_HZ / (2 * I2C_FREQUENCY_HZ)) as u16;
// 1000 ns max rise time in standard mode
const TRISE_STANDARD_MODE: u8 = PCLK1_MHZ + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Nack,
    Bus,
    ArbitrationLost,
    Timeout,
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::Nack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown),
            Error::Bus => ErrorKind::Bus,
            Error::ArbitrationLost => ErrorKind::ArbitrationLoss,
            Error::Timeout => ErrorKind::Other,
        }
    }
}

/// Blocking I2C1 master, polled, standard mode.
pub struct I2c1 {
    i2c: stm32f407::I2C1,
}

impl I2c1 {
    pub fn new(i2c: stm32f407::I2C1, rcc: &stm32f407::RCC, gpiob: &stm32f407::GPIOB) -> Self {
        // PB6 SCL, PB9 SDA: AF4, open-drain, pull-up
        rcc.ahb1enr.modify(|_, w| w.gpioben().set_bit());
        gpiob
            .moder
            .modify(|_, w| w.moder6().alternate().moder9().alternate());
        gpiob.otyper.modify(|_, w| w.ot6().set_bit().ot9().set_bit());
        gpiob
            .pupdr
            .modify(|_, w| unsafe { w.pupdr6().bits(0b01).pupdr9().bits(0b01) });
        gpiob.afrl.modify(|_, w| w.afrl6().bits(4));
        gpiob.afrh.modify(|_, w| w.afrh9().bits(4));

        rcc.apb1enr.modify(|_, w| w.i2c1en().set_bit());
        rcc.apb1rstr.modify(|_, w| w.i2c1rst().set_bit());
        rcc.apb1rstr.modify(|_, w| w.i2c1rst().clear_bit());

        i2c.cr1.modify(|_, w| w.pe().clear_bit());
        i2c.cr2.modify(|_, w| unsafe { w.freq().bits(PCLK1_MHZ) });
        i2c.ccr.write(|w| unsafe { w.ccr().bits(CCR_STANDARD_MODE) });
        i2c.trise.write(|w| w.trise().bits(TRISE_STANDARD_MODE));
        i2c.cr1.modify(|_, w| w.pe().set_bit());

        Self { i2c }
    }

    fn wait(&self, ready: impl Fn(&i2c1::sr1::R) -> bool) -> Result<(), Error> {
        for _ in 0..TIMEOUT_SPINS {
            let sr1 = self.i2c.sr1.read();
            if sr1.af().bit_is_set() {
                self.i2c.sr1.modify(|_, w| w.af().clear_bit());
                return Err(Error::Nack);
            }
            if sr1.berr().bit_is_set() {
                self.i2c.sr1.modify(|_, w| w.berr().clear_bit());
                return Err(Error::Bus);
            }
            if sr1.arlo().bit_is_set() {
                self.i2c.sr1.modify(|_, w| w.arlo().clear_bit());
                return Err(Error::ArbitrationLost);
            }
            if ready(&sr1) {
                return Ok(());
            }
            cortex_m::asm::nop();
        }
        Err(Error::Timeout)
    }

    fn start(&self, address: u8, read: bool) -> Result<(), Error> {
        self.i2c.cr1.modify(|_, w| w.start().set_bit());
        self.wait(|sr1| sr1.sb().bit_is_set())?;

        let header = (address << 1) | if read { READ_FLAG } else { 0 };
        self.i2c.dr.write(|w| unsafe { w.bits(u32::from(header)) });
        self.wait(|sr1| sr1.addr().bit_is_set())?;
        // reading SR2 after SR1 clears ADDR
        let _ = self.i2c.sr2.read();
        Ok(())
    }

    fn stop(&self) {
        self.i2c.cr1.modify(|_, w| w.stop().set_bit());
    }

    fn send(&self, address: u8, bytes: &[u8]) -> Result<(), Error> {
        self.start(address, false)?;
        for byte in bytes {
            self.wait(|sr1| sr1.tx_e().bit_is_set())?;
            self.i2c.dr.write(|w| unsafe { w.bits(u32::from(*byte)) });
        }
        self.wait(|sr1| sr1.btf().bit_is_set())
    }

    /// Receives `buffer.len()` bytes and ends with a STOP, which the
    /// peripheral needs before the last byte arrives.
    fn receive(&self, address: u8, buffer: &mut [u8]) -> Result<(), Error> {
        if buffer.is_empty() {
            return Ok(());
        }
        let last = buffer.len() - 1;
        if last == 0 {
            self.i2c.cr1.modify(|_, w| w.ack().clear_bit());
        } else {
            self.i2c.cr1.modify(|_, w| w.ack().set_bit());
        }
        self.start(address, true)?;

        for (i, byte) in buffer.iter_mut().enumerate() {
            if i == last {
                self.i2c.cr1.modify(|_, w| w.ack().clear_bit().stop().set_bit());
            }
            self.wait(|sr1| sr1.rx_ne().bit_is_set())?;
            *byte = self.i2c.dr.read().bits() as u8;
        }
        Ok(())
    }

    fn finish(&self, result: Result<(), Error>) -> Result<(), Error> {
        if result.is_err() {
            self.stop();
        }
        result
    }
}

impl ErrorType for I2c1 {
    type Error = Error;
}

impl I2c for I2c1 {
    fn read(&mut self, address: SevenBitAddress, read: &mut [u8]) -> Result<(), Self::Error> {
        let result = self.receive(address, read);
        self.finish(result)
    }

    fn write(&mut self, address: SevenBitAddress, write: &[u8]) -> Result<(), Self::Error> {
        let result = self.send(address, write);
        self.stop();
        self.finish(result)
    }

    fn write_read(
        &mut self,
        address: SevenBitAddress,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::Error> {
        // repeated START between the register pointer and the data
        let result = self
            .send(address, write)
            .and_then(|_| self.receive(address, read));
        self.finish(result)
    }

    /// Each operation runs as its own addressed segment; a read always
    /// closes with STOP.
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut result = Ok(());
        let mut open_write = false;
        for op in operations.iter_mut() {
            result = match op {
                Operation::Write(bytes) => {
                    open_write = true;
                    self.send(address, bytes)
                }
                Operation::Read(buffer) => {
                    open_write = false;
                    self.receive(address, buffer)
                }
            };
            if result.is_err() {
                break;
            }
        }
        if open_write {
            self.stop();
        }
        self.finish(result)
    }
}
