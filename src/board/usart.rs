use lis3dh_telemetry::OutputSink;
use stm32f4::stm32f407;

use super::config::{BAUD_RATE, PCLK1_HZ};

// 16x oversampling, mantissa and fraction packed as one divider
const BRR: u32 = (PCLK1_HZ + BAUD_RATE / 2) / BAUD_RATE;

/// Transmit-only USART2 carrying the telemetry frames.
pub struct Usart2 {
    usart: stm32f407::USART2,
}

impl Usart2 {
    pub fn new(usart: stm32f407::USART2, rcc: &stm32f407::RCC, gpioa: &stm32f407::GPIOA) -> Self {
        // PA2 TX, AF7
        rcc.ahb1enr.modify(|_, w| w.gpioaen().set_bit());
        gpioa.moder.modify(|_, w| w.moder2().alternate());
        gpioa.afrl.modify(|_, w| w.afrl2().bits(7));

        rcc.apb1enr.modify(|_, w| w.usart2en().set_bit());
        usart.brr.write(|w| unsafe { w.bits(BRR) });
        // 8N1
        usart.cr1.modify(|_, w| w.ue().set_bit().te().set_bit());

        Self { usart }
    }

    fn write_byte(&self, byte: u8) {
        while self.usart.sr.read().txe().bit_is_clear() {
            cortex_m::asm::nop();
        }
        self.usart.dr.write(|w| w.dr().bits(u16::from(byte)));
    }
}

impl OutputSink for Usart2 {
    fn transmit(&mut self, frame: &[u8]) {
        for byte in frame {
            self.write_byte(*byte);
        }
    }
}
