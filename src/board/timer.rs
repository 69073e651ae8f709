//! TIM2 update interrupt as the data-ready tick.

use core::cell::RefCell;

use cortex_m::interrupt::Mutex;
use stm32f4::stm32f407;

use super::config::PCLK1_HZ;

// counter clock after the prescaler
const COUNTER_HZ: u32 = 10_000;

static TICK_TIMER: Mutex<RefCell<Option<stm32f407::TIM2>>> = Mutex::new(RefCell::new(None));

/// Starts TIM2 with an update interrupt every `1 / hz` seconds and hands the
/// timer to the interrupt handler. The NVIC line is left masked.
pub fn start(tim: stm32f407::TIM2, rcc: &stm32f407::RCC, hz: u32) {
    rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

    tim.psc
        .write(|w| w.psc().bits((PCLK1_HZ / COUNTER_HZ - 1) as u16));
    tim.arr.write(|w| unsafe { w.bits(COUNTER_HZ / hz - 1) });
    // load the prescaler now, not at the first overflow
    tim.egr.write(|w| w.ug().set_bit());
    tim.sr.modify(|_, w| w.uif().clear_bit());
    tim.dier.modify(|_, w| w.uie().set_bit());
    tim.cr1.modify(|_, w| w.cen().set_bit());

    cortex_m::interrupt::free(|cs| {
        TICK_TIMER.borrow(cs).replace(Some(tim));
    });
}

/// Clears the update flag. Called from the TIM2 handler.
pub fn acknowledge() {
    cortex_m::interrupt::free(|cs| {
        if let Some(tim) = TICK_TIMER.borrow(cs).borrow().as_ref() {
            tim.sr.modify(|_, w| w.uif().clear_bit());
        }
    });
}
