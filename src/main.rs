#![no_std]
#![no_main]

mod board;

use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use cortex_m;
use cortex_m::asm::{delay, wfi};
use cortex_m_rt::entry;
use log::{info, warn};
use stm32f4::stm32f407::{self, interrupt};

use lis3dh_telemetry::lis3dh::Lis3dh;
use lis3dh_telemetry::{Acquisition, Cycle, DataReadySignal, I2cTransport, Variant};

use board::config::{BOOT_DELAY_CYCLES, LOG_LEVEL, SENSOR_ADDRESS, TICK_HZ};

static DATA_READY: DataReadySignal = DataReadySignal::new();

#[entry]
fn main() -> ! {
    let p = stm32f407::Peripherals::take().unwrap();

    board::logger::init(LOG_LEVEL);

    let mut bus = I2cTransport::new(board::i2c::I2c1::new(p.I2C1, &p.RCC, &p.GPIOB));
    let mut uart = board::usart::Usart2::new(p.USART2, &p.RCC, &p.GPIOA);

    delay(BOOT_DELAY_CYCLES);

    let variant = Variant::SELECTED;
    // streaming starts regardless
    if let Err(err) = Lis3dh::new(&mut bus, SENSOR_ADDRESS).configure(&variant) {
        warn!("{}", err);
    }

    board::timer::start(p.TIM2, &p.RCC, TICK_HZ);
    unsafe {
        cortex_m::peripheral::NVIC::unmask(interrupt::TIM2);
    }

    let mut acquisition = Acquisition::new(bus, SENSOR_ADDRESS, variant);
    info!("streaming {}-byte frames", acquisition.variant().frame_len());
    loop {
        if let Cycle::Idle = acquisition.poll(&DATA_READY, &mut uart) {
            // sleep unless the tick fired since the poll
            cortex_m::interrupt::free(|_| {
                if !DATA_READY.is_pending() {
                    wfi();
                }
            });
        }
    }
}

#[interrupt]
fn TIM2() {
    board::timer::acknowledge();
    DATA_READY.signal();
}
