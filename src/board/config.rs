use log::LevelFilter;

/// HSI, no PLL: AHB and APB1 run at reset clocks.
pub const PCLK1_HZ: u32 = 16_000_000;

/// LIS3DH with SA0 tied low, on I2C1 (PB6 SCL, PB9 SDA).
pub const SENSOR_ADDRESS: u8 = lis3dh_telemetry::lis3dh::DEVICE_ADDRESS;

pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// Matches the 100 Hz output data rate set in CTRL_REG1.
pub const TICK_HZ: u32 = 100;

/// USART2 TX on PA2.
pub const BAUD_RATE: u32 = 115_200;

/// The sensor finishes its boot procedure about 5 ms after power-up.
pub const BOOT_DELAY_CYCLES: u32 = PCLK1_HZ / 1_000 * 5;

/// Semihosting faults the core without a debugger attached, so logging is
/// only on in `semihosting` builds. Per-cycle logs stay off either way.
#[cfg(feature = "semihosting")]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[cfg(not(feature = "semihosting"))]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Off;
