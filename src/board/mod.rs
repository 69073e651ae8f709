//! STM32F407 discovery board glue.

pub mod config;
pub mod i2c;
pub mod logger;
pub mod timer;
pub mod usart;
