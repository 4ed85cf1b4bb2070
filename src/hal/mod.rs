//! Register-level drivers for the ATmega328P

pub mod adc;
pub mod gpio;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use adc::InternalAdc;
pub use gpio::board;
pub use gpio::{Input, Output, Pin, Pins};
pub use timer::{Delay, Prescaler};
pub use uart::Uart;
