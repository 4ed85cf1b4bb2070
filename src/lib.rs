//! Sensor node firmware for an ATmega328P (Arduino Uno).
//!
//! Reports the PIR motion input and the internal temperature sensor to a
//! serial gateway as `status temp:<T>,pir:<P>` lines and blinks the LED on
//! D13 as many times as the gateway asks.
//!
//! Everything above [`hal`] is generic over `embedded-hal` traits and runs
//! on the host under test. The register-level layer and the entry point
//! need the `atmega328p` feature and an AVR target.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod application;
pub mod config;
pub mod drivers;
pub mod error;
pub mod protocol;

#[cfg(feature = "atmega328p")]
pub mod hal;

pub use application::App;
pub use config::Config;
pub use error::{Error, Result};
