//! Firmware-wide error type

use core::fmt;
use ufmt::derive::uDebug;

#[derive(Debug, uDebug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// ADC conversion did not complete within the configured bound
    AdcTimeout,
    /// A GPIO read or write failed
    Pin,
    /// The UART rejected a byte
    Serial,
}

pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcTimeout => write!(f, "ADC conversion timed out"),
            Self::Pin => write!(f, "GPIO access failed"),
            Self::Serial => write!(f, "serial write failed"),
        }
    }
}
