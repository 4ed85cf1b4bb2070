//! Configuration constants for the sensor node firmware
//!
//! The constants are the production values. [`Config`] gathers the ones the
//! application loop needs so tests can shorten delays without touching them.

use crate::drivers::temperature::Calibration;

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// Arduino digital pin wired to the PIR sensor output (PD2)
pub const MOTION_PIN: u8 = 2;

/// Arduino digital pin driving the LED actuator (PB5, onboard LED)
pub const LED_PIN: u8 = 13;

/// Delay after hardware init before the first iteration
pub const STARTUP_DELAY_MS: u16 = 2000;

/// Pause at the end of every loop iteration
pub const LOOP_DELAY_MS: u16 = 100;

/// LED on time per blink
pub const BLINK_ON_MS: u16 = 100;

/// LED off time per blink
pub const BLINK_OFF_MS: u16 = 100;

/// Largest blink count accepted from the gateway
pub const BLINK_LIMIT: u8 = 100;

/// Blink count used when the gateway sends more than [`BLINK_LIMIT`].
/// Larger values are usually line noise.
pub const BLINK_FALLBACK: u8 = 5;

/// Internal temperature sensor offset in ADC counts. Only approximate,
/// every chip differs.
pub const TEMP_OFFSET: f32 = 324.31;

/// Internal temperature sensor slope in ADC counts per degree Celsius
pub const TEMP_DIVISOR: f32 = 1.22;

/// Time for the internal 1.1V reference to settle after switching the mux
pub const ADC_SETTLE_MS: u16 = 20;

/// Upper bound on a single ADC conversion
pub const ADC_TIMEOUT_US: u16 = 1000;

/// How long to wait for each further byte of a blink command
pub const COMMAND_TIMEOUT_MS: u16 = 1000;

/// Runtime view of the constants above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub startup_delay_ms: u16,
    pub loop_delay_ms: u16,
    pub blink_on_ms: u16,
    pub blink_off_ms: u16,
    /// Raw commands above this are replaced by `blink_fallback`
    pub blink_limit: u8,
    pub blink_fallback: u8,
    pub calibration: Calibration,
    pub adc_settle_ms: u16,
    pub adc_timeout_us: u16,
    /// Per-byte wait while a command is being received. Zero means only
    /// bytes already buffered are used.
    pub command_timeout_ms: u16,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            startup_delay_ms: STARTUP_DELAY_MS,
            loop_delay_ms: LOOP_DELAY_MS,
            blink_on_ms: BLINK_ON_MS,
            blink_off_ms: BLINK_OFF_MS,
            blink_limit: BLINK_LIMIT,
            blink_fallback: BLINK_FALLBACK,
            calibration: Calibration::new(TEMP_OFFSET, TEMP_DIVISOR),
            adc_settle_ms: ADC_SETTLE_MS,
            adc_timeout_us: ADC_TIMEOUT_US,
            command_timeout_ms: COMMAND_TIMEOUT_MS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
