//! Blink commands sent by the gateway
//!
//! The gateway writes a decimal count followed by a delimiter (a space,
//! or a newline when typed by hand). Parsing follows the Arduino
//! `Stream::parseInt` rules the gateway was written against: junk before
//! the number is skipped, a leading `-` negates, and the first non-digit
//! after the number ends it.

use crate::config::Config;

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Skipping,
    Number { negative: bool, value: i32 },
}

/// Incremental integer parser fed one received byte at a time.
pub struct IntParser {
    state: State,
}

impl IntParser {
    pub const fn new() -> Self {
        Self { state: State::Skipping }
    }

    /// Feed one byte. Returns the value once a terminating byte arrives;
    /// the terminator itself is consumed.
    pub fn feed(&mut self, byte: u8) -> Option<i32> {
        match (self.state, byte) {
            (State::Skipping, b'-') => {
                self.state = State::Number { negative: true, value: 0 };
                None
            }
            (State::Skipping, b'0'..=b'9') => {
                self.state = State::Number {
                    negative: false,
                    value: i32::from(byte - b'0'),
                };
                None
            }
            (State::Skipping, _) => None,
            (State::Number { negative, value }, b'0'..=b'9') => {
                // Saturate so oversized input ends up above the clamp limit
                let value = value.saturating_mul(10).saturating_add(i32::from(byte - b'0'));
                self.state = State::Number { negative, value };
                None
            }
            (State::Number { .. }, _) => Some(self.finish()),
        }
    }

    /// Input stopped arriving. Yields whatever was read, or 0 if no number
    /// started.
    pub fn finish(&mut self) -> i32 {
        let value = match self.state {
            State::Skipping => 0,
            State::Number { negative: true, value } => -value,
            State::Number { negative: false, value } => value,
        };
        self.state = State::Skipping;
        value
    }
}

impl Default for IntParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A blink request whose count is always within `0..=blink_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkCommand {
    count: u8,
}

impl BlinkCommand {
    /// Clamp a raw parsed value. Values above the limit are replaced by the
    /// fallback rather than capped; negatives blink zero times.
    pub fn from_raw(raw: i32, config: &Config) -> Self {
        let count = if raw > i32::from(config.blink_limit) {
            config.blink_fallback.min(config.blink_limit)
        } else if raw < 0 {
            0
        } else {
            raw as u8
        };
        Self { count }
    }

    pub fn count(&self) -> u8 {
        self.count
    }
}
