use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::error::{Error, Result};

/// LED actuator blinked on gateway command.
pub struct Led<P> {
    pin: P,
}

impl<P: OutputPin> Led<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn set(&mut self, on: bool) -> Result<()> {
        if on {
            self.pin.set_high().map_err(|_| Error::Pin)
        } else {
            self.pin.set_low().map_err(|_| Error::Pin)
        }
    }

    /// Blink `times` times, blocking for `times * (on_ms + off_ms)`.
    /// Runs to completion once started.
    pub fn blink<D: DelayMs<u16>>(
        &mut self,
        times: u8,
        on_ms: u16,
        off_ms: u16,
        delay: &mut D,
    ) -> Result<()> {
        for _ in 0..times {
            self.set(true)?;
            delay.delay_ms(on_ms);
            self.set(false)?;
            delay.delay_ms(off_ms);
        }
        Ok(())
    }
}
