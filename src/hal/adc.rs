use avr_device::atmega328p::ADC;
use embedded_hal::blocking::delay::{DelayMs, DelayUs};

use crate::drivers::RawAdc;
use crate::error::{Error, Result};

// ADMUX: internal 1.1V reference (REFS1 | REFS0), channel 8 = temperature sensor
const ADMUX_TEMPERATURE: u8 = (1 << 7) | (1 << 6) | 0x08;

// ADCSRA
const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
const PRESCALER_DIV128: u8 = 0x07; // 125kHz @ 16MHz

const POLL_US: u16 = 10;

/// ADC wired to the on-chip temperature sensor.
pub struct InternalAdc<D> {
    adc: ADC,
    delay: D,
    settle_ms: u16,
    timeout_us: u16,
}

impl<D> InternalAdc<D>
where
    D: DelayMs<u16> + DelayUs<u16>,
{
    pub fn new(adc: ADC, delay: D, settle_ms: u16, timeout_us: u16) -> Self {
        Self {
            adc,
            delay,
            settle_ms,
            timeout_us,
        }
    }
}

impl<D> RawAdc for InternalAdc<D>
where
    D: DelayMs<u16> + DelayUs<u16>,
{
    fn convert(&mut self) -> Result<u16> {
        self.adc.admux.write(|w| unsafe { w.bits(ADMUX_TEMPERATURE) });
        self.adc
            .adcsra
            .modify(|r, w| unsafe { w.bits(r.bits() | ADEN | PRESCALER_DIV128) });
        // Wait for the reference to settle after switching
        self.delay.delay_ms(self.settle_ms);

        // Start conversion
        self.adc.adcsra.modify(|r, w| unsafe { w.bits(r.bits() | ADSC) });

        let mut waited = 0;
        while self.adc.adcsra.read().bits() & ADSC != 0 {
            if waited >= self.timeout_us {
                return Err(Error::AdcTimeout);
            }
            self.delay.delay_us(POLL_US);
            waited = waited.saturating_add(POLL_US);
        }

        Ok(self.adc.adc.read().bits())
    }
}
