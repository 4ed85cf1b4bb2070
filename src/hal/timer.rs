use avr_device::atmega328p::TC0;
use embedded_hal::blocking::delay::{DelayMs, DelayUs};

#[derive(Clone, Copy)]
pub enum Prescaler {
    Div8 = 2,
    Div64 = 3,
}

const PRESCALER_MASK: u8 = 0x07;

// At 16MHz: Div64 gives 250 ticks per millisecond, Div8 two ticks per microsecond
const TICKS_PER_MS: u8 = 250;
const TICKS_PER_US: u16 = 2;
const US_CHUNK: u16 = 100;

/// Busy-wait delay on Timer0.
///
/// Zero sized so the loop and the ADC driver can each hold one. Timer0 is
/// used for nothing else, and the firmware is single threaded, so copies
/// never overlap.
#[derive(Clone, Copy)]
pub struct Delay {
    _private: (),
}

impl Delay {
    /// Put Timer0 into normal mode, stopped. Takes the peripheral so no
    /// other driver can claim it.
    pub fn new(tc0: TC0) -> Self {
        tc0.tccr0a.write(|w| unsafe { w.bits(0) });
        tc0.tccr0b.write(|w| unsafe { w.bits(0) });
        tc0.tcnt0.write(|w| unsafe { w.bits(0) });
        Self { _private: () }
    }

    fn wait_ticks(&mut self, prescaler: Prescaler, ticks: u8) {
        unsafe {
            let p = TC0::ptr();
            (*p).tcnt0.write(|w| w.bits(0));
            (*p).tccr0b.modify(|r, w| {
                w.bits((r.bits() & !PRESCALER_MASK) | (prescaler as u8 & PRESCALER_MASK))
            });
            while (*p).tcnt0.read().bits() < ticks {}
            (*p).tccr0b.modify(|r, w| w.bits(r.bits() & !PRESCALER_MASK));
        }
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.wait_ticks(Prescaler::Div64, TICKS_PER_MS);
        }
    }
}

impl DelayUs<u16> for Delay {
    fn delay_us(&mut self, us: u16) {
        let mut remaining = us;
        while remaining > US_CHUNK {
            self.wait_ticks(Prescaler::Div8, (US_CHUNK * TICKS_PER_US) as u8);
            remaining -= US_CHUNK;
        }
        if remaining > 0 {
            self.wait_ticks(Prescaler::Div8, (remaining * TICKS_PER_US) as u8);
        }
    }
}
