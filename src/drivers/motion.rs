use embedded_hal::digital::v2::InputPin;

use crate::error::{Error, Result};

/// PIR sensor on a digital input. The sensor drives the line high while
/// it sees movement.
pub struct MotionSensor<P> {
    pin: P,
}

impl<P: InputPin> MotionSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn is_motion(&self) -> Result<bool> {
        self.pin.is_high().map_err(|_| Error::Pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    #[test]
    fn follows_pin_level() {
        let expectations = [Transaction::get(State::High), Transaction::get(State::Low)];
        let mut pin = PinMock::new(&expectations);
        let sensor = MotionSensor::new(pin.clone());

        assert_eq!(sensor.is_motion(), Ok(true));
        assert_eq!(sensor.is_motion(), Ok(false));
        pin.done();
    }
}
