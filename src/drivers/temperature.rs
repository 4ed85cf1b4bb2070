//! Temperature sensing
//!
//! [`TemperatureSensor`] is what the application loop consumes. The on-chip
//! sensor is modelled as a [`RawAdc`] producing counts plus a linear
//! [`Calibration`], so the conversion can be checked without hardware.

use crate::error::Result;

/// Anything that yields a temperature in degrees Celsius.
pub trait TemperatureSensor {
    fn read(&mut self) -> Result<f32>;
}

/// Source of raw counts from the internal temperature channel.
pub trait RawAdc {
    /// Run one conversion. Fails with [`Error::AdcTimeout`](crate::error::Error::AdcTimeout)
    /// when the converter never reports completion.
    fn convert(&mut self) -> Result<u16>;
}

/// `celsius = (raw - offset) / divisor`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub offset: f32,
    pub divisor: f32,
}

impl Calibration {
    pub const fn new(offset: f32, divisor: f32) -> Self {
        Self { offset, divisor }
    }

    pub fn to_celsius(&self, raw: f32) -> f32 {
        (raw - self.offset) / self.divisor
    }
}

/// The ATmega's built-in temperature sensor.
pub struct InternalTemperature<A> {
    adc: A,
    calibration: Calibration,
}

impl<A: RawAdc> InternalTemperature<A> {
    pub fn new(adc: A, calibration: Calibration) -> Self {
        Self { adc, calibration }
    }
}

impl<A: RawAdc> TemperatureSensor for InternalTemperature<A> {
    fn read(&mut self) -> Result<f32> {
        let raw = self.adc.convert()?;
        Ok(self.calibration.to_celsius(f32::from(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TEMP_DIVISOR, TEMP_OFFSET};
    use crate::error::Error;

    struct FixedAdc(Result<u16>);

    impl RawAdc for FixedAdc {
        fn convert(&mut self) -> Result<u16> {
            self.0
        }
    }

    #[test]
    fn offset_maps_to_zero() {
        let calibration = Calibration::new(TEMP_OFFSET, TEMP_DIVISOR);
        assert_eq!(calibration.to_celsius(324.31), 0.0);
    }

    #[test]
    fn conversion_is_linear() {
        let calibration = Calibration::new(TEMP_OFFSET, TEMP_DIVISOR);
        let one_step = calibration.to_celsius(325.53);
        assert!((one_step - 1.0).abs() < 1e-3);
        assert!(calibration.to_celsius(0.0) < -265.0);
    }

    #[test]
    fn reads_through_calibration() {
        let mut sensor = InternalTemperature::new(FixedAdc(Ok(367)), Calibration::new(300.0, 2.0));
        assert_eq!(sensor.read(), Ok(33.5));
    }

    #[test]
    fn adc_timeout_propagates() {
        let mut sensor = InternalTemperature::new(
            FixedAdc(Err(Error::AdcTimeout)),
            Calibration::new(TEMP_OFFSET, TEMP_DIVISOR),
        );
        assert_eq!(sensor.read(), Err(Error::AdcTimeout));
    }
}
