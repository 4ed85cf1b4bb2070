//! Status lines reported to the gateway

use heapless::String;
use ufmt::{uDisplay, uWrite, uwrite, Formatter};

/// Event name the gateway publishes the datapoints under
pub const EVENT_NAME: &str = "status";

/// Longest line is `status temp:-21474836.48,pir:1` (30 bytes)
pub const STATUS_CAPACITY: usize = 40;

/// One set of sensor readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Degrees Celsius, `None` when the ADC timed out
    pub temperature: Option<f32>,
    pub motion: bool,
}

pub type StatusLine = String<STATUS_CAPACITY>;

/// Temperature rendered with exactly two decimals.
///
/// Rounds half away from zero like `dtostrf`. Values that round to zero
/// print as `0.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Centi(i32);

impl Centi {
    pub fn from_celsius(celsius: f32) -> Self {
        let scaled = celsius * 100.0;
        let rounded = if scaled < 0.0 { scaled - 0.5 } else { scaled + 0.5 };
        // `as` saturates out-of-range values and maps NaN to 0
        Self(rounded as i32)
    }
}

impl uDisplay for Centi {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        let abs = self.0.unsigned_abs();
        let frac = abs % 100;
        uwrite!(f, "{}.", abs / 100)?;
        if frac < 10 {
            f.write_str("0")?;
        }
        uwrite!(f, "{}", frac)
    }
}

/// Build the line for one iteration, e.g. `status temp:35.22,pir:0`.
pub fn format_status(reading: &Reading) -> StatusLine {
    let mut line = StatusLine::new();
    let pir = u8::from(reading.motion);
    // Cannot overflow: the longest rendering is below STATUS_CAPACITY
    let _ = match reading.temperature {
        Some(celsius) => uwrite!(
            line,
            "{} temp:{},pir:{}",
            EVENT_NAME,
            Centi::from_celsius(celsius),
            pir
        ),
        None => uwrite!(line, "{} pir:{}", EVENT_NAME, pir),
    };
    line
}
