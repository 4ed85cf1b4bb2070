use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::serial;
use ufmt::{uDebug, uWrite, uwrite};

use crate::error::{Error, Result};

/// Line-oriented console on the gateway UART.
///
/// Debug lines share the link with status lines. They always have at least
/// three space-separated tokens, so the gateway (which only accepts
/// `<event> <payload>`) drops them.
pub struct Console<S> {
    serial: S,
}

impl<S> Console<S>
where
    S: serial::Read<u8> + serial::Write<u8>,
{
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        nb::block!(self.serial.write(byte)).map_err(|_| Error::Serial)
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        for byte in s.bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    pub fn write_line(&mut self, s: &str) -> Result<()> {
        self.write_str(s)?;
        self.write_str("\r\n")
    }

    /// Byte already waiting in the receive buffer, if any.
    pub fn read_byte(&mut self) -> Option<u8> {
        self.serial.read().ok()
    }

    /// Wait up to `timeout_ms` for the next byte, polling once per
    /// millisecond. Receive errors end the wait like a timeout.
    pub fn read_timed<D: DelayMs<u16>>(&mut self, delay: &mut D, timeout_ms: u16) -> Option<u8> {
        let mut waited = 0;
        loop {
            match self.serial.read() {
                Ok(byte) => return Some(byte),
                Err(nb::Error::WouldBlock) if waited < timeout_ms => {
                    delay.delay_ms(1);
                    waited += 1;
                }
                Err(_) => return None,
            }
        }
    }

    // Debug helper - print hex value
    pub fn write_hex(&mut self, val: u8) -> Result<()> {
        const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";
        self.write_byte(HEX_CHARS[(val >> 4) as usize])?;
        self.write_byte(HEX_CHARS[(val & 0xF) as usize])
    }

    /// `[DBG] <msg>: 0x<val>`, only with the `debug` feature.
    pub fn debug(&mut self, msg: &str, val: u8) {
        if cfg!(feature = "debug") {
            let _ = self.try_debug(msg, val);
        }
    }

    /// `[DBG] <msg>: <err>`, only with the `debug` feature.
    pub fn debug_error<E: uDebug>(&mut self, msg: &str, err: &E) {
        if cfg!(feature = "debug") {
            let _ = uwrite!(self, "[DBG] {}: {:?}\r\n", msg, err);
        }
    }

    fn try_debug(&mut self, msg: &str, val: u8) -> Result<()> {
        self.write_str("[DBG] ")?;
        self.write_str(msg)?;
        self.write_str(": 0x")?;
        self.write_hex(val)?;
        self.write_str("\r\n")
    }
}

impl<S> uWrite for Console<S>
where
    S: serial::Read<u8> + serial::Write<u8>,
{
    type Error = Error;

    fn write_str(&mut self, s: &str) -> Result<()> {
        Console::write_str(self, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::delay::MockNoop;
    use embedded_hal_mock::serial::{Mock as SerialMock, Transaction};

    #[test]
    fn write_line_appends_crlf() {
        let expectations = [Transaction::write_many(b"status pir:0\r\n")];
        let mut serial = SerialMock::new(&expectations);
        let mut console = Console::new(serial.clone());

        console.write_line("status pir:0").unwrap();
        serial.done();
    }

    #[test]
    fn timed_read_returns_buffered_bytes() {
        let expectations = [Transaction::read_many(b"42")];
        let mut serial = SerialMock::new(&expectations);
        let mut console = Console::new(serial.clone());

        assert_eq!(console.read_timed(&mut MockNoop::new(), 0), Some(b'4'));
        assert_eq!(console.read_timed(&mut MockNoop::new(), 0), Some(b'2'));
        serial.done();
    }

    #[test]
    fn hex_digits_are_uppercase() {
        let expectations = [Transaction::write_many(b"0A"), Transaction::write_many(b"FF")];
        let mut serial = SerialMock::new(&expectations);
        let mut console = Console::new(serial.clone());

        console.write_hex(0x0a).unwrap();
        console.write_hex(0xff).unwrap();
        serial.done();
    }

    #[cfg(not(feature = "debug"))]
    #[test]
    fn debug_lines_compiled_out() {
        let mut serial = SerialMock::new(&[]);
        let mut console = Console::new(serial.clone());

        console.debug("boot", 1);
        console.debug_error("temperature", &Error::AdcTimeout);
        serial.done();
    }

    #[cfg(feature = "debug")]
    #[test]
    fn debug_lines_have_three_tokens() {
        let expectations = [
            Transaction::write_many(b"[DBG] boot: 0x0D\r\n"),
            Transaction::write_many(b"[DBG] temperature: AdcTimeout\r\n"),
        ];
        let mut serial = SerialMock::new(&expectations);
        let mut console = Console::new(serial.clone());

        console.debug("boot", 0x0D);
        console.debug_error("temperature", &Error::AdcTimeout);
        serial.done();
    }
}
