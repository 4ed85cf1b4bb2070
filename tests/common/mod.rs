//! Host-side stand-ins for the UART, Timer0 and the temperature sensor.
//!
//! Handles are cheap clones sharing state, so a test can keep one and
//! inspect it after handing the other to `App`.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use atmega328p_sensor_node::drivers::{Console, Led, MotionSensor, TemperatureSensor};
use atmega328p_sensor_node::{App, Config, Result};
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::serial;
use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction as PinTransaction};

// ── Serial ────────────────────────────────────────────────────

#[derive(Default)]
struct SerialState {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

#[derive(Clone, Default)]
pub struct FakeSerial {
    state: Rc<RefCell<SerialState>>,
}

impl FakeSerial {
    /// Bytes "sent by the gateway".
    pub fn feed(&self, bytes: &[u8]) {
        self.state.borrow_mut().rx.extend(bytes.iter().copied());
    }

    pub fn unread(&self) -> usize {
        self.state.borrow().rx.len()
    }

    pub fn output(&self) -> String {
        String::from_utf8(self.state.borrow().tx.clone()).unwrap()
    }

    /// Lines meant for the gateway; `[DBG]` lines are skipped so the
    /// scenarios hold with the `debug` feature on.
    pub fn lines(&self) -> Vec<String> {
        self.output()
            .split_terminator("\r\n")
            .filter(|line| !line.starts_with("[DBG]"))
            .map(str::to_owned)
            .collect()
    }
}

impl serial::Read<u8> for FakeSerial {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Infallible> {
        self.state
            .borrow_mut()
            .rx
            .pop_front()
            .ok_or(nb::Error::WouldBlock)
    }
}

impl serial::Write<u8> for FakeSerial {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
        self.state.borrow_mut().tx.push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        Ok(())
    }
}

// ── Delay ─────────────────────────────────────────────────────

/// Adds up requested delays instead of sleeping.
#[derive(Clone, Default)]
pub struct RecordingDelay {
    total_ms: Rc<Cell<u64>>,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ms.get()
    }
}

impl DelayMs<u16> for RecordingDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.total_ms.set(self.total_ms.get() + u64::from(ms));
    }
}

// ── Temperature ───────────────────────────────────────────────

pub struct FixedTemperature(pub Result<f32>);

impl TemperatureSensor for FixedTemperature {
    fn read(&mut self) -> Result<f32> {
        self.0
    }
}

// ── Pins ──────────────────────────────────────────────────────

/// High then low for every blink.
pub fn blinks(times: usize) -> Vec<PinTransaction> {
    (0..times)
        .flat_map(|_| [PinTransaction::set(State::High), PinTransaction::set(State::Low)])
        .collect()
}

pub fn pir_reads(levels: &[State]) -> Vec<PinTransaction> {
    levels.iter().map(|level| PinTransaction::get(level.clone())).collect()
}

// ── Rig ───────────────────────────────────────────────────────

pub type TestApp = App<FakeSerial, PinMock, PinMock, FixedTemperature, RecordingDelay>;

pub struct Rig {
    pub app: TestApp,
    pub serial: FakeSerial,
    pub delay: RecordingDelay,
    pub led: PinMock,
    pub pir: PinMock,
}

impl Rig {
    pub fn new(
        config: Config,
        led: &[PinTransaction],
        pir: &[PinTransaction],
        temperature: Result<f32>,
    ) -> Self {
        let serial = FakeSerial::default();
        let delay = RecordingDelay::default();
        let led = PinMock::new(led);
        let pir = PinMock::new(pir);
        let app = App::new(
            config,
            Console::new(serial.clone()),
            Led::new(led.clone()),
            MotionSensor::new(pir.clone()),
            FixedTemperature(temperature),
            delay.clone(),
        );
        Self {
            app,
            serial,
            delay,
            led,
            pir,
        }
    }

    /// Verify every expected pin transaction happened.
    pub fn done(mut self) {
        self.led.done();
        self.pir.done();
    }
}

/// Production values except the command byte wait, so buffered input is
/// parsed without polling.
pub fn quick_config() -> Config {
    Config {
        command_timeout_ms: 0,
        ..Config::default()
    }
}
