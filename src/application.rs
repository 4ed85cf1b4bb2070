//! Application layer: the read-report loop
//!
//! Every iteration runs, strictly in this order: execute a pending blink
//! command, sample the sensors, emit one status line, pause.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_hal::serial;

use crate::config::{Config, LED_PIN, MOTION_PIN};
use crate::drivers::{Console, Led, MotionSensor, TemperatureSensor};
use crate::error::Result;
use crate::protocol::{format_status, BlinkCommand, IntParser, Reading};

/// Main application state and logic
pub struct App<S, L, P, T, D> {
    console: Console<S>,
    led: Led<L>,
    motion: MotionSensor<P>,
    thermometer: T,
    delay: D,
    config: Config,
}

impl<S, L, P, T, D> App<S, L, P, T, D>
where
    S: serial::Read<u8> + serial::Write<u8>,
    L: OutputPin,
    P: InputPin,
    T: TemperatureSensor,
    D: DelayMs<u16>,
{
    pub fn new(
        config: Config,
        console: Console<S>,
        led: Led<L>,
        motion: MotionSensor<P>,
        thermometer: T,
        delay: D,
    ) -> Self {
        Self {
            console,
            led,
            motion,
            thermometer,
            delay,
            config,
        }
    }

    /// Startup pause once the peripherals are configured.
    pub fn start(&mut self) {
        self.console.debug("boot led pin", LED_PIN);
        self.console.debug("boot pir pin", MOTION_PIN);
        self.delay.delay_ms(self.config.startup_delay_ms);
    }

    /// Read and execute a blink command if one is waiting. Returns `None`
    /// when nothing but delimiters was received.
    pub fn check_command(&mut self) -> Option<BlinkCommand> {
        // Leftover line endings (the `\n` of `\r\n`) are not a command
        let first = loop {
            match self.console.read_byte()? {
                byte if byte.is_ascii_whitespace() => continue,
                byte => break byte,
            }
        };

        let mut parser = IntParser::new();
        let raw = match parser.feed(first) {
            Some(value) => value,
            None => loop {
                match self
                    .console
                    .read_timed(&mut self.delay, self.config.command_timeout_ms)
                {
                    Some(byte) => {
                        if let Some(value) = parser.feed(byte) {
                            break value;
                        }
                    }
                    None => break parser.finish(),
                }
            },
        };

        let command = BlinkCommand::from_raw(raw, &self.config);
        self.console.debug("blink", command.count());
        if let Err(err) = self.led.blink(
            command.count(),
            self.config.blink_on_ms,
            self.config.blink_off_ms,
            &mut self.delay,
        ) {
            self.console.debug_error("blink", &err);
        }
        Some(command)
    }

    pub fn sample(&mut self) -> Reading {
        let temperature = match self.thermometer.read() {
            Ok(celsius) => Some(celsius),
            Err(err) => {
                self.console.debug_error("temperature", &err);
                None
            }
        };
        let motion = self.motion.is_motion().unwrap_or_else(|err| {
            self.console.debug_error("pir", &err);
            false
        });
        Reading { temperature, motion }
    }

    /// One loop iteration. A failed write drops the rest of the line; the
    /// pause still happens.
    pub fn step(&mut self) -> Result<Reading> {
        self.check_command();
        let reading = self.sample();
        let emitted = self.console.write_line(&format_status(&reading));
        self.delay.delay_ms(self.config.loop_delay_ms);
        emitted.map(|()| reading)
    }

    pub fn run(mut self) -> ! {
        self.start();
        loop {
            // Nothing to recover: the next iteration reports fresh readings
            let _ = self.step();
        }
    }
}
