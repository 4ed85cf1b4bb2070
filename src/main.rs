#![no_std]
#![no_main]

use avr_device::atmega328p::Peripherals;
use panic_halt as _;

use atmega328p_sensor_node::drivers::{Console, InternalTemperature, Led, MotionSensor};
use atmega328p_sensor_node::hal::{board, Delay, InternalAdc, Pins, Uart};
use atmega328p_sensor_node::{App, Config};

#[avr_device::entry]
fn main() -> ! {
    let dp = Peripherals::take().unwrap();
    let config = Config::default();

    let delay = Delay::new(dp.TC0);
    let pins = Pins::new(dp.PORTB, dp.PORTD);
    let console = Console::new(Uart::new(dp.USART0));
    let led_pin: board::LedPin = pins.d13.into_output();
    let motion_pin: board::MotionPin = pins.d2.into_input();
    let led = Led::new(led_pin);
    let motion = MotionSensor::new(motion_pin);
    let thermometer = InternalTemperature::new(
        InternalAdc::new(dp.ADC, delay, config.adc_settle_ms, config.adc_timeout_us),
        config.calibration,
    );

    // Enable interrupts globally
    unsafe { avr_device::interrupt::enable() };

    App::new(config, console, led, motion, thermometer, delay).run()
}
