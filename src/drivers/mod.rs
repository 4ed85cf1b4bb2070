pub mod led;
pub mod motion;
pub mod rx_buffer;
pub mod serial_console;
pub mod temperature;

pub use led::Led;
pub use motion::MotionSensor;
pub use rx_buffer::RxBuffer;
pub use serial_console::Console;
pub use temperature::{Calibration, InternalTemperature, RawAdc, TemperatureSensor};
