use avr_device::atmega328p::USART0;
use avr_device::interrupt::Mutex;
use core::cell::RefCell;
use core::convert::Infallible;
use embedded_hal::serial;

use crate::config::{CPU_FREQ_HZ, UART_BAUD};
use crate::drivers::RxBuffer;

const UBRR: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16; // 103 for 9600 @ 16MHz

// UCSR0A
const RXC0: u8 = 1 << 7;
const UDRE0: u8 = 1 << 5;
const FE0: u8 = 1 << 4;
const DOR0: u8 = 1 << 3;
// UCSR0B
const RXCIE0: u8 = 1 << 7;
const RXEN0: u8 = 1 << 4;
const TXEN0: u8 = 1 << 3;
// UCSR0C: asynchronous, no parity, 1 stop bit, 8 data bits
const FRAME_8N1: u8 = 0b0000_0110;

// Filled by the receive interrupt, drained by the main loop
static RX_BUFFER: Mutex<RefCell<RxBuffer>> = Mutex::new(RefCell::new(RxBuffer::new()));

/// USART0 on D0/D1, the link to the gateway. Reception is interrupt
/// driven; transmission polls the data register.
pub struct Uart {
    usart: USART0,
}

impl Uart {
    /// Configure 9600 8N1. Interrupts must be enabled globally afterwards
    /// for reception to work.
    pub fn new(usart: USART0) -> Self {
        usart.ubrr0.write(|w| unsafe { w.bits(UBRR) });
        usart.ucsr0a.write(|w| unsafe { w.bits(0) });
        usart.ucsr0c.write(|w| unsafe { w.bits(FRAME_8N1) });
        usart.ucsr0b.write(|w| unsafe { w.bits(RXEN0 | TXEN0 | RXCIE0) });
        Self { usart }
    }
}

impl serial::Read<u8> for Uart {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Infallible> {
        avr_device::interrupt::free(|cs| RX_BUFFER.borrow(cs).borrow_mut().read())
            .ok_or(nb::Error::WouldBlock)
    }
}

impl serial::Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        if self.usart.ucsr0a.read().bits() & UDRE0 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        self.usart.udr0.write(|w| unsafe { w.bits(byte) });
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        if self.usart.ucsr0a.read().bits() & UDRE0 == 0 {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }
}

#[avr_device::interrupt(atmega328p)]
fn USART_RX() {
    // Safe to steal: the ISR only touches the receive registers
    let usart = unsafe { &*USART0::ptr() };
    let status = usart.ucsr0a.read().bits();
    let byte = usart.udr0.read().bits();
    if status & RXC0 != 0 && status & (FE0 | DOR0) == 0 {
        avr_device::interrupt::free(|cs| {
            RX_BUFFER.borrow(cs).borrow_mut().write(byte);
        });
    }
}
