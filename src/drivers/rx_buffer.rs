//! Receive ring buffer between the UART interrupt and the main loop

// Buffer size must be power of 2 for efficient masking
pub const RX_BUFFER_SIZE: usize = 64;
const RX_BUFFER_MASK: usize = RX_BUFFER_SIZE - 1;

/// Fixed ring of received bytes. One slot stays free to tell full from
/// empty, so it holds at most `RX_BUFFER_SIZE - 1` bytes.
pub struct RxBuffer {
    data: [u8; RX_BUFFER_SIZE],
    write_idx: usize,
    read_idx: usize,
}

impl RxBuffer {
    pub const fn new() -> Self {
        Self {
            data: [0; RX_BUFFER_SIZE],
            write_idx: 0,
            read_idx: 0,
        }
    }

    /// Drops the byte when full.
    pub fn write(&mut self, byte: u8) -> bool {
        let next_write = (self.write_idx + 1) & RX_BUFFER_MASK;
        if next_write != self.read_idx {
            self.data[self.write_idx] = byte;
            self.write_idx = next_write;
            true
        } else {
            false
        }
    }

    pub fn read(&mut self) -> Option<u8> {
        if self.read_idx != self.write_idx {
            let byte = self.data[self.read_idx];
            self.read_idx = (self.read_idx + 1) & RX_BUFFER_MASK;
            Some(byte)
        } else {
            None
        }
    }
}

impl Default for RxBuffer {
    fn default() -> Self {
        Self::new()
    }
}
