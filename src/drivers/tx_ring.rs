// Size must be power of 2 for efficient masking
pub const TX_RING_SIZE: usize = 64;
const MASK: usize = TX_RING_SIZE - 1;

/// Byte queue between the console and the UART data register
pub struct TxRing {
    data: [u8; TX_RING_SIZE],
    write_idx: usize,
    read_idx: usize,
}

impl TxRing {
    pub const fn new() -> Self {
        Self {
            data: [0; TX_RING_SIZE],
            write_idx: 0,
            read_idx: 0,
        }
    }

    /// Queue `byte`. When the ring is full the oldest byte is evicted and
    /// returned; the caller must send it before anything still queued.
    pub fn push(&mut self, byte: u8) -> Option<u8> {
        let evicted = if self.is_full() { self.pop() } else { None };
        self.data[self.write_idx] = byte;
        self.write_idx = (self.write_idx + 1) & MASK;
        evicted
    }

    pub fn pop(&mut self) -> Option<u8> {
        if self.read_idx != self.write_idx {
            let byte = self.data[self.read_idx];
            self.read_idx = (self.read_idx + 1) & MASK;
            Some(byte)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        (self.write_idx + 1) & MASK == self.read_idx
    }
}

impl Default for TxRing {
    fn default() -> Self {
        Self::new()
    }
}
