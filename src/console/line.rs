//! Line buffer for console input

/// Maximum input line length
pub const LINE_SIZE: usize = 96;

/// Line input buffer
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
        }
    }

    /// Push a character (dropped when full)
    pub fn push(&mut self, c: u8) {
        if self.len < LINE_SIZE {
            self.buf[self.len] = c;
            self.len += 1;
        }
    }

    /// Remove last character
    pub fn backspace(&mut self) {
        if self.len > 0 {
            self.len -= 1;
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read() {
        let mut b = LineBuffer::new();
        for c in b"set A 1" {
            b.push(*c);
        }
        assert_eq!(b.as_str(), "set A 1");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut b = LineBuffer::new();
        b.push(b'a');
        b.push(b'b');
        b.backspace();
        assert_eq!(b.as_str(), "a");
        b.clear();
        assert!(b.is_empty());
    }

    #[test]
    fn test_overflow_dropped() {
        let mut b = LineBuffer::new();
        for _ in 0..LINE_SIZE + 10 {
            b.push(b'x');
        }
        assert_eq!(b.as_str().len(), LINE_SIZE);
    }
}
