//! Serial log output.
//!
//! Formats entries drained from [`SYS_LOG`] and, on target, writes them
//! to a UART TX driver. Formatting is host-testable; only the driver
//! binding is target-gated.
//!
//! [`SYS_LOG`]: crate::SYS_LOG

use crate::logging::LogEntry;

/// Bytes needed for a formatted entry: header plus message.
pub const FORMATTED_LEN: usize = crate::logging::MAX_MSG_LEN + 32;

/// Format log entry to a buffer.
///
/// Format: `[timestamp_us] LEVEL: message\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl<'a> Write for BufWriter<'a> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };

    let _ = write!(
        writer,
        "[{:10}] {}: {}\n",
        entry.timestamp_us,
        entry.level.as_str(),
        core::str::from_utf8(&entry.msg[..entry.len as usize]).unwrap_or("<invalid utf8>")
    );

    writer.pos
}

/// Drain [`crate::SYS_LOG`] to a UART TX driver.
#[cfg(target_os = "espidf")]
pub struct SerialDrain<'d> {
    tx: esp_idf_svc::hal::uart::UartTxDriver<'d>,
}

#[cfg(target_os = "espidf")]
impl<'d> SerialDrain<'d> {
    pub fn new(tx: esp_idf_svc::hal::uart::UartTxDriver<'d>) -> Self {
        Self { tx }
    }

    /// Write all pending entries; report drops since the last poll.
    pub fn poll(&mut self) {
        while let Some(entry) = crate::SYS_LOG.drain() {
            let mut buf = [0u8; FORMATTED_LEN];
            let len = format_log_entry(&entry, &mut buf);
            let _ = self.tx.write(&buf[..len]);
        }

        let dropped = crate::SYS_LOG.dropped();
        if dropped > 0 {
            crate::SYS_LOG.reset_dropped();
            let mut buf = [0u8; 64];
            let len = crate::logging::format_to_buffer(
                &mut buf,
                format_args!("log: {} messages dropped\n", dropped),
            );
            let _ = self.tx.write(&buf[..len]);
        }
    }
}

#[cfg(target_os = "espidf")]
impl core::fmt::Write for SerialDrain<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let _ = self.tx.write(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogEntry, LogLevel};

    #[test]
    fn test_format_log_entry() {
        let mut entry = LogEntry::default();
        entry.timestamp_us = 12345;
        entry.level = LogLevel::Warn;
        let msg = b"store open failed";
        entry.msg[..msg.len()].copy_from_slice(msg);
        entry.len = msg.len() as u8;

        let mut buf = [0u8; FORMATTED_LEN];
        let len = format_log_entry(&entry, &mut buf);
        let text = core::str::from_utf8(&buf[..len]).unwrap();

        assert!(text.contains("12345"));
        assert!(text.contains("WARN"));
        assert!(text.contains("store open failed"));
        assert!(text.ends_with('\n'));
    }
}
