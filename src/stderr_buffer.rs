use std::io::{self, Write};
use std::sync::Mutex;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

/// Activate buffering. While active, log lines are stored instead of being
/// printed to stderr, so they can't corrupt a full-screen display.
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        *guard = Some(Vec::new());
    }
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Write a message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let Ok(mut guard) = BUFFER.lock() else {
        eprintln!("{}", msg);
        return;
    };
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `io::Write` sink for the log subscriber that routes through the buffer.
#[derive(Debug, Default)]
pub struct BufferedStderr;

impl Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let line = text.trim_end_matches('\n');
        if !line.is_empty() {
            warn(line.to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Buffer state is global, so exercise it from a single test.
    #[test]
    fn test_buffer_collects_while_active() {
        activate();
        warn("first".to_string());
        let mut writer = BufferedStderr;
        writer.write_all(b"second\n").unwrap();
        writer.write_all(b"\n").unwrap();

        let messages = drain();
        assert_eq!(messages, vec!["first".to_string(), "second".to_string()]);

        // drained: no longer buffering
        assert!(drain().is_empty());
    }
}
