//! Log lines produced by the handlers.
//!
//! Handlers never write to the subscriber directly. They return a [`LogBlock`]
//! and the session driver emits it in one go, so a message's lines always
//! appear together and in order.

use tracing::{debug, error, info, warn, Level};

pub const DELIMITER: &str = "==============================";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub text: String,
}

impl LogLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: Level::INFO,
            text: text.into(),
        }
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Self {
            level: Level::WARN,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::ERROR,
            text: text.into(),
        }
    }

    pub fn debug(text: impl Into<String>) -> Self {
        Self {
            level: Level::DEBUG,
            text: text.into(),
        }
    }

    fn emit(&self) {
        // tracing macros need the level at compile time
        if self.level == Level::ERROR {
            error!("{}", self.text);
        } else if self.level == Level::WARN {
            warn!("{}", self.text);
        } else if self.level == Level::INFO {
            info!("{}", self.text);
        } else {
            debug!("{}", self.text);
        }
    }
}

/// Ordered lines belonging to one handler invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogBlock {
    lines: Vec<LogLine>,
}

impl LogBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: LogLine) -> &mut Self {
        self.lines.push(line);
        self
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn emit(&self) {
        for line in &self.lines {
            line.emit();
        }
    }
}

impl From<LogLine> for LogBlock {
    fn from(line: LogLine) -> Self {
        Self { lines: vec![line] }
    }
}

#[cfg(test)]
pub(crate) mod capture {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` under a plain fmt subscriber and returns `(level, message)` per output line.
    pub(crate) fn capture_lines(filter: EnvFilter, f: impl FnOnce()) -> Vec<(String, String)> {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| {
                let (level, message) = line.trim_start().split_once(' ').unwrap();
                (level.to_string(), message.to_string())
            })
            .collect()
    }
}
