/// Process-wide diagnostic log.
///
/// The game owns the terminal's alternate screen, so log lines go to a file
/// (`namesnake.log` next to the high score) instead of stdout. Before
/// `init_logger` runs, and in tests, lines fall through to stderr.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub const LOG_FILE: &str = "namesnake.log";

pub struct Logger {
    prefix: Option<String>,
    sink: Mutex<Option<File>>,
}

impl Logger {
    fn new(prefix: Option<String>, sink: Option<File>) -> Self {
        Self { prefix, sink: Mutex::new(sink) }
    }

    fn format(&self, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}] {}", timestamp, prefix, message),
            None => format!("[{}] {}", timestamp, message),
        }
    }

    pub fn log(&self, message: &str) {
        let line = self.format(message);
        let mut guard = match self.sink.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        match guard.as_mut() {
            Some(file) => {
                let _ = writeln!(file, "{}", line);
            }
            None => eprintln!("{}", line),
        }
    }
}

/// Install the global logger. `path` is opened in append mode; if it can't
/// be opened the logger still works, writing to stderr.
pub fn init_logger(prefix: Option<String>, path: Option<&Path>) {
    LOGGER.get_or_init(|| {
        let sink = path.and_then(|p| OpenOptions::new().create(true).append(true).open(p).ok());
        Logger::new(prefix, sink)
    });
}

pub fn log(message: &str) {
    match LOGGER.get() {
        Some(logger) => logger.log(message),
        None => eprintln!("{}", message),
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}
