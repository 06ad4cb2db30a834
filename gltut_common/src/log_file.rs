//! The `gl.log` file.
//!
//! Every run starts the log over with a header carrying the local time, then appends one line per
//! record. The file is reopened for every record so that whatever was written before a crash (or a
//! driver abort) is already on disk. Warnings and errors are mirrored to stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub const GL_LOG_FILE: &str = "gl.log";

lazy_static! {
    static ref LOG_EPOCH: Instant = Instant::now();
}

pub struct GlLog {
    path: PathBuf,
    level: LevelFilter,
    // Serializes the open-append-close sequence
    lock: Mutex<()>,
}

impl GlLog {
    /// Truncates (or creates) the log at `path` and writes the header line.
    pub fn restart<P: AsRef<Path>>(path: P, level: LevelFilter) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::create(&path)?;
        writeln!(file, "{}", header_line(&Local::now().format("%a %b %e %T %Y").to_string()))?;

        // Pin the epoch so record timestamps count from the restart
        lazy_static::initialize(&LOG_EPOCH);

        Ok(Self {
            path,
            level,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn level(&self) -> LevelFilter { self.level }

    /// Appends a single line to the log.
    pub fn append(&self, line: &str) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        writeln!(file, "{}", line)
    }

    /// Makes this the global `log` backend.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for GlLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        let enabled = self.enabled(record.metadata());
        let line = format_record(record.level(), LOG_EPOCH.elapsed(), &record.args().to_string());

        // Errors reach stderr even when the file level is turned all the way down
        if record.level() == Level::Error || (enabled && record.level() <= Level::Warn) {
            eprintln!("{}", line);
        }

        if !enabled {
            return;
        }

        if let Err(e) = self.append(&line) {
            eprintln!("ERROR: could not open {} for appending: {}", self.path.display(), e);
        }
    }

    fn flush(&self) {}
}

/// Whether `log::error!` ends up anywhere: it needs an installed backend and a max level that lets
/// errors through. When it doesn't, fatal errors have to be printed directly.
pub fn errors_are_logged(installed: bool, max_level: LevelFilter) -> bool {
    installed && max_level >= LevelFilter::Error
}

pub fn header_line(local_time: &str) -> String {
    format!("GL_LOG_FILE log. local time {}", local_time)
}

pub fn format_record(level: Level, elapsed: Duration, message: &str) -> String {
    format!("[{:>9.3}] {:<5} {}", elapsed.as_secs_f64(), level.as_str(), message)
}
