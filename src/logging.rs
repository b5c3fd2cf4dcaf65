// Logging setup and conditional logging macros
//
// The TUI owns the terminal, so while it runs log records go to a file under the
// user's cache directory instead of stderr.

use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

const APP_DIR: &str = "wordle-game";
const LOG_FILE: &str = "wordle-game.log";

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Map the `-v` count to a level: warn, info, debug, then trace.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE))
}

fn open_log_file() -> io::Result<(File, PathBuf)> {
    let path = log_file_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no cache directory"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Install the global logger. `RUST_LOG` overrides the verbosity flag.
///
/// Returns the log file path when logging to a file. Falls back to stderr if the
/// cache directory cannot be used.
pub fn init(verbosity: u8, target: LogTarget) -> Option<PathBuf> {
    let mut builder = Builder::new();
    builder
        .filter_level(level_for_verbosity(verbosity))
        .parse_env(Env::default())
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    let mut file_path = None;
    if target == LogTarget::File {
        match open_log_file() {
            Ok((file, path)) => {
                builder.target(Target::Pipe(Box::new(file)));
                file_path = Some(path);
            }
            Err(e) => eprintln!("Could not open log file, logging to stderr: {e}"),
        }
    }

    // A logger may already be installed (tests); that is not an error for us.
    let _ = builder.try_init();
    file_path
}

// Input handling logs on every keystroke, so these are compiled out of release builds.

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}
