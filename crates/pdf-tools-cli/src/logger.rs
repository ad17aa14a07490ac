use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::io::Write;

/// Writes timestamped log lines to stderr, keeping stdout for results
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(verbose: bool) -> Self {
        Self {
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = format_line(record.level(), record.target(), &record.args().to_string());
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    if level <= Level::Info {
        format!("{} {:5} {}", timestamp, level, message)
    } else {
        format!("{} {:5} [{}] {}", timestamp, level, target, message)
    }
}
