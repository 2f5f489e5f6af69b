use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};

/// Writes timestamped log lines to stderr, keeping stdout for command output
pub struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    /// Level from the number of `-v` flags
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        eprintln!(
            "{} {} [{}] {}",
            Local::now().format("%H:%M:%S%.3f"),
            tag,
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}
