use std::{
    io::{self, Write as _},
    sync::{Arc, OnceLock, RwLock},
};

use crossterm::style::{Color, Stylize as _};
use log::{LevelFilter, Log, Metadata, Record};

use crate::error::AppError;

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn))
}

/// Installs the logger, only records at `level` or above are printed.
pub fn init(level: LevelFilter) -> Result<(), AppError> {
    let logger = get_logger();
    logger.set_min_level(level);

    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// Changes the level of the installed logger.
pub fn set_level(level: LevelFilter) {
    get_logger().set_min_level(level);
}

/// `level` raised by `steps` verbosity flags, saturating at trace.
pub fn raise_level(level: LevelFilter, steps: u8) -> LevelFilter {
    const ORDER: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    let current = ORDER.iter().position(|&l| l == level).unwrap_or(0);
    ORDER[(current + steps as usize).min(ORDER.len() - 1)]
}

fn level_color(level: log::Level) -> Color {
    match level {
        log::Level::Error => Color::Red,
        log::Level::Warn => Color::Yellow,
        log::Level::Info => Color::White,
        log::Level::Debug => Color::Blue,
        log::Level::Trace => Color::Grey,
    }
}

pub struct AppLogger {
    pub min_level: Arc<RwLock<LevelFilter>>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: Arc::new(RwLock::new(min_level)),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        self.min_level
            .read()
            .map(|level| *level)
            .unwrap_or(LevelFilter::Warn)
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        if let Ok(mut min_level) = self.min_level.write() {
            *min_level = level;
        }
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let source = record.module_path().unwrap_or("unknown");
        let tag = format!("{:<5}", level).with(level_color(level));

        let _ = writeln!(
            io::stderr().lock(),
            "{} {} -> {}",
            tag,
            source.dim(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(raise_level(LevelFilter::Warn, 0), LevelFilter::Warn);
        assert_eq!(raise_level(LevelFilter::Warn, 1), LevelFilter::Info);
        assert_eq!(raise_level(LevelFilter::Warn, 2), LevelFilter::Debug);
        assert_eq!(raise_level(LevelFilter::Warn, 9), LevelFilter::Trace);
        assert_eq!(raise_level(LevelFilter::Off, 1), LevelFilter::Error);
    }

    #[test]
    fn level_can_change_after_install() {
        init(LevelFilter::Warn).unwrap();
        let info = Metadata::builder().level(log::Level::Info).build();
        assert!(!log::logger().enabled(&info));

        set_level(LevelFilter::Info);
        assert_eq!(get_logger().min_level(), LevelFilter::Info);
        assert!(log::logger().enabled(&info));
        assert_eq!(log::max_level(), LevelFilter::Trace);
    }

    #[test]
    fn filters_by_min_level() {
        let logger = AppLogger::new(LevelFilter::Info);
        let info = Metadata::builder().level(log::Level::Info).build();
        let debug = Metadata::builder().level(log::Level::Debug).build();

        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));

        logger.set_min_level(LevelFilter::Trace);
        assert!(logger.enabled(&debug));

        logger.set_min_level(LevelFilter::Off);
        assert!(!logger.enabled(&info));
    }
}
