//! Глобальный logger симуляции
//!
//! Адаптер подменяет sink своим (Godot/Unity console), headless-прогоны
//! печатают в stdout. Timestamp добавляем здесь, не в sink'е.

use once_cell::sync::Lazy;
use std::sync::Mutex;

static SINK: Lazy<Mutex<Option<Box<dyn LogSink>>>> = Lazy::new(|| Mutex::new(None));
static LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Приёмник лог-строк (Send+Sync — пишут и системы, и адаптер)
pub trait LogSink: Send + Sync {
    fn write(&self, level: LogLevel, message: &str);
}

pub fn set_sink(sink: Box<dyn LogSink>) {
    *SINK.lock().unwrap() = Some(sink);
}

pub fn set_sink_if_needed(sink: Box<dyn LogSink>) {
    let mut guard = SINK.lock().unwrap();
    if guard.is_none() {
        *guard = Some(sink);
    }
}

/// Минимальный уровень, ниже которого сообщения отбрасываются
pub fn set_level(level: LogLevel) {
    *LEVEL.lock().unwrap() = level;
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < *LEVEL.lock().unwrap() {
        return;
    }
    if let Some(sink) = SINK.lock().unwrap().as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        sink.write(level, &format!("[{}] {}", timestamp, message));
    }
}

struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

/// Console sink по умолчанию (не перетирает уже установленный)
pub fn init_logger() {
    set_sink_if_needed(Box::new(ConsoleSink));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert_eq!(LogLevel::Warning.as_str(), "WARNING");
    }
}
