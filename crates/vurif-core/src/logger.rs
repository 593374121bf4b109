use colored::Colorize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Success,
    Debug,
}

pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str);
}

/// Logger printing to the terminal. Debug lines are only shown when `verbose`.
pub struct ConsoleLogger {
    pub color: bool,
    pub verbose: bool,
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, msg: &str) {
        match level {
            LogLevel::Error => {
                if self.color {
                    eprintln!("{} {}", "✖".red(), msg.red());
                } else {
                    eprintln!("error: {}", msg);
                }
            }
            LogLevel::Warn => {
                if self.color {
                    eprintln!("{} {}", "⚠".yellow(), msg.yellow());
                } else {
                    eprintln!("warn: {}", msg);
                }
            }
            LogLevel::Info => {
                if self.color {
                    println!("{} {}", "ℹ".cyan(), msg);
                } else {
                    println!("info: {}", msg);
                }
            }
            LogLevel::Success => {
                if self.color {
                    println!("{} {}", "✔".green(), msg.green());
                } else {
                    println!("success: {}", msg);
                }
            }
            LogLevel::Debug => {
                if !self.verbose {
                    return;
                }
                if self.color {
                    println!("{}", msg.dimmed());
                } else {
                    println!("debug: {}", msg);
                }
            }
        }
    }
}

pub struct EmptyLogger;

impl Logger for EmptyLogger {
    fn log(&self, _level: LogLevel, _msg: &str) {}
}

/// Records every message so tests can assert on diagnostics.
#[cfg(any(test, feature = "testutil"))]
#[derive(Default)]
pub struct MemoryLogger {
    entries: std::sync::Mutex<Vec<(LogLevel, String)>>,
}

#[cfg(any(test, feature = "testutil"))]
impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

#[cfg(any(test, feature = "testutil"))]
impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, msg: &str) {
        self.entries.lock().unwrap().push((level, msg.to_string()));
    }
}
