use std::sync::atomic::{AtomicBool, Ordering};

pub static QUIET_MODE: AtomicBool = AtomicBool::new(false);

pub const INDENT_LEVEL_1: &str = "  ";
pub const INDENT_LEVEL_2: &str = "    ";

pub struct Colors {
    pub green: &'static str,
    pub yellow: &'static str,
    pub cyan: &'static str,
    pub red: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
    pub bold: &'static str,
}

impl Colors {
    pub const fn new() -> Self {
        Colors {
            green: "\x1b[32m",
            yellow: "\x1b[33m",
            cyan: "\x1b[36m",
            red: "\x1b[31m",
            dim: "\x1b[2m",
            reset: "\x1b[0m",
            bold: "\x1b[1m",
        }
    }
}

pub enum LogLevel {
    Info,
    Warn,
    Error,
    Dim,
    Success,
    Bold,
    Custom(&'static str),
    CriticalError,
}

#[derive(Clone)]
pub struct Logger {
    pub verbose: bool,
}

impl Logger {
    pub const fn new() -> Self {
        Logger { verbose: false }
    }

    pub fn verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn quiet(&self, quiet: bool) {
        QUIET_MODE.store(quiet, Ordering::Relaxed);
    }

    pub fn log(&self, level: LogLevel, message: &str, indent_level: usize) {
        if QUIET_MODE.load(Ordering::Relaxed)
            && !matches!(level, LogLevel::CriticalError | LogLevel::Error)
        {
            return;
        }

        let colors = Colors::new();
        let indent = match indent_level {
            1 => INDENT_LEVEL_1,
            2 => INDENT_LEVEL_2,
            _ => "",
        };

        let (base_color, text_prefix) = match level {
            LogLevel::Info => (colors.cyan, ""),
            LogLevel::Warn => (colors.yellow, "Warning: "),
            LogLevel::Error => (colors.red, "Error: "),
            LogLevel::Dim => (colors.dim, ""),
            LogLevel::Success => (colors.green, ""),
            LogLevel::Bold => (colors.reset, ""),
            LogLevel::Custom(code) => (code, ""),
            LogLevel::CriticalError => (colors.red, "Error: "),
        };

        let final_color_start = match level {
            LogLevel::Success => format!("{}{}", base_color, colors.bold),
            LogLevel::Bold => colors.bold.to_string(),
            _ => base_color.to_string(),
        };

        let output_str = format!(
            "{}{}{}{}{}",
            final_color_start, indent, text_prefix, message, colors.reset
        );

        if matches!(level, LogLevel::Error | LogLevel::CriticalError) {
            eprintln!("{}", output_str);
        } else {
            println!("{}", output_str);
        }
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, 1);
    }
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, 1);
    }
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, 1);
    }
    pub fn dim(&self, message: &str) {
        self.log(LogLevel::Dim, message, 1);
    }
    pub fn success(&self, message: &str) {
        self.log(LogLevel::Success, message, 1);
    }
    pub fn bold(&self, message: &str) {
        self.log(LogLevel::Bold, message, 1);
    }
    pub fn critical_error(&self, message: &str) {
        self.log(LogLevel::CriticalError, message, 0);
    }
    pub fn dim_level2(&self, message: &str) {
        self.log(LogLevel::Dim, message, 2);
    }

    pub fn raw(&self, message: &str) {
        if !QUIET_MODE.load(Ordering::Relaxed) {
            println!("{}", message);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new()
    }
}
