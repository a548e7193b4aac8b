pub mod environment;
pub mod logger;

pub use environment::Environment;
pub use logger::{LogLevel, Logger};
