//! 核心基础设施：错误类型与日志

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult, CommandError, InstallError};
pub use logger::{init_logger, LogSink, TracingLogSink};
