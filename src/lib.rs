// lib.rs - 暴露服务层给 CLI 和宿主应用使用

pub mod core;
pub mod models;
pub mod services;
pub mod utils;

pub use models::*;
pub use services::tool::{InstallLayout, ToolContext, ToolManager};

pub use crate::core::{
    init_logger, AppError, AppResult, CommandError, InstallError, LogSink,
    TracingLogSink,
};
