pub mod tool_commands;
pub mod types;

// 重新导出所有命令函数
pub use tool_commands::*;
pub use types::*;
