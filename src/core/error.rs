//! 统一错误类型定义
//!
//! 安装流程的错误直接面向最终用户展示，`Display` 输出即为提示文本。

use std::path::PathBuf;
use thiserror::Error;

/// 外部命令执行失败
#[derive(Error, Debug)]
pub enum CommandError {
    /// 进程无法启动
    #[error("无法启动进程: {0}")]
    Spawn(#[from] std::io::Error),

    /// 进程以非零状态退出（被信号终止时没有退出码）
    #[error("进程退出码 {}", display_exit_code(.code))]
    ExitStatus { code: Option<i32> },
}

fn display_exit_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "未知".to_string())
}

/// 工具安装错误
#[derive(Error, Debug)]
pub enum InstallError {
    /// 本地与系统 PATH 中均未找到 npm
    #[error("未找到 npm，请先安装 Node.js (包含 npm): https://nodejs.org")]
    PackageManagerNotFound,

    /// 工具不在支持列表中
    #[error("未知的工具: {0}")]
    UnknownTool(String),

    /// 无法创建本地安装目录
    #[error("无法创建本地安装目录 {path:?}: {source}")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 安装命令失败，附带完整输出
    #[error("安装 {tool} 失败: {source}\n输出:\n{output}")]
    InstallationFailed {
        tool: String,
        #[source]
        source: CommandError,
        output: String,
    },
}

/// 应用层错误（配置、环境）
#[derive(Error, Debug)]
pub enum AppError {
    #[error("无法获取用户主目录")]
    HomeDirNotFound,

    #[error("无法解析安装目录 {path:?}: {source}")]
    InstallRootInvalid {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("读取配置文件失败 {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析配置文件失败 {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type AppResult<T> = std::result::Result<T, AppError>;
