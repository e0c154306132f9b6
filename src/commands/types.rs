// 命令层数据类型定义

// 重新导出 ToolStatus（定义在 models 层）
pub use cceasy::models::{PackageManagerInfo, ToolStatus};

/// 安装结果
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct InstallResult {
    pub success: bool,
    pub message: String,
    /// 安装后重新检测到的状态
    pub status: ToolStatus,
}
