use crate::core::error::InstallError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 工具状态（某一时刻的检测快照）
///
/// - `installed == false` 时 `version`、`path` 均为空字符串
/// - `installed == true` 时 `path` 必不为空，`version` 可能为空（版本探测失败）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolStatus {
    pub name: String,
    pub installed: bool,
    pub version: String,
    pub path: String,
}

impl ToolStatus {
    /// 未安装状态
    pub fn not_installed(name: impl Into<String>) -> Self {
        ToolStatus {
            name: name.into(),
            installed: false,
            version: String::new(),
            path: String::new(),
        }
    }

    /// 已安装状态
    pub fn installed(name: impl Into<String>, path: impl Into<String>, version: String) -> Self {
        ToolStatus {
            name: name.into(),
            installed: true,
            version,
            path: path.into(),
        }
    }
}

/// npm 环境信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManagerInfo {
    pub available: bool,
    pub path: String,
    pub version: String,
}

/// 受支持的 AI 命令行工具
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Claude,
    Gemini,
    Codex,
}

impl ToolKind {
    /// 状态检查时的固定顺序
    pub const ALL: [ToolKind; 3] = [ToolKind::Claude, ToolKind::Gemini, ToolKind::Codex];

    /// 工具标识（如 "claude"）
    pub fn id(self) -> &'static str {
        match self {
            ToolKind::Claude => "claude",
            ToolKind::Gemini => "gemini",
            ToolKind::Codex => "codex",
        }
    }

    /// 可执行文件名，目前与工具标识一致
    pub fn binary_name(self) -> &'static str {
        self.id()
    }

    /// npm 包名（如 "@anthropic-ai/claude-code"）
    pub fn npm_package(self) -> &'static str {
        match self {
            ToolKind::Claude => "@anthropic-ai/claude-code",
            ToolKind::Gemini => "@google/gemini-cli",
            ToolKind::Codex => "@openai/codex",
        }
    }

    /// 显示名称
    pub fn display_name(self) -> &'static str {
        match self {
            ToolKind::Claude => "Claude Code",
            ToolKind::Gemini => "Gemini CLI",
            ToolKind::Codex => "CodeX",
        }
    }

    /// 根据标识查找工具
    pub fn by_id(id: &str) -> Option<ToolKind> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToolKind {
    type Err = InstallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::by_id(s).ok_or_else(|| InstallError::UnknownTool(s.to_string()))
    }
}
