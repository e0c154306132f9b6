use super::context::ToolContext;
use super::version::parse_version;
use crate::models::{ToolKind, ToolStatus};
use crate::utils::CommandSpec;
use std::path::{Path, PathBuf};

/// 工具检测
///
/// 查找顺序：
/// 1. 系统 PATH
/// 2. 本地安装目录（PATH 尚未刷新或未包含本地 bin 时的兜底）
///
/// 任何失败都降级为状态字段为空，不向调用方返回错误。
pub struct ToolResolver {
    ctx: ToolContext,
}

impl ToolResolver {
    pub fn new(ctx: ToolContext) -> Self {
        ToolResolver { ctx }
    }

    /// 检测单个工具
    ///
    /// 空白名称直接视为未安装，避免拼出 `<root>/bin/` 这样的目录路径。
    pub fn resolve(&self, name: &str) -> ToolStatus {
        if name.trim().is_empty() {
            return ToolStatus::not_installed(name);
        }

        let binary_name = ToolKind::by_id(name)
            .map(ToolKind::binary_name)
            .unwrap_or(name);

        let Some(path) = self.locate(binary_name) else {
            tracing::debug!(tool = %name, "未检测到工具");
            return ToolStatus::not_installed(name);
        };

        let version = self.probe_version(name, &path);
        tracing::debug!(tool = %name, path = %path.display(), version = %version, "检测到工具");

        ToolStatus::installed(name, path.to_string_lossy(), version)
    }

    fn locate(&self, binary_name: &str) -> Option<PathBuf> {
        if let Some(path) = self.ctx.fs.find_in_search_path(binary_name) {
            return Some(path);
        }

        self.ctx
            .platform
            .tool_candidates(self.ctx.layout.root(), binary_name)
            .into_iter()
            .find(|candidate| self.ctx.fs.is_file(candidate))
    }

    /// 执行 `<path> --version`，只读取 stdout；失败时返回空字符串
    fn probe_version(&self, name: &str, path: &Path) -> String {
        let spec = CommandSpec::new(path).arg("--version");

        match self.ctx.runner.output(&spec) {
            Ok(result) if result.success => parse_version(name, &result.stdout),
            Ok(result) => {
                tracing::debug!(
                    tool = %name,
                    exit_code = ?result.exit_code,
                    stderr = %result.stderr,
                    "版本检测失败"
                );
                String::new()
            }
            Err(e) => {
                tracing::debug!(tool = %name, error = %e, "版本检测进程启动失败");
                String::new()
            }
        }
    }
}
