use super::context::{InstallLayout, ToolContext};
use super::installer::ToolInstaller;
use super::package_manager::find_package_manager;
use super::resolver::ToolResolver;
use crate::core::error::{AppResult, InstallError};
use crate::core::logger::LogSink;
use crate::models::{AppConfig, PackageManagerInfo, ToolKind, ToolStatus};
use crate::utils::CommandSpec;
use std::sync::Arc;

/// 工具管理入口（供宿主应用调用）
///
/// 所有操作都是同步阻塞的，多个工具依次检测，互不共享可变状态。
pub struct ToolManager {
    ctx: ToolContext,
    resolver: ToolResolver,
    installer: ToolInstaller,
}

impl ToolManager {
    pub fn new(ctx: ToolContext, log: Arc<dyn LogSink>) -> Self {
        ToolManager {
            resolver: ToolResolver::new(ctx.clone()),
            installer: ToolInstaller::new(ctx.clone(), log),
            ctx,
        }
    }

    /// 使用真实文件系统与进程，按配置确定本地安装目录
    pub fn from_config(config: &AppConfig, log: Arc<dyn LogSink>) -> AppResult<Self> {
        let layout = InstallLayout::resolve(config)?;
        tracing::debug!(root = %layout.root().display(), "本地安装目录");
        Ok(Self::new(ToolContext::system(layout), log))
    }

    pub fn layout(&self) -> &InstallLayout {
        &self.ctx.layout
    }

    /// 检测单个工具
    pub fn get_tool_status(&self, name: &str) -> ToolStatus {
        self.resolver.resolve(name)
    }

    /// 按 claude、gemini、codex 的顺序检测全部工具
    pub fn check_all_tools_status(&self) -> Vec<ToolStatus> {
        ToolKind::ALL
            .iter()
            .map(|tool| self.resolver.resolve(tool.id()))
            .collect()
    }

    /// 安装单个工具
    pub fn install_tool(&self, name: &str) -> Result<(), InstallError> {
        self.installer.install(name)
    }

    /// 安装会使用的 npm 及其版本
    pub fn package_manager_info(&self) -> PackageManagerInfo {
        let Some(path) = find_package_manager(&self.ctx) else {
            return PackageManagerInfo {
                available: false,
                path: String::new(),
                version: String::new(),
            };
        };

        let version = match self.ctx.runner.output(&CommandSpec::new(&path).arg("--version")) {
            Ok(result) if result.success => result.stdout,
            _ => String::new(),
        };

        PackageManagerInfo {
            available: true,
            path: path.to_string_lossy().into_owned(),
            version,
        }
    }
}
