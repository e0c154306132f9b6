// 工具检测 / 安装共享的运行环境
//
// 文件系统、进程执行、平台规则和本地安装目录都在这里注入，
// 解析器与安装器共用同一份。

use crate::core::error::{AppError, AppResult};
use crate::models::AppConfig;
use crate::utils::{
    FileSystem, PlatformInfo, PlatformPaths, ProcessRunner, SystemFileSystem, SystemProcessRunner,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 本地安装目录布局（npm --prefix 目标）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
}

impl InstallLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        InstallLayout { root: root.into() }
    }

    /// 默认布局：<home>/.cceasy/node
    pub fn under_home(home: &Path) -> Self {
        Self::new(home.join(".cceasy").join("node"))
    }

    /// 按配置确定布局，未配置时使用用户主目录下的默认位置
    ///
    /// 相对路径按当前工作目录转为绝对路径。
    pub fn resolve(config: &AppConfig) -> AppResult<Self> {
        if let Some(root) = &config.install_root {
            let root = std::path::absolute(root).map_err(|source| AppError::InstallRootInvalid {
                path: root.clone(),
                source,
            })?;
            return Ok(Self::new(root));
        }
        let home = dirs::home_dir().ok_or(AppError::HomeDirNotFound)?;
        Ok(Self::under_home(&home))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// 注入的外部依赖
#[derive(Clone)]
pub struct ToolContext {
    pub fs: Arc<dyn FileSystem>,
    pub runner: Arc<dyn ProcessRunner>,
    pub platform: Arc<dyn PlatformPaths>,
    pub layout: InstallLayout,
}

impl ToolContext {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        runner: Arc<dyn ProcessRunner>,
        platform: Arc<dyn PlatformPaths>,
        layout: InstallLayout,
    ) -> Self {
        ToolContext {
            fs,
            runner,
            platform,
            layout,
        }
    }

    /// 使用真实文件系统、进程和当前平台规则
    pub fn system(layout: InstallLayout) -> Self {
        Self::new(
            Arc::new(SystemFileSystem::new()),
            Arc::new(SystemProcessRunner::new()),
            PlatformInfo::current().paths(),
            layout,
        )
    }

    /// 本地 bin 目录（安装时加入子进程 PATH）
    pub fn local_bin_dir(&self) -> PathBuf {
        self.platform.bin_dir(self.layout.root())
    }
}
