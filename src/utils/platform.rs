// 平台相关的路径规则
//
// Windows 与类 Unix 系统在 npm --prefix 布局、可执行文件扩展名上不同，
// 所有分支都收敛到 PlatformPaths 的两个实现里。

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Windows 下无需 `cmd /c` 包装即可直接执行的扩展名
const WINDOWS_EXECUTABLE_EXTENSIONS: [&str; 4] = ["exe", "cmd", "bat", "com"];

/// 平台路径规则
pub trait PlatformPaths: Send + Sync {
    /// npm --prefix 安装后可执行文件所在目录
    fn bin_dir(&self, root: &Path) -> PathBuf;

    /// 本地安装目录中工具可执行文件的候选路径（按优先级）
    fn tool_candidates(&self, root: &Path, binary_name: &str) -> Vec<PathBuf>;

    /// 本地安装目录中的 npm 路径
    fn package_manager_candidate(&self, root: &Path) -> PathBuf;

    /// 是否需要通过命令解释器（`cmd /c`）启动该程序
    fn needs_shell_wrapper(&self, program: &Path) -> bool;

    /// PATH 环境变量分隔符
    fn path_separator(&self) -> char;
}

/// 类 Unix 系统（Linux / macOS）
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixPaths;

impl PlatformPaths for UnixPaths {
    fn bin_dir(&self, root: &Path) -> PathBuf {
        root.join("bin")
    }

    fn tool_candidates(&self, root: &Path, binary_name: &str) -> Vec<PathBuf> {
        vec![self.bin_dir(root).join(binary_name)]
    }

    fn package_manager_candidate(&self, root: &Path) -> PathBuf {
        self.bin_dir(root).join("npm")
    }

    fn needs_shell_wrapper(&self, _program: &Path) -> bool {
        false
    }

    fn path_separator(&self) -> char {
        ':'
    }
}

/// Windows 系统
///
/// npm 在 Windows 上把 `.cmd` 垫片直接放在 prefix 根目录，
/// 部分版本也会放进 `bin`，所以两处都要查。
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsPaths;

impl PlatformPaths for WindowsPaths {
    fn bin_dir(&self, root: &Path) -> PathBuf {
        root.to_path_buf()
    }

    fn tool_candidates(&self, root: &Path, binary_name: &str) -> Vec<PathBuf> {
        let file_name = format!("{binary_name}.cmd");
        vec![root.join(&file_name), root.join("bin").join(&file_name)]
    }

    fn package_manager_candidate(&self, root: &Path) -> PathBuf {
        root.join("npm.cmd")
    }

    fn needs_shell_wrapper(&self, program: &Path) -> bool {
        let extension = program
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension {
            Some(ext) => !WINDOWS_EXECUTABLE_EXTENSIONS.contains(&ext.as_str()),
            None => true,
        }
    }

    fn path_separator(&self) -> char {
        ';'
    }
}

/// 平台信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    pub is_windows: bool,
}

impl PlatformInfo {
    /// 当前编译目标平台
    pub fn current() -> Self {
        PlatformInfo {
            is_windows: cfg!(target_os = "windows"),
        }
    }

    /// 当前平台对应的路径规则
    pub fn paths(&self) -> Arc<dyn PlatformPaths> {
        if self.is_windows {
            Arc::new(WindowsPaths)
        } else {
            Arc::new(UnixPaths)
        }
    }
}
