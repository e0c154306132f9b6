//! 文件系统与可执行文件搜索
//!
//! 解析器和安装器只通过 `FileSystem` 访问磁盘，测试中替换为内存实现。

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// 文件系统访问接口
pub trait FileSystem: Send + Sync {
    /// 路径是否为普通文件（目录不算）
    fn is_file(&self, path: &Path) -> bool;

    /// 递归创建目录，目录已存在时视为成功
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// 在系统可执行文件搜索路径（PATH）中查找指定名称
    fn find_in_search_path(&self, name: &str) -> Option<PathBuf>;
}

/// 真实文件系统实现
#[derive(Debug, Default, Clone)]
pub struct SystemFileSystem {
    /// 覆盖 PATH 的搜索路径，为 None 时使用进程环境变量
    search_path: Option<OsString>,
}

impl SystemFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定的搜索路径（不读取进程 PATH）
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        SystemFileSystem {
            search_path: Some(search_path.into()),
        }
    }
}

impl FileSystem for SystemFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn find_in_search_path(&self, name: &str) -> Option<PathBuf> {
        let result = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().ok()?;
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        };

        match result {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::trace!(name = %name, error = %e, "PATH 中未找到可执行文件");
                None
            }
        }
    }
}
