use super::context::ToolContext;
use std::path::PathBuf;

/// 系统 npm 的可执行文件名
pub const NPM: &str = "npm";

/// 查找 npm
///
/// 1. 本地安装目录中的 npm（随应用下发的 Node 环境）
/// 2. 系统 PATH 中的 npm
///
/// 都找不到时返回 None，由调用方决定是否视为错误。
pub fn find_package_manager(ctx: &ToolContext) -> Option<PathBuf> {
    let local = ctx.platform.package_manager_candidate(ctx.layout.root());
    if ctx.fs.is_file(&local) {
        tracing::debug!(path = %local.display(), "使用本地 npm");
        return Some(local);
    }

    let system = ctx.fs.find_in_search_path(NPM);
    if let Some(path) = &system {
        tracing::debug!(path = %path.display(), "使用系统 npm");
    }
    system
}
