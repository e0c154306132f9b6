use super::context::ToolContext;
use super::package_manager::find_package_manager;
use crate::core::error::{CommandError, InstallError};
use crate::core::logger::LogSink;
use crate::models::ToolKind;
use crate::utils::{prepend_to_search_path, CommandSpec};
use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

/// 安装服务
///
/// 通过 `npm install -g <pkg> --prefix <本地目录>` 安装到用户目录，
/// 不需要 sudo / 管理员权限。
pub struct ToolInstaller {
    ctx: ToolContext,
    log: Arc<dyn LogSink>,
}

impl ToolInstaller {
    pub fn new(ctx: ToolContext, log: Arc<dyn LogSink>) -> Self {
        ToolInstaller { ctx, log }
    }

    /// 安装工具
    ///
    /// 未知工具在任何文件系统或进程操作之前就返回错误。
    /// 成功后不做安装校验，调用方可重新检测确认。
    pub fn install(&self, name: &str) -> Result<(), InstallError> {
        let tool: ToolKind = name.parse()?;

        let npm = find_package_manager(&self.ctx).ok_or(InstallError::PackageManagerNotFound)?;

        let root = self.ctx.layout.root();
        self.ctx
            .fs
            .create_dir_all(root)
            .map_err(|source| InstallError::DirectoryCreateFailed {
                path: root.to_path_buf(),
                source,
            })?;

        let spec = self.build_command(tool, &npm, std::env::vars_os().collect());

        self.log.log(&format!("Running installation: {spec}"));
        tracing::info!(tool = %tool, command = %spec, "开始安装工具");

        let result = self.ctx.runner.combined_output(&spec);
        match result {
            Ok(out) if out.success => {
                tracing::info!(tool = %tool, "工具安装完成");
                Ok(())
            }
            Ok(out) => {
                tracing::warn!(tool = %tool, exit_code = ?out.exit_code, "工具安装失败");
                Err(InstallError::InstallationFailed {
                    tool: tool.id().to_string(),
                    source: CommandError::ExitStatus {
                        code: out.exit_code,
                    },
                    output: out.output,
                })
            }
            Err(e) => {
                tracing::warn!(tool = %tool, error = %e, "安装进程启动失败");
                Err(InstallError::InstallationFailed {
                    tool: tool.id().to_string(),
                    source: CommandError::Spawn(e),
                    output: String::new(),
                })
            }
        }
    }

    /// 构造安装命令
    ///
    /// Windows 上非 .cmd/.exe 的 npm 需要经 `cmd /c` 启动；
    /// 子进程 PATH 前置本地 bin 目录，使刚安装的可执行文件立即可见。
    pub(crate) fn build_command(
        &self,
        tool: ToolKind,
        npm: &Path,
        base_env: Vec<(OsString, OsString)>,
    ) -> CommandSpec {
        let root = self.ctx.layout.root().to_string_lossy().into_owned();
        let args = ["install", "-g", tool.npm_package(), "--prefix", root.as_str()];

        let spec = if self.ctx.platform.needs_shell_wrapper(npm) {
            CommandSpec::new("cmd")
                .arg("/c")
                .arg(npm.to_string_lossy())
                .args(args)
        } else {
            CommandSpec::new(npm).args(args)
        };

        let env = prepend_to_search_path(
            base_env,
            &self.ctx.local_bin_dir(),
            self.ctx.platform.path_separator(),
        );
        spec.env(env)
    }
}
