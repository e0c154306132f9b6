use crate::commands::types::{InstallResult, PackageManagerInfo, ToolStatus};
use cceasy::models::ToolKind;
use cceasy::ToolManager;
use std::sync::Arc;

/// 工具管理器 State
///
/// ToolManager 的操作都是阻塞的，命令层统一放到 blocking 线程池执行，
/// 避免阻塞异步运行时。
#[derive(Clone)]
pub struct ToolManagerState {
    pub manager: Arc<ToolManager>,
}

impl ToolManagerState {
    pub fn new(manager: ToolManager) -> Self {
        ToolManagerState {
            manager: Arc::new(manager),
        }
    }

    async fn run<T, F>(&self, f: F) -> Result<T, String>
    where
        T: Send + 'static,
        F: FnOnce(&ToolManager) -> T + Send + 'static,
    {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || f(&manager))
            .await
            .map_err(|e| format!("任务执行失败: {e}"))
    }
}

/// 检查所有工具的安装状态（claude、gemini、codex）
pub async fn check_installations(state: &ToolManagerState) -> Result<Vec<ToolStatus>, String> {
    state.run(|manager| manager.check_all_tools_status()).await
}

/// 检查单个工具的安装状态
pub async fn get_tool_status(state: &ToolManagerState, tool: String) -> Result<ToolStatus, String> {
    state.run(move |manager| manager.get_tool_status(&tool)).await
}

/// 查看安装将使用的 npm
pub async fn check_package_manager(state: &ToolManagerState) -> Result<PackageManagerInfo, String> {
    state.run(|manager| manager.package_manager_info()).await
}

/// 安装指定工具
///
/// 失败时返回的字符串直接展示给用户，包含 npm 的完整输出。
pub async fn install_tool(state: &ToolManagerState, tool: String) -> Result<InstallResult, String> {
    tracing::debug!(tool = %tool, "安装工具");

    let display_name = ToolKind::by_id(&tool)
        .map(ToolKind::display_name)
        .unwrap_or(tool.as_str())
        .to_string();

    let status = state
        .run(move |manager| {
            // 安装成功后重新检测，确认可执行文件已就位
            manager
                .install_tool(&tool)
                .map(|_| manager.get_tool_status(&tool))
        })
        .await?
        .map_err(|e| e.to_string())?;

    let message = if status.installed {
        format!("✅ {display_name} 安装成功！")
    } else {
        format!("⚠️ {display_name} 安装命令已完成，但未检测到可执行文件")
    };

    Ok(InstallResult {
        success: status.installed,
        message,
        status,
    })
}
