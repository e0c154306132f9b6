// 工具服务模块
//
// 包含工具的检测、版本解析、npm 查找与安装

pub mod context;
pub mod installer;
pub mod manager;
pub mod package_manager;
pub mod resolver;
pub mod version;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{InstallLayout, ToolContext};
pub use installer::ToolInstaller;
pub use manager::ToolManager;
pub use package_manager::find_package_manager;
pub use resolver::ToolResolver;
pub use version::parse_version;
