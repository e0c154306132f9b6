// 服务层模块
//
// - tool: 工具检测、版本解析、安装

pub mod tool;

pub use tool::{
    find_package_manager, parse_version, InstallLayout, ToolContext, ToolInstaller, ToolManager,
    ToolResolver,
};
