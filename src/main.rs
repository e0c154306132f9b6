use anyhow::Result;
use cceasy::models::{LogLevel, ToolStatus};
use cceasy::utils::config::{load_app_config, LoadedConfig};
use cceasy::{init_logger, ToolManager, TracingLogSink};
use clap::{Parser, Subcommand};
use std::sync::Arc;

mod commands;
use commands::*;

#[derive(Parser)]
#[command(name = "cceasy")]
#[command(about = "检测并一键安装 claude / gemini / codex 命令行工具")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 查看所有工具（或单个工具）的安装状态
    Status {
        /// 只查看指定工具
        tool: Option<String>,

        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 安装工具到 ~/.cceasy/node
    Install {
        /// 工具名：claude、gemini 或 codex
        tool: String,
    },

    /// 查看安装将使用的 npm
    Npm {
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let LoadedConfig {
        mut config,
        ignored,
    } = load_app_config()?;
    if cli.debug {
        config.log.level = LogLevel::Debug;
    }
    init_logger(&config.log)?;
    for var in &ignored {
        tracing::warn!(key = var.key, value = %var.value, "忽略无法解析的环境变量");
    }

    let manager = ToolManager::from_config(&config, Arc::new(TracingLogSink))?;
    tracing::debug!(root = %manager.layout().root().display(), "本地安装目录");
    let state = ToolManagerState::new(manager);

    match cli.command {
        Commands::Status { tool, json } => {
            let statuses = match tool {
                Some(tool) => vec![get_tool_status(&state, tool).await.map_err(anyhow::Error::msg)?],
                None => check_installations(&state).await.map_err(anyhow::Error::msg)?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else {
                for status in &statuses {
                    print_status(status);
                }
            }
        }
        Commands::Install { tool } => match install_tool(&state, tool).await {
            Ok(result) => {
                println!("{}", result.message);
                print_status(&result.status);
            }
            Err(message) => {
                eprintln!("❌ {message}");
                std::process::exit(1);
            }
        },
        Commands::Npm { json } => {
            let info = check_package_manager(&state)
                .await
                .map_err(anyhow::Error::msg)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else if info.available {
                println!("npm {} ({})", display_or_unknown(&info.version), info.path);
            } else {
                println!("未找到 npm，请先安装 Node.js: https://nodejs.org");
            }
        }
    }

    Ok(())
}

fn print_status(status: &ToolStatus) {
    if status.installed {
        println!(
            "{:<8} ✅ {:<12} {}",
            status.name,
            display_or_unknown(&status.version),
            status.path
        );
    } else {
        println!("{:<8} ❌ 未安装", status.name);
    }
}

fn display_or_unknown(version: &str) -> &str {
    if version.is_empty() {
        "未知版本"
    } else {
        version
    }
}
