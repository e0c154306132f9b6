use crate::models::config::{LogConfig, LogFormat, LogLevel, LogOutput};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt,
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// 挂载了过滤层的 Registry，输出层都挂在它上面
type FilteredRegistry = Layered<EnvFilter, Registry>;

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// 面向宿主应用的日志出口
///
/// 安装流程只需要"写一行日志"这一个能力，宿主通过实现此 trait 接收消息。
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
}

/// 默认日志出口：转发到 tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, message: &str) {
        tracing::info!(target: "cceasy::host", "{}", message);
    }
}

/// 初始化日志系统
///
/// 支持：
/// - 日志级别（trace/debug/info/warn/error），`RUST_LOG` 优先
/// - 输出格式（JSON/纯文本）
/// - 输出目标（控制台/文件/both）
///
/// 每个进程只能初始化一次，重复调用返回错误。
pub fn init_logger(config: &LogConfig) -> anyhow::Result<()> {
    let filter = create_env_filter(&config.level);

    let mut layers: Vec<BoxedLayer<FilteredRegistry>> = Vec::new();

    if matches!(config.output, LogOutput::Console | LogOutput::Both) {
        layers.push(match config.format {
            LogFormat::Text => create_console_text_layer(),
            LogFormat::Json => create_console_json_layer(),
        });
    }

    if matches!(config.output, LogOutput::File | LogOutput::Both) {
        layers.push(create_file_layer(config.file_path.as_deref(), config.format)?);
    }

    Registry::default()
        .with(filter)
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("日志系统已初始化，不能重复初始化: {}", e))?;

    tracing::info!(
        level = config.level.as_str(),
        format = ?config.format,
        output = ?config.output,
        file_path = ?config.file_path,
        "日志系统初始化完成"
    );

    Ok(())
}

/// 创建环境过滤器
fn create_env_filter(level: &LogLevel) -> EnvFilter {
    // 格式：RUST_LOG=debug 或 RUST_LOG=cceasy=trace
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cceasy={},which=warn", level.as_str())))
}

fn create_console_text_layer<S>() -> BoxedLayer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(cfg!(debug_assertions))
        .with_thread_ids(false)
        .with_ansi(true)
        .boxed()
}

fn create_console_json_layer<S>() -> BoxedLayer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .boxed()
}

/// 创建文件输出层（按天滚动）
fn create_file_layer<S>(file_path: Option<&str>, format: LogFormat) -> anyhow::Result<BoxedLayer<S>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let log_dir = get_log_dir(file_path)?;
    let file_appender = rolling::daily(log_dir, "cceasy");
    let (non_blocking, guard) = non_blocking(file_appender);

    // guard 需要存活到进程退出
    Box::leak(Box::new(guard));

    let layer = match format {
        LogFormat::Text => fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_ansi(false)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(false)
            .boxed(),
    };
    Ok(layer)
}

/// 获取日志目录，默认 ~/.cceasy/logs
fn get_log_dir(file_path: Option<&str>) -> anyhow::Result<std::path::PathBuf> {
    match file_path {
        Some(path) => Ok(std::path::PathBuf::from(path)),
        None => {
            let log_dir = dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("无法获取用户主目录"))?
                .join(".cceasy")
                .join("logs");

            std::fs::create_dir_all(&log_dir)?;
            Ok(log_dir)
        }
    }
}
