use crate::core::error::{AppError, AppResult};
use crate::models::{AppConfig, LogFormat, LogLevel, LogOutput};
use std::env;
use std::fs;
use std::path::PathBuf;

/// 配置目录 (~/.cceasy)，可通过 `CCEASY_CONFIG_DIR` 覆盖
pub fn config_dir() -> AppResult<PathBuf> {
    if let Ok(dir) = env::var("CCEASY_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home_dir = dirs::home_dir().ok_or(AppError::HomeDirNotFound)?;
    Ok(home_dir.join(".cceasy"))
}

/// 全局配置文件路径
pub fn global_config_path() -> AppResult<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// 无法解析而被忽略的环境变量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredEnvVar {
    pub key: &'static str,
    pub value: String,
}

/// 加载结果
///
/// 加载发生在日志系统初始化之前，被忽略的环境变量交给调用方在日志就绪后输出。
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub ignored: Vec<IgnoredEnvVar>,
}

/// 读取全局配置（文件不存在时返回默认值），再应用环境变量覆盖
pub fn load_app_config() -> AppResult<LoadedConfig> {
    let config_path = global_config_path()?;
    let mut config = if config_path.exists() {
        let content = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
            path: config_path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AppError::ConfigParse {
            path: config_path.clone(),
            source,
        })?
    } else {
        AppConfig::default()
    };

    let ignored = apply_env_overrides(&mut config);
    Ok(LoadedConfig { config, ignored })
}

/// 环境变量覆盖配置文件中的值，返回无法解析而被忽略的变量
pub fn apply_env_overrides(config: &mut AppConfig) -> Vec<IgnoredEnvVar> {
    let mut ignored = Vec::new();

    if let Some(root) = non_empty_var("CCEASY_INSTALL_ROOT") {
        config.install_root = Some(PathBuf::from(root));
    }

    if let Some(level) = parsed_var("CCEASY_LOG_LEVEL", LogLevel::parse, &mut ignored) {
        config.log.level = level;
    }

    if let Some(format) = parsed_var("CCEASY_LOG_FORMAT", LogFormat::parse, &mut ignored) {
        config.log.format = format;
    }

    if let Some(output) = parsed_var("CCEASY_LOG_OUTPUT", LogOutput::parse, &mut ignored) {
        config.log.output = output;
    }

    if let Some(path) = non_empty_var("CCEASY_LOG_PATH") {
        config.log.file_path = Some(path);
    }

    ignored
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T>(
    key: &'static str,
    parse: impl Fn(&str) -> Option<T>,
    ignored: &mut Vec<IgnoredEnvVar>,
) -> Option<T> {
    let value = non_empty_var(key)?;
    let parsed = parse(&value);
    if parsed.is_none() {
        ignored.push(IgnoredEnvVar { key, value });
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    const KEYS: [&str; 6] = [
        "CCEASY_CONFIG_DIR",
        "CCEASY_INSTALL_ROOT",
        "CCEASY_LOG_LEVEL",
        "CCEASY_LOG_FORMAT",
        "CCEASY_LOG_OUTPUT",
        "CCEASY_LOG_PATH",
    ];

    struct TempEnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl TempEnvGuard {
        fn new(dir: &TempDir) -> Self {
            let saved = KEYS.iter().map(|k| (*k, env::var(k).ok())).collect();
            for key in KEYS {
                env::remove_var(key);
            }
            env::set_var("CCEASY_CONFIG_DIR", dir.path());
            Self { saved }
        }
    }

    impl Drop for TempEnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                match value {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn missing_config_file_yields_defaults() {
        let temp = TempDir::new().expect("create temp dir");
        let _guard = TempEnvGuard::new(&temp);

        let loaded = load_app_config().unwrap();
        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.ignored.is_empty());
    }

    #[test]
    #[serial]
    fn reads_config_file_and_applies_env_overrides() {
        let temp = TempDir::new().expect("create temp dir");
        let _guard = TempEnvGuard::new(&temp);
        fs::write(
            temp.path().join("config.json"),
            r#"{"log":{"level":"warn","output":"both"},"install_root":"/opt/from-file"}"#,
        )
        .unwrap();
        env::set_var("CCEASY_INSTALL_ROOT", "/opt/from-env");
        env::set_var("CCEASY_LOG_LEVEL", "debug");
        env::set_var("CCEASY_LOG_FORMAT", "json");

        let config = load_app_config().unwrap().config;
        assert_eq!(config.install_root, Some(PathBuf::from("/opt/from-env")));
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.output, LogOutput::Both);
    }

    #[test]
    #[serial]
    fn invalid_config_file_is_reported() {
        let temp = TempDir::new().expect("create temp dir");
        let _guard = TempEnvGuard::new(&temp);
        fs::write(temp.path().join("config.json"), "{invalid json").unwrap();

        let err = load_app_config().unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
    }

    #[test]
    #[serial]
    fn invalid_log_values_are_ignored_and_reported() {
        let temp = TempDir::new().expect("create temp dir");
        let _guard = TempEnvGuard::new(&temp);
        env::set_var("CCEASY_LOG_LEVEL", "loud");
        env::set_var("CCEASY_LOG_OUTPUT", "syslog");
        env::set_var("CCEASY_LOG_FORMAT", "json");

        let loaded = load_app_config().unwrap();
        assert_eq!(loaded.config.log.level, LogLevel::Info);
        assert_eq!(loaded.config.log.output, LogOutput::default());
        assert_eq!(loaded.config.log.format, LogFormat::Json);
        assert_eq!(
            loaded.ignored,
            vec![
                IgnoredEnvVar {
                    key: "CCEASY_LOG_LEVEL",
                    value: "loud".to_string(),
                },
                IgnoredEnvVar {
                    key: "CCEASY_LOG_OUTPUT",
                    value: "syslog".to_string(),
                },
            ]
        );
    }
}
