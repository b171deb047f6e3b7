use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// 本地学习集 TOML 文件目录
    pub learning_set_dir: PathBuf,
    /// 远程学习集 API 地址，未设置时使用本地目录
    pub learning_set_api_url: Option<String>,
    /// 单次获取的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 启动时是否显示提示
    pub show_hint: bool,
    /// 是否拒绝空白答案
    pub reject_blank_answers: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            learning_set_dir: PathBuf::from("learning_sets"),
            learning_set_api_url: None,
            request_timeout_secs: 15,
            show_hint: false,
            reject_blank_answers: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源读取配置，缺失或无法解析的值使用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Self {
            learning_set_dir: lookup("LEARNING_SET_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.learning_set_dir),
            learning_set_api_url: lookup("LEARNING_SET_API_URL")
                .filter(|v| !v.trim().is_empty())
                .or(default.learning_set_api_url),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.request_timeout_secs),
            show_hint: lookup("SHOW_HINT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.show_hint),
            reject_blank_answers: lookup("REJECT_BLANK_ANSWERS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.reject_blank_answers),
            verbose_logging: lookup("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
        }
    }

    /// 校验配置项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_secs".to_string(),
                reason: "超时时间必须大于 0".to_string(),
            });
        }
        if let Some(url) = &self.learning_set_api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    var_name: "LEARNING_SET_API_URL".to_string(),
                    value: url.clone(),
                    expected_type: "http(s) URL".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
