use thiserror::Error;

/// 用例层（获取题集 / 词汇表）错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// 网络请求失败
    #[error("网络请求失败 ({endpoint}): {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 服务端返回非成功状态码
    #[error("服务端返回错误状态 ({endpoint}): {status}")]
    Status { endpoint: String, status: u16 },

    /// 请求超时
    #[error("请求超时 ({operation}), 超过 {seconds} 秒")]
    Timeout { operation: String, seconds: u64 },

    /// 数据解析失败
    #[error("数据解析失败 ({origin}): {message}")]
    Parse { origin: String, message: String },

    /// 读取本地文件失败
    #[error("读取文件失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 学习集不存在
    #[error("学习集不存在: {set_id}")]
    NotFound { set_id: String },

    /// 后台任务异常退出
    #[error("后台任务失败: {message}")]
    Task { message: String },
}

impl FetchError {
    pub fn parse(origin: impl Into<String>, message: impl std::fmt::Display) -> Self {
        FetchError::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }

    /// 是否为网络层错误（网络 / 状态码 / 超时）
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FetchError::Network { .. } | FetchError::Status { .. } | FetchError::Timeout { .. }
        )
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    InvalidValue {
        var_name: String,
        value: String,
        expected_type: String,
    },

    /// 配置项不合法
    #[error("配置项 {field} 不合法: {reason}")]
    Invalid { field: String, reason: String },
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("获取学习集失败: {0}")]
    Fetch(#[from] FetchError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 用例层结果类型
pub type FetchResult<T> = Result<T, FetchError>;

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_classification() {
        let timeout = FetchError::Timeout {
            operation: "fetch_questions".to_string(),
            seconds: 3,
        };
        assert!(timeout.is_network());
        assert!(!FetchError::parse("x.toml", "bad").is_network());
        assert!(!FetchError::NotFound {
            set_id: "n5".to_string()
        }
        .is_network());
    }

    #[test]
    fn test_app_error_wraps_fetch_error() {
        let err: AppError = FetchError::NotFound {
            set_id: "n5".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Fetch(FetchError::NotFound { .. })));
        assert!(err.to_string().contains("n5"));
    }

    #[test]
    fn test_app_error_wraps_io_error() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed").into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("stdin closed"));
    }
}
