//! 学习集 API 客户端
//!
//! 封装所有与远程学习集 API 相关的 HTTP 调用

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use serde::de::DeserializeOwned;
use tracing::debug;

/// 学习集客户端
pub struct LearningSetClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl LearningSetClient {
    /// 创建新的学习集客户端
    pub fn new(base_url: impl Into<String>, config: &Config) -> FetchResult<Self> {
        let base_url = base_url.into();
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FetchError::Network {
                endpoint: base_url.clone(),
                source: e,
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET 请求并解析 JSON
    ///
    /// # 参数
    /// - `path`: 以 `/` 开头的相对路径
    ///
    /// # 返回
    /// 404 返回 `Ok(None)`，其他非成功状态码返回 `FetchError::Status`
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> FetchResult<Option<T>> {
        let endpoint = format!("{}{}", self.base_url, path);
        debug!("GET {}", endpoint);

        let response = self
            .http_client
            .get(&endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Network {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| FetchError::parse(endpoint, e))
    }
}
