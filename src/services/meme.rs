use std::time::Duration;

use reqwest::{Client, Url};
use tracing::debug;

use crate::models::meme::{MemeReply, UpstreamMemeResponse};
use crate::utils::error::{AppError, Result};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// 封装对上游表情包 API 的单次请求
#[derive(Debug, Clone)]
pub struct MemeService {
    client: Client,
    upstream_url: Url,
}

impl MemeService {
    pub fn new(upstream_url: &str, timeout: Duration) -> Result<Self> {
        let upstream_url = Url::parse(upstream_url)
            .map_err(|e| AppError::Config(format!("Invalid upstream URL {}: {}", upstream_url, e)))?;

        // 超时覆盖连接、发送和读取响应体的全过程
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, upstream_url })
    }

    pub fn upstream_url(&self) -> &Url {
        &self.upstream_url
    }

    /// 请求一次上游并整理成 `MemeReply`，不重试
    pub async fn fetch_meme(&self) -> Result<MemeReply> {
        let response = self
            .client
            .get(self.upstream_url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(AppError::UpstreamUnreachable)?;

        debug!(status = %response.status(), "Upstream responded");

        // 读取响应体失败（含超时、连接中断）仍属于网络错误
        let body = response.bytes().await.map_err(AppError::UpstreamUnreachable)?;

        let upstream: UpstreamMemeResponse = serde_json::from_slice(&body)
            .map_err(|e| AppError::UpstreamMalformed(format!("body is not a JSON object: {}", e)))?;

        let reply = upstream.into_reply();
        if reply.url.is_empty() {
            return Err(AppError::UpstreamMalformed("response carried no meme URL".to_string()));
        }

        Ok(reply)
    }
}
