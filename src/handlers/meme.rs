use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::metrics::{REQUEST_COUNTER, RESPONSE_TIME, UPSTREAM_FAILURES};
use crate::models::meme::MemeReply;
use crate::services::meme::MemeService;
use crate::utils::error::{AppError, Result};

/// 从上游获取一个随机表情包
#[utoipa::path(
    get,
    path = "/get-meme",
    tag = "memes",
    responses(
        (status = 200, description = "成功返回表情包标题和图片地址", body = MemeReply),
        (status = 500, description = "上游没有返回可用的图片地址", body = crate::models::meme::ErrorReply),
        (status = 503, description = "无法连接上游 API", body = crate::models::meme::ErrorReply)
    )
)]
pub async fn get_meme(State(service): State<Arc<MemeService>>) -> Result<Json<MemeReply>> {
    REQUEST_COUNTER.inc();
    let _timer = crate::metrics::Timer::new(&RESPONSE_TIME);

    match service.fetch_meme().await {
        Ok(meme) => {
            info!(title = %meme.title, url = %meme.url, "Serving meme");
            Ok(Json(meme))
        }
        Err(e) => {
            match &e {
                AppError::UpstreamUnreachable(source) => error!("Error fetching meme: {}", source),
                other => warn!("获取表情包失败: {}", other),
            }
            UPSTREAM_FAILURES.with_label_values(&[e.kind()]).inc();
            Err(e)
        }
    }
}

/// 健康检查
#[utoipa::path(
    get,
    path = "/health",
    tag = "monitoring",
    responses(
        (status = 200, description = "服务健康")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// 获取Prometheus指标
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "monitoring",
    responses(
        (status = 200, description = "Prometheus metrics", content_type = "text/plain"),
        (status = 500, description = "指标编码失败", body = crate::models::meme::ErrorReply)
    )
)]
pub async fn get_metrics() -> Result<impl IntoResponse> {
    let metrics = crate::metrics::get_metrics()?;
    Ok((StatusCode::OK, [("Content-Type", "text/plain; version=0.0.4; charset=utf-8")], metrics))
}
