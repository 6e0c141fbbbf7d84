//! HTTP webhook 入口
//!
//! `POST {hook_path}`，请求头 `X-GitHub-Event` 给出事件名，请求体为 JSON。
//! 格式化和投递都是阻塞操作（头像探测、HTTP 投递），放到 blocking 线程池执行。

use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use tracing::{error, info, warn};

use crate::notifier::{Notifier, Outcome};
use crate::record::EventRecord;

pub const EVENT_HEADER: &str = "x-github-event";

pub fn router(notifier: Arc<Notifier>) -> Router {
    let hook_path = notifier.config().server.hook_path.clone();
    Router::new()
        .route(&hook_path, post(handle_hook))
        .with_state(notifier)
}

/// 监听并服务，直到进程退出
pub async fn serve(notifier: Arc<Notifier>) -> Result<()> {
    let address = notifier.config().server.address.clone();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| anyhow!("Cannot bind {}: {}", address, e))?;
    info!(address = %address, path = %notifier.config().server.hook_path, "Webhook server listening");

    axum::serve(listener, router(notifier))
        .await
        .map_err(|e| anyhow!("Server error: {}", e))
}

async fn handle_hook(
    State(notifier): State<Arc<Notifier>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let Some(event) = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
    else {
        warn!("Request without X-GitHub-Event header");
        return (StatusCode::BAD_REQUEST, "Missing X-GitHub-Event header".to_string());
    };

    let record = match EventRecord::from_slice(&body) {
        Ok(record) => record,
        Err(e) => {
            warn!(event = %event, error = %e, "Invalid JSON payload");
            return (StatusCode::BAD_REQUEST, format!("Invalid JSON payload: {}", e));
        }
    };

    let result = tokio::task::spawn_blocking(move || notifier.handle(&event, &record)).await;

    match result {
        Ok(Ok(outcome)) => respond(outcome),
        Ok(Err(e)) => {
            warn!(error = %e, "Event rejected");
            (StatusCode::BAD_REQUEST, format!("Not implemented: {}", e))
        }
        Err(e) => {
            error!(error = %e, "Notification task panicked");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
        }
    }
}

fn respond(outcome: Outcome) -> (StatusCode, String) {
    match outcome {
        Outcome::Posted { .. } => (
            StatusCode::OK,
            "Notification successfully posted to Mattermost".to_string(),
        ),
        Outcome::Skipped { reason, .. } => (StatusCode::OK, format!("Notification skipped ({})", reason)),
        Outcome::NotNotified(reason) => (StatusCode::OK, format!("Notification not needed ({})", reason)),
        Outcome::Ignored => (
            StatusCode::OK,
            "Notification action ignored (as per configuration)".to_string(),
        ),
        Outcome::Muted { route } => (
            StatusCode::OK,
            format!("Notification ignored ({} is muted)", route),
        ),
        Outcome::Unrouted => (
            StatusCode::OK,
            "Notification ignored (no webhook configured)".to_string(),
        ),
        Outcome::Failed { error, .. } => (
            StatusCode::BAD_GATEWAY,
            format!("Failed to post notification: {}", error),
        ),
    }
}
