//! Mattermost incoming webhook 渠道
//!
//! 以 JSON POST `{"text", "channel", "username", "icon_url"}` 到路由表给出的地址。

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};

use super::channel::{NotificationChannel, NotificationMessage, SendResult};

/// Mattermost 渠道配置
#[derive(Debug, Clone)]
pub struct MattermostConfig {
    /// 发帖用户名
    pub username: String,
    /// 发帖头像
    pub icon_url: Option<String>,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
    /// 只打印不发送
    pub dry_run: bool,
}

impl Default for MattermostConfig {
    fn default() -> Self {
        Self {
            username: crate::config::DEFAULT_USERNAME.to_string(),
            icon_url: None,
            timeout_secs: 30,
            dry_run: false,
        }
    }
}

/// Webhook 请求载荷
#[derive(Debug, Serialize, PartialEq)]
pub struct WebhookPayload<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<&'a str>,
    pub username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<&'a str>,
}

pub struct MattermostChannel {
    client: reqwest::blocking::Client,
    config: MattermostConfig,
}

impl MattermostChannel {
    pub fn new(config: MattermostConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    pub fn payload<'a>(&'a self, message: &'a NotificationMessage) -> WebhookPayload<'a> {
        WebhookPayload {
            text: &message.text,
            channel: message.channel.as_deref(),
            username: &self.config.username,
            icon_url: self.config.icon_url.as_deref(),
        }
    }
}

impl NotificationChannel for MattermostChannel {
    fn name(&self) -> &str {
        "mattermost"
    }

    fn send(&self, message: &NotificationMessage) -> Result<SendResult> {
        if self.config.dry_run {
            println!("[DRY-RUN] {} -> {}", message.webhook_url, message.channel.as_deref().unwrap_or("-"));
            println!("{}", message.text);
            return Ok(SendResult::Skipped("dry-run".to_string()));
        }

        let response = self
            .client
            .post(&message.webhook_url)
            .json(&self.payload(message))
            .send()
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        let status = response.status();
        if status.is_success() {
            info!(
                url = %message.webhook_url,
                channel = ?message.channel,
                "Message posted to Mattermost"
            );
            Ok(SendResult::Sent)
        } else {
            let body = response.text().unwrap_or_default();
            error!(
                url = %message.webhook_url,
                status = status.as_u16(),
                body = %body,
                "Mattermost rejected message"
            );
            Ok(SendResult::Failed(format!("HTTP {}: {}", status.as_u16(), body)))
        }
    }
}
