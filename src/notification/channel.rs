//! 通知渠道 trait 定义

use anyhow::Result;
use serde::Serialize;

/// 待投递的消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    /// 消息内容（已格式化的 markdown）
    pub text: String,
    /// incoming webhook 地址
    #[serde(skip)]
    pub webhook_url: String,
    /// 覆盖 webhook 默认频道
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl NotificationMessage {
    pub fn new(text: impl Into<String>, webhook_url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            webhook_url: webhook_url.into(),
            channel: None,
        }
    }

    /// 设置频道
    pub fn with_channel(mut self, channel: Option<String>) -> Self {
        self.channel = channel;
        self
    }
}

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 跳过（dry-run 等）
    Skipped(String),
    /// 发送失败
    Failed(String),
}

/// 通知渠道 trait
pub trait NotificationChannel: Send + Sync {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 同步发送消息
    fn send(&self, message: &NotificationMessage) -> Result<SendResult>;
}
