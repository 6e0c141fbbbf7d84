//! 通知流水线：忽略规则 → 路由 → 格式化 → 投递

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::dispatch;
use crate::error::FormatError;
use crate::notification::{
    select_route, MattermostChannel, MattermostConfig, NotificationChannel, NotificationMessage,
    RouteDecision, SendResult,
};
use crate::record::EventRecord;
use crate::render::{AvatarPolicy, AvatarProbe, HttpAvatarProbe, LinkBuilder};

/// 一次投递的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 已投递
    Posted { route: String },
    /// dry-run 或渠道主动跳过
    Skipped { route: String, reason: String },
    /// 事件本身不需要通知
    NotNotified(&'static str),
    /// 配置忽略了该 action
    Ignored,
    /// 路由表中静音
    Muted { route: String },
    /// 无可用路由
    Unrouted,
    /// 渠道投递失败
    Failed { route: String, error: String },
}

pub struct Notifier {
    config: Config,
    links: LinkBuilder,
    channel: Arc<dyn NotificationChannel>,
}

impl Notifier {
    pub fn new(config: Config, links: LinkBuilder, channel: Arc<dyn NotificationChannel>) -> Self {
        Self {
            config,
            links,
            channel,
        }
    }

    /// 按配置构建：开启头像时安装 HTTP 探测器，投递走 Mattermost webhook
    pub fn from_config(config: Config, dry_run: bool) -> Result<Self> {
        let probe: Option<Box<dyn AvatarProbe>> = if config.show_avatars {
            Some(Box::new(HttpAvatarProbe::new(config.probe_timeout())?))
        } else {
            None
        };
        let links = LinkBuilder::new(AvatarPolicy::new(config.show_avatars, probe));
        let channel = MattermostChannel::new(MattermostConfig {
            username: config.username.clone(),
            icon_url: config.icon_url.clone(),
            dry_run,
            ..Default::default()
        })?;
        Ok(Self::new(config, links, Arc::new(channel)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 只格式化，不投递
    pub fn render(&self, event: &str, record: &EventRecord) -> Result<Option<String>, FormatError> {
        dispatch::render(event, record, &self.links)
    }

    /// 处理一次 webhook 投递
    ///
    /// 格式化失败直接返回错误（不发送任何消息）；投递失败记录在 `Outcome::Failed`。
    pub fn handle(&self, event: &str, record: &EventRecord) -> Result<Outcome, FormatError> {
        let action = record.find("action").and_then(|v| v.as_str());
        if self.config.is_ignored(event, action) {
            info!(event = %event, action = ?action, "Action ignored by configuration");
            return Ok(Outcome::Ignored);
        }

        let (key, route) = match select_route(&self.config.webhooks, record) {
            RouteDecision::Deliver { key, route } => (key, route),
            RouteDecision::Muted { key } => {
                info!(event = %event, route = %key, "Route muted, dropping event");
                return Ok(Outcome::Muted { route: key });
            }
            RouteDecision::Unrouted => {
                warn!(event = %event, "No webhook route configured, dropping event");
                return Ok(Outcome::Unrouted);
            }
        };

        let Some(text) = self.render(event, record)? else {
            return Ok(Outcome::NotNotified("event produces no message"));
        };

        let message = NotificationMessage::new(text, route.url.clone()).with_channel(route.channel.clone());
        let outcome = match self.channel.send(&message) {
            Ok(SendResult::Sent) => Outcome::Posted { route: key },
            Ok(SendResult::Skipped(reason)) => Outcome::Skipped { route: key, reason },
            Ok(SendResult::Failed(error)) => Outcome::Failed { route: key, error },
            Err(e) => {
                warn!(channel = self.channel.name(), error = %e, "Channel send failed");
                Outcome::Failed {
                    route: key,
                    error: e.to_string(),
                }
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::WebhookRoute;
    use crate::formatter::fixtures::record;
    use serde_json::json;
    use std::sync::Mutex;

    /// 测试用渠道：记录收到的消息
    #[derive(Default)]
    pub(crate) struct RecordingChannel {
        pub sent: Mutex<Vec<NotificationMessage>>,
        pub fail: bool,
    }

    impl NotificationChannel for RecordingChannel {
        fn name(&self) -> &str {
            "recording"
        }

        fn send(&self, message: &NotificationMessage) -> Result<SendResult> {
            if self.fail {
                anyhow::bail!("connection refused");
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(SendResult::Sent)
        }
    }

    pub(crate) fn config() -> Config {
        let mut config = Config::default();
        config.show_avatars = false;
        config.webhooks.insert(
            "default".to_string(),
            Some(WebhookRoute {
                url: "https://mm/hooks/default".to_string(),
                channel: Some("dev".to_string()),
            }),
        );
        config.webhooks.insert("org/muted".to_string(), None);
        config
            .ignore_actions
            .insert("pull_request".to_string(), vec!["synchronize".to_string()]);
        config
    }

    fn notifier(channel: Arc<RecordingChannel>) -> Notifier {
        Notifier::new(config(), LinkBuilder::default(), channel)
    }

    #[test]
    fn test_posts_to_default_route() {
        let channel = Arc::new(RecordingChannel::default());
        let notifier = notifier(channel.clone());
        let outcome = notifier
            .handle("create", &record(json!({"ref_type": "tag", "ref": "v1"})))
            .unwrap();
        assert_eq!(outcome, Outcome::Posted { route: "default".to_string() });

        let sent = channel.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].webhook_url, "https://mm/hooks/default");
        assert_eq!(sent[0].channel.as_deref(), Some("dev"));
        assert!(sent[0].text.contains("added tag `v1`"));
    }

    #[test]
    fn test_ignored_action_is_not_formatted() {
        let channel = Arc::new(RecordingChannel::default());
        let notifier = notifier(channel.clone());
        // 缺字段也不会报错，因为根本不格式化
        let outcome = notifier
            .handle("pull_request", &record(json!({"action": "synchronize"})))
            .unwrap();
        assert_eq!(outcome, Outcome::Ignored);
        assert!(channel.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_muted_route() {
        let channel = Arc::new(RecordingChannel::default());
        let notifier = notifier(channel.clone());
        let record = crate::record::EventRecord::new(json!({
            "repository": {"full_name": "org/muted", "html_url": "u"},
        }));
        assert_eq!(
            notifier.handle("ping", &record).unwrap(),
            Outcome::Muted { route: "org/muted".to_string() }
        );
    }

    #[test]
    fn test_format_error_sends_nothing() {
        let channel = Arc::new(RecordingChannel::default());
        let notifier = notifier(channel.clone());
        let err = notifier
            .handle("issues", &record(json!({"action": "opened"})))
            .unwrap_err();
        assert!(matches!(err, FormatError::MissingField { .. }));
        assert!(channel.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_skipped_push() {
        let channel = Arc::new(RecordingChannel::default());
        let notifier = notifier(channel.clone());
        let outcome = notifier
            .handle("push", &record(json!({"deleted": false, "forced": false, "ref": "refs/tags/v1"})))
            .unwrap();
        assert!(matches!(outcome, Outcome::NotNotified(_)));
    }

    #[test]
    fn test_delivery_failure_is_reported() {
        let channel = Arc::new(RecordingChannel {
            fail: true,
            ..Default::default()
        });
        let notifier = notifier(channel);
        let outcome = notifier.handle("ping", &record(json!({}))).unwrap();
        assert_eq!(
            outcome,
            Outcome::Failed {
                route: "default".to_string(),
                error: "connection refused".to_string()
            }
        );
    }
}
