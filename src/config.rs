//! 配置加载
//!
//! 读取优先级：
//! 1. `--config` 指定的文件
//! 2. `~/.config/mattermost-github/config.json`
//! 3. 内置默认值
//!
//! 之后再应用环境变量覆盖：`MMGH_SHOW_AVATARS`、`MMGH_WEBHOOK_URL`、`MMGH_SERVER_ADDRESS`。

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// 默认发帖用户名
pub const DEFAULT_USERNAME: &str = "Github";

/// 默认头像探测超时（毫秒）
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3000;

/// 路由表中的兜底键
pub const DEFAULT_ROUTE: &str = "default";

/// 一个 Mattermost incoming webhook 目标
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookRoute {
    pub url: String,
    #[serde(default)]
    pub channel: Option<String>,
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub address: String,
    /// 接收 webhook 的路径
    pub hook_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:5000".to_string(),
            hook_path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 进程级头像开关
    pub show_avatars: bool,
    /// 头像探测超时（毫秒）
    pub avatar_probe_timeout_ms: u64,
    /// 发帖用户名
    pub username: String,
    /// 发帖头像
    pub icon_url: Option<String>,
    /// 路由表：仓库全名 / 组织 / 所有者 / "default" → webhook；null 表示静音
    pub webhooks: HashMap<String, Option<WebhookRoute>>,
    /// 按事件名忽略的 action
    pub ignore_actions: HashMap<String, Vec<String>>,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_avatars: true,
            avatar_probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            username: DEFAULT_USERNAME.to_string(),
            icon_url: None,
            webhooks: HashMap::new(),
            ignore_actions: HashMap::new(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/mattermost-github/config.json"))
    }

    /// 加载配置并应用环境变量覆盖
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Cannot read config {}: {}", path.display(), e))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;
        debug!(path = %path.display(), routes = config.webhooks.len(), "Loaded config");
        Ok(config)
    }

    /// 环境变量覆盖；`lookup` 便于测试注入
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("MMGH_SHOW_AVATARS") {
            self.show_avatars = matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(url) = lookup("MMGH_WEBHOOK_URL").filter(|u| !u.is_empty()) {
            let channel = self
                .webhooks
                .get(DEFAULT_ROUTE)
                .and_then(|r| r.as_ref())
                .and_then(|r| r.channel.clone());
            self.webhooks
                .insert(DEFAULT_ROUTE.to_string(), Some(WebhookRoute { url, channel }));
        }
        if let Some(address) = lookup("MMGH_SERVER_ADDRESS").filter(|a| !a.is_empty()) {
            self.server.address = address;
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.avatar_probe_timeout_ms)
    }

    /// 该事件的 action 是否被配置忽略
    pub fn is_ignored(&self, event: &str, action: Option<&str>) -> bool {
        match (self.ignore_actions.get(event), action) {
            (Some(actions), Some(action)) => actions.iter().any(|a| a == action),
            _ => false,
        }
    }
}
