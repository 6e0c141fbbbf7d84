//! 通知投递层 - 把格式化好的消息送到 Mattermost
//!
//! # 使用示例
//! ```ignore
//! use mattermost_github::notification::{MattermostChannel, MattermostConfig, NotificationChannel, NotificationMessage};
//!
//! let channel = MattermostChannel::new(MattermostConfig::default())?;
//! let message = NotificationMessage::new("Hello", "https://mattermost.example.com/hooks/xxx");
//! channel.send(&message)?;
//! ```

pub mod channel;
pub mod mattermost;
pub mod routing;

pub use channel::{NotificationChannel, NotificationMessage, SendResult};
pub use mattermost::{MattermostChannel, MattermostConfig};
pub use routing::{select_route, RouteDecision};
