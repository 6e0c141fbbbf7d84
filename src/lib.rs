//! mattermost-github - 把 GitHub webhook 事件格式化为 Mattermost markdown 消息

pub mod config;
pub mod dispatch;
pub mod error;
pub mod formatter;
pub mod notification;
pub mod notifier;
pub mod record;
pub mod render;
pub mod server;

pub use config::{Config, ServerConfig, WebhookRoute};
pub use dispatch::{resolve, Route};
pub use error::{FormatError, FormatResult, ProbeError};
pub use formatter::{format_event, EventFormatter, EventKind};
pub use notification::{NotificationChannel, NotificationMessage, SendResult};
pub use notifier::{Notifier, Outcome};
pub use record::{EventRecord, Identity, OrganizationRef, RepositoryRef};
pub use render::{build_link, preview, AvatarPolicy, AvatarProbe, LinkBuilder, Preview};
