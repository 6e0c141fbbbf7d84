//! 事件格式化器 - 每种事件一个格式化器，每个 action 一个方法
//!
//! (事件类型, action) 到方法的映射是对外契约：`EventKind::actions` 列出
//! 每种类型支持的 action，`format_event` 按表分发。
//!
//! ```
//! use mattermost_github::formatter::{format_event, EventKind};
//! use mattermost_github::record::EventRecord;
//! use mattermost_github::render::LinkBuilder;
//! use serde_json::json;
//!
//! let record = EventRecord::new(json!({
//!     "sender": {"login": "alice", "html_url": "https://x/alice", "avatar_url": "https://a/1?v=4"},
//!     "repository": {"full_name": "org/repo", "html_url": "https://x/org/repo"},
//!     "ref": "feature/x",
//! }));
//! let msg = format_event(EventKind::Branch, "created", &record, &LinkBuilder::default()).unwrap();
//! assert_eq!(msg, "[alice](https://x/alice) added branch `feature/x` to [org/repo](https://x/org/repo).");
//! ```

mod commit_comment;
mod deployment;
mod issue;
mod organization;
mod pull_request;
mod push;
mod repository;
mod wiki;

#[cfg(test)]
pub(crate) mod fixtures;

use std::fmt;

pub use commit_comment::CommitComment;
pub use deployment::{Deployment, DeploymentStatus};
pub use issue::{Issue, IssueComment};
pub use organization::Organization;
pub use pull_request::{PullRequest, PullRequestComment};
pub use push::Push;
pub use repository::{Branch, Repository, Tag};
pub use wiki::Wiki;

use crate::error::{FormatError, FormatResult};
use crate::record::EventRecord;
use crate::render::LinkBuilder;

/// 支持的事件类型（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PullRequest,
    PullRequestComment,
    Issue,
    IssueComment,
    CommitComment,
    Repository,
    Branch,
    Tag,
    Push,
    Wiki,
    Deployment,
    DeploymentStatus,
    Organization,
}

impl EventKind {
    pub const ALL: [EventKind; 13] = [
        EventKind::PullRequest,
        EventKind::PullRequestComment,
        EventKind::Issue,
        EventKind::IssueComment,
        EventKind::CommitComment,
        EventKind::Repository,
        EventKind::Branch,
        EventKind::Tag,
        EventKind::Push,
        EventKind::Wiki,
        EventKind::Deployment,
        EventKind::DeploymentStatus,
        EventKind::Organization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PullRequest => "pull_request",
            EventKind::PullRequestComment => "pull_request_comment",
            EventKind::Issue => "issue",
            EventKind::IssueComment => "issue_comment",
            EventKind::CommitComment => "commit_comment",
            EventKind::Repository => "repository",
            EventKind::Branch => "branch",
            EventKind::Tag => "tag",
            EventKind::Push => "push",
            EventKind::Wiki => "wiki",
            EventKind::Deployment => "deployment",
            EventKind::DeploymentStatus => "deployment_status",
            EventKind::Organization => "organization",
        }
    }

    /// 该类型支持的 action
    pub fn actions(&self) -> &'static [&'static str] {
        match self {
            EventKind::PullRequest => &["opened", "assigned", "closed", "synchronize"],
            EventKind::PullRequestComment => &["created"],
            EventKind::Issue => &["opened", "labeled", "closed", "assigned"],
            EventKind::IssueComment => &["created"],
            EventKind::CommitComment => &["created"],
            EventKind::Repository => &["created"],
            EventKind::Branch => &["created", "deleted"],
            EventKind::Tag => &["created", "deleted"],
            EventKind::Push => &["commits"],
            EventKind::Wiki => &["updated"],
            EventKind::Deployment => &["deploy"],
            EventKind::DeploymentStatus => &["success", "pending", "error", "failed"],
            EventKind::Organization => &["member_added", "member_removed", "member_invited"],
        }
    }

    pub fn supports(&self, action: &str) -> bool {
        self.actions().contains(&action)
    }

    pub(crate) fn unknown_action(&self, action: &str) -> FormatError {
        FormatError::UnknownAction {
            kind: *self,
            action: action.to_string(),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个事件类型的格式化器
///
/// 构造时读取固定字段，缺失即失败；`render` 按 action 调用对应方法。
pub trait EventFormatter<'a>: Sized {
    const KIND: EventKind;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self>;

    fn render(&self, action: &str) -> FormatResult<String>;
}

/// 按 (类型, action) 格式化一条事件
///
/// 不支持的 action 在读取任何字段之前就被拒绝。
pub fn format_event(
    kind: EventKind,
    action: &str,
    record: &EventRecord,
    links: &LinkBuilder,
) -> FormatResult<String> {
    if !kind.supports(action) {
        return Err(kind.unknown_action(action));
    }

    match kind {
        EventKind::PullRequest => render::<PullRequest>(action, record, links),
        EventKind::PullRequestComment => render::<PullRequestComment>(action, record, links),
        EventKind::Issue => render::<Issue>(action, record, links),
        EventKind::IssueComment => render::<IssueComment>(action, record, links),
        EventKind::CommitComment => render::<CommitComment>(action, record, links),
        EventKind::Repository => render::<Repository>(action, record, links),
        EventKind::Branch => render::<Branch>(action, record, links),
        EventKind::Tag => render::<Tag>(action, record, links),
        EventKind::Push => render::<Push>(action, record, links),
        EventKind::Wiki => render::<Wiki>(action, record, links),
        EventKind::Deployment => render::<Deployment>(action, record, links),
        EventKind::DeploymentStatus => render::<DeploymentStatus>(action, record, links),
        EventKind::Organization => render::<Organization>(action, record, links),
    }
}

fn render<'a, F: EventFormatter<'a>>(
    action: &str,
    record: &'a EventRecord,
    links: &'a LinkBuilder,
) -> FormatResult<String> {
    F::new(record, links)?.render(action)
}
