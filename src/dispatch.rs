//! Webhook 分发 - 事件名 + 记录 → (格式化器类型, action)
//!
//! 事件名来自 `X-GitHub-Event` 请求头，action 多数取自记录的 `action` 字段。

use tracing::debug;

use crate::error::{FormatError, FormatResult};
use crate::formatter::{format_event, EventKind};
use crate::record::EventRecord;
use crate::render::LinkBuilder;

/// 分发结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// 交给格式化器
    Format { kind: EventKind, action: String },
    /// webhook 配置时的 ping
    Ping,
    /// 有意不发送的事件
    Skip(&'static str),
}

/// 解析事件名和记录，决定由哪个格式化器的哪个 action 处理
pub fn resolve(event: &str, record: &EventRecord) -> FormatResult<Route> {
    let route = match event {
        "ping" => Route::Ping,
        "pull_request" => format(EventKind::PullRequest, record.text("action")?),
        "pull_request_review_comment" => {
            format(EventKind::PullRequestComment, record.text("action")?)
        }
        "issues" => format(EventKind::Issue, record.text("action")?),
        "issue_comment" => format(EventKind::IssueComment, record.text("action")?),
        "commit_comment" => format(
            EventKind::CommitComment,
            record
                .find("action")
                .and_then(|v| v.as_str())
                .unwrap_or("created")
                .to_string(),
        ),
        "repository" => format(EventKind::Repository, record.text("action")?),
        "create" => format(ref_kind(record)?, "created".to_string()),
        "delete" => format(ref_kind(record)?, "deleted".to_string()),
        "push" => {
            if record.flag("deleted")? && record.flag("forced")? {
                Route::Skip("forced branch deletion")
            } else if record.text("ref")?.starts_with("refs/tags/") {
                Route::Skip("tag push")
            } else {
                format(EventKind::Push, "commits".to_string())
            }
        }
        "gollum" => format(EventKind::Wiki, "updated".to_string()),
        "deployment" => format(EventKind::Deployment, "deploy".to_string()),
        "deployment_status" => {
            let state = record.text("deployment_status.state")?;
            let action = match state.as_str() {
                "failure" => "failed".to_string(),
                _ => state,
            };
            format(EventKind::DeploymentStatus, action)
        }
        "organization" => format(EventKind::Organization, record.text("action")?),
        other => {
            return Err(FormatError::UnknownEvent {
                event: other.to_string(),
            })
        }
    };

    debug!(event = %event, route = ?route, "Resolved webhook event");
    Ok(route)
}

/// 解析并格式化；`Ok(None)` 表示有意跳过
pub fn render(event: &str, record: &EventRecord, links: &LinkBuilder) -> FormatResult<Option<String>> {
    match resolve(event, record)? {
        Route::Format { kind, action } => format_event(kind, &action, record, links).map(Some),
        Route::Ping => Ok(Some(format!(
            "ping from {}",
            record.text("repository.full_name")?
        ))),
        Route::Skip(reason) => {
            debug!(event = %event, reason, "Skipping event");
            Ok(None)
        }
    }
}

fn format(kind: EventKind, action: String) -> Route {
    Route::Format { kind, action }
}

fn ref_kind(record: &EventRecord) -> FormatResult<EventKind> {
    match record.text("ref_type")?.as_str() {
        "branch" => Ok(EventKind::Branch),
        "tag" => Ok(EventKind::Tag),
        _ => Err(FormatError::InvalidField {
            field: "ref_type".to_string(),
            expected: "`branch` or `tag`",
        }),
    }
}
