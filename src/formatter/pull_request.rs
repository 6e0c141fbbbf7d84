//! Pull request 与 pull request 评论

use super::{EventFormatter, EventKind};
use crate::error::FormatResult;
use crate::record::EventRecord;
use crate::render::text::{preview, Preview, QUOTE_SEPARATOR};
use crate::render::LinkBuilder;

/// 正文预览，null 渲染为空
pub(super) fn quote(body: Option<&str>) -> String {
    preview(body, Preview::with_separator(QUOTE_SEPARATOR)).unwrap_or_default()
}

pub struct PullRequest<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
    number: String,
    title: String,
    body: Option<String>,
    url: String,
}

impl<'a> EventFormatter<'a> for PullRequest<'a> {
    const KIND: EventKind = EventKind::PullRequest;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        Ok(Self {
            record,
            links,
            number: record.text("pull_request.number")?,
            title: record.text("pull_request.title")?,
            body: record.optional_text("pull_request.body")?,
            url: record.text("pull_request.html_url")?,
        })
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "opened" => self.opened(),
            "assigned" => self.assigned(),
            "closed" => self.closed(),
            "synchronize" => self.synchronize(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl PullRequest<'_> {
    fn title_link(&self) -> String {
        format!("[#{} {}]({})", self.number, self.title, self.url)
    }

    pub fn opened(&self) -> FormatResult<String> {
        Ok(format!(
            "{} opened new pull request {} in {}:\n> {}",
            self.links.user_link(self.record)?,
            self.title_link(),
            self.links.repository_link(&self.record.repository()?),
            quote(self.body.as_deref())
        ))
    }

    pub fn assigned(&self) -> FormatResult<String> {
        let assignee = self.links.identity_link(&self.record.identity("assignee")?);
        Ok(format!(
            "{} assigned {} to pull request {}.",
            self.links.user_link(self.record)?,
            assignee,
            self.title_link()
        ))
    }

    /// 已合并的显示 "merged"
    pub fn closed(&self) -> FormatResult<String> {
        let verb = if self.record.flag("pull_request.merged")? {
            "merged"
        } else {
            "closed"
        };
        Ok(format!(
            "{} {} pull request {}.",
            self.links.user_link(self.record)?,
            verb,
            self.title_link()
        ))
    }

    pub fn synchronize(&self) -> FormatResult<String> {
        Ok(format!(
            "{} modified pull request {}.",
            self.links.user_link(self.record)?,
            self.title_link()
        ))
    }
}

/// pull request review 评论
pub struct PullRequestComment<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
    number: String,
    title: String,
    body: Option<String>,
    url: String,
}

impl<'a> EventFormatter<'a> for PullRequestComment<'a> {
    const KIND: EventKind = EventKind::PullRequestComment;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        Ok(Self {
            record,
            links,
            number: record.text("pull_request.number")?,
            title: record.text("pull_request.title")?,
            body: record.optional_text("comment.body")?,
            url: record.text("comment.html_url")?,
        })
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "created" => self.created(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl PullRequestComment<'_> {
    pub fn created(&self) -> FormatResult<String> {
        Ok(format!(
            "{} commented on pull request [#{} {}]({}):\n> {}",
            self.links.user_link(self.record)?,
            self.number,
            self.title,
            self.url,
            quote(self.body.as_deref())
        ))
    }
}
