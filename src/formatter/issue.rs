//! Issue 与 issue 评论

use super::pull_request::quote;
use super::{EventFormatter, EventKind};
use crate::error::FormatResult;
use crate::record::EventRecord;
use crate::render::LinkBuilder;

pub struct Issue<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
    number: String,
    title: String,
    url: String,
    body: Option<String>,
}

impl<'a> EventFormatter<'a> for Issue<'a> {
    const KIND: EventKind = EventKind::Issue;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        Ok(Self {
            record,
            links,
            number: record.text("issue.number")?,
            title: record.text("issue.title")?,
            url: record.text("issue.html_url")?,
            body: record.optional_text("issue.body")?,
        })
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "opened" => self.opened(),
            "labeled" => self.labeled(),
            "closed" => self.closed(),
            "assigned" => self.assigned(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl Issue<'_> {
    /// `[#n title](url) in repo`
    fn target(&self) -> FormatResult<String> {
        Ok(format!(
            "[#{} {}]({}) in {}",
            self.number,
            self.title,
            self.url,
            self.links.repository_link(&self.record.repository()?)
        ))
    }

    pub fn opened(&self) -> FormatResult<String> {
        Ok(format!(
            "{} opened new issue {}:\n> {}",
            self.links.user_link(self.record)?,
            self.target()?,
            quote(self.body.as_deref())
        ))
    }

    pub fn labeled(&self) -> FormatResult<String> {
        let label = self.record.text("label.name")?;
        Ok(format!(
            "{} added label `{}` to issue {}.",
            self.links.user_link(self.record)?,
            label,
            self.target()?
        ))
    }

    pub fn closed(&self) -> FormatResult<String> {
        Ok(format!(
            "{} closed issue {}.",
            self.links.user_link(self.record)?,
            self.target()?
        ))
    }

    pub fn assigned(&self) -> FormatResult<String> {
        let assignee = self.links.identity_link(&self.record.identity("assignee")?);
        Ok(format!(
            "{} assigned {} to issue {}.",
            self.links.user_link(self.record)?,
            assignee,
            self.target()?
        ))
    }
}

pub struct IssueComment<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
    number: String,
    title: String,
    url: String,
    body: Option<String>,
}

impl<'a> EventFormatter<'a> for IssueComment<'a> {
    const KIND: EventKind = EventKind::IssueComment;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        Ok(Self {
            record,
            links,
            number: record.text("issue.number")?,
            title: record.text("issue.title")?,
            url: record.text("comment.html_url")?,
            body: record.optional_text("comment.body")?,
        })
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "created" => self.created(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl IssueComment<'_> {
    pub fn created(&self) -> FormatResult<String> {
        Ok(format!(
            "{} commented on [#{} {}]({}):\n> {}",
            self.links.user_link(self.record)?,
            self.number,
            self.title,
            self.url,
            quote(self.body.as_deref())
        ))
    }
}
