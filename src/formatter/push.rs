//! 推送事件 - 每个提交一行
//!
//! 提交列表为空时退回到 `head_commit`。分支链接指向仓库的 `/tree/<branch>`。

use serde_json::Value;

use super::{EventFormatter, EventKind};
use crate::error::{FormatError, FormatResult};
use crate::record::{field_text, EventRecord};
use crate::render::text::{preview, Preview, COMMIT_SEPARATOR};
use crate::render::{short_hash, LinkBuilder};

const BRANCH_PREFIX: &str = "refs/heads/";

pub struct Push<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
}

impl<'a> EventFormatter<'a> for Push<'a> {
    const KIND: EventKind = EventKind::Push;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        Ok(Self { record, links })
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "commits" => self.commits(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl Push<'_> {
    pub fn commits(&self) -> FormatResult<String> {
        let mut commits: Vec<&Value> = self.record.array("commits")?.iter().collect();
        if commits.is_empty() {
            commits.push(self.record.get("head_commit")?);
        }

        let branch = self.record.text("ref")?.replace(BRANCH_PREFIX, "");
        let repo = self.record.repository()?;
        let branch_url = format!("{}/tree/{}", repo.html_url, branch);
        let changeset = if commits.len() == 1 {
            "changeset"
        } else {
            "changesets"
        };

        let mut msg = format!(
            "{} pushed {} {} to [{}]({}) at {}:",
            self.links.user_link(self.record)?,
            commits.len(),
            changeset,
            branch,
            branch_url,
            self.links.repository_link(&repo)
        );
        for (idx, commit) in commits.iter().enumerate() {
            msg.push('\n');
            msg.push_str(&self.commit_line(commit, idx)?);
        }
        Ok(msg)
    }

    /// ``- [`abc1234`](url) by author: message``
    fn commit_line(&self, commit: &Value, idx: usize) -> FormatResult<String> {
        let prefix = format!("commits.{}", idx);
        let id = field_text(commit, &prefix, "id")?;
        let url = field_text(commit, &prefix, "url")?;
        let message = commit
            .get("message")
            .ok_or_else(|| FormatError::missing(format!("{}.message", prefix)))?
            .as_str();
        let author = commit
            .get("author")
            .ok_or_else(|| FormatError::missing(format!("{}.author", prefix)))?;

        Ok(format!(
            "- [`{}`]({}) by {}: {}",
            short_hash(&id),
            url,
            self.links
                .push_author_link(author, &format!("{}.author", prefix))?,
            preview(message, Preview::with_separator(COMMIT_SEPARATOR)).unwrap_or_default()
        ))
    }
}
