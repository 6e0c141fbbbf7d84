use super::pull_request::quote;
use super::{EventFormatter, EventKind};
use crate::error::FormatResult;
use crate::record::EventRecord;
use crate::render::{short_hash, LinkBuilder};

pub struct CommitComment<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
    commit: String,
    url: String,
    body: Option<String>,
}

impl<'a> EventFormatter<'a> for CommitComment<'a> {
    const KIND: EventKind = EventKind::CommitComment;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        Ok(Self {
            record,
            links,
            commit: short_hash(&record.text("comment.commit_id")?),
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

impl CommitComment<'_> {
    pub fn created(&self) -> FormatResult<String> {
        Ok(format!(
            "{} commented on [{}]({}):\n> {}",
            self.links.user_link(self.record)?,
            self.commit,
            self.url,
            quote(self.body.as_deref())
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::fixtures::{record, ALICE};
    use serde_json::json;

    #[test]
    fn test_created_uses_short_hash() {
        let record = record(json!({
            "comment": {
                "commit_id": "9049f1265b7d61be4a8904a9a27120d2064dab3b",
                "html_url": "https://x/commit/9049f12#c1",
                "body": "Looks good\nbut check tests",
            }
        }));
        let links = LinkBuilder::default();
        assert_eq!(
            CommitComment::new(&record, &links).unwrap().created().unwrap(),
            format!(
                "{} commented on [9049f12](https://x/commit/9049f12#c1):\n> Looks good\n> but check tests",
                ALICE
            )
        );
    }
}
