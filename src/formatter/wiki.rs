use super::{EventFormatter, EventKind};
use crate::error::FormatResult;
use crate::record::{field_text, EventRecord};
use crate::render::{build_link, LinkBuilder};

/// Wiki 页面变更（gollum）
pub struct Wiki<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
}

impl<'a> EventFormatter<'a> for Wiki<'a> {
    const KIND: EventKind = EventKind::Wiki;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        Ok(Self { record, links })
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "updated" => self.updated(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl Wiki<'_> {
    pub fn updated(&self) -> FormatResult<String> {
        let pages = self.record.array("pages")?;

        let mut msg = format!(
            "{} changes {} pages in Wiki at {}:",
            self.links.user_link(self.record)?,
            pages.len(),
            self.links.repository_link(&self.record.repository()?)
        );
        for (idx, page) in pages.iter().enumerate() {
            let prefix = format!("pages.{}", idx);
            let name = field_text(page, &prefix, "page_name")?;
            let action = field_text(page, &prefix, "action")?;
            // 对比页：页面 URL + /_compare/ + 修订号
            let url = format!(
                "{}/_compare/{}",
                field_text(page, &prefix, "html_url")?,
                field_text(page, &prefix, "sha")?
            );
            let summary = page
                .get("summary")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty());

            msg.push('\n');
            match summary {
                Some(summary) => msg.push_str(&format!(
                    "- {} {}\n>{}",
                    action,
                    build_link(&name, &url),
                    summary
                )),
                None => msg.push_str(&format!("- {} {}\n", action, build_link(&name, &url))),
            }
        }
        Ok(msg)
    }
}
