//! 仓库、分支与标签

use super::{EventFormatter, EventKind};
use crate::error::FormatResult;
use crate::record::EventRecord;
use crate::render::LinkBuilder;

pub struct Repository<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
}

impl<'a> EventFormatter<'a> for Repository<'a> {
    const KIND: EventKind = EventKind::Repository;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        Ok(Self { record, links })
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "created" => self.created(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl Repository<'_> {
    pub fn created(&self) -> FormatResult<String> {
        let description = self.record.text("repository.description")?;
        Ok(format!(
            "{} created new repository {}:\n> {}",
            self.links.user_link(self.record)?,
            self.links.repository_link(&self.record.repository()?),
            description
        ))
    }
}

/// 分支和标签共用：引用名原样放进反引号
struct RefEvent<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
    name: String,
}

impl<'a> RefEvent<'a> {
    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        Ok(Self {
            record,
            links,
            name: record.text("ref")?,
        })
    }

    fn created(&self, noun: &str) -> FormatResult<String> {
        Ok(format!(
            "{} added {} `{}` to {}.",
            self.links.user_link(self.record)?,
            noun,
            self.name,
            self.links.repository_link(&self.record.repository()?)
        ))
    }

    fn deleted(&self, noun: &str) -> FormatResult<String> {
        Ok(format!(
            "{} deleted {} `{}` in {}.",
            self.links.user_link(self.record)?,
            noun,
            self.name,
            self.links.repository_link(&self.record.repository()?)
        ))
    }
}

pub struct Branch<'a>(RefEvent<'a>);

impl<'a> EventFormatter<'a> for Branch<'a> {
    const KIND: EventKind = EventKind::Branch;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        RefEvent::new(record, links).map(Self)
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "created" => self.created(),
            "deleted" => self.deleted(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl Branch<'_> {
    pub fn created(&self) -> FormatResult<String> {
        self.0.created("branch")
    }

    pub fn deleted(&self) -> FormatResult<String> {
        self.0.deleted("branch")
    }
}

pub struct Tag<'a>(RefEvent<'a>);

impl<'a> EventFormatter<'a> for Tag<'a> {
    const KIND: EventKind = EventKind::Tag;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        RefEvent::new(record, links).map(Self)
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "created" => self.created(),
            "deleted" => self.deleted(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl Tag<'_> {
    pub fn created(&self) -> FormatResult<String> {
        self.0.created("tag")
    }

    pub fn deleted(&self) -> FormatResult<String> {
        self.0.deleted("tag")
    }
}
