use super::{EventFormatter, EventKind};
use crate::error::FormatResult;
use crate::record::EventRecord;
use crate::render::LinkBuilder;

/// 组织成员变更
pub struct Organization<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
    organization: String,
}

impl<'a> EventFormatter<'a> for Organization<'a> {
    const KIND: EventKind = EventKind::Organization;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        let organization = links.organization_link(&record.organization()?);
        Ok(Self {
            record,
            links,
            organization,
        })
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "member_added" => self.member_added(),
            "member_removed" => self.member_removed(),
            "member_invited" => self.member_invited(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl Organization<'_> {
    fn member(&self) -> FormatResult<String> {
        Ok(self
            .links
            .identity_link(&self.record.identity("membership.user")?))
    }

    pub fn member_added(&self) -> FormatResult<String> {
        Ok(format!("{} has been added to {}", self.member()?, self.organization))
    }

    // 措辞固定为 "removed to"
    pub fn member_removed(&self) -> FormatResult<String> {
        Ok(format!("{} has been removed to {}", self.member()?, self.organization))
    }

    /// 被邀请者只显示登录名
    pub fn member_invited(&self) -> FormatResult<String> {
        Ok(format!(
            "{} has been invited to join {}.",
            self.record.text("invitation.login")?,
            self.organization
        ))
    }
}
