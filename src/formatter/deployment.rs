//! 部署与部署状态

use super::{EventFormatter, EventKind};
use crate::error::FormatResult;
use crate::record::EventRecord;
use crate::render::LinkBuilder;

pub struct Deployment<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
}

impl<'a> EventFormatter<'a> for Deployment<'a> {
    const KIND: EventKind = EventKind::Deployment;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        Ok(Self { record, links })
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "deploy" => self.deploy(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl Deployment<'_> {
    /// 致谢的是部署创建者，而不是事件发送者
    pub fn deploy(&self) -> FormatResult<String> {
        let creator = self.record.identity("deployment.creator")?;
        Ok(format!(
            "Deploying {} at  {} thanks to {}.",
            self.record.text("deployment.ref")?,
            self.links.repository_link(&self.record.repository()?),
            self.links.identity_link(&creator)
        ))
    }
}

pub struct DeploymentStatus<'a> {
    record: &'a EventRecord,
    links: &'a LinkBuilder,
    deployment: String,
}

impl<'a> EventFormatter<'a> for DeploymentStatus<'a> {
    const KIND: EventKind = EventKind::DeploymentStatus;

    fn new(record: &'a EventRecord, links: &'a LinkBuilder) -> FormatResult<Self> {
        let deployment = links.deployment_link(
            &record.text("deployment.id")?,
            &record.text("deployment.url")?,
        );
        Ok(Self {
            record,
            links,
            deployment,
        })
    }

    fn render(&self, action: &str) -> FormatResult<String> {
        match action {
            "success" => self.success(),
            "pending" => self.pending(),
            "error" => self.error(),
            "failed" => self.failed(),
            other => Err(Self::KIND.unknown_action(other)),
        }
    }
}

impl DeploymentStatus<'_> {
    /// `Deployment [#id](url) at  repo triggered by user`
    fn prefix(&self) -> FormatResult<String> {
        Ok(format!(
            "Deployment {} at  {} triggered by {}",
            self.deployment,
            self.links.repository_link(&self.record.repository()?),
            self.links.user_link(self.record)?
        ))
    }

    /// 缺省描述渲染为空行
    fn description(&self) -> FormatResult<String> {
        Ok(self
            .record
            .optional_text("deployment_status.description")?
            .unwrap_or_default())
    }

    pub fn success(&self) -> FormatResult<String> {
        Ok(format!("{} succeded :metal:.", self.prefix()?))
    }

    pub fn pending(&self) -> FormatResult<String> {
        Ok(format!("{} is still pending.", self.prefix()?))
    }

    pub fn error(&self) -> FormatResult<String> {
        Ok(format!("{} errored:\n{}", self.prefix()?, self.description()?))
    }

    pub fn failed(&self) -> FormatResult<String> {
        Ok(format!(
            "{} is failed like :shit::\n{}",
            self.prefix()?,
            self.description()?
        ))
    }
}
