//! 链接构造 - 用户、仓库、组织、部署的 markdown 链接

use serde_json::Value;
use tracing::warn;

use super::avatar::AvatarPolicy;
use super::text::build_link;
use crate::error::FormatResult;
use crate::record::{field_text, EventRecord, Identity, OrganizationRef, RepositoryRef};

/// 身份链接默认头像尺寸
pub const AVATAR_SIZE_HINT: u32 = 18;

/// 外部提交者主页前缀
pub const PROFILE_BASE_URL: &str = "https://github.com/";

/// 链接构造器，持有头像策略
#[derive(Debug, Default)]
pub struct LinkBuilder {
    avatars: AvatarPolicy,
}

impl LinkBuilder {
    pub fn new(avatars: AvatarPolicy) -> Self {
        Self { avatars }
    }

    pub fn avatars(&self) -> &AvatarPolicy {
        &self.avatars
    }

    /// `[login](html_url)`，头像探测通过时前缀 `![](avatar) `
    pub fn identity_link(&self, identity: &Identity) -> String {
        self.identity_link_sized(identity, AVATAR_SIZE_HINT)
    }

    pub fn identity_link_sized(&self, identity: &Identity, size_hint: u32) -> String {
        let avatar = format!("{}&s={}", identity.avatar_url, size_hint);
        self.decorate(&avatar, build_link(&identity.login, &identity.html_url))
    }

    /// 事件发送者链接
    pub fn user_link(&self, record: &EventRecord) -> FormatResult<String> {
        Ok(self.identity_link(&record.sender()?))
    }

    pub fn repository_link(&self, repo: &RepositoryRef) -> String {
        build_link(&repo.full_name, &repo.html_url)
    }

    /// 组织头像不追加尺寸参数
    pub fn organization_link(&self, org: &OrganizationRef) -> String {
        self.decorate(&org.avatar_url, build_link(&org.login, &org.url))
    }

    /// 推送提交作者链接
    ///
    /// 有平台用户名时链接到主页，头像固定用 `=18` 宽度修饰且不做尺寸探测；
    /// 外部提交者只返回显示名，不带链接。
    pub fn push_author_link(&self, author: &Value, field: &str) -> FormatResult<String> {
        let name = field_text(author, field, "name")?;
        let username = author
            .get("username")
            .and_then(|v| v.as_str())
            .filter(|u| !u.is_empty());

        let Some(username) = username else {
            return Ok(name);
        };

        let url = format!("{}{}", PROFILE_BASE_URL, username);
        let link = build_link(&name, &url);
        if self.avatars.is_enabled() {
            Ok(format!("![]({}.png =18) {}", url, link))
        } else {
            Ok(link)
        }
    }

    /// `[#id](url)`
    pub fn deployment_link(&self, id: &str, url: &str) -> String {
        build_link(&format!("#{}", id), url)
    }

    fn decorate(&self, avatar: &str, link: String) -> String {
        match self.avatars.should_show_avatar(avatar) {
            Ok(true) => format!("![]({}) {}", avatar, link),
            Ok(false) => link,
            Err(e) => {
                warn!(avatar = %avatar, error = %e, "Avatar probe failed, rendering without avatar");
                link
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::avatar::tests::FixedProbe;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn alice() -> Identity {
        Identity {
            login: "alice".to_string(),
            html_url: "https://x/alice".to_string(),
            avatar_url: "https://a/u/1?v=4".to_string(),
        }
    }

    fn with_probe(size: Option<(u32, u32)>) -> (LinkBuilder, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
        let (probe, calls) = FixedProbe::new(size);
        (
            LinkBuilder::new(AvatarPolicy::new(true, Some(Box::new(probe)))),
            calls,
        )
    }

    #[test]
    fn test_identity_link_without_avatars() {
        let links = LinkBuilder::default();
        assert_eq!(links.identity_link(&alice()), "[alice](https://x/alice)");
    }

    #[test]
    fn test_identity_link_with_small_avatar() {
        let (links, calls) = with_probe(Some((18, 18)));
        assert_eq!(
            links.identity_link(&alice()),
            "![](https://a/u/1?v=4&s=18) [alice](https://x/alice)"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_identity_link_size_hint() {
        let (links, _) = with_probe(Some((16, 16)));
        assert!(links
            .identity_link_sized(&alice(), 16)
            .starts_with("![](https://a/u/1?v=4&s=16) "));
    }

    #[test]
    fn test_probe_failure_falls_back_to_plain_link() {
        let (links, calls) = with_probe(None);
        assert_eq!(links.identity_link(&alice()), "[alice](https://x/alice)");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_organization_link_uses_api_url_and_raw_avatar() {
        let org = OrganizationRef {
            login: "acme".to_string(),
            url: "https://api.x/orgs/acme".to_string(),
            avatar_url: "https://a/o/9".to_string(),
        };
        assert_eq!(
            LinkBuilder::default().organization_link(&org),
            "[acme](https://api.x/orgs/acme)"
        );
        let (links, _) = with_probe(Some((20, 20)));
        assert_eq!(
            links.organization_link(&org),
            "![](https://a/o/9) [acme](https://api.x/orgs/acme)"
        );
    }

    #[test]
    fn test_push_author_link() {
        let author = json!({"name": "Alice Doe", "username": "alice"});
        assert_eq!(
            LinkBuilder::default().push_author_link(&author, "author").unwrap(),
            "[Alice Doe](https://github.com/alice)"
        );

        let (links, calls) = with_probe(Some((460, 460)));
        assert_eq!(
            links.push_author_link(&author, "author").unwrap(),
            "![](https://github.com/alice.png =18) [Alice Doe](https://github.com/alice)"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_push_author_without_username_is_plain_name() {
        let (links, _) = with_probe(Some((18, 18)));
        let author = json!({"name": "External Dev", "email": "dev@example.com"});
        assert_eq!(links.push_author_link(&author, "author").unwrap(), "External Dev");
        let author = json!({"name": "External Dev", "username": ""});
        assert_eq!(links.push_author_link(&author, "author").unwrap(), "External Dev");
    }

    #[test]
    fn test_deployment_link() {
        assert_eq!(
            LinkBuilder::default().deployment_link("42", "https://api.x/deployments/42"),
            "[#42](https://api.x/deployments/42)"
        );
    }
}
