//! 测试用事件记录

use serde_json::{json, Value};

use crate::record::EventRecord;

pub(crate) const ALICE: &str = "[alice](https://x/alice)";
pub(crate) const REPO: &str = "[org/repo](https://x/org/repo)";

pub(crate) fn user(login: &str) -> Value {
    json!({
        "login": login,
        "html_url": format!("https://x/{}", login),
        "avatar_url": format!("https://avatars.x/{}?v=4", login),
    })
}

/// 带 sender 和 repository 的记录，`extra` 的顶层键覆盖默认值
pub(crate) fn record(extra: Value) -> EventRecord {
    let mut base = json!({
        "sender": user("alice"),
        "repository": {
            "full_name": "org/repo",
            "html_url": "https://x/org/repo",
            "description": "A test repository",
            "owner": {"login": "org", "name": null},
        },
    });
    if let (Some(base_map), Value::Object(extra_map)) = (base.as_object_mut(), extra) {
        for (key, value) in extra_map {
            base_map.insert(key, value);
        }
    }
    EventRecord::new(base)
}
