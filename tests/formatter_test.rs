//! 端到端格式化测试：原始 webhook JSON → 最终消息

use mattermost_github::dispatch::render;
use mattermost_github::{
    format_event, preview, AvatarPolicy, AvatarProbe, EventKind, EventRecord, FormatError,
    LinkBuilder, Preview, ProbeError,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingProbe {
    calls: Arc<AtomicUsize>,
}

impl AvatarProbe for CountingProbe {
    fn dimensions(&self, _url: &str) -> Result<(u32, u32), ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((18, 18))
    }
}

fn sender() -> Value {
    json!({"login": "alice", "html_url": "https://x/alice", "avatar_url": "https://a/alice?v=4"})
}

fn repository() -> Value {
    json!({"full_name": "org/repo", "html_url": "https://x/org/repo"})
}

fn pull_request_opened() -> EventRecord {
    EventRecord::new(json!({
        "action": "opened",
        "sender": sender(),
        "repository": repository(),
        "pull_request": {
            "number": 42,
            "title": "Fix bug",
            "html_url": "https://x/pr/42",
            "body": "line1\nline2",
            "merged": false,
        },
    }))
}

fn commit(id: &str, message: &str) -> Value {
    json!({
        "id": id,
        "url": format!("https://x/org/repo/commit/{}", id),
        "message": message,
        "author": {"name": "Alice", "username": "alice"},
    })
}

#[test]
fn test_pull_request_opened_end_to_end() {
    let links = LinkBuilder::new(AvatarPolicy::disabled());
    let msg = format_event(EventKind::PullRequest, "opened", &pull_request_opened(), &links).unwrap();
    assert_eq!(
        msg,
        "[alice](https://x/alice) opened new pull request [#42 Fix bug](https://x/pr/42) in [org/repo](https://x/org/repo):\n> line1\n> line2"
    );
}

#[test]
fn test_disabled_switch_never_probes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let probe = CountingProbe { calls: calls.clone() };
    let links = LinkBuilder::new(AvatarPolicy::new(false, Some(Box::new(probe))));

    render("pull_request", &pull_request_opened(), &links).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_enabled_switch_decorates_sender() {
    let calls = Arc::new(AtomicUsize::new(0));
    let probe = CountingProbe { calls: calls.clone() };
    let links = LinkBuilder::new(AvatarPolicy::new(true, Some(Box::new(probe))));

    let msg = render("pull_request", &pull_request_opened(), &links).unwrap().unwrap();
    assert!(msg.starts_with("![](https://a/alice?v=4&s=18) [alice](https://x/alice) opened"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_push_commit_lines() {
    let record = EventRecord::new(json!({
        "ref": "refs/heads/main",
        "deleted": false,
        "forced": false,
        "sender": sender(),
        "repository": repository(),
        "commits": [
            commit("aaaaaaa111", "one"),
            commit("bbbbbbb222", "two"),
            commit("ccccccc333", "three"),
        ],
        "head_commit": commit("ccccccc333", "three"),
    }));
    let msg = render("push", &record, &LinkBuilder::default()).unwrap().unwrap();

    assert!(msg.contains("pushed 3 changesets"));
    let commit_lines: Vec<&str> = msg.lines().filter(|l| l.starts_with("- [`")).collect();
    assert_eq!(commit_lines.len(), 3);
    for (line, hash) in commit_lines.iter().zip(["aaaaaaa", "bbbbbbb", "ccccccc"]) {
        assert!(line.starts_with(&format!("- [`{}`]", hash)), "{}", line);
    }
}

#[test]
fn test_push_head_commit_fallback() {
    let record = EventRecord::new(json!({
        "ref": "refs/heads/main",
        "deleted": false,
        "forced": false,
        "sender": sender(),
        "repository": repository(),
        "commits": [],
        "head_commit": commit("ddddddd444", "only"),
    }));
    let msg = render("push", &record, &LinkBuilder::default()).unwrap().unwrap();
    assert!(msg.contains("pushed 1 changeset to"));
    assert_eq!(msg.lines().filter(|l| l.starts_with("- [`")).count(), 1);
    assert!(msg.contains("[`ddddddd`](https://x/org/repo/commit/ddddddd444)"));
}

#[test]
fn test_deployment_status_error_without_description() {
    let record = EventRecord::new(json!({
        "sender": sender(),
        "repository": repository(),
        "deployment": {"id": 9, "url": "https://api.x/deployments/9"},
        "deployment_status": {"state": "error", "description": null},
    }));
    let msg = render("deployment_status", &record, &LinkBuilder::default())
        .unwrap()
        .unwrap();
    assert_eq!(
        msg,
        "Deployment [#9](https://api.x/deployments/9) at  [org/repo](https://x/org/repo) triggered by [alice](https://x/alice) errored:\n"
    );
}

#[test]
fn test_missing_sender_fails_closed() {
    let record = EventRecord::new(json!({
        "repository": repository(),
        "ref_type": "branch",
        "ref": "main",
    }));
    assert_eq!(
        render("create", &record, &LinkBuilder::default()).unwrap_err(),
        FormatError::MissingField {
            field: "sender".to_string()
        }
    );
}

#[test]
fn test_preview_laws() {
    let options = Preview {
        separator: "\n> ",
        max_len: 10,
        suffix: "…",
    };
    let single = "a single very long line that goes on and on";
    assert_eq!(preview(Some(single), options).as_deref(), Some(single));
    assert_eq!(preview(None, options), None);
    assert_eq!(preview(Some(""), options).as_deref(), Some(""));

    let truncated = preview(Some("first line\nsecond line\nthird"), options).unwrap();
    assert!(truncated.chars().count() <= 10);
    assert!(truncated.ends_with('…'));
}
