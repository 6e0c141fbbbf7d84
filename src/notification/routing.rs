//! 路由选择 - 按仓库 / 组织 / 所有者决定投递到哪个 webhook

use std::collections::HashMap;

use crate::config::{WebhookRoute, DEFAULT_ROUTE};
use crate::record::EventRecord;

/// 路由结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision<'a> {
    Deliver {
        key: String,
        route: &'a WebhookRoute,
    },
    /// 路由表中显式设为 null
    Muted { key: String },
    /// 没有匹配项，也没有 default
    Unrouted,
}

/// 依次尝试：仓库全名、组织登录名、仓库所有者登录名、所有者名称、default
pub fn select_route<'a>(
    routes: &'a HashMap<String, Option<WebhookRoute>>,
    record: &EventRecord,
) -> RouteDecision<'a> {
    let candidates = [
        "repository.full_name",
        "organization.login",
        "repository.owner.login",
        "repository.owner.name",
    ]
    .iter()
    .filter_map(|path| record.find(path).and_then(|v| v.as_str()))
    .map(str::to_string)
    .chain(std::iter::once(DEFAULT_ROUTE.to_string()));

    for key in candidates {
        match routes.get(&key) {
            Some(Some(route)) => return RouteDecision::Deliver { key, route },
            Some(None) => return RouteDecision::Muted { key },
            None => continue,
        }
    }
    RouteDecision::Unrouted
}
