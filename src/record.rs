//! 事件记录 - webhook 投递的原始 JSON 及其派生投影
//!
//! `EventRecord` 只读，按点分路径取字段；缺失字段统一报告 `MissingField`。
//! `null` 视为存在，渲染为空字符串。

use serde_json::Value;

use crate::error::{FormatError, FormatResult};

/// 一次 webhook 投递的事件记录
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    data: Value,
}

impl EventRecord {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// 从原始请求体解析
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes).map(Self::new)
    }

    pub fn as_value(&self) -> &Value {
        &self.data
    }

    /// 按点分路径查找必需字段
    pub fn get(&self, path: &str) -> FormatResult<&Value> {
        lookup(&self.data, path)
    }

    /// 可选字段：缺失或为 null 时返回 None
    pub fn find(&self, path: &str) -> Option<&Value> {
        lookup(&self.data, path).ok().filter(|v| !v.is_null())
    }

    pub fn contains(&self, path: &str) -> bool {
        lookup(&self.data, path).is_ok()
    }

    /// 必需字段的文本形式
    pub fn text(&self, path: &str) -> FormatResult<String> {
        self.get(path).map(scalar_text)
    }

    /// 必需字段，允许为 null
    pub fn optional_text(&self, path: &str) -> FormatResult<Option<String>> {
        let value = self.get(path)?;
        Ok((!value.is_null()).then(|| scalar_text(value)))
    }

    /// 必需字段，按 truthiness 解释（null / false / 0 / 空串为假）
    pub fn flag(&self, path: &str) -> FormatResult<bool> {
        self.get(path).map(truthy)
    }

    /// 必需的数组字段；null 视为空数组
    pub fn array(&self, path: &str) -> FormatResult<&[Value]> {
        match self.get(path)? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(&[]),
            _ => Err(FormatError::InvalidField {
                field: path.to_string(),
                expected: "an array",
            }),
        }
    }

    pub fn identity(&self, path: &str) -> FormatResult<Identity> {
        Identity::from_value(self.get(path)?, path)
    }

    /// 事件发送者
    pub fn sender(&self) -> FormatResult<Identity> {
        self.identity("sender")
    }

    pub fn repository(&self) -> FormatResult<RepositoryRef> {
        let repo = self.get("repository")?;
        Ok(RepositoryRef {
            full_name: field_text(repo, "repository", "full_name")?,
            html_url: field_text(repo, "repository", "html_url")?,
        })
    }

    pub fn organization(&self) -> FormatResult<OrganizationRef> {
        let org = self.get("organization")?;
        Ok(OrganizationRef {
            login: field_text(org, "organization", "login")?,
            url: field_text(org, "organization", "url")?,
            avatar_url: field_text(org, "organization", "avatar_url")?,
        })
    }
}

impl From<Value> for EventRecord {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}

/// 用户/账号身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub login: String,
    pub html_url: String,
    pub avatar_url: String,
}

impl Identity {
    /// `prefix` 仅用于错误信息中的字段路径
    pub fn from_value(value: &Value, prefix: &str) -> FormatResult<Self> {
        Ok(Self {
            login: field_text(value, prefix, "login")?,
            html_url: field_text(value, prefix, "html_url")?,
            avatar_url: field_text(value, prefix, "avatar_url")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub full_name: String,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRef {
    pub login: String,
    pub url: String,
    pub avatar_url: String,
}

/// 标量的显示文本：字符串原样，数字/布尔转字符串，null 为空
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// 在子对象中取必需字段，错误路径为 `prefix.key`
pub(crate) fn field_text(value: &Value, prefix: &str, key: &str) -> FormatResult<String> {
    value
        .get(key)
        .map(scalar_text)
        .ok_or_else(|| FormatError::missing(format!("{}.{}", prefix, key)))
}

fn lookup<'a>(root: &'a Value, path: &str) -> FormatResult<&'a Value> {
    let mut current = root;
    for (idx, segment) in path.split('.').enumerate() {
        current = current.get(segment).ok_or_else(|| {
            let walked: Vec<&str> = path.split('.').take(idx + 1).collect();
            FormatError::missing(walked.join("."))
        })?;
    }
    Ok(current)
}
