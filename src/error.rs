//! 错误类型
//!
//! 格式化层只返回这里的类型化错误，上层（配置、投递、HTTP）统一用 `anyhow` 包装。

use thiserror::Error;

use crate::formatter::EventKind;

/// 事件格式化错误
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    /// 事件记录中缺少必需字段（点分路径，如 `pull_request.title`）
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    /// 字段存在但类型不符
    #[error("field `{field}` is not {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    /// 没有对应格式化器的 webhook 事件
    #[error("unsupported event `{event}`")]
    UnknownEvent { event: String },

    /// 格式化器不支持的 action
    #[error("unsupported action `{action}` for {kind} events")]
    UnknownAction { kind: EventKind, action: String },
}

impl FormatError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// 头像尺寸探测失败
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to fetch avatar: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("avatar request returned HTTP {0}")]
    Status(u16),

    #[error("failed to decode avatar image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to read avatar image: {0}")]
    Io(#[from] std::io::Error),
}

pub type FormatResult<T> = std::result::Result<T, FormatError>;
