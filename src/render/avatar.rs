//! 头像策略 - 决定身份链接前是否附带头像图片
//!
//! 源平台按 URL 参数返回指定尺寸的方形头像，但不可信；
//! 这里实际下载图片并检查像素尺寸，超过 20px 的头像会破坏聊天排版。
//!
//! 探测结果不缓存，每次渲染都会重新请求。

use std::io::Cursor;
use std::time::Duration;

use image::ImageReader;
use tracing::debug;

use crate::error::ProbeError;

/// 允许显示的最大头像边长（像素）
pub const MAX_AVATAR_SIZE: u32 = 20;

/// 头像尺寸探测器：给定 URL 返回 (宽, 高)
pub trait AvatarProbe: Send + Sync {
    fn dimensions(&self, url: &str) -> Result<(u32, u32), ProbeError>;
}

/// 基于阻塞 HTTP 请求 + 图片解码的探测器
pub struct HttpAvatarProbe {
    client: reqwest::blocking::Client,
}

impl HttpAvatarProbe {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Cannot create avatar probe HTTP client: {}", e))?;
        Ok(Self { client })
    }
}

impl AvatarProbe for HttpAvatarProbe {
    fn dimensions(&self, url: &str) -> Result<(u32, u32), ProbeError> {
        let start = std::time::Instant::now();
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        let bytes = response.bytes()?;
        let dimensions = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_dimensions()?;

        debug!(
            url = %url,
            width = dimensions.0,
            height = dimensions.1,
            elapsed_ms = start.elapsed().as_millis(),
            "Probed avatar size"
        );
        Ok(dimensions)
    }
}

/// 头像显示策略
///
/// `show_avatars` 是进程级开关；`probe` 为 None 表示没有图片解码能力，
/// 此时无论开关如何都不显示头像。
pub struct AvatarPolicy {
    show_avatars: bool,
    probe: Option<Box<dyn AvatarProbe>>,
}

impl AvatarPolicy {
    pub fn new(show_avatars: bool, probe: Option<Box<dyn AvatarProbe>>) -> Self {
        Self {
            show_avatars,
            probe,
        }
    }

    /// 永不显示头像，也不发起任何请求
    pub fn disabled() -> Self {
        Self::new(false, None)
    }

    /// 开关打开且具备探测能力
    pub fn is_enabled(&self) -> bool {
        self.show_avatars && self.probe.is_some()
    }

    /// 头像宽高都不超过 20px 时返回 true
    ///
    /// 开关关闭时立即返回 false，不发请求。探测失败原样返回给调用方。
    pub fn should_show_avatar(&self, avatar_url: &str) -> Result<bool, ProbeError> {
        let probe = match (&self.probe, self.show_avatars) {
            (Some(probe), true) => probe,
            _ => return Ok(false),
        };

        let (width, height) = probe.dimensions(avatar_url)?;
        Ok(width <= MAX_AVATAR_SIZE && height <= MAX_AVATAR_SIZE)
    }
}

impl Default for AvatarPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for AvatarPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarPolicy")
            .field("show_avatars", &self.show_avatars)
            .field("has_probe", &self.probe.is_some())
            .finish()
    }
}
