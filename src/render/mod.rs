//! 共享渲染原语 - 所有格式化器共用的文本、头像与链接规则

pub mod avatar;
pub mod links;
pub mod text;

pub use avatar::{AvatarPolicy, AvatarProbe, HttpAvatarProbe, MAX_AVATAR_SIZE};
pub use links::LinkBuilder;
pub use text::{build_link, preview, short_hash, Preview};
