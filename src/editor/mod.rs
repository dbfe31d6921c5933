//! 列表编辑器
//!
//! - `AuthorList` - 1~3 位作者，索引 0 为通讯作者
//! - `Topics` - 固定 4 个槽位的主题

pub mod authors;
pub mod topics;

pub use authors::{AuthorList, MAX_AUTHORS};
pub use topics::{Topics, TOPIC_SLOTS};
