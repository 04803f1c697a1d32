//! 协议时间线记录（用于离线分析/回放）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **轻量**：只在启用时记录，默认关闭

mod types;

pub use types::{TimelineEvent, TimelineEventKind, TimelineLogger};
