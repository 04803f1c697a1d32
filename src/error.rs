//! 错误类型
//!
//! 协议层、报文构造与配置加载的错误。信道损坏与丢包不是错误：
//! 它们由校验和与超时重传在协议内部处理，只体现在统计中。

use std::path::PathBuf;

use crate::net::EntityId;

#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    #[error("payload too long: {len} bytes (max {max})")]
    PayloadTooLong { len: usize, max: usize },
}

/// 发送端拒绝应用层消息。消息已被丢弃，不会重试。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("outbound buffer full ({capacity} packets), message dropped")]
    CapacityExceeded { capacity: usize },

    /// 交替位的序号按载荷长度推进，空消息会让下一条消息复用同一序号。
    #[error("empty message rejected: the sequence number would not advance")]
    EmptyPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtoError {
    /// 定时器只应在存在未确认报文时启动；触发时缓冲为空说明状态机不变量被破坏。
    #[error("timer expired at entity {entity} with no outstanding packet")]
    NothingOutstanding { entity: EntityId },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("num_messages must be at least 1")]
    NoMessages,

    #[error("window ({window}) must be between 1 and buffer_capacity ({buffer_capacity})")]
    InvalidWindow { window: usize, buffer_capacity: usize },

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
