//! 实体标识

use serde::{Deserialize, Serialize};
use std::fmt;

/// 连接两端的协议实体：A 为发送端，B 为接收端。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    A,
    B,
}

impl EntityId {
    /// 对端实体（数据包发往的方向）
    pub fn peer(self) -> EntityId {
        match self {
            EntityId::A => EntityId::B,
            EntityId::B => EntityId::A,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            EntityId::A => 0,
            EntityId::B => 1,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::A => f.write_str("A"),
            EntityId::B => f.write_str("B"),
        }
    }
}
