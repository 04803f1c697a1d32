use serde::{Deserialize, Serialize};

use crate::net::{EntityId, PacketFate};

/// 时间线事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEventKind {
    /// 应用层把第 `index` 条消息交给 A
    AppOffer { index: u64, accepted: bool },
    /// 某实体把数据包交给网络；`fate` 是信道的决定
    ToNetwork {
        from: EntityId,
        seq: u32,
        ack: u32,
        len: usize,
        fate: PacketFate,
    },
    /// 数据包到达某实体（`valid` 为校验结果）
    NetworkArrive {
        at: EntityId,
        seq: u32,
        ack: u32,
        valid: bool,
    },
    /// 载荷交付给应用层
    ToApplication { at: EntityId, payload: String },
    TimerStart { entity: EntityId, deadline: f64 },
    TimerStop { entity: EntityId },
    TimerExpire { entity: EntityId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// 虚拟时间（协议时间单位）
    pub t: f64,
    #[serde(flatten)]
    pub kind: TimelineEventKind,
}

#[derive(Debug, Default, Clone)]
pub struct TimelineLogger {
    pub events: Vec<TimelineEvent>,
}

impl TimelineLogger {
    pub fn push(&mut self, ev: TimelineEvent) {
        self.events.push(ev);
    }

    pub fn count(&self, pred: impl Fn(&TimelineEventKind) -> bool) -> usize {
        self.events.iter().filter(|ev| pred(&ev.kind)).count()
    }
}
