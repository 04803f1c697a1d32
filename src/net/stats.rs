//! 统计信息
//!
//! 单一的计数器聚合体，按实体拆成两段：发送端只写 `sender`，接收端只写
//! `receiver`，每个字段只有一个写者。报告中的汇总量与百分比沿用旧版统计
//! 输出的算式（例如先减 1 再相除），仅供参考，不构成正确性约定。

use serde::{Deserialize, Serialize};

use crate::proto::Protocol;

/// 发送端（A）计数器
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderStats {
    /// 应用层交给 A 的消息数（含被丢弃的）
    pub offered: u64,
    /// 因缓冲满被丢弃的消息数
    pub dropped: u64,
    /// 到达 A 的 ACK 数（无论是否损坏）
    pub ack_arrivals: u64,
    /// 推进了发送窗口的有效 ACK
    pub acks_ok: u64,
    pub corrupt_acks: u64,
    /// 校验通过但不对应任何未确认报文的 ACK
    pub stale_acks: u64,
    pub timeouts: u64,
    /// 超时后（重新）发出的报文数
    pub retransmissions: u64,
}

/// 接收端（B）计数器
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverStats {
    pub arrivals: u64,
    pub valid: u64,
    pub corrupt: u64,
    pub duplicates: u64,
    /// Go-Back-N：序号跳跃的到达
    pub gaps: u64,
    /// 交付给应用层的载荷数
    pub delivered: u64,
    pub acks_sent: u64,
    pub acks_resent: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub sender: SenderStats,
    pub receiver: ReceiverStats,
}

/// 旧版统计输出使用的汇总量
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCounters {
    /// 估计丢失数：发出的报文数减去 A 收到的 ACK 数
    pub lost: i64,
    pub corrupt: u64,
    pub successful: u64,
    pub total: u64,
    pub application: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub protocol: Protocol,
    pub counters: LegacyCounters,
    pub lost_pct: f64,
    pub corrupt_pct: f64,
}

fn pct(num: f64, den: f64) -> f64 {
    if den <= 0.0 { 0.0 } else { num / den * 100.0 }
}

impl Stats {
    pub fn legacy(&self) -> LegacyCounters {
        let s = &self.sender;
        let r = &self.receiver;
        let sent = s.offered.saturating_add(s.retransmissions);
        LegacyCounters {
            lost: sent as i64 - s.ack_arrivals as i64,
            corrupt: s.corrupt_acks + r.corrupt,
            successful: s.acks_ok + r.valid,
            total: s.offered + s.timeouts + r.arrivals,
            application: r.delivered,
        }
    }

    pub fn report(&self, protocol: Protocol) -> StatsReport {
        let c = self.legacy();
        let total = c.total as f64;
        let lost = c.lost as f64;
        let corrupt = c.corrupt as f64;
        let lost_pct = pct(lost - 1.0, total);
        let corrupt_pct = match protocol {
            Protocol::AlternatingBit => pct(corrupt, total) * 2.0,
            Protocol::GoBackN => pct(corrupt, total - lost - 1.0),
        };
        StatsReport {
            protocol,
            counters: c,
            lost_pct,
            corrupt_pct,
        }
    }
}
