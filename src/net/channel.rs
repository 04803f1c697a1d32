//! 不可靠信道
//!
//! 对每个交给网络的数据包依次决定：是否丢失、是否损坏、何时到达。
//! 信道不会乱序：同一方向上的到达时间单调不减。
//! 随机数由固定种子的 `StdRng` 产生，同一种子的仿真完全可复现。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::id::EntityId;
use super::packet::Packet;
use crate::sim::SimTime;

/// 传播时延的固定部分（单位）
const MIN_DELAY_UNITS: f64 = 1.0;
/// 传播时延随机部分的跨度（单位）
const DELAY_SPREAD_UNITS: f64 = 9.0;

/// 损坏时选中载荷字节的概率；其余概率在序号与确认号之间平分。
const CORRUPT_PAYLOAD_SHARE: f64 = 0.75;
const CORRUPT_SEQ_SHARE: f64 = 0.875;

/// 单个数据包在信道中的命运
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketFate {
    Delivered,
    Corrupted,
    Lost,
}

/// 被损坏的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptedField {
    Payload,
    SequenceNumber,
    AckNumber,
}

/// 信道计数器
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ChannelStats {
    pub offered: u64,
    pub lost: u64,
    pub corrupted: u64,
    pub delivered: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    pub loss_prob: f64,
    pub corrupt_prob: f64,
    pub seed: u64,
}

#[derive(Debug)]
pub struct Channel {
    cfg: ChannelConfig,
    rng: StdRng,
    /// 发往各实体的最后一个到达时间，用于保证 FIFO
    last_arrival: [SimTime; 2],
    pub stats: ChannelStats,
}

impl Channel {
    pub fn new(cfg: ChannelConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(cfg.seed),
            cfg,
            last_arrival: [SimTime::ZERO; 2],
            stats: ChannelStats::default(),
        }
    }

    /// [0, 1) 上的均匀采样；消息生成器也从这里取随机数，保证单一随机流。
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// 决定数据包命运。返回 `None` 表示丢失，否则返回（到达时间、可能被改动的包、命运）。
    pub fn transmit(
        &mut self,
        from: EntityId,
        mut pkt: Packet,
        now: SimTime,
    ) -> Option<(SimTime, Packet, PacketFate)> {
        self.stats.offered += 1;
        let to = from.peer();

        if self.cfg.loss_prob > 0.0 && self.rng.gen_bool(self.cfg.loss_prob) {
            self.stats.lost += 1;
            debug!(%from, seq = pkt.sequence_number, "信道丢弃数据包");
            return None;
        }

        let mut fate = PacketFate::Delivered;
        if self.cfg.corrupt_prob > 0.0 && self.rng.gen_bool(self.cfg.corrupt_prob) {
            let field = self.corrupt(&mut pkt);
            self.stats.corrupted += 1;
            fate = PacketFate::Corrupted;
            debug!(%from, ?field, "信道损坏数据包");
        } else {
            self.stats.delivered += 1;
        }

        let last = self.last_arrival[to.index()];
        let delay = MIN_DELAY_UNITS + DELAY_SPREAD_UNITS * self.uniform();
        let arrive = now.max(last).saturating_add(SimTime::from_units_f64(delay));
        self.last_arrival[to.index()] = arrive;
        trace!(%from, %to, arrive = %arrive, "计算到达时间");

        Some((arrive, pkt, fate))
    }

    /// 改动恰好一个字段，且改动后的值一定与原值不同，所以校验和必然失配。
    fn corrupt(&mut self, pkt: &mut Packet) -> CorruptedField {
        let mut x = self.uniform();
        if pkt.payload.is_empty() && x < CORRUPT_PAYLOAD_SHARE {
            x = CORRUPT_PAYLOAD_SHARE + (1.0 - CORRUPT_PAYLOAD_SHARE) * self.uniform();
        }

        if x < CORRUPT_PAYLOAD_SHARE {
            let mask: u8 = self.rng.gen_range(1..=u8::MAX);
            pkt.payload[0] ^= mask;
            CorruptedField::Payload
        } else if x < CORRUPT_SEQ_SHARE {
            let delta: u32 = self.rng.gen_range(1..=u32::MAX);
            pkt.sequence_number = pkt.sequence_number.wrapping_add(delta);
            CorruptedField::SequenceNumber
        } else {
            let delta: u32 = self.rng.gen_range(1..=u32::MAX);
            pkt.ack_number = pkt.ack_number.wrapping_add(delta);
            CorruptedField::AckNumber
        }
    }
}
