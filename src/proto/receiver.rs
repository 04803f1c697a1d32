//! 接收端（B）状态机，两种协议共用
//!
//! 只记住最后发出的一个 ACK：
//! - 损坏的包：有 ACK 记录就重发它，否则什么都不做（等发送端超时）；
//! - 期待的下一个包：交付应用层一次，发送新 ACK 并替换记录；
//! - 重复包或（Go-Back-N 下的）序号跳跃：只重发记录的 ACK，不交付。
//!
//! 接收端从不缓存乱序数据。

use tracing::{debug, trace};

use crate::net::{EntityId, NetApi, Packet, ReceiverStats};

/// Go-Back-N 发送端的首个序号。接收端在没有 ACK 记录时只接受这个序号，
/// 否则首包丢失后到达的后续包会被当成第一个交付，破坏按序交付。
pub const GBN_INITIAL_SEQ: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverMode {
    /// 与上一个 ACK 的序号不同即为新包
    AlternatingBit,
    /// 必须恰好是上一个 ACK 的序号 + 1
    GoBackN,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrival {
    Next,
    Duplicate,
    Gap,
}

#[derive(Debug, Clone)]
pub struct Receiver {
    mode: ReceiverMode,
    last_ack: Option<Packet>,
}

impl Receiver {
    pub fn new(mode: ReceiverMode) -> Self {
        Self {
            mode,
            last_ack: None,
        }
    }

    pub fn init(&mut self) {
        self.last_ack = None;
    }

    pub fn last_ack(&self) -> Option<&Packet> {
        self.last_ack.as_ref()
    }

    fn classify(&self, pkt: &Packet) -> Arrival {
        let seq = pkt.sequence_number();
        match (self.mode, &self.last_ack) {
            (ReceiverMode::AlternatingBit, None) => Arrival::Next,
            (ReceiverMode::AlternatingBit, Some(last)) if last.sequence_number() == seq => {
                Arrival::Duplicate
            }
            (ReceiverMode::AlternatingBit, Some(_)) => Arrival::Next,
            (ReceiverMode::GoBackN, None) if seq == GBN_INITIAL_SEQ => Arrival::Next,
            (ReceiverMode::GoBackN, None) => Arrival::Gap,
            (ReceiverMode::GoBackN, Some(last)) if last.sequence_number() == seq => {
                Arrival::Duplicate
            }
            (ReceiverMode::GoBackN, Some(last))
                if last.sequence_number().wrapping_add(1) == seq =>
            {
                Arrival::Next
            }
            (ReceiverMode::GoBackN, Some(_)) => Arrival::Gap,
        }
    }

    pub fn on_arrival(&mut self, pkt: Packet, api: &mut dyn NetApi, stats: &mut ReceiverStats) {
        stats.arrivals += 1;

        if !pkt.is_valid() {
            stats.corrupt += 1;
            debug!(seq = pkt.sequence_number(), "B 收到损坏的包");
            self.resend_last_ack(api, stats);
            return;
        }
        stats.valid += 1;

        match self.classify(&pkt) {
            Arrival::Next => {
                api.deliver_to_application(EntityId::B, pkt.payload());
                stats.delivered += 1;

                let ack = Packet::ack(pkt.sequence_number(), pkt.ack_number());
                trace!(seq = ack.sequence_number(), "B 发送 ACK");
                api.send_to_network(EntityId::B, ack.clone());
                stats.acks_sent += 1;
                self.last_ack = Some(ack);
            }
            Arrival::Duplicate => {
                stats.duplicates += 1;
                debug!(seq = pkt.sequence_number(), "B 收到重复包");
                self.resend_last_ack(api, stats);
            }
            Arrival::Gap => {
                stats.gaps += 1;
                debug!(seq = pkt.sequence_number(), "B 收到乱序包，丢弃");
                self.resend_last_ack(api, stats);
            }
        }
    }

    fn resend_last_ack(&self, api: &mut dyn NetApi, stats: &mut ReceiverStats) {
        if let Some(ack) = &self.last_ack {
            api.send_to_network(EntityId::B, ack.clone());
            stats.acks_resent += 1;
        }
    }
}
