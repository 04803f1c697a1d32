//! 交替位协议（停等，窗口为 1）
//!
//! 序号不是 0/1 交替，而是一个按载荷长度递增的计数器；报文的 ack 字段
//! 由 [`ack_marker`] 派生（序号 + 载荷长度），它只是一个自洽的标记值，
//! 不是对端确认号的回显。

use tracing::{debug, info, trace};

use super::receiver::{Receiver, ReceiverMode};
use super::{Protocol, ReliableTransport};
use crate::error::{ProtoError, SendError};
use crate::net::{EntityId, Message, NetApi, Packet, SenderStats, Stats};
use crate::queue::BoundedQueue;
use crate::sim::SimTime;

/// 同时在途的报文数
pub const SLOT_CAPACITY: usize = 1;

/// 交替位数据包 ack 字段的派生规则。
pub fn ack_marker(sequence_number: u32, payload_len: usize) -> u32 {
    sequence_number.wrapping_add(payload_len as u32)
}

/// 交替位发送端（A）
#[derive(Debug, Clone)]
pub struct AltBitSender {
    sequence_number: u32,
    slot: BoundedQueue<Packet>,
    timeout: SimTime,
}

impl AltBitSender {
    pub fn new(timeout: SimTime) -> Self {
        Self {
            sequence_number: 0,
            slot: BoundedQueue::new(SLOT_CAPACITY),
            timeout,
        }
    }

    pub fn init(&mut self) {
        self.sequence_number = 0;
        self.slot.clear();
    }

    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    pub fn outstanding(&self) -> Option<&Packet> {
        self.slot.front()
    }

    pub fn on_send(
        &mut self,
        msg: Message,
        api: &mut dyn NetApi,
        stats: &mut SenderStats,
    ) -> Result<(), SendError> {
        stats.offered += 1;

        let seq = self.sequence_number;
        let len = msg.len();
        if len == 0 {
            stats.dropped += 1;
            debug!(seq, "A 拒绝空消息");
            return Err(SendError::EmptyPayload);
        }
        let pkt = Packet::from_message(seq, ack_marker(seq, len), msg);
        if self.slot.offer(pkt.clone()).is_err() {
            stats.dropped += 1;
            debug!(seq, "A 仍有未确认报文，丢弃新消息");
            return Err(SendError::CapacityExceeded {
                capacity: self.slot.capacity(),
            });
        }
        self.sequence_number = seq.wrapping_add(len as u32);

        trace!(seq, len, "A 发送数据包");
        api.send_to_network(EntityId::A, pkt);
        api.start_timer(EntityId::A, self.timeout);
        Ok(())
    }

    pub fn on_arrival(&mut self, ack: Packet, api: &mut dyn NetApi, stats: &mut SenderStats) {
        stats.ack_arrivals += 1;

        if !ack.is_valid() {
            stats.corrupt_acks += 1;
            debug!("A 收到损坏的 ACK，等待超时重传");
            return;
        }

        // 重发的旧 ACK 不能确认当前报文
        let echoes_outstanding = self
            .slot
            .front()
            .is_some_and(|out| out.sequence_number() == ack.sequence_number());
        if !echoes_outstanding {
            stats.stale_acks += 1;
            trace!(seq = ack.sequence_number(), "A 忽略过期 ACK");
            return;
        }

        self.slot.pop_front();
        api.stop_timer(EntityId::A);
        stats.acks_ok += 1;
        info!(seq = ack.sequence_number(), "✅ A 收到确认");
    }

    pub fn on_timeout(&mut self, api: &mut dyn NetApi, stats: &mut SenderStats) -> Result<(), ProtoError> {
        let Some(pkt) = self.slot.front().cloned() else {
            return Err(ProtoError::NothingOutstanding {
                entity: EntityId::A,
            });
        };
        stats.timeouts += 1;
        stats.retransmissions += 1;
        debug!(seq = pkt.sequence_number(), "A 超时重传");
        api.send_to_network(EntityId::A, pkt);
        api.start_timer(EntityId::A, self.timeout);
        Ok(())
    }
}

/// 交替位协议的两端
#[derive(Debug, Clone)]
pub struct AlternatingBit {
    pub sender: AltBitSender,
    pub receiver: Receiver,
}

impl AlternatingBit {
    pub fn new(timeout: SimTime) -> Self {
        Self {
            sender: AltBitSender::new(timeout),
            receiver: Receiver::new(ReceiverMode::AlternatingBit),
        }
    }
}

impl ReliableTransport for AlternatingBit {
    fn protocol(&self) -> Protocol {
        Protocol::AlternatingBit
    }

    fn init(&mut self, entity: EntityId) {
        match entity {
            EntityId::A => self.sender.init(),
            EntityId::B => self.receiver.init(),
        }
    }

    fn on_send(
        &mut self,
        msg: Message,
        api: &mut dyn NetApi,
        stats: &mut Stats,
    ) -> Result<(), SendError> {
        self.sender.on_send(msg, api, &mut stats.sender)
    }

    fn on_arrival(&mut self, at: EntityId, pkt: Packet, api: &mut dyn NetApi, stats: &mut Stats) {
        match at {
            EntityId::A => self.sender.on_arrival(pkt, api, &mut stats.sender),
            EntityId::B => self.receiver.on_arrival(pkt, api, &mut stats.receiver),
        }
    }

    fn on_timeout(&mut self, api: &mut dyn NetApi, stats: &mut Stats) -> Result<(), ProtoError> {
        self.sender.on_timeout(api, &mut stats.sender)
    }

    fn outstanding(&self) -> usize {
        usize::from(self.sender.outstanding().is_some())
    }
}
