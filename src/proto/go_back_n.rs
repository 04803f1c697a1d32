//! Go-Back-N（滑动窗口，累计确认）
//!
//! 发送端缓冲所有已接收但尚未被累计确认的报文（按发送顺序）。缓冲中
//! 前 `window` 个报文是“窗口内”的，会被发上网络；窗口之外的报文只排队，
//! 等 ACK 推进窗口或超时时再发。超时重传整个窗口，而不是只重传队首。
//!
//! 序号按 u32 计数，单次仿真远不会回绕，比较直接使用数值大小。

use tracing::{debug, info, trace};

use super::receiver::{Receiver, ReceiverMode};
use super::{Protocol, ReliableTransport};
use crate::error::{ProtoError, SendError};
use crate::net::{EntityId, Message, NetApi, Packet, SenderStats, Stats};
use crate::queue::BoundedQueue;
use crate::sim::SimTime;

/// 窗口大小 N
pub const DEFAULT_WINDOW: usize = 8;
/// 缓冲容量上限（与窗口无关的安全上限）
pub const DEFAULT_BUFFER_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
struct Buffered {
    pkt: Packet,
    transmitted: bool,
}

/// Go-Back-N 发送端（A）
///
/// ```text
///  base                        next_sequence_number
///   │<── window (N) ──>│               │
///   ├──────────────────┼───────────────┤
///   │ 已发送、未确认    │ 已缓冲、未发送 │
/// ```
#[derive(Debug, Clone)]
pub struct GbnSender {
    base: u32,
    next_sequence_number: u32,
    window: usize,
    buffer: BoundedQueue<Buffered>,
    timeout: SimTime,
}

impl GbnSender {
    pub fn new(window: usize, buffer_capacity: usize, timeout: SimTime) -> Self {
        Self {
            base: 0,
            next_sequence_number: 0,
            window,
            buffer: BoundedQueue::new(buffer_capacity),
            timeout,
        }
    }

    pub fn init(&mut self) {
        self.base = 0;
        self.next_sequence_number = 0;
        self.buffer.clear();
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn next_sequence_number(&self) -> u32 {
        self.next_sequence_number
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// 缓冲中的报文数（已发送 + 排队）
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// 已发上网络但尚未确认的报文数，不超过窗口大小
    pub fn in_flight(&self) -> usize {
        self.buffer.iter().filter(|b| b.transmitted).count()
    }

    /// 缓冲中报文的序号（按发送顺序）
    pub fn buffered_seqs(&self) -> impl Iterator<Item = u32> + '_ {
        self.buffer.iter().map(|b| b.pkt.sequence_number())
    }

    pub fn on_send(
        &mut self,
        msg: Message,
        api: &mut dyn NetApi,
        stats: &mut SenderStats,
    ) -> Result<(), SendError> {
        stats.offered += 1;

        let seq = self.next_sequence_number;
        let position = self.buffer.len();
        let pkt = Packet::from_message(seq, seq, msg);
        let entry = Buffered {
            pkt,
            transmitted: false,
        };
        if self.buffer.offer(entry).is_err() {
            stats.dropped += 1;
            debug!(seq, "A 发送缓冲已满，丢弃新消息");
            return Err(SendError::CapacityExceeded {
                capacity: self.buffer.capacity(),
            });
        }
        self.next_sequence_number = seq.wrapping_add(1);

        // 按插入前的位置判断：突发时整窗 N 个报文都立即发出
        if position < self.window {
            self.fill_window(api);
        } else {
            trace!(seq, position, "窗口已满，报文排队");
        }

        // 定时器总是覆盖最早的未确认报文
        if self.base == seq {
            api.start_timer(EntityId::A, self.timeout);
        }
        Ok(())
    }

    pub fn on_arrival(&mut self, ack: Packet, api: &mut dyn NetApi, stats: &mut SenderStats) {
        stats.ack_arrivals += 1;

        if !ack.is_valid() {
            stats.corrupt_acks += 1;
            debug!("A 收到损坏的 ACK");
            return;
        }

        let acked = ack.ack_number();
        if ack.sequence_number() < self.base
            || acked < self.base
            || acked >= self.next_sequence_number
            || self.buffer.is_empty()
        {
            stats.stale_acks += 1;
            trace!(acked, base = self.base, "A 忽略旧 ACK");
            return;
        }
        stats.acks_ok += 1;

        let mut retired = 0usize;
        while self
            .buffer
            .front()
            .is_some_and(|b| b.pkt.sequence_number() <= acked)
        {
            self.buffer.pop_front();
            retired += 1;
        }
        self.base = acked.wrapping_add(1);
        info!(acked, retired, base = self.base, "✅ A 累计确认");

        if self.buffer.is_empty() {
            api.stop_timer(EntityId::A);
        } else {
            api.start_timer(EntityId::A, self.timeout);
            self.fill_window(api);
        }
    }

    pub fn on_timeout(&mut self, api: &mut dyn NetApi, stats: &mut SenderStats) -> Result<(), ProtoError> {
        if self.buffer.is_empty() {
            return Err(ProtoError::NothingOutstanding {
                entity: EntityId::A,
            });
        }
        stats.timeouts += 1;

        let mut resent = 0u64;
        for entry in self.buffer.iter_mut().take(self.window) {
            api.send_to_network(EntityId::A, entry.pkt.clone());
            entry.transmitted = true;
            resent += 1;
        }
        stats.retransmissions += resent;
        debug!(resent, base = self.base, "A 超时，回退重传窗口");

        api.start_timer(EntityId::A, self.timeout);
        Ok(())
    }

    /// 发送窗口内尚未发过的报文
    fn fill_window(&mut self, api: &mut dyn NetApi) {
        for entry in self.buffer.iter_mut().take(self.window) {
            if !entry.transmitted {
                trace!(seq = entry.pkt.sequence_number(), "A 发送数据包");
                api.send_to_network(EntityId::A, entry.pkt.clone());
                entry.transmitted = true;
            }
        }
    }
}

/// Go-Back-N 协议的两端
#[derive(Debug, Clone)]
pub struct GoBackN {
    pub sender: GbnSender,
    pub receiver: Receiver,
}

impl GoBackN {
    pub fn new(window: usize, buffer_capacity: usize, timeout: SimTime) -> Self {
        Self {
            sender: GbnSender::new(window, buffer_capacity, timeout),
            receiver: Receiver::new(ReceiverMode::GoBackN),
        }
    }
}

impl Default for GoBackN {
    fn default() -> Self {
        Self::new(
            DEFAULT_WINDOW,
            DEFAULT_BUFFER_CAPACITY,
            SimTime::from_units(super::DEFAULT_TIMEOUT_UNITS),
        )
    }
}

impl ReliableTransport for GoBackN {
    fn protocol(&self) -> Protocol {
        Protocol::GoBackN
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
        self.sender.buffered()
    }
}
