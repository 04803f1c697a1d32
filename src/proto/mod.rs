//! 可靠传输协议模块
//!
//! 两种 ARQ 协议引擎（交替位 / Go-Back-N）共享 `ReliableTransport` 接口。
//! 引擎只通过 `NetApi` 与外界交互，统计由调用方以 `&mut Stats` 传入。

pub mod alternating_bit;
pub mod checksum;
pub mod go_back_n;
pub mod receiver;

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::{ProtoError, SendError};
use crate::net::{EntityId, Message, NetApi, Packet, Stats};
use crate::sim::SimTime;

pub use alternating_bit::{AltBitSender, AlternatingBit, ack_marker};
pub use go_back_n::{GbnSender, GoBackN};
pub use receiver::{Receiver, ReceiverMode};

/// 发送端重传间隔（单位）
pub const DEFAULT_TIMEOUT_UNITS: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// 停等协议，窗口为 1
    #[value(alias = "abp")]
    AlternatingBit,
    /// 滑动窗口，累计确认
    #[value(alias = "gbn")]
    GoBackN,
}

impl Protocol {
    /// 按配置构造协议引擎
    pub fn build(self, cfg: &SimConfig) -> Box<dyn ReliableTransport> {
        let timeout = SimTime::from_units(cfg.timeout_units);
        match self {
            Protocol::AlternatingBit => Box::new(AlternatingBit::new(timeout)),
            Protocol::GoBackN => Box::new(GoBackN::new(cfg.window, cfg.buffer_capacity, timeout)),
        }
    }
}

/// 可靠传输协议：A 端发送、B 端接收。
///
/// 所有处理函数都是同步回调，由仿真器逐个事件调用，执行完才处理下一个事件。
pub trait ReliableTransport {
    fn protocol(&self) -> Protocol;

    /// 在任何其他事件之前，对每个实体调用一次。
    fn init(&mut self, entity: EntityId);

    /// 应用层在 A 端有新消息。缓冲满时消息被丢弃并返回 `CapacityExceeded`。
    fn on_send(
        &mut self,
        msg: Message,
        api: &mut dyn NetApi,
        stats: &mut Stats,
    ) -> Result<(), SendError>;

    /// 数据包（可能已损坏）到达实体 `at`。
    fn on_arrival(&mut self, at: EntityId, pkt: Packet, api: &mut dyn NetApi, stats: &mut Stats);

    /// A 端定时器超时。
    fn on_timeout(&mut self, api: &mut dyn NetApi, stats: &mut Stats) -> Result<(), ProtoError>;

    /// A 端尚未被确认的报文数
    fn outstanding(&self) -> usize;
}
