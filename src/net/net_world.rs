//! 网络世界实现
//!
//! 定义仿真的世界（World）：模拟网络、协议引擎、统计与消息源。

use super::network::Network;
use super::stats::Stats;
use crate::proto::ReliableTransport;
use crate::sim::{SimTime, Simulator, World};
use std::any::Any;

/// 应用层消息源的状态
#[derive(Debug, Clone, Default)]
pub struct Traffic {
    /// 要生成的消息总数
    pub num_messages: u64,
    /// 平均消息间隔（单位）
    pub avg_delay: f64,
    pub generated: u64,
    pub accepted: u64,
}

pub struct NetWorld {
    pub net: Network,
    pub transport: Box<dyn ReliableTransport>,
    pub stats: Stats,
    pub traffic: Traffic,
    /// 最后一个被执行事件的时间
    pub last_event_at: SimTime,
}

impl NetWorld {
    pub fn new(net: Network, transport: Box<dyn ReliableTransport>, traffic: Traffic) -> Self {
        Self {
            net,
            transport,
            stats: Stats::default(),
            traffic,
            last_event_at: SimTime::ZERO,
        }
    }
}

impl World for NetWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, sim: &mut Simulator) {
        self.last_event_at = sim.now();
    }
}
