//! 事件与世界
//!
//! 应用层发送、定时器超时、数据包到达都实现 `Event`；它们操作的状态
//! （两端协议实体、信道、统计）放在实现了 `World` 的业务层结构里。

use super::simulator::Simulator;
use super::time::SimTime;
use std::any::Any;
use std::cmp::Ordering;

/// 可被调度执行的事件。`self: Box<Self>` 让事件在执行时交出所有权。
pub trait Event: 'static {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World);
}

/// 仿真世界
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// 每执行完一个事件后回调一次。
    fn on_tick(&mut self, _sim: &mut Simulator) {}
}

/// 队列条目，按 (时间, 插入序号) 升序排列。
pub(crate) struct Queued {
    pub(crate) key: (SimTime, u64),
    pub(crate) ev: Box<dyn Event>,
}

impl Queued {
    pub(crate) fn at(&self) -> SimTime {
        self.key.0
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Queued {}
