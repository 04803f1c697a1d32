//! 实体定时器
//!
//! 事件队列不支持撤销，因此用“代数”（generation）实现重启语义：
//! 每次 start/stop 都让代数加一，携带旧代数的超时事件到期时直接忽略。

use tracing::{error, trace, warn};

use super::id::EntityId;
use super::proto_bridge::net_world;
use crate::sim::{Event, SimTime, Simulator, World};

#[derive(Debug, Default, Clone)]
pub struct EntityTimer {
    generation: u64,
    deadline: Option<SimTime>,
}

impl EntityTimer {
    /// 启动（或重启）定时器，返回需要随超时事件携带的代数。
    pub fn start(&mut self, deadline: SimTime) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(deadline);
        self.generation
    }

    /// 停止定时器；未运行时为 no-op，返回是否真的停掉了一个定时器。
    pub fn stop(&mut self) -> bool {
        if self.deadline.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
            true
        } else {
            false
        }
    }

    /// 超时事件到期：代数匹配且仍在运行才算有效触发。
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.deadline.is_some() && generation == self.generation {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<SimTime> {
        self.deadline
    }
}

/// 定时器超时事件
#[derive(Debug)]
pub struct TimerExpiry {
    pub entity: EntityId,
    pub generation: u64,
}

impl Event for TimerExpiry {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let TimerExpiry { entity, generation } = *self;
        let w = net_world(world);
        if !w.net.fire_timer(entity, generation, sim.now()) {
            trace!(%entity, generation, "过期的超时事件，忽略");
            return;
        }
        if entity != EntityId::A {
            warn!(%entity, "只有发送端 A 拥有重传定时器，忽略");
            return;
        }
        w.with_transport(sim, |transport, api, stats| {
            if let Err(err) = transport.on_timeout(api, stats) {
                error!(%entity, %err, "超时处理失败：状态机不变量被破坏");
            }
        });
    }
}
