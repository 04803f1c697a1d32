//! 仿真器
//!
//! 离散事件仿真器：维护虚拟时钟与事件队列，一次只执行一个事件，
//! 每个事件处理函数执行完毕后才取下一个事件（无抢占、无并发）。

use super::event::{Event, Queued, World};
use super::time::SimTime;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    executed: u64,
    q: BinaryHeap<Reverse<Queued>>,
}

impl Simulator {
    /// 当前虚拟时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 已执行的事件总数
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 调度事件在 `at` 执行。早于当前时间的请求会被拉到 `now`。
    #[tracing::instrument(level = "trace", skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = %at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        let at = at.max(self.now);
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(Reverse(Queued {
            key: (at, seq),
            ev: Box::new(ev),
        }));
        trace!(seq, queue_size = self.q.len(), "事件已加入队列");
    }

    /// 在 `now + delay` 调度事件。
    pub fn schedule_in<E: Event>(&mut self, delay: SimTime, ev: E) {
        let at = self.now.saturating_add(delay);
        self.schedule(at, ev);
    }

    fn step(&mut self, Reverse(item): Reverse<Queued>, world: &mut dyn World) {
        self.now = item.at();
        self.executed += 1;
        debug!(
            event_num = self.executed,
            now = %self.now,
            seq = item.key.1,
            remaining_queue = self.q.len(),
            "执行事件"
        );
        item.ev.execute(self, world);
        world.on_tick(self);
    }

    /// 运行直到事件队列为空或到达 `until`（含 `until` 时刻的事件）。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        while let Some(Reverse(top)) = self.q.peek() {
            if top.at() > until {
                break;
            }
            let Some(item) = self.q.pop() else {
                break;
            };
            self.step(item, world);
        }
        self.now = self.now.max(until);
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        info!(queue_size = self.q.len(), "▶️  开始运行仿真");
        let start = self.executed;
        while let Some(item) = self.q.pop() {
            self.step(item, world);
        }
        info!(
            total_events = self.executed - start,
            final_time = %self.now,
            "✅ 仿真完成"
        );
    }
}
