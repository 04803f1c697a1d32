//! 模拟网络
//!
//! 持有信道、两个实体的定时器与应用层交付记录；协议引擎通过 `NetCtx`
//! （见 `api.rs`）间接访问这里。

use tracing::{debug, info, trace, warn};

use super::channel::{Channel, ChannelConfig};
use super::deliver_packet::PacketArrival;
use super::id::EntityId;
use super::packet::Packet;
use super::timer::{EntityTimer, TimerExpiry};
use crate::sim::{SimTime, Simulator};
use crate::timeline::{TimelineEventKind, TimelineLogger};

/// 一次应用层交付
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDelivery {
    pub at: EntityId,
    pub time: SimTime,
    pub payload: Vec<u8>,
}

#[derive(Debug)]
pub struct Network {
    pub channel: Channel,
    timers: [EntityTimer; 2],
    pub deliveries: Vec<AppDelivery>,
    pub timeline: Option<TimelineLogger>,
}

impl Network {
    pub fn new(cfg: ChannelConfig) -> Self {
        Self {
            channel: Channel::new(cfg),
            timers: Default::default(),
            deliveries: Vec::new(),
            timeline: None,
        }
    }

    pub fn timer(&self, entity: EntityId) -> &EntityTimer {
        &self.timers[entity.index()]
    }

    /// 实体 `at` 收到的应用层载荷（按交付顺序）
    pub fn delivered_to(&self, at: EntityId) -> impl Iterator<Item = &[u8]> {
        self.deliveries
            .iter()
            .filter(move |d| d.at == at)
            .map(|d| d.payload.as_slice())
    }

    /// 把数据包交给信道；未丢失的包被调度为到达对端的事件。
    #[tracing::instrument(level = "debug", skip(self, pkt, sim), fields(seq = pkt.sequence_number, ack = pkt.ack_number))]
    pub(crate) fn transmit(&mut self, from: EntityId, pkt: Packet, sim: &mut Simulator) {
        let now = sim.now();
        let seq = pkt.sequence_number;
        let ack = pkt.ack_number;
        let len = pkt.payload.len();

        let outcome = self.channel.transmit(from, pkt, now);
        let fate = match &outcome {
            Some((_, _, fate)) => *fate,
            None => super::PacketFate::Lost,
        };
        self.record(
            now,
            TimelineEventKind::ToNetwork {
                from,
                seq,
                ack,
                len,
                fate,
            },
        );

        if let Some((arrive, pkt, _)) = outcome {
            debug!(arrive = %arrive, to = %from.peer(), "调度数据包到达事件");
            sim.schedule(
                arrive,
                PacketArrival {
                    to: from.peer(),
                    pkt,
                },
            );
        }
    }

    pub(crate) fn deliver_up(&mut self, at: EntityId, payload: &[u8], now: SimTime) {
        info!(%at, payload = %String::from_utf8_lossy(payload), "📬 交付应用层");
        self.record(
            now,
            TimelineEventKind::ToApplication {
                at,
                payload: String::from_utf8_lossy(payload).into_owned(),
            },
        );
        self.deliveries.push(AppDelivery {
            at,
            time: now,
            payload: payload.to_vec(),
        });
    }

    /// 启动/重启定时器：旧的超时事件仍在队列中，但会因代数不匹配被忽略。
    pub(crate) fn start_timer(&mut self, entity: EntityId, duration: SimTime, sim: &mut Simulator) {
        if entity != EntityId::A {
            warn!(%entity, "只有发送端 A 应该使用定时器");
        }
        let timer = &mut self.timers[entity.index()];
        if timer.is_running() {
            trace!(%entity, "定时器运行中，重启");
        }
        let deadline = sim.now().saturating_add(duration);
        let generation = timer.start(deadline);
        self.record(
            sim.now(),
            TimelineEventKind::TimerStart {
                entity,
                deadline: deadline.as_units(),
            },
        );
        sim.schedule(deadline, TimerExpiry { entity, generation });
    }

    pub(crate) fn stop_timer(&mut self, entity: EntityId, now: SimTime) {
        if self.timers[entity.index()].stop() {
            self.record(now, TimelineEventKind::TimerStop { entity });
        }
    }

    pub(crate) fn fire_timer(&mut self, entity: EntityId, generation: u64, now: SimTime) -> bool {
        let fired = self.timers[entity.index()].fire(generation);
        if fired {
            debug!(%entity, now = %now, "⏰ 定时器超时");
            self.record(now, TimelineEventKind::TimerExpire { entity });
        }
        fired
    }
}
