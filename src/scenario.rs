//! 仿真场景
//!
//! 按 `SimConfig` 搭建世界、驱动应用层消息源并运行到结束。

use serde::Serialize;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::net::{
    ChannelConfig, ChannelStats, EntityId, Message, NetWorld, Network, Stats, StatsReport, Traffic,
    net_world,
};
use crate::proto::Protocol;
use crate::sim::{Event, SimTime, Simulator, World};
use crate::timeline::{TimelineEventKind, TimelineLogger};

/// 第 `index` 条应用层消息：同一个字母重复 20 次，字母按 a..z 循环。
pub fn message_for(index: u64) -> Message {
    let letter = char::from(b'a' + (index % 26) as u8);
    let data: String = std::iter::repeat_n(letter, crate::net::MAX_DATA_SIZE).collect();
    Message::new(data).expect("generated message fits MAX_DATA_SIZE")
}

/// 应用层消息生成事件：把一条消息交给 A，并调度下一条。
#[derive(Debug)]
pub struct GenerateMessage {
    pub index: u64,
}

impl Event for GenerateMessage {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let GenerateMessage { index } = *self;
        let w = net_world(world);

        let msg = message_for(index);
        w.traffic.generated += 1;
        let accepted = w.with_transport(sim, |transport, api, stats| {
            match transport.on_send(msg, api, stats) {
                Ok(()) => true,
                Err(err) => {
                    debug!(index, %err, "应用层消息被丢弃");
                    false
                }
            }
        });
        if accepted {
            w.traffic.accepted += 1;
        }
        w.net
            .record(sim.now(), TimelineEventKind::AppOffer { index, accepted });

        let next = index + 1;
        if next < w.traffic.num_messages {
            let gap = next_gap(&mut w.net, w.traffic.avg_delay);
            sim.schedule_in(gap, GenerateMessage { index: next });
        }
    }
}

/// 消息间隔：均匀分布于 [0, 2 * avg_delay)，均值为 avg_delay。
fn next_gap(net: &mut Network, avg_delay: f64) -> SimTime {
    SimTime::from_units_f64(2.0 * avg_delay * net.channel.uniform())
}

/// 一次运行的结果
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub protocol: Protocol,
    pub messages_generated: u64,
    pub messages_accepted: u64,
    /// B 端按顺序交付给应用层的载荷
    pub delivered: Vec<String>,
    pub stats: Stats,
    pub report: StatsReport,
    pub channel: ChannelStats,
    /// 最后一个事件的虚拟时间（单位）
    pub final_time: f64,
    pub events: u64,
    /// 到达时间上限时仍有未执行的事件
    pub truncated: bool,
}

pub struct Scenario {
    cfg: SimConfig,
    sim: Simulator,
    world: NetWorld,
}

impl Scenario {
    pub fn new(cfg: SimConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let net = Network::new(ChannelConfig {
            loss_prob: cfg.loss_prob,
            corrupt_prob: cfg.corrupt_prob,
            seed: cfg.seed,
        });
        let transport = cfg.protocol.build(&cfg);
        let traffic = Traffic {
            num_messages: cfg.num_messages,
            avg_delay: cfg.avg_delay,
            ..Traffic::default()
        };
        let mut world = NetWorld::new(net, transport, traffic);
        world.transport.init(EntityId::A);
        world.transport.init(EntityId::B);

        let mut sim = Simulator::default();
        let first = next_gap(&mut world.net, cfg.avg_delay);
        sim.schedule(first, GenerateMessage { index: 0 });

        Ok(Self { cfg, sim, world })
    }

    pub fn enable_timeline(&mut self) {
        self.world.net.enable_timeline();
    }

    pub fn take_timeline(&mut self) -> Option<TimelineLogger> {
        self.world.net.take_timeline()
    }

    pub fn world(&self) -> &NetWorld {
        &self.world
    }

    #[tracing::instrument(skip(self), fields(protocol = ?self.cfg.protocol, seed = self.cfg.seed))]
    pub fn run(&mut self) -> RunReport {
        let until = SimTime::from_units(self.cfg.max_time_units);
        info!(
            messages = self.cfg.num_messages,
            loss = self.cfg.loss_prob,
            corrupt = self.cfg.corrupt_prob,
            "▶️  开始仿真"
        );
        self.sim.run_until(until, &mut self.world);
        let truncated = self.sim.pending() > 0;

        let w = &self.world;
        let delivered = w
            .net
            .delivered_to(EntityId::B)
            .map(|p| String::from_utf8_lossy(p).into_owned())
            .collect::<Vec<_>>();
        info!(
            delivered = delivered.len(),
            generated = w.traffic.generated,
            final_time = %w.last_event_at,
            truncated,
            "✅ 仿真结束"
        );

        RunReport {
            protocol: self.cfg.protocol,
            messages_generated: w.traffic.generated,
            messages_accepted: w.traffic.accepted,
            delivered,
            stats: w.stats.clone(),
            report: w.stats.report(self.cfg.protocol),
            channel: w.net.channel.stats.clone(),
            final_time: w.last_event_at.as_units(),
            events: self.sim.executed(),
            truncated,
        }
    }
}

/// 按配置运行一次完整仿真。
pub fn run(cfg: &SimConfig) -> Result<RunReport, ConfigError> {
    let mut scenario = Scenario::new(cfg.clone())?;
    Ok(scenario.run())
}
