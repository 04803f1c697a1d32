//! 数据包到达事件
//!
//! 信道把数据包送到对端实体时触发，分派给该实体的协议处理函数。

use tracing::{debug, trace};

use super::id::EntityId;
use super::packet::Packet;
use super::proto_bridge::net_world;
use crate::sim::{Event, Simulator, World};
use crate::timeline::TimelineEventKind;

/// 事件：把一个 packet 交给实体 `to` 处理。
#[derive(Debug)]
pub struct PacketArrival {
    pub to: EntityId,
    pub pkt: Packet,
}

impl Event for PacketArrival {
    #[tracing::instrument(level = "debug", skip(self, sim, world), fields(to = %self.to, seq = self.pkt.sequence_number))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let PacketArrival { to, pkt } = *self;
        debug!(now = %sim.now(), ack = pkt.ack_number, len = pkt.payload.len(), "📨 数据包到达");

        let w = net_world(world);
        w.net.record(
            sim.now(),
            TimelineEventKind::NetworkArrive {
                at: to,
                seq: pkt.sequence_number,
                ack: pkt.ack_number,
                valid: pkt.is_valid(),
            },
        );
        w.with_transport(sim, |transport, api, stats| {
            transport.on_arrival(to, pkt, api, stats);
        });
        trace!("PacketArrival::execute 完成");
    }
}
