//! 网络模拟模块
//!
//! 协议引擎之外的协作者：数据包与消息、不可靠信道、实体定时器、
//! 统计累加器，以及把它们交给协议引擎使用的 `NetApi`。

mod api;
mod channel;
mod deliver_packet;
mod id;
mod net_world;
mod network;
mod network_timeline;
mod packet;
mod proto_bridge;
mod stats;
mod timer;

pub use api::{NetApi, NetCtx};
pub use channel::{Channel, ChannelConfig, ChannelStats, CorruptedField, PacketFate};
pub use deliver_packet::PacketArrival;
pub use id::EntityId;
pub use net_world::{NetWorld, Traffic};
pub use network::{AppDelivery, Network};
pub use packet::{MAX_DATA_SIZE, Message, Packet};
pub(crate) use proto_bridge::net_world;
pub use stats::{LegacyCounters, ReceiverStats, SenderStats, Stats, StatsReport};
pub use timer::{EntityTimer, TimerExpiry};
