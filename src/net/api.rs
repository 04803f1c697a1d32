//! Network-facing API used by the protocol engines.

use crate::sim::{SimTime, Simulator};

use super::{EntityId, Network, Packet};

/// The collaborator contract the protocol core consumes.
///
/// Everything the engines do to the outside world goes through here, so a
/// recording double can stand in for the simulated network in unit tests.
pub trait NetApi {
    /// Hand a packet to the channel. Loss, corruption and delay happen there.
    fn send_to_network(&mut self, from: EntityId, pkt: Packet);
    /// Pass a validated, in-order payload up to the application layer.
    fn deliver_to_application(&mut self, at: EntityId, payload: &[u8]);
    /// Arm the entity's timer; replaces any pending deadline.
    fn start_timer(&mut self, entity: EntityId, duration: SimTime);
    /// Cancel the entity's timer; no-op when it is not running.
    fn stop_timer(&mut self, entity: EntityId);
    fn now(&self) -> SimTime;
}

/// Borrowed view of the network plus the simulator clock for one event.
pub struct NetCtx<'a> {
    pub(crate) net: &'a mut Network,
    pub(crate) sim: &'a mut Simulator,
}

impl<'a> NetCtx<'a> {
    pub fn new(net: &'a mut Network, sim: &'a mut Simulator) -> Self {
        Self { net, sim }
    }
}

impl NetApi for NetCtx<'_> {
    fn send_to_network(&mut self, from: EntityId, pkt: Packet) {
        self.net.transmit(from, pkt, self.sim);
    }

    fn deliver_to_application(&mut self, at: EntityId, payload: &[u8]) {
        self.net.deliver_up(at, payload, self.sim.now());
    }

    fn start_timer(&mut self, entity: EntityId, duration: SimTime) {
        self.net.start_timer(entity, duration, self.sim);
    }

    fn stop_timer(&mut self, entity: EntityId) {
        self.net.stop_timer(entity, self.sim.now());
    }

    fn now(&self) -> SimTime {
        self.sim.now()
    }
}
