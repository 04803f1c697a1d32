//! Helpers for reaching the protocol engines from the simulation world.

use crate::proto::ReliableTransport;
use crate::sim::{Simulator, World};

use super::{NetApi, NetCtx, NetWorld, Stats};

pub(crate) fn net_world(world: &mut dyn World) -> &mut NetWorld {
    world
        .as_any_mut()
        .downcast_mut::<NetWorld>()
        .expect("world must be NetWorld")
}

impl NetWorld {
    /// Run `f` with the transport, a `NetApi` over this world's network, and
    /// the statistics accumulator. The three are disjoint fields, so no
    /// take/put-back dance is needed.
    pub(crate) fn with_transport<F, R>(&mut self, sim: &mut Simulator, f: F) -> R
    where
        F: FnOnce(&mut dyn ReliableTransport, &mut dyn NetApi, &mut Stats) -> R,
    {
        let NetWorld {
            net,
            transport,
            stats,
            ..
        } = self;
        let mut ctx = NetCtx::new(net, sim);
        f(&mut **transport, &mut ctx, stats)
    }
}
