use crate::net::{ChannelConfig, EntityId, EntityTimer, NetWorld, Network, TimerExpiry, Traffic};
use crate::proto::GoBackN;
use crate::scenario::message_for;
use crate::sim::{SimTime, Simulator};

#[test]
fn restart_invalidates_the_previous_generation() {
    let mut t = EntityTimer::default();
    let first = t.start(SimTime(10));
    let second = t.start(SimTime(30));
    assert_ne!(first, second);

    assert!(!t.fire(first), "stale expiry must not fire");
    assert!(t.is_running());
    assert!(t.fire(second));
    assert!(!t.is_running());
    assert!(!t.fire(second), "fires at most once");
}

#[test]
fn stop_is_idempotent_and_cancels_pending_expiry() {
    let mut t = EntityTimer::default();
    assert!(!t.stop());

    let generation = t.start(SimTime(5));
    assert_eq!(t.deadline(), Some(SimTime(5)));
    assert!(t.stop());
    assert!(!t.stop());
    assert!(!t.fire(generation));
    assert_eq!(t.deadline(), None);
}

fn world(loss_prob: f64) -> NetWorld {
    let net = Network::new(ChannelConfig {
        loss_prob,
        corrupt_prob: 0.0,
        seed: 3,
    });
    NetWorld::new(net, Box::new(GoBackN::default()), Traffic::default())
}

#[test]
fn stale_expiry_event_does_not_reach_the_protocol() {
    let mut sim = Simulator::default();
    let mut w = world(0.0);

    sim.schedule(
        SimTime::from_units(5),
        TimerExpiry {
            entity: EntityId::A,
            generation: 99,
        },
    );
    sim.run(&mut w);

    assert_eq!(w.stats.sender.timeouts, 0);
    assert_eq!(sim.executed(), 1);
}

#[test]
fn expiry_on_a_silent_channel_triggers_go_back_n_retransmission() {
    let mut sim = Simulator::default();
    let mut w = world(1.0);

    for i in 0..3 {
        w.with_transport(&mut sim, |t, api, stats| t.on_send(message_for(i), api, stats))
            .expect("accepted");
    }
    assert!(w.net.timer(EntityId::A).is_running());

    sim.run_until(SimTime::from_units(20), &mut w);
    assert_eq!(w.stats.sender.timeouts, 1);
    assert_eq!(w.stats.sender.retransmissions, 3);
    // 重传后定时器被重新启动
    assert_eq!(
        w.net.timer(EntityId::A).deadline(),
        Some(SimTime::from_units(40))
    );
}

#[test]
fn ack_before_deadline_stops_the_timer() {
    let mut sim = Simulator::default();
    let mut w = world(0.0);

    w.with_transport(&mut sim, |t, api, stats| t.on_send(message_for(0), api, stats))
        .expect("accepted");
    sim.run(&mut w);

    assert_eq!(w.stats.sender.timeouts, 0);
    assert_eq!(w.stats.sender.acks_ok, 1);
    assert!(!w.net.timer(EntityId::A).is_running());
    assert_eq!(w.net.delivered_to(EntityId::B).count(), 1);
}
