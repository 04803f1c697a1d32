use crate::sim::{Event, SimTime, Simulator, World};
use std::any::Any;

/// Records which handler ran when; stands in for the network world.
#[derive(Default)]
struct CallLog {
    ticks: usize,
    calls: Vec<(&'static str, SimTime)>,
}

impl World for CallLog {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, _sim: &mut Simulator) {
        self.ticks += 1;
    }
}

fn log(world: &mut dyn World) -> &mut CallLog {
    world
        .as_any_mut()
        .downcast_mut::<CallLog>()
        .expect("world must be CallLog")
}

struct Handler(&'static str);

impl Event for Handler {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        log(world).calls.push((self.0, sim.now()));
    }
}

/// Handles an event and reacts with another one at the same instant, the way
/// an arrival handler emits an ACK.
struct HandlerThenReact {
    name: &'static str,
    reaction: &'static str,
}

impl Event for HandlerThenReact {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        log(world).calls.push((self.name, sim.now()));
        sim.schedule(sim.now(), Handler(self.reaction));
    }
}

fn names(w: &CallLog) -> Vec<&'static str> {
    w.calls.iter().map(|(n, _)| *n).collect()
}

#[test]
fn events_run_in_time_order_then_scheduling_order() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime(10), Handler("arrive_b"));
    sim.schedule(SimTime(5), Handler("app_send"));
    sim.schedule(SimTime(10), Handler("timer"));

    let mut world = CallLog::default();
    sim.run(&mut world);

    assert_eq!(names(&world), vec!["app_send", "arrive_b", "timer"]);
    assert_eq!(world.ticks, 3);
    assert_eq!(sim.now(), SimTime(10));
    assert_eq!(sim.executed(), 3);
}

#[test]
fn reaction_scheduled_now_runs_after_the_current_handler() {
    let mut sim = Simulator::default();
    sim.schedule(
        SimTime::ZERO,
        HandlerThenReact {
            name: "arrive_b",
            reaction: "arrive_a",
        },
    );

    let mut world = CallLog::default();
    sim.run(&mut world);

    assert_eq!(names(&world), vec!["arrive_b", "arrive_a"]);
    assert_eq!(sim.now(), SimTime::ZERO);
}

#[test]
fn scheduling_in_the_past_is_clamped_to_now() {
    let mut sim = Simulator::default();
    let mut world = CallLog::default();
    sim.run_until(SimTime(100), &mut world);

    sim.schedule(SimTime(3), Handler("late"));
    sim.run(&mut world);
    assert_eq!(world.calls, vec![("late", SimTime(100))]);
}

#[test]
fn schedule_in_is_relative_to_now() {
    let mut sim = Simulator::default();
    let mut world = CallLog::default();
    sim.run_until(SimTime(40), &mut world);
    sim.schedule_in(SimTime(20), Handler("timer"));
    sim.run(&mut world);
    assert_eq!(world.calls, vec![("timer", SimTime(60))]);
}

#[test]
fn run_until_leaves_later_events_pending() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime::ZERO, Handler("a"));
    sim.schedule(SimTime(5), Handler("b"));
    sim.schedule(SimTime(10), Handler("c"));

    let mut world = CallLog::default();
    sim.run_until(SimTime(5), &mut world);

    assert_eq!(names(&world), vec!["a", "b"]);
    assert_eq!(sim.pending(), 1);
    assert_eq!(sim.now(), SimTime(5));

    sim.run(&mut world);
    assert_eq!(names(&world), vec!["a", "b", "c"]);
    assert_eq!(sim.pending(), 0);
}

#[test]
fn run_until_advances_time_even_if_there_are_no_events() {
    let mut sim = Simulator::default();
    let mut world = CallLog::default();

    sim.run_until(SimTime(7), &mut world);
    assert_eq!(sim.now(), SimTime(7));
    assert_eq!(world.ticks, 0);
}
